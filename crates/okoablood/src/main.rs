//! `okoa` - CLI for okoablood
//!
//! This binary provides the command-line interface for browsing blood
//! requests and donors, managing profiles, and viewing hospital demand.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use okoablood::cli::{
    Cli, Command, ConfigCommand, CreateRequestArgs, DonorsCommand, MapCommand, OutputFormat,
    ProfileCommand, RequestsCommand, StatsCommand,
};
use okoablood::model::{BloodRequest, Donor, RequestStatus};
use okoablood::{filters, init_logging, map, Config, DonationGateway, ProfileService, SqliteGateway, Store};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Config commands don't need the store
    let command = match cli.command {
        Command::Config(config_cmd) => return handle_config(&config, config_cmd),
        other => other,
    };

    let store = Store::open(config.database_path())?;
    let service = ProfileService::new(SqliteGateway::new(store))
        .with_retry_attempts(config.gateway.retry_attempts)
        .with_cooldown_days(config.eligibility.cooldown_days);

    match command {
        Command::Donors(donors_cmd) => handle_donors(&config, &service, donors_cmd).await,
        Command::Requests(requests_cmd) => handle_requests(&service, requests_cmd).await,
        Command::Profile(profile_cmd) => handle_profile(&service, profile_cmd).await,
        Command::Map(map_cmd) => handle_map(&service, &map_cmd).await,
        Command::Stats(stats_cmd) => handle_stats(&service, &stats_cmd).await,
        Command::Config(_) => Ok(()),
    }
}

async fn handle_donors(
    config: &Config,
    service: &ProfileService<SqliteGateway>,
    cmd: DonorsCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        DonorsCommand::List { group, format } => {
            let donors = match group {
                Some(group) => service.gateway().available_donors(group.into()).await?,
                None => service.gateway().donors().await?,
            };
            print_donors(&donors, format)?;
        }
        DonorsCommand::Near { location, format } => {
            let query = location.unwrap_or_else(|| config.map.default_location.clone());
            let donors = service.gateway().donors_near(&query).await?;
            print_donors(&donors, format)?;
        }
        DonorsCommand::Urgent { format } => {
            let requests = service.gateway().urgent_requests().await?;
            let groups = filters::urgent_blood_groups(&requests);
            let donors = filters::donors_in_groups(service.gateway().donors().await?, &groups);
            print_donors(&donors, format)?;
        }
        DonorsCommand::Register { user } => {
            let donor = service.register_donor(&user).await?;
            println!(
                "Registered {} ({}) as an available donor.",
                donor.name, donor.blood_group
            );
        }
    }
    Ok(())
}

async fn handle_requests(
    service: &ProfileService<SqliteGateway>,
    cmd: RequestsCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        RequestsCommand::List {
            group,
            urgent,
            location,
            format,
        } => {
            let mut requests = service.gateway().active_requests().await?;
            requests = filters::requests_by_blood_group(requests, group.map(Into::into));
            if urgent {
                requests = filters::urgent_requests(requests);
            }
            if let Some(query) = location {
                requests = filters::search_requests_by_location(requests, &query);
            }
            print_requests(&requests, format)?;
        }
        RequestsCommand::Create(args) => {
            let request = request_from_args(args);
            let id = service.gateway().create_request(&request).await?;
            println!("Created request {id}");
        }
        RequestsCommand::Mine { user, format } => {
            let requests = service.gateway().requests_by_user(&user).await?;
            print_requests(&requests, format)?;
        }
        RequestsCommand::Fulfill { id } => {
            service
                .gateway()
                .update_request_status(&id, RequestStatus::Fulfilled)
                .await?;
            println!("Request {id} marked fulfilled.");
        }
        RequestsCommand::Cancel { id } => {
            service
                .gateway()
                .update_request_status(&id, RequestStatus::Cancelled)
                .await?;
            println!("Request {id} cancelled.");
        }
    }
    Ok(())
}

fn request_from_args(args: CreateRequestArgs) -> BloodRequest {
    let mut request = BloodRequest::new(args.patient, args.group.into(), args.hospital);
    request.units = Some(args.units);
    request.requester_phone = args.phone;
    request.requester_id = args.requester;
    request.location = args.location.unwrap_or_default();
    request.urgent = args.urgent;
    request.urgency_level = args.urgency.map(Into::into);
    request.notes = args.notes;
    request
}

async fn handle_profile(
    service: &ProfileService<SqliteGateway>,
    cmd: ProfileCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ProfileCommand::Show { user, json } => {
            let profile = service.load(&user).await?;
            if json {
                let value = serde_json::json!({
                    "user": profile.user,
                    "eligibility": profile.eligibility,
                    "requests": profile.requests,
                    "appointments": profile.appointments,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{} <{}>", profile.user.name, profile.user.email);
                println!("  Phone:       {}", profile.user.phone);
                println!(
                    "  Blood group: {}",
                    profile
                        .user
                        .blood_group
                        .map_or_else(|| "not recorded".to_string(), |g| g.to_string())
                );
                println!("  Location:    {}", profile.user.location);
                println!(
                    "  Donor:       {}",
                    if profile.user.is_donor { "yes" } else { "no" }
                );
                if let Some(date) = &profile.user.last_donation_date {
                    println!("  Last donated: {date}");
                }
                print_eligibility(&profile.eligibility);
                println!("  Requests:     {}", profile.requests.len());
                println!("  Appointments: {}", profile.appointments.len());
            }
        }
        ProfileCommand::Eligibility { user } => {
            let profile = service.load(&user).await?;
            print_eligibility(&profile.eligibility);
        }
        ProfileCommand::LogDonation { user } => {
            let eligibility = service.log_donation(&user).await?;
            println!("Donation recorded. Thank you!");
            print_eligibility(&eligibility);
        }
        ProfileCommand::Schedule { user, date, site } => {
            let appointment = service.schedule_donation(&user, &date, site).await?;
            println!(
                "Appointment booked for {}{}.",
                appointment.scheduled_for.format("%d %b %Y"),
                appointment
                    .site
                    .as_deref()
                    .map_or_else(String::new, |site| format!(" at {site}"))
            );
        }
    }
    Ok(())
}

fn print_eligibility(eligibility: &okoablood::DonationEligibility) {
    if eligibility.is_eligible {
        println!("  Eligible to donate today.");
    } else {
        println!(
            "  Not eligible yet: {} day(s) remaining.",
            eligibility.days_remaining
        );
    }
}

async fn handle_map(
    service: &ProfileService<SqliteGateway>,
    cmd: &MapCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let requests = service.gateway().active_requests().await?;
    let markers = map::hospital_markers(&requests);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&markers)?);
    } else if markers.is_empty() {
        println!("No hospitals with open requests.");
    } else {
        for marker in &markers {
            println!(
                "{} ({:.4}, {:.4}): {} request(s)",
                marker.hospital_name,
                marker.coordinates.latitude,
                marker.coordinates.longitude,
                marker.request_count
            );
        }
    }
    Ok(())
}

async fn handle_stats(
    service: &ProfileService<SqliteGateway>,
    cmd: &StatsCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = service.gateway().stats().await?;

    if cmd.json {
        let value = serde_json::json!({
            "users": stats.users,
            "donors": stats.donors,
            "active_requests": stats.active_requests,
            "urgent_requests": stats.urgent_requests,
            "appointments": stats.appointments,
            "db_size_bytes": stats.db_size_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("okoablood stats");
        println!("---------------");
        println!("Users:           {}", stats.users);
        println!("Donors:          {}", stats.donors);
        println!("Active requests: {}", stats.active_requests);
        println!("Urgent requests: {}", stats.urgent_requests);
        println!("Appointments:    {}", stats.appointments);
        println!("Database size:   {} bytes", stats.db_size_bytes);
    }
    Ok(())
}

fn handle_config(
    config: &Config,
    cmd: ConfigCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Eligibility]");
                println!("  Cooldown days:  {}", config.eligibility.cooldown_days);
                println!();
                println!("[Gateway]");
                println!("  Retry attempts: {}", config.gateway.retry_attempts);
                println!();
                println!("[Map]");
                println!(
                    "  Centre:         ({:.4}, {:.4})",
                    config.map.center_latitude, config.map.center_longitude
                );
                println!("  Default search: {}", config.map.default_location);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

fn print_donors(
    donors: &[Donor],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(donors)?),
        OutputFormat::Plain => {
            for donor in donors {
                println!(
                    "{} ({}) - {} - {}",
                    donor.name, donor.blood_group, donor.location, donor.phone
                );
            }
        }
        OutputFormat::Table => {
            if donors.is_empty() {
                println!("No donors found.");
                return Ok(());
            }
            println!("{:<24} {:<6} {:<20} {:<14} AVAILABLE", "NAME", "GROUP", "LOCATION", "PHONE");
            for donor in donors {
                println!(
                    "{:<24} {:<6} {:<20} {:<14} {}",
                    donor.name,
                    donor.blood_group.to_string(),
                    donor.location,
                    donor.phone,
                    if donor.is_available { "yes" } else { "no" }
                );
            }
        }
    }
    Ok(())
}

fn print_requests(
    requests: &[BloodRequest],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(requests)?),
        OutputFormat::Plain => {
            for request in requests {
                let urgency = request
                    .urgency_level
                    .map_or_else(String::new, |level| format!(" [{level}]"));
                println!(
                    "{} needs {} at {}{}",
                    request.patient_name, request.blood_group, request.hospital, urgency
                );
            }
        }
        OutputFormat::Table => {
            if requests.is_empty() {
                println!("No requests found.");
                return Ok(());
            }
            println!(
                "{:<36} {:<18} {:<6} {:<6} {:<24} URGENCY",
                "ID", "PATIENT", "GROUP", "UNITS", "HOSPITAL"
            );
            for request in requests {
                println!(
                    "{:<36} {:<18} {:<6} {:<6} {:<24} {}",
                    request.id.as_deref().unwrap_or("-"),
                    request.patient_name,
                    request.blood_group.to_string(),
                    request.units.map_or_else(|| "-".to_string(), |u| u.to_string()),
                    request.hospital,
                    request
                        .urgency_level
                        .map_or_else(|| "-".to_string(), |level| level.to_string())
                );
            }
        }
    }
    Ok(())
}
