//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Donor browsing and registration commands.
#[derive(Debug, Subcommand)]
pub enum DonorsCommand {
    /// List donors, optionally restricted to a blood group
    List {
        /// Only show available donors of this blood group
        #[arg(short, long, value_enum)]
        group: Option<BloodGroupArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Find donors near a location
    Near {
        /// Location to search for (case-insensitive substring)
        location: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List donors whose blood group matches an urgent request
    Urgent {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Register a user as a donor
    Register {
        /// The user id to register
        user: String,
    },
}

/// Blood request commands.
#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// List active blood requests, newest first
    List {
        /// Only show requests for this blood group
        #[arg(short, long, value_enum)]
        group: Option<BloodGroupArg>,

        /// Only show urgent requests
        #[arg(short, long)]
        urgent: bool,

        /// Only show requests whose location matches this query
        #[arg(short, long)]
        location: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Submit a new blood request
    Create(CreateRequestArgs),

    /// List requests posted by a user, newest first
    Mine {
        /// The requester's user id
        user: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Mark a request as fulfilled
    Fulfill {
        /// The request id
        id: String,
    },

    /// Withdraw a request
    Cancel {
        /// The request id
        id: String,
    },
}

/// Arguments for submitting a blood request.
#[derive(Debug, Args)]
pub struct CreateRequestArgs {
    /// Name of the patient needing blood
    #[arg(long)]
    pub patient: String,

    /// Blood group needed
    #[arg(short, long, value_enum)]
    pub group: BloodGroupArg,

    /// Units of blood needed (1-10)
    #[arg(short, long, default_value = "1")]
    pub units: u32,

    /// Hospital where the patient is admitted
    #[arg(long)]
    pub hospital: String,

    /// Contact phone number for the requester
    #[arg(long)]
    pub phone: String,

    /// Requester's user id
    #[arg(long)]
    pub requester: Option<String>,

    /// Area or constituency of the hospital
    #[arg(short, long)]
    pub location: Option<String>,

    /// Mark the request as urgent
    #[arg(long)]
    pub urgent: bool,

    /// How urgent the request is (requires --urgent)
    #[arg(long, value_enum)]
    pub urgency: Option<UrgencyArg>,

    /// Free-form notes for donors
    #[arg(long)]
    pub notes: Option<String>,
}

/// Profile commands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show a user's profile, requests, and appointments
    Show {
        /// The user id
        user: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Check whether a user can donate today
    Eligibility {
        /// The user id
        user: String,
    },

    /// Record that a user donated today
    LogDonation {
        /// The user id
        user: String,
    },

    /// Book a donation appointment
    Schedule {
        /// The user id
        user: String,

        /// Appointment date (e.g. "15 Sep 2026", "2026-09-15")
        date: String,

        /// Donation site
        #[arg(short, long)]
        site: Option<String>,
    },
}

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Blood group argument for filtering and request creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BloodGroupArg {
    /// A positive
    #[value(name = "a+")]
    APositive,
    /// A negative
    #[value(name = "a-")]
    ANegative,
    /// B positive
    #[value(name = "b+")]
    BPositive,
    /// B negative
    #[value(name = "b-")]
    BNegative,
    /// AB positive
    #[value(name = "ab+")]
    AbPositive,
    /// AB negative
    #[value(name = "ab-")]
    AbNegative,
    /// O positive
    #[value(name = "o+")]
    OPositive,
    /// O negative
    #[value(name = "o-")]
    ONegative,
}

impl From<BloodGroupArg> for crate::model::BloodGroup {
    fn from(arg: BloodGroupArg) -> Self {
        match arg {
            BloodGroupArg::APositive => Self::APositive,
            BloodGroupArg::ANegative => Self::ANegative,
            BloodGroupArg::BPositive => Self::BPositive,
            BloodGroupArg::BNegative => Self::BNegative,
            BloodGroupArg::AbPositive => Self::AbPositive,
            BloodGroupArg::AbNegative => Self::AbNegative,
            BloodGroupArg::OPositive => Self::OPositive,
            BloodGroupArg::ONegative => Self::ONegative,
        }
    }
}

/// Urgency argument for request creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UrgencyArg {
    /// Needed within a week
    Low,
    /// Needed within days
    Medium,
    /// Needed within 24 hours
    High,
    /// Needed immediately
    Critical,
}

impl From<UrgencyArg> for crate::model::UrgencyLevel {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Low => Self::Low,
            UrgencyArg::Medium => Self::Medium,
            UrgencyArg::High => Self::High,
            UrgencyArg::Critical => Self::Critical,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
