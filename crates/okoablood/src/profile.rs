//! Profile service.
//!
//! Assembles the profile screen's data from the gateway: the user document,
//! their own requests and appointments, and a donation eligibility verdict.
//! Backend fetches are retried a bounded number of times, matching the
//! flaky-network posture of the mobile clients.

use chrono::Utc;
use tracing::info;

use crate::dates;
use crate::eligibility;
use crate::error::{Error, Result};
use crate::gateway::{retry, DonationGateway};
use crate::model::{Appointment, BloodRequest, DonationEligibility, Donor, User};

/// Default number of attempts for profile fetches.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 2;

/// Everything the profile screen shows for one user.
#[derive(Debug, Clone)]
pub struct Profile {
    /// The user document.
    pub user: User,
    /// Donation eligibility verdict for this user.
    pub eligibility: DonationEligibility,
    /// Requests this user has posted, newest first.
    pub requests: Vec<BloodRequest>,
    /// Upcoming and past appointments, soonest first.
    pub appointments: Vec<Appointment>,
}

/// Profile operations over a [`DonationGateway`].
#[derive(Debug)]
pub struct ProfileService<G> {
    gateway: G,
    retry_attempts: u32,
    cooldown_days: i64,
}

impl<G: DonationGateway> ProfileService<G> {
    /// Create a profile service with the default retry and cooldown settings.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            cooldown_days: eligibility::DEFAULT_COOLDOWN_DAYS,
        }
    }

    /// Override the number of fetch attempts.
    #[must_use]
    pub fn with_retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts.max(1);
        self
    }

    /// Override the donation cooldown period.
    #[must_use]
    pub fn with_cooldown_days(mut self, days: i64) -> Self {
        self.cooldown_days = days;
        self
    }

    /// Access the underlying gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Load a user's full profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the user does not exist, or
    /// [`Error::RetriesExhausted`] if the backend keeps failing.
    pub async fn load(&self, user_id: &str) -> Result<Profile> {
        let user = retry("load user profile", self.retry_attempts, || {
            self.gateway.get_user(user_id)
        })
        .await?
        .ok_or_else(|| Error::not_found("user", user_id))?;

        let requests = retry("load user requests", self.retry_attempts, || {
            self.gateway.requests_by_user(user_id)
        })
        .await?;

        let appointments = retry("load appointments", self.retry_attempts, || {
            self.gateway.appointments_by_user(user_id)
        })
        .await?;

        let eligibility = eligibility::check_at(
            user.is_donor,
            user.last_donation_date.as_deref(),
            Utc::now(),
            self.cooldown_days,
        );

        Ok(Profile {
            user,
            eligibility,
            requests,
            appointments,
        })
    }

    /// Record that the user donated today.
    ///
    /// Stamps the profile with today's date, which restarts the cooldown.
    /// Returns the eligibility verdict after the donation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the user does not exist.
    pub async fn log_donation(&self, user_id: &str) -> Result<DonationEligibility> {
        let mut user = self
            .gateway
            .get_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user", user_id))?;

        user.last_donation_date = Some(dates::format_today());
        user.is_donor = true;
        self.gateway.update_user(&user).await?;

        info!("Logged donation for user {}", user_id);
        Ok(eligibility::check_at(
            true,
            user.last_donation_date.as_deref(),
            Utc::now(),
            self.cooldown_days,
        ))
    }

    /// Book a donation appointment for the user.
    ///
    /// The date accepts the same free-form inputs as last-donation dates.
    /// Returns the stored appointment with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the user does not exist, or a
    /// validation error if the date cannot be parsed.
    pub async fn schedule_donation(
        &self,
        user_id: &str,
        date: &str,
        site: Option<String>,
    ) -> Result<Appointment> {
        let user = self
            .gateway
            .get_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user", user_id))?;

        let scheduled_for = dates::parse(date).ok_or_else(|| {
            Error::request_validation("scheduled_for", format!("unrecognized date: {date}"))
        })?;

        let mut appointment = Appointment {
            id: None,
            user_id: user.id,
            scheduled_for,
            site,
        };
        let id = self.gateway.create_appointment(&appointment).await?;
        appointment.id = Some(id);

        info!("Scheduled donation for user {} on {}", user_id, date);
        Ok(appointment)
    }

    /// Register the user as a donor.
    ///
    /// Publishes a donor document built from the profile and marks the
    /// profile as a donor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the user does not exist, or a
    /// validation error if the profile has no blood group recorded.
    pub async fn register_donor(&self, user_id: &str) -> Result<Donor> {
        let mut user = self
            .gateway
            .get_user(user_id)
            .await?
            .ok_or_else(|| Error::not_found("user", user_id))?;

        let blood_group = user.blood_group.ok_or_else(|| {
            Error::request_validation("blood_group", "profile has no blood group recorded")
        })?;

        let donor = Donor {
            id: user.id.clone(),
            name: user.name.clone(),
            phone: user.phone.clone(),
            blood_group,
            location: user.location.clone(),
            is_available: true,
        };
        self.gateway.put_donor(&donor).await?;

        user.is_donor = true;
        self.gateway.update_user(&user).await?;

        info!("Registered user {} as donor", user_id);
        Ok(donor)
    }
}
