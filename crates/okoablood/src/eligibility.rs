//! Donation eligibility calculation.
//!
//! Donors must wait a cooldown period (90 days by default) between
//! donations. Eligibility is derived on demand from the donor flag and the
//! free-form last-donation date; nothing here is persisted.

use chrono::{DateTime, Utc};

use crate::dates;
use crate::model::DonationEligibility;

/// The default minimum interval between donations, in days.
pub const DEFAULT_COOLDOWN_DAYS: i64 = 90;

/// Check eligibility against the current time and the default cooldown.
#[must_use]
pub fn check(is_donor: bool, last_donation_date: Option<&str>) -> DonationEligibility {
    check_at(is_donor, last_donation_date, Utc::now(), DEFAULT_COOLDOWN_DAYS)
}

/// Check eligibility at a given instant with a given cooldown.
///
/// Rules, in order:
/// - a user who is not a donor is never eligible;
/// - a donor with no date, or a date that does not parse, is treated as
///   having never donated and is eligible;
/// - otherwise the donor is eligible once `cooldown_days` whole days have
///   elapsed, and must wait the remainder until then.
///
/// A donation date in the future counts as zero elapsed days, so
/// `days_remaining` never exceeds `cooldown_days`.
#[must_use]
pub fn check_at(
    is_donor: bool,
    last_donation_date: Option<&str>,
    now: DateTime<Utc>,
    cooldown_days: i64,
) -> DonationEligibility {
    if !is_donor {
        return DonationEligibility::waiting(0);
    }

    let Some(last_donation) = last_donation_date.and_then(dates::parse) else {
        return DonationEligibility::eligible();
    };

    let days_elapsed = (now - last_donation).num_days().max(0);
    if days_elapsed >= cooldown_days {
        DonationEligibility::eligible()
    } else {
        DonationEligibility::waiting(cooldown_days - days_elapsed)
    }
}
