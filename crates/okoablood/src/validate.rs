//! Blood request validation.
//!
//! Checks applied before a request is accepted into the store, mirroring
//! the constraints of the request form. Violations surface as
//! [`Error::RequestValidation`] values, never panics.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::BloodRequest;

/// Largest number of units a single request may ask for.
pub const MAX_UNITS: u32 = 10;

/// Kenyan mobile numbers: optional +254/254 country code or leading 0,
/// then a 7xx or 1xx prefix and eight more digits.
const PHONE_PATTERN: &str = r"^(?:\+254|254|0)(?:7|1)\d{8}$";

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("invalid phone pattern"))
}

/// Check whether a string is a plausible Kenyan mobile number.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone.trim())
}

/// Validate a request before it is stored.
///
/// # Errors
///
/// Returns a [`Error::RequestValidation`] naming the first offending field:
/// blank patient name, missing or out-of-range unit count, blank hospital,
/// malformed contact phone, or an urgent request without an urgency level.
pub fn validate_request(request: &BloodRequest) -> Result<()> {
    if request.patient_name.trim().is_empty() {
        return Err(Error::request_validation(
            "patient_name",
            "must not be blank",
        ));
    }

    match request.units {
        None => {
            return Err(Error::request_validation("units", "unit count is required"));
        }
        Some(units) if units == 0 || units > MAX_UNITS => {
            return Err(Error::request_validation(
                "units",
                format!("must be between 1 and {MAX_UNITS}, got {units}"),
            ));
        }
        Some(_) => {}
    }

    if request.hospital.trim().is_empty() {
        return Err(Error::request_validation("hospital", "must not be blank"));
    }

    if !is_valid_phone(&request.requester_phone) {
        return Err(Error::request_validation(
            "requester_phone",
            "not a Kenyan mobile number",
        ));
    }

    if request.urgent && request.urgency_level.is_none() {
        return Err(Error::request_validation(
            "urgency_level",
            "required for urgent requests",
        ));
    }

    Ok(())
}
