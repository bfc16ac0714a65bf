//! Core domain types for okoablood.
//!
//! This module defines the fundamental data structures for users, donors,
//! blood requests, and appointments as they are stored and exchanged.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the eight ABO/Rh blood groups.
///
/// Groups are a closed set: unknown strings fail to parse instead of being
/// carried around as sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodGroup {
    /// A positive.
    #[serde(rename = "A+")]
    APositive,
    /// A negative.
    #[serde(rename = "A-")]
    ANegative,
    /// B positive.
    #[serde(rename = "B+")]
    BPositive,
    /// B negative.
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive.
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB negative.
    #[serde(rename = "AB-")]
    AbNegative,
    /// O positive.
    #[serde(rename = "O+")]
    OPositive,
    /// O negative.
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All blood groups, in the order the request form lists them.
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// The canonical label for this group ("A+", "O-", ...).
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl std::fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = String;

    /// Parse a canonical label. Matching is case-sensitive and exact.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| format!("unknown blood group: {s}"))
    }
}

/// How urgently a blood request needs to be fulfilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyLevel {
    /// Can wait a few days.
    Low,
    /// Needed within 48 hours.
    Medium,
    /// Needed within 24 hours.
    High,
    /// Needed immediately.
    Critical,
}

impl UrgencyLevel {
    /// Human-readable description shown next to the level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Can wait a few days.",
            Self::Medium => "Needed within 48 hours.",
            Self::High => "Needed within 24 hours.",
            Self::Critical => "Needed immediately.",
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for UrgencyLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown urgency level: {other}")),
        }
    }
}

/// Lifecycle state of a blood request.
///
/// Requests are created active and later marked fulfilled or cancelled by
/// their owner; they are never hard-deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Open and visible to donors.
    #[default]
    Active,
    /// Fulfilled by one or more donors.
    Fulfilled,
    /// Withdrawn by the requester.
    Cancelled,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Fulfilled => write!(f, "fulfilled"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown request status: {other}")),
        }
    }
}

/// A registered user of the coordination service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact email.
    pub email: String,

    /// Contact phone number.
    pub phone: String,

    /// Blood group, if the user has recorded one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,

    /// Free-form home location.
    pub location: String,

    /// Whether the user has registered as a donor.
    pub is_donor: bool,

    /// When the user last donated, as originally entered.
    ///
    /// Kept as free text because profiles have accumulated several date
    /// formats; see [`crate::dates::parse`] for the accepted forms.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_donation_date: Option<String>,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new non-donor user with the account created now.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: String::new(),
            blood_group: None,
            location: String::new(),
            is_donor: false,
            last_donation_date: None,
            created_at: Utc::now(),
        }
    }
}

/// A donor document: the contactable subset of a user plus availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donor {
    /// Identifier, shared with the backing user.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Contact phone number.
    pub phone: String,

    /// Blood group the donor offers.
    pub blood_group: BloodGroup,

    /// Free-form location used for nearby searches.
    pub location: String,

    /// Whether the donor can currently be contacted.
    pub is_available: bool,
}

/// A request for blood posted on behalf of a patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloodRequest {
    /// Unique identifier (assigned by the store on creation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Id of the requesting user, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<String>,

    /// Name of the requesting user, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_name: Option<String>,

    /// Phone number donors should call.
    pub requester_phone: String,

    /// Name of the patient needing blood.
    pub patient_name: String,

    /// Blood group needed.
    pub blood_group: BloodGroup,

    /// Number of units needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,

    /// Hospital where the patient is admitted.
    pub hospital: String,

    /// Free-form location of the hospital.
    pub location: String,

    /// Constituency, when the requester provided one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constituency: Option<String>,

    /// Whether the request needs immediate fulfillment.
    pub urgent: bool,

    /// Finer-grained urgency, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<UrgencyLevel>,

    /// Additional notes from the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Lifecycle state.
    pub status: RequestStatus,

    /// When the request was posted.
    pub request_date: DateTime<Utc>,
}

impl BloodRequest {
    /// Create a new active request posted now.
    ///
    /// The id is left unset; the store assigns one on insertion.
    #[must_use]
    pub fn new(
        patient_name: impl Into<String>,
        blood_group: BloodGroup,
        hospital: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            requester_id: None,
            requester_name: None,
            requester_phone: String::new(),
            patient_name: patient_name.into(),
            blood_group,
            units: Some(1),
            hospital: hospital.into(),
            location: String::new(),
            constituency: None,
            urgent: false,
            urgency_level: None,
            notes: None,
            status: RequestStatus::Active,
            request_date: Utc::now(),
        }
    }
}

/// A scheduled donation appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Unique identifier (assigned by the store on creation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The user attending.
    pub user_id: String,

    /// When the donation is scheduled for.
    pub scheduled_for: DateTime<Utc>,

    /// Donation site, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// Whether a donor may donate now, and how long they must otherwise wait.
///
/// Derived on demand from the donor flag and last-donation date; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationEligibility {
    /// Whether the user may donate now.
    pub is_eligible: bool,

    /// Whole days until the user becomes eligible (0 when eligible).
    pub days_remaining: i64,
}

impl DonationEligibility {
    /// Eligibility for a user who may donate now.
    #[must_use]
    pub fn eligible() -> Self {
        Self {
            is_eligible: true,
            days_remaining: 0,
        }
    }

    /// Eligibility for a user who must wait `days_remaining` more days.
    #[must_use]
    pub fn waiting(days_remaining: i64) -> Self {
        Self {
            is_eligible: false,
            days_remaining,
        }
    }
}
