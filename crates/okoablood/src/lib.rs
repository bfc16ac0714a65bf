//! `okoablood` - Coordinate blood donations between donors and patients
//!
//! This library provides the core functionality for browsing blood requests
//! and donors, checking donation eligibility, and placing hospital demand on
//! a map.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dates;
pub mod eligibility;
pub mod error;
pub mod filters;
pub mod gateway;
pub mod geocode;
pub mod logging;
pub mod map;
pub mod model;
pub mod profile;
pub mod store;
pub mod validate;

pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{DonationGateway, SqliteGateway};
pub use logging::init_logging;
pub use model::{BloodGroup, BloodRequest, DonationEligibility, Donor, RequestStatus, User};
pub use profile::{Profile, ProfileService};
pub use store::{Store, StoreStats};
