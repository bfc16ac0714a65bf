//! Hospital map aggregation.
//!
//! Rolls active blood requests up into one marker per hospital for the map
//! view. Markers are recomputed on every load and never persisted.

use serde::{Deserialize, Serialize};

use crate::filters;
use crate::geocode::{self, Coordinates};
use crate::model::BloodRequest;

/// One map pin: a hospital with its open requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalMarker {
    /// Trimmed hospital name.
    pub hospital_name: String,

    /// Approximate hospital coordinates.
    pub coordinates: Coordinates,

    /// Number of requests at this hospital.
    pub request_count: usize,

    /// The constituent requests.
    pub requests: Vec<BloodRequest>,
}

/// Build one marker per hospital from the given requests.
///
/// Requests with blank hospital names are skipped; hospitals appear in
/// first-seen order. Every marker gets a coordinate, real or fallback, so
/// the count of markers equals the count of distinct non-blank hospitals.
#[must_use]
pub fn hospital_markers(requests: &[BloodRequest]) -> Vec<HospitalMarker> {
    filters::group_by_hospital(requests)
        .into_iter()
        .map(|(hospital_name, requests)| {
            let coordinates = geocode::locate(&hospital_name);
            HospitalMarker {
                hospital_name,
                coordinates,
                request_count: requests.len(),
                requests,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BloodGroup;

    fn request(hospital: &str) -> BloodRequest {
        BloodRequest::new("Patient", BloodGroup::APositive, hospital)
    }

    #[test]
    fn test_markers_grouped_by_hospital() {
        let requests = vec![
            request("Nairobi Hospital"),
            request("Karen Hospital"),
            request("Nairobi Hospital"),
        ];

        let markers = hospital_markers(&requests);
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].hospital_name, "Nairobi Hospital");
        assert_eq!(markers[0].request_count, 2);
        assert_eq!(markers[0].requests.len(), 2);
        assert_eq!(markers[1].hospital_name, "Karen Hospital");
        assert_eq!(markers[1].request_count, 1);
    }

    #[test]
    fn test_markers_skip_blank_hospitals() {
        let requests = vec![request(""), request("   "), request("Mater Hospital")];
        let markers = hospital_markers(&requests);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].hospital_name, "Mater Hospital");
    }

    #[test]
    fn test_marker_coordinates_match_geocoder() {
        let requests = vec![request("Kenyatta National Hospital")];
        let markers = hospital_markers(&requests);
        assert_eq!(
            markers[0].coordinates,
            geocode::locate("Kenyatta National Hospital")
        );
    }

    #[test]
    fn test_unknown_hospital_still_gets_marker() {
        let requests = vec![request("Unknown Rural Clinic")];
        let markers = hospital_markers(&requests);
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_trimmed_name_on_marker() {
        let requests = vec![request("  Coptic Hospital  ")];
        let markers = hospital_markers(&requests);
        assert_eq!(markers[0].hospital_name, "Coptic Hospital");
    }

    #[test]
    fn test_no_requests_no_markers() {
        assert!(hospital_markers(&[]).is_empty());
    }
}
