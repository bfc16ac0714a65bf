//! Static hospital geocoding.
//!
//! Maps hospital names to approximate coordinates via a compiled table of
//! known Nairobi hospitals. Unknown names get a deterministic pseudo-offset
//! from the city center so the same name always lands on the same point.
//! This is a placeholder for a real geocoding service, which is out of
//! scope.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// Nairobi city center, the anchor for fallback coordinates.
pub const NAIROBI_CENTER: Coordinates = Coordinates {
    latitude: -1.2921,
    longitude: 36.8219,
};

/// Known Nairobi hospitals keyed by normalized (lowercased, trimmed) name.
///
/// Aliases share coordinates with their full names (e.g. "knh").
const HOSPITAL_LOCATIONS: &[(&str, Coordinates)] = &[
    ("kenyatta national hospital", Coordinates { latitude: -1.3014, longitude: 36.7897 }),
    ("knh", Coordinates { latitude: -1.3014, longitude: 36.7897 }),
    ("mater misericordiae hospital", Coordinates { latitude: -1.2800, longitude: 36.8000 }),
    ("mater hospital", Coordinates { latitude: -1.2800, longitude: 36.8000 }),
    ("nairobi hospital", Coordinates { latitude: -1.2731, longitude: 36.8122 }),
    ("aga khan university hospital", Coordinates { latitude: -1.2600, longitude: 36.8000 }),
    ("aga khan hospital", Coordinates { latitude: -1.2600, longitude: 36.8000 }),
    ("mp shah hospital", Coordinates { latitude: -1.2700, longitude: 36.8100 }),
    ("gertrude's children's hospital", Coordinates { latitude: -1.2800, longitude: 36.8200 }),
    ("gertrudes hospital", Coordinates { latitude: -1.2800, longitude: 36.8200 }),
    ("nairobi west hospital", Coordinates { latitude: -1.2900, longitude: 36.7800 }),
    ("coptic hospital", Coordinates { latitude: -1.2750, longitude: 36.8150 }),
    ("karen hospital", Coordinates { latitude: -1.3200, longitude: 36.7000 }),
    ("nairobi women's hospital", Coordinates { latitude: -1.2850, longitude: 36.8050 }),
    ("nairobi womens hospital", Coordinates { latitude: -1.2850, longitude: 36.8050 }),
    ("chiromo lane hospital", Coordinates { latitude: -1.2700, longitude: 36.8000 }),
    ("ladies medical centre", Coordinates { latitude: -1.2750, longitude: 36.8100 }),
    ("the nairobi hospital", Coordinates { latitude: -1.2731, longitude: 36.8122 }),
];

/// Look up approximate coordinates for a hospital name.
///
/// Tries an exact match on the normalized name, then a substring match in
/// either direction, and finally falls back to a deterministic offset from
/// [`NAIROBI_CENTER`] derived from a hash of the normalized name. Always
/// produces a coordinate.
#[must_use]
pub fn locate(hospital_name: &str) -> Coordinates {
    let normalized = hospital_name.trim().to_lowercase();

    if let Some((_, coordinates)) = HOSPITAL_LOCATIONS
        .iter()
        .find(|(name, _)| *name == normalized)
    {
        return *coordinates;
    }

    if !normalized.is_empty() {
        if let Some((_, coordinates)) = HOSPITAL_LOCATIONS
            .iter()
            .find(|(name, _)| normalized.contains(name) || name.contains(&normalized))
        {
            return *coordinates;
        }
    }

    fallback_coordinates(&normalized)
}

/// Deterministic pseudo-location near the city center for unknown names.
///
/// The offset is under a tenth of a degree, derived from a stable hash of
/// the normalized name.
fn fallback_coordinates(normalized: &str) -> Coordinates {
    let hash = blake3::hash(normalized.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    let offset = f64::from(u32::try_from(u64::from_le_bytes(bytes) % 100).unwrap_or(0)) / 1000.0;

    Coordinates {
        latitude: NAIROBI_CENTER.latitude + offset,
        longitude: NAIROBI_CENTER.longitude + offset,
    }
}
