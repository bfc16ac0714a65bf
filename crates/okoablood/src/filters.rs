//! Client-side list filtering.
//!
//! Donor and request lists are fetched wholesale and narrowed in memory.
//! Every function here is pure, preserves input order, and absorbs missing
//! fields instead of failing.

use std::collections::HashSet;

use crate::model::{BloodGroup, BloodRequest, Donor};

/// Keep donors matching the selected blood group.
///
/// `None` means "no filter" and returns the input unchanged.
#[must_use]
pub fn donors_by_blood_group(donors: Vec<Donor>, group: Option<BloodGroup>) -> Vec<Donor> {
    match group {
        None => donors,
        Some(group) => donors
            .into_iter()
            .filter(|donor| donor.blood_group == group)
            .collect(),
    }
}

/// Keep requests matching the selected blood group.
///
/// `None` means "no filter" and returns the input unchanged.
#[must_use]
pub fn requests_by_blood_group(
    requests: Vec<BloodRequest>,
    group: Option<BloodGroup>,
) -> Vec<BloodRequest> {
    match group {
        None => requests,
        Some(group) => requests
            .into_iter()
            .filter(|request| request.blood_group == group)
            .collect(),
    }
}

/// Keep only requests flagged as urgent.
#[must_use]
pub fn urgent_requests(requests: Vec<BloodRequest>) -> Vec<BloodRequest> {
    requests.into_iter().filter(|request| request.urgent).collect()
}

/// The set of blood groups appearing in urgent requests.
#[must_use]
pub fn urgent_blood_groups(requests: &[BloodRequest]) -> HashSet<BloodGroup> {
    requests
        .iter()
        .filter(|request| request.urgent)
        .map(|request| request.blood_group)
        .collect()
}

/// Keep donors whose blood group is in the given set.
///
/// Used with [`urgent_blood_groups`] to surface donors who can answer an
/// urgent request. An empty set matches no one.
#[must_use]
pub fn donors_in_groups(donors: Vec<Donor>, groups: &HashSet<BloodGroup>) -> Vec<Donor> {
    donors
        .into_iter()
        .filter(|donor| groups.contains(&donor.blood_group))
        .collect()
}

/// Keep requests whose location contains the query, case-insensitively.
///
/// An empty query matches everything.
#[must_use]
pub fn search_requests_by_location(
    requests: Vec<BloodRequest>,
    query: &str,
) -> Vec<BloodRequest> {
    if query.is_empty() {
        return requests;
    }
    let query = query.to_lowercase();
    requests
        .into_iter()
        .filter(|request| request.location.to_lowercase().contains(&query))
        .collect()
}

/// Keep donors whose blood group label contains the query, case-insensitively.
///
/// An empty query matches everything.
#[must_use]
pub fn search_donors_by_group(donors: Vec<Donor>, query: &str) -> Vec<Donor> {
    if query.is_empty() {
        return donors;
    }
    let query = query.to_lowercase();
    donors
        .into_iter()
        .filter(|donor| donor.blood_group.as_str().to_lowercase().contains(&query))
        .collect()
}

/// Partition requests by trimmed hospital name.
///
/// Requests with blank hospital names are excluded. Hospitals appear in the
/// order they are first seen; requests keep their input order within each
/// hospital.
#[must_use]
pub fn group_by_hospital(requests: &[BloodRequest]) -> Vec<(String, Vec<BloodRequest>)> {
    let mut groups: Vec<(String, Vec<BloodRequest>)> = Vec::new();

    for request in requests {
        let hospital = request.hospital.trim();
        if hospital.is_empty() {
            continue;
        }
        match groups.iter_mut().find(|(name, _)| name == hospital) {
            Some((_, members)) => members.push(request.clone()),
            None => groups.push((hospital.to_string(), vec![request.clone()])),
        }
    }

    groups
}
