//! `SQLite` schema definitions for the okoablood document store.
//!
//! This module contains the SQL statements for creating and managing
//! the database schema.

/// SQL statement to create the users table.
pub const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    blood_group TEXT,
    location TEXT NOT NULL,
    is_donor INTEGER NOT NULL DEFAULT 0,
    last_donation_date TEXT,
    created_at TEXT NOT NULL
)
";

/// SQL statement to create the donors table.
pub const CREATE_DONORS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS donors (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    blood_group TEXT NOT NULL,
    location TEXT NOT NULL,
    is_available INTEGER NOT NULL DEFAULT 1
)
";

/// SQL statement to create the blood requests table.
pub const CREATE_REQUESTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS blood_requests (
    id TEXT PRIMARY KEY,
    requester_id TEXT,
    requester_name TEXT,
    requester_phone TEXT NOT NULL,
    patient_name TEXT NOT NULL,
    blood_group TEXT NOT NULL,
    units INTEGER,
    hospital TEXT NOT NULL,
    location TEXT NOT NULL,
    constituency TEXT,
    urgent INTEGER NOT NULL DEFAULT 0,
    urgency_level TEXT,
    notes TEXT,
    status TEXT NOT NULL,
    request_date TEXT NOT NULL
)
";

/// SQL statement to create the appointments table.
pub const CREATE_APPOINTMENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    scheduled_for TEXT NOT NULL,
    site TEXT
)
";

/// SQL statement to create an index on donor blood group for matching.
pub const CREATE_DONOR_GROUP_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_donors_blood_group ON donors(blood_group)
";

/// SQL statement to create an index on request status for the active list.
pub const CREATE_REQUEST_STATUS_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_requests_status ON blood_requests(status)
";

/// SQL statement to create an index on the urgent flag.
pub const CREATE_REQUEST_URGENT_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_requests_urgent ON blood_requests(urgent)
";

/// SQL statement to create an index on requester for per-user listings.
pub const CREATE_REQUEST_REQUESTER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_requests_requester ON blood_requests(requester_id)
";

/// SQL statement to create an index on request date for newest-first order.
pub const CREATE_REQUEST_DATE_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_requests_date ON blood_requests(request_date DESC)
";

/// SQL statement to create an index on appointment owner.
pub const CREATE_APPOINTMENT_USER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_appointments_user ON appointments(user_id)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_USERS_TABLE,
    CREATE_DONORS_TABLE,
    CREATE_REQUESTS_TABLE,
    CREATE_APPOINTMENTS_TABLE,
    CREATE_DONOR_GROUP_INDEX,
    CREATE_REQUEST_STATUS_INDEX,
    CREATE_REQUEST_URGENT_INDEX,
    CREATE_REQUEST_REQUESTER_INDEX,
    CREATE_REQUEST_DATE_INDEX,
    CREATE_APPOINTMENT_USER_INDEX,
    CREATE_METADATA_TABLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.is_empty());
        }
    }

    #[test]
    fn test_create_requests_table_contains_required_columns() {
        assert!(CREATE_REQUESTS_TABLE.contains("id TEXT PRIMARY KEY"));
        assert!(CREATE_REQUESTS_TABLE.contains("patient_name TEXT NOT NULL"));
        assert!(CREATE_REQUESTS_TABLE.contains("blood_group TEXT NOT NULL"));
        assert!(CREATE_REQUESTS_TABLE.contains("status TEXT NOT NULL"));
        assert!(CREATE_REQUESTS_TABLE.contains("request_date TEXT NOT NULL"));
    }

    #[test]
    fn test_create_users_table_optional_columns() {
        // Optional fields must be nullable, not defaulted to sentinels.
        assert!(CREATE_USERS_TABLE.contains("blood_group TEXT,"));
        assert!(CREATE_USERS_TABLE.contains("last_donation_date TEXT,"));
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}
