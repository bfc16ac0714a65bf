//! Document store for okoablood.
//!
//! This module provides `SQLite`-based persistent storage for users, donors,
//! blood requests, and appointments. It stands in for the hosted document
//! store the mobile clients talk to, with the same operation surface.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::{Appointment, BloodGroup, BloodRequest, Donor, RequestStatus, User};
use crate::validate;

/// Columns selected for blood request rows, in `row_to_request` order.
const REQUEST_COLUMNS: &str = "id, requester_id, requester_name, requester_phone, patient_name, \
     blood_group, units, hospital, location, constituency, urgent, urgency_level, notes, \
     status, request_date";

/// Document store backed by `SQLite`.
///
/// Provides the operation surface the coordination screens consume:
/// - user profile CRUD
/// - donor registration and lookup
/// - blood request creation, listing, and status updates
/// - appointment listing
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open or create a store database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        migrations::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory store instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Users ===

    /// Create or replace a user document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn put_user(&self, user: &User) -> Result<()> {
        self.conn.execute(
            r"
            INSERT OR REPLACE INTO users
                (id, name, email, phone, blood_group, location, is_donor,
                 last_donation_date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
            params![
                user.id,
                user.name,
                user.email,
                user.phone,
                user.blood_group.map(|g| g.as_str()),
                user.location,
                user.is_donor,
                user.last_donation_date,
                user.created_at.to_rfc3339(),
            ],
        )?;
        debug!("Stored user {}", user.id);
        Ok(())
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let result = self
            .conn
            .query_row(
                r"
                SELECT id, name, email, phone, blood_group, location, is_donor,
                       last_donation_date, created_at
                FROM users WHERE id = ?1
                ",
                [user_id],
                Self::row_to_user,
            )
            .optional()?;
        Ok(result)
    }

    /// Update an existing user document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no user with this id exists, or an
    /// error if the database operation fails.
    pub fn update_user(&self, user: &User) -> Result<()> {
        let affected = self.conn.execute(
            r"
            UPDATE users SET name = ?2, email = ?3, phone = ?4, blood_group = ?5,
                             location = ?6, is_donor = ?7, last_donation_date = ?8
            WHERE id = ?1
            ",
            params![
                user.id,
                user.name,
                user.email,
                user.phone,
                user.blood_group.map(|g| g.as_str()),
                user.location,
                user.is_donor,
                user.last_donation_date,
            ],
        )?;

        if affected == 0 {
            return Err(Error::not_found("user", &user.id));
        }
        Ok(())
    }

    // === Donors ===

    /// Create or replace a donor document.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn put_donor(&self, donor: &Donor) -> Result<()> {
        self.conn.execute(
            r"
            INSERT OR REPLACE INTO donors (id, name, phone, blood_group, location, is_available)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                donor.id,
                donor.name,
                donor.phone,
                donor.blood_group.as_str(),
                donor.location,
                donor.is_available,
            ],
        )?;
        debug!("Stored donor {}", donor.id);
        Ok(())
    }

    /// Get a donor by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_donor(&self, donor_id: &str) -> Result<Option<Donor>> {
        let result = self
            .conn
            .query_row(
                "SELECT id, name, phone, blood_group, location, is_available \
                 FROM donors WHERE id = ?1",
                [donor_id],
                Self::row_to_donor,
            )
            .optional()?;
        Ok(result)
    }

    /// Get all donors, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn all_donors(&self) -> Result<Vec<Donor>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, phone, blood_group, location, is_available \
             FROM donors ORDER BY name",
        )?;
        let donors = stmt
            .query_map([], Self::row_to_donor)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(donors)
    }

    /// Get available donors of the given blood group, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn available_donors_by_group(&self, group: BloodGroup) -> Result<Vec<Donor>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, phone, blood_group, location, is_available \
             FROM donors WHERE blood_group = ?1 AND is_available = 1 ORDER BY name",
        )?;
        let donors = stmt
            .query_map([group.as_str()], Self::row_to_donor)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(donors)
    }

    /// Get donors whose location contains the query, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn donors_near(&self, location: &str) -> Result<Vec<Donor>> {
        let pattern = format!("%{location}%");
        let mut stmt = self.conn.prepare(
            "SELECT id, name, phone, blood_group, location, is_available \
             FROM donors WHERE location LIKE ?1 ORDER BY name",
        )?;
        let donors = stmt
            .query_map([pattern], Self::row_to_donor)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(donors)
    }

    // === Blood requests ===

    /// Insert a blood request, assigning it a fresh id.
    ///
    /// The request is validated before insertion. Returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the request is malformed, or an error
    /// if the database operation fails.
    pub fn create_request(&self, request: &BloodRequest) -> Result<String> {
        validate::validate_request(request)?;

        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            r"
            INSERT INTO blood_requests
                (id, requester_id, requester_name, requester_phone, patient_name,
                 blood_group, units, hospital, location, constituency, urgent,
                 urgency_level, notes, status, request_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            ",
            params![
                id,
                request.requester_id,
                request.requester_name,
                request.requester_phone,
                request.patient_name,
                request.blood_group.as_str(),
                request.units,
                request.hospital,
                request.location,
                request.constituency,
                request.urgent,
                request.urgency_level.map(|level| level.to_string()),
                request.notes,
                request.status.to_string(),
                request.request_date.to_rfc3339(),
            ],
        )?;

        debug!("Inserted blood request {}", id);
        Ok(id)
    }

    /// Get a blood request by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_request(&self, request_id: &str) -> Result<Option<BloodRequest>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM blood_requests WHERE id = ?1");
        let result = self
            .conn
            .query_row(&sql, [request_id], Self::row_to_request)
            .optional()?;
        Ok(result)
    }

    /// Get all active requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn active_requests(&self) -> Result<Vec<BloodRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests \
             WHERE status = ?1 ORDER BY request_date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let requests = stmt
            .query_map([RequestStatus::Active.to_string()], Self::row_to_request)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    /// Get all urgent requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn urgent_requests(&self) -> Result<Vec<BloodRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests \
             WHERE urgent = 1 ORDER BY request_date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let requests = stmt
            .query_map([], Self::row_to_request)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    /// Get every request regardless of status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn all_requests(&self) -> Result<Vec<BloodRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests ORDER BY request_date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let requests = stmt
            .query_map([], Self::row_to_request)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    /// Get the requests posted by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn requests_by_user(&self, user_id: &str) -> Result<Vec<BloodRequest>> {
        let sql = format!(
            "SELECT {REQUEST_COLUMNS} FROM blood_requests \
             WHERE requester_id = ?1 ORDER BY request_date DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let requests = stmt
            .query_map([user_id], Self::row_to_request)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(requests)
    }

    /// Update the lifecycle status of a request.
    ///
    /// Requests are never deleted; fulfilment and withdrawal are status
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no request with this id exists, or an
    /// error if the database operation fails.
    pub fn update_request_status(&self, request_id: &str, status: RequestStatus) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE blood_requests SET status = ?2 WHERE id = ?1",
            params![request_id, status.to_string()],
        )?;

        if affected == 0 {
            return Err(Error::not_found("request", request_id));
        }
        info!("Request {} marked {}", request_id, status);
        Ok(())
    }

    // === Appointments ===

    /// Insert an appointment, assigning it a fresh id. Returns the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn create_appointment(&self, appointment: &Appointment) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO appointments (id, user_id, scheduled_for, site) \
             VALUES (?1, ?2, ?3, ?4)",
            params![
                id,
                appointment.user_id,
                appointment.scheduled_for.to_rfc3339(),
                appointment.site,
            ],
        )?;
        Ok(id)
    }

    /// Get a user's appointments, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn appointments_by_user(&self, user_id: &str) -> Result<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, scheduled_for, site FROM appointments \
             WHERE user_id = ?1 ORDER BY scheduled_for",
        )?;
        let appointments = stmt
            .query_map([user_id], Self::row_to_appointment)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(appointments)
    }

    // === Stats ===

    /// Get document counts and database size.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn stats(&self) -> Result<StoreStats> {
        let count = |sql: &str| -> Result<i64> {
            Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
        };

        let users = count("SELECT COUNT(*) FROM users")?;
        let donors = count("SELECT COUNT(*) FROM donors")?;
        let active_requests: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM blood_requests WHERE status = ?1",
            [RequestStatus::Active.to_string()],
            |row| row.get(0),
        )?;
        let urgent_requests = count("SELECT COUNT(*) FROM blood_requests WHERE urgent = 1")?;
        let appointments = count("SELECT COUNT(*) FROM appointments")?;

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StoreStats {
            users,
            donors,
            active_requests,
            urgent_requests,
            appointments,
            db_size_bytes,
        })
    }

    // === Row mappers ===

    /// Convert a database row to a User struct.
    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        let blood_group: Option<String> = row.get(4)?;
        let created_at: String = row.get(8)?;

        Ok(User {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            blood_group: blood_group.as_deref().and_then(|value| {
                let parsed = value.parse().ok();
                if parsed.is_none() {
                    warn!("Ignoring unknown blood group in users row: {}", value);
                }
                parsed
            }),
            location: row.get(5)?,
            is_donor: row.get(6)?,
            last_donation_date: row.get(7)?,
            created_at: Self::parse_timestamp(&created_at),
        })
    }

    /// Convert a database row to a Donor struct.
    fn row_to_donor(row: &rusqlite::Row) -> rusqlite::Result<Donor> {
        let blood_group: String = row.get(3)?;

        Ok(Donor {
            id: row.get(0)?,
            name: row.get(1)?,
            phone: row.get(2)?,
            blood_group: Self::required_blood_group(&blood_group, 3)?,
            location: row.get(4)?,
            is_available: row.get(5)?,
        })
    }

    /// Convert a database row to a `BloodRequest` struct.
    fn row_to_request(row: &rusqlite::Row) -> rusqlite::Result<BloodRequest> {
        let blood_group: String = row.get(5)?;
        let units: Option<i64> = row.get(6)?;
        let urgency_level: Option<String> = row.get(11)?;
        let status: String = row.get(13)?;
        let request_date: String = row.get(14)?;

        let status = status.parse().unwrap_or_else(|_| {
            warn!("Unknown request status: {}, defaulting to active", status);
            RequestStatus::Active
        });

        Ok(BloodRequest {
            id: Some(row.get(0)?),
            requester_id: row.get(1)?,
            requester_name: row.get(2)?,
            requester_phone: row.get(3)?,
            patient_name: row.get(4)?,
            blood_group: Self::required_blood_group(&blood_group, 5)?,
            units: units.and_then(|value| u32::try_from(value).ok()),
            hospital: row.get(7)?,
            location: row.get(8)?,
            constituency: row.get(9)?,
            urgent: row.get(10)?,
            urgency_level: urgency_level.and_then(|value| value.parse().ok()),
            notes: row.get(12)?,
            status,
            request_date: Self::parse_timestamp(&request_date),
        })
    }

    /// Convert a database row to an Appointment struct.
    fn row_to_appointment(row: &rusqlite::Row) -> rusqlite::Result<Appointment> {
        let scheduled_for: String = row.get(2)?;

        Ok(Appointment {
            id: Some(row.get(0)?),
            user_id: row.get(1)?,
            scheduled_for: Self::parse_timestamp(&scheduled_for),
            site: row.get(3)?,
        })
    }

    /// Parse a stored RFC 3339 timestamp, falling back to now on corruption.
    fn parse_timestamp(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value)
            .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
    }

    /// Parse a required blood group column, failing the row on corruption.
    fn required_blood_group(value: &str, index: usize) -> rusqlite::Result<BloodGroup> {
        value.parse().map_err(|message: String| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
            )
        })
    }
}

/// Document counts for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of user documents.
    pub users: i64,
    /// Number of donor documents.
    pub donors: i64,
    /// Number of active blood requests.
    pub active_requests: i64,
    /// Number of urgent blood requests.
    pub urgent_requests: i64,
    /// Number of appointments.
    pub appointments: i64,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_store() -> Store {
        Store::open_in_memory().expect("failed to create test store")
    }

    fn test_user(id: &str) -> User {
        let mut user = User::new(id, format!("User {id}"), format!("{id}@example.com"));
        user.phone = "0712345678".to_string();
        user.location = "Nairobi".to_string();
        user
    }

    fn test_donor(id: &str, group: BloodGroup) -> Donor {
        Donor {
            id: id.to_string(),
            name: format!("Donor {id}"),
            phone: "0712345678".to_string(),
            blood_group: group,
            location: "Nairobi".to_string(),
            is_available: true,
        }
    }

    fn test_request(group: BloodGroup, hospital: &str) -> BloodRequest {
        let mut request = BloodRequest::new("Patient", group, hospital);
        request.requester_phone = "0712345678".to_string();
        request
    }

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory();
        assert!(store.is_ok());
    }

    #[test]
    fn test_path() {
        let store = create_test_store();
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_put_and_get_user() {
        let store = create_test_store();
        let user = test_user("u1");

        store.put_user(&user).unwrap();
        let retrieved = store.get_user("u1").unwrap().unwrap();

        assert_eq!(retrieved.id, "u1");
        assert_eq!(retrieved.phone, "0712345678");
        assert!(!retrieved.is_donor);
        assert!(retrieved.blood_group.is_none());
    }

    #[test]
    fn test_get_nonexistent_user() {
        let store = create_test_store();
        assert!(store.get_user("missing").unwrap().is_none());
    }

    #[test]
    fn test_put_user_replaces() {
        let store = create_test_store();
        let mut user = test_user("u1");
        store.put_user(&user).unwrap();

        user.blood_group = Some(BloodGroup::APositive);
        store.put_user(&user).unwrap();

        let retrieved = store.get_user("u1").unwrap().unwrap();
        assert_eq!(retrieved.blood_group, Some(BloodGroup::APositive));
    }

    #[test]
    fn test_update_user() {
        let store = create_test_store();
        let mut user = test_user("u1");
        store.put_user(&user).unwrap();

        user.is_donor = true;
        user.last_donation_date = Some("01 Jan 2024".to_string());
        store.update_user(&user).unwrap();

        let retrieved = store.get_user("u1").unwrap().unwrap();
        assert!(retrieved.is_donor);
        assert_eq!(retrieved.last_donation_date.as_deref(), Some("01 Jan 2024"));
    }

    #[test]
    fn test_update_missing_user_not_found() {
        let store = create_test_store();
        let err = store.update_user(&test_user("missing")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_put_and_get_donor() {
        let store = create_test_store();
        store.put_donor(&test_donor("d1", BloodGroup::ONegative)).unwrap();

        let retrieved = store.get_donor("d1").unwrap().unwrap();
        assert_eq!(retrieved.blood_group, BloodGroup::ONegative);
        assert!(retrieved.is_available);
    }

    #[test]
    fn test_all_donors_ordered_by_name() {
        let store = create_test_store();
        store.put_donor(&test_donor("zed", BloodGroup::APositive)).unwrap();
        store.put_donor(&test_donor("abe", BloodGroup::BPositive)).unwrap();

        let donors = store.all_donors().unwrap();
        assert_eq!(donors.len(), 2);
        assert_eq!(donors[0].id, "abe");
        assert_eq!(donors[1].id, "zed");
    }

    #[test]
    fn test_available_donors_by_group() {
        let store = create_test_store();
        store.put_donor(&test_donor("d1", BloodGroup::APositive)).unwrap();
        store.put_donor(&test_donor("d2", BloodGroup::ONegative)).unwrap();

        let mut unavailable = test_donor("d3", BloodGroup::APositive);
        unavailable.is_available = false;
        store.put_donor(&unavailable).unwrap();

        let donors = store.available_donors_by_group(BloodGroup::APositive).unwrap();
        assert_eq!(donors.len(), 1);
        assert_eq!(donors[0].id, "d1");
    }

    #[test]
    fn test_donors_near() {
        let store = create_test_store();
        let mut donor = test_donor("d1", BloodGroup::APositive);
        donor.location = "Westlands, Nairobi".to_string();
        store.put_donor(&donor).unwrap();

        let mut far = test_donor("d2", BloodGroup::APositive);
        far.location = "Mombasa".to_string();
        store.put_donor(&far).unwrap();

        let found = store.donors_near("Nairobi").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "d1");
    }

    #[test]
    fn test_create_and_get_request() {
        let store = create_test_store();
        let request = test_request(BloodGroup::APositive, "Nairobi Hospital");

        let id = store.create_request(&request).unwrap();
        let retrieved = store.get_request(&id).unwrap().unwrap();

        assert_eq!(retrieved.id.as_deref(), Some(id.as_str()));
        assert_eq!(retrieved.blood_group, BloodGroup::APositive);
        assert_eq!(retrieved.status, RequestStatus::Active);
        assert_eq!(retrieved.units, Some(1));
    }

    #[test]
    fn test_create_request_rejects_invalid() {
        let store = create_test_store();
        let mut request = test_request(BloodGroup::APositive, "Nairobi Hospital");
        request.requester_phone = "bad".to_string();

        let err = store.create_request(&request).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_create_request_assigns_unique_ids() {
        let store = create_test_store();
        let request = test_request(BloodGroup::APositive, "Nairobi Hospital");

        let id1 = store.create_request(&request).unwrap();
        let id2 = store.create_request(&request).unwrap();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_active_requests_newest_first() {
        let store = create_test_store();

        let mut older = test_request(BloodGroup::APositive, "H1");
        older.request_date = Utc::now() - Duration::hours(2);
        store.create_request(&older).unwrap();

        let newer = test_request(BloodGroup::ONegative, "H2");
        store.create_request(&newer).unwrap();

        let requests = store.active_requests().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].hospital, "H2");
        assert_eq!(requests[1].hospital, "H1");
    }

    #[test]
    fn test_active_requests_exclude_closed() {
        let store = create_test_store();
        let id = store
            .create_request(&test_request(BloodGroup::APositive, "H1"))
            .unwrap();
        store.create_request(&test_request(BloodGroup::ONegative, "H2")).unwrap();

        store.update_request_status(&id, RequestStatus::Fulfilled).unwrap();

        let requests = store.active_requests().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].hospital, "H2");
    }

    #[test]
    fn test_urgent_requests() {
        let store = create_test_store();
        store.create_request(&test_request(BloodGroup::APositive, "H1")).unwrap();

        let mut urgent = test_request(BloodGroup::ONegative, "H2");
        urgent.urgent = true;
        urgent.urgency_level = Some(crate::model::UrgencyLevel::Critical);
        store.create_request(&urgent).unwrap();

        let requests = store.urgent_requests().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].urgent);
        assert_eq!(
            requests[0].urgency_level,
            Some(crate::model::UrgencyLevel::Critical)
        );
    }

    #[test]
    fn test_requests_by_user() {
        let store = create_test_store();

        let mut mine = test_request(BloodGroup::APositive, "H1");
        mine.requester_id = Some("u1".to_string());
        store.create_request(&mine).unwrap();

        let mut theirs = test_request(BloodGroup::APositive, "H2");
        theirs.requester_id = Some("u2".to_string());
        store.create_request(&theirs).unwrap();

        let requests = store.requests_by_user("u1").unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].hospital, "H1");
    }

    #[test]
    fn test_update_request_status_not_found() {
        let store = create_test_store();
        let err = store
            .update_request_status("missing", RequestStatus::Cancelled)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_requests_never_deleted() {
        let store = create_test_store();
        let id = store
            .create_request(&test_request(BloodGroup::APositive, "H1"))
            .unwrap();

        store.update_request_status(&id, RequestStatus::Cancelled).unwrap();

        // Still present, just closed.
        let retrieved = store.get_request(&id).unwrap().unwrap();
        assert_eq!(retrieved.status, RequestStatus::Cancelled);
        assert_eq!(store.all_requests().unwrap().len(), 1);
    }

    #[test]
    fn test_create_and_list_appointments() {
        let store = create_test_store();
        let appointment = Appointment {
            id: None,
            user_id: "u1".to_string(),
            scheduled_for: Utc::now() + Duration::days(7),
            site: Some("Nairobi Hospital".to_string()),
        };

        let id = store.create_appointment(&appointment).unwrap();
        let listed = store.appointments_by_user("u1").unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_deref(), Some(id.as_str()));
        assert_eq!(listed[0].site.as_deref(), Some("Nairobi Hospital"));
        assert!(store.appointments_by_user("u2").unwrap().is_empty());
    }

    #[test]
    fn test_stats_empty() {
        let store = create_test_store();
        let stats = store.stats().unwrap();

        assert_eq!(stats.users, 0);
        assert_eq!(stats.donors, 0);
        assert_eq!(stats.active_requests, 0);
        assert_eq!(stats.urgent_requests, 0);
        assert_eq!(stats.appointments, 0);
    }

    #[test]
    fn test_stats_with_data() {
        let store = create_test_store();
        store.put_user(&test_user("u1")).unwrap();
        store.put_donor(&test_donor("d1", BloodGroup::APositive)).unwrap();

        let mut urgent = test_request(BloodGroup::ONegative, "H1");
        urgent.urgent = true;
        urgent.urgency_level = Some(crate::model::UrgencyLevel::High);
        let id = store.create_request(&urgent).unwrap();
        store.update_request_status(&id, RequestStatus::Fulfilled).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.users, 1);
        assert_eq!(stats.donors, 1);
        assert_eq!(stats.active_requests, 0);
        assert_eq!(stats.urgent_requests, 1);
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("okoablood_test_{}.db", std::process::id()));

        let store = Store::open(&db_path).unwrap();
        store.put_user(&test_user("u1")).unwrap();
        assert!(store.get_user("u1").unwrap().is_some());
        assert_eq!(store.path(), db_path);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
        let _ = std::fs::remove_file(db_path.with_extension("db-wal"));
        let _ = std::fs::remove_file(db_path.with_extension("db-shm"));
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let temp_dir = std::env::temp_dir();
        let nested_path = temp_dir.join(format!(
            "okoablood_test_{}/nested/db.sqlite",
            std::process::id()
        ));

        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent);
        }

        let store = Store::open(&nested_path).unwrap();
        assert!(nested_path.exists());

        drop(store);
        if let Some(parent) = nested_path.parent() {
            let _ = std::fs::remove_dir_all(parent.parent().unwrap());
        }
    }

    #[test]
    fn test_unicode_fields() {
        let store = create_test_store();
        let mut request = test_request(BloodGroup::APositive, "Hôpital Général");
        request.patient_name = "Wanjiru Ng'ang'a".to_string();

        let id = store.create_request(&request).unwrap();
        let retrieved = store.get_request(&id).unwrap().unwrap();
        assert_eq!(retrieved.patient_name, "Wanjiru Ng'ang'a");
        assert_eq!(retrieved.hospital, "Hôpital Général");
    }

    #[test]
    fn test_request_date_roundtrip() {
        let store = create_test_store();
        let request = test_request(BloodGroup::APositive, "H1");

        let id = store.create_request(&request).unwrap();
        let retrieved = store.get_request(&id).unwrap().unwrap();

        // RFC 3339 keeps sub-second precision.
        assert_eq!(retrieved.request_date, request.request_date);
    }
}
