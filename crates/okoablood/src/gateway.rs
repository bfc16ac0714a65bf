//! Gateway trait over the donation backend.
//!
//! The coordination screens talk to the backend through [`DonationGateway`]
//! rather than holding a store directly, so the data layer can be swapped
//! without touching the callers. [`SqliteGateway`] is the local
//! implementation backed by [`Store`].

use std::future::Future;

use tokio::sync::Mutex;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{Appointment, BloodGroup, BloodRequest, Donor, RequestStatus, User};
use crate::store::{Store, StoreStats};

/// Backend operations the coordination screens depend on.
#[async_trait::async_trait]
pub trait DonationGateway: Send + Sync {
    /// Fetch a user profile by id.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>>;

    /// Create or replace a user profile.
    async fn put_user(&self, user: &User) -> Result<()>;

    /// Update an existing user profile.
    async fn update_user(&self, user: &User) -> Result<()>;

    /// Create or replace a donor document.
    async fn put_donor(&self, donor: &Donor) -> Result<()>;

    /// Fetch all donors.
    async fn donors(&self) -> Result<Vec<Donor>>;

    /// Fetch available donors of the given blood group.
    async fn available_donors(&self, group: BloodGroup) -> Result<Vec<Donor>>;

    /// Fetch donors whose location matches the query.
    async fn donors_near(&self, location: &str) -> Result<Vec<Donor>>;

    /// Submit a blood request. Returns the assigned id.
    async fn create_request(&self, request: &BloodRequest) -> Result<String>;

    /// Fetch a single request by id.
    async fn get_request(&self, request_id: &str) -> Result<Option<BloodRequest>>;

    /// Fetch all active requests, newest first.
    async fn active_requests(&self) -> Result<Vec<BloodRequest>>;

    /// Fetch all urgent requests, newest first.
    async fn urgent_requests(&self) -> Result<Vec<BloodRequest>>;

    /// Fetch the requests posted by a user, newest first.
    async fn requests_by_user(&self, user_id: &str) -> Result<Vec<BloodRequest>>;

    /// Change the lifecycle status of a request.
    async fn update_request_status(&self, request_id: &str, status: RequestStatus) -> Result<()>;

    /// Schedule a donation appointment. Returns the assigned id.
    async fn create_appointment(&self, appointment: &Appointment) -> Result<String>;

    /// Fetch a user's appointments, soonest first.
    async fn appointments_by_user(&self, user_id: &str) -> Result<Vec<Appointment>>;

    /// Fetch document counts.
    async fn stats(&self) -> Result<StoreStats>;
}

/// Local gateway implementation backed by the `SQLite` document store.
#[derive(Debug)]
pub struct SqliteGateway {
    store: Mutex<Store>,
}

impl SqliteGateway {
    /// Wrap a store in a gateway.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}

#[async_trait::async_trait]
impl DonationGateway for SqliteGateway {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.store.lock().await.get_user(user_id)
    }

    async fn put_user(&self, user: &User) -> Result<()> {
        self.store.lock().await.put_user(user)
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        self.store.lock().await.update_user(user)
    }

    async fn put_donor(&self, donor: &Donor) -> Result<()> {
        self.store.lock().await.put_donor(donor)
    }

    async fn donors(&self) -> Result<Vec<Donor>> {
        self.store.lock().await.all_donors()
    }

    async fn available_donors(&self, group: BloodGroup) -> Result<Vec<Donor>> {
        self.store.lock().await.available_donors_by_group(group)
    }

    async fn donors_near(&self, location: &str) -> Result<Vec<Donor>> {
        self.store.lock().await.donors_near(location)
    }

    async fn create_request(&self, request: &BloodRequest) -> Result<String> {
        self.store.lock().await.create_request(request)
    }

    async fn get_request(&self, request_id: &str) -> Result<Option<BloodRequest>> {
        self.store.lock().await.get_request(request_id)
    }

    async fn active_requests(&self) -> Result<Vec<BloodRequest>> {
        self.store.lock().await.active_requests()
    }

    async fn urgent_requests(&self) -> Result<Vec<BloodRequest>> {
        self.store.lock().await.urgent_requests()
    }

    async fn requests_by_user(&self, user_id: &str) -> Result<Vec<BloodRequest>> {
        self.store.lock().await.requests_by_user(user_id)
    }

    async fn update_request_status(&self, request_id: &str, status: RequestStatus) -> Result<()> {
        self.store.lock().await.update_request_status(request_id, status)
    }

    async fn create_appointment(&self, appointment: &Appointment) -> Result<String> {
        self.store.lock().await.create_appointment(appointment)
    }

    async fn appointments_by_user(&self, user_id: &str) -> Result<Vec<Appointment>> {
        self.store.lock().await.appointments_by_user(user_id)
    }

    async fn stats(&self) -> Result<StoreStats> {
        self.store.lock().await.stats()
    }
}

/// Run an operation up to `attempts` times, stopping on the first success.
///
/// Validation and not-found failures are definitive answers from the
/// backend and are returned immediately rather than retried.
///
/// # Errors
///
/// Returns [`Error::RetriesExhausted`] once every attempt has failed.
pub async fn retry<T, F, Fut>(operation: &str, attempts: u32, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt in 1..=attempts {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_validation_error() || err.is_not_found() => return Err(err),
            Err(err) => {
                warn!(
                    "{} failed (attempt {}/{}): {}",
                    operation, attempt, attempts, err
                );
            }
        }
    }
    Err(Error::retries_exhausted(operation, attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn create_test_gateway() -> SqliteGateway {
        SqliteGateway::new(Store::open_in_memory().expect("failed to create test store"))
    }

    fn test_request() -> BloodRequest {
        let mut request = BloodRequest::new("Patient", BloodGroup::APositive, "Nairobi Hospital");
        request.requester_phone = "0712345678".to_string();
        request
    }

    #[tokio::test]
    async fn test_gateway_round_trip() {
        let gateway = create_test_gateway();
        let mut user = User::new("u1", "Test User", "test@example.com");
        user.phone = "0712345678".to_string();

        gateway.put_user(&user).await.unwrap();
        let retrieved = gateway.get_user("u1").await.unwrap().unwrap();
        assert_eq!(retrieved.name, "Test User");
    }

    #[tokio::test]
    async fn test_gateway_request_lifecycle() {
        let gateway = create_test_gateway();

        let id = gateway.create_request(&test_request()).await.unwrap();
        assert_eq!(gateway.active_requests().await.unwrap().len(), 1);

        gateway
            .update_request_status(&id, RequestStatus::Fulfilled)
            .await
            .unwrap();
        assert!(gateway.active_requests().await.unwrap().is_empty());
        assert!(gateway.get_request(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_retry_succeeds_first_attempt() {
        let calls = AtomicU32::new(0);
        let result = retry("load", 2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, Error>(42) }
        })
        .await
        .unwrap();

        assert_eq!(result, 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_recovers_on_second_attempt() {
        let calls = AtomicU32::new(0);
        let result = retry("load", 2, || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(Error::internal("transient"))
                } else {
                    Ok(7)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_exhaustion() {
        let calls = AtomicU32::new(0);
        let err = retry("load profile", 2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(Error::internal("down")) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(matches!(
            err,
            Error::RetriesExhausted { attempts: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_retry_does_not_retry_not_found() {
        let calls = AtomicU32::new(0);
        let err = retry("load", 3, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(Error::not_found("user", "u1")) }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_retry_does_not_retry_validation() {
        let calls = AtomicU32::new(0);
        let err = retry("submit", 3, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err::<(), _>(Error::request_validation("units", "required"))
            }
        })
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(err.is_validation_error());
    }
}
