use async_trait::async_trait;
use uuid::Uuid;
use covoit_shared::{Booking, BookingPatch, NewBooking, NewRide, NewUser, Ride, RidePatch, User, UserPatch};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The backend failed; `context` says what was being attempted.
    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: BoxError,
    },
    /// A unique index rejected the write.
    #[error("{0}")]
    Duplicate(String),
    /// The written row would break a table invariant.
    #[error("{0}")]
    Constraint(String),
}

impl RepositoryError {
    pub fn storage(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        RepositoryError::Storage {
            context: context.into(),
            source: source.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository trait for user data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> RepositoryResult<Vec<User>>;

    async fn find_user_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;

    /// Returns `None` when no user has this id.
    async fn update_user(&self, user_id: Uuid, patch: &UserPatch) -> RepositoryResult<Option<User>>;

    /// Returns `false` when nothing was deleted.
    async fn delete_user(&self, user_id: Uuid) -> RepositoryResult<bool>;
}

/// Repository trait for ride data access
#[async_trait]
pub trait RideRepository: Send + Sync {
    async fn list_rides(&self) -> RepositoryResult<Vec<Ride>>;

    async fn find_ride_by_id(&self, ride_id: Uuid) -> RepositoryResult<Option<Ride>>;

    async fn create_ride(&self, ride: &NewRide) -> RepositoryResult<Ride>;

    async fn update_ride(&self, ride_id: Uuid, patch: &RidePatch) -> RepositoryResult<Option<Ride>>;

    async fn delete_ride(&self, ride_id: Uuid) -> RepositoryResult<bool>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>>;

    async fn list_bookings_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Booking>>;

    async fn list_bookings_for_ride(&self, ride_id: Uuid) -> RepositoryResult<Vec<Booking>>;

    async fn find_booking_by_id(&self, booking_id: Uuid) -> RepositoryResult<Option<Booking>>;

    async fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking>;

    async fn update_booking(
        &self,
        booking_id: Uuid,
        patch: &BookingPatch,
    ) -> RepositoryResult<Option<Booking>>;

    async fn delete_booking(&self, booking_id: Uuid) -> RepositoryResult<bool>;
}
