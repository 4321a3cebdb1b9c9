pub mod memory;
pub mod repository;
pub mod service;

pub use repository::{BookingRepository, RepositoryError, RideRepository, UserRepository};
pub use service::{BookingService, RideService, UserService};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(msg) => CoreError::Conflict(msg),
            RepositoryError::Constraint(msg) => CoreError::ValidationError(msg),
            storage @ RepositoryError::Storage { .. } => CoreError::InternalError(storage.to_string()),
        }
    }
}
