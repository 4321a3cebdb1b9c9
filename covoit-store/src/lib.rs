pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod ride_repo;
pub mod user_repo;

pub use booking_repo::PgBookingRepository;
pub use database::DbClient;
pub use ride_repo::PgRideRepository;
pub use user_repo::PgUserRepository;
