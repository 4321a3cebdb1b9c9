pub mod booking;
pub mod ride;
pub mod user;
