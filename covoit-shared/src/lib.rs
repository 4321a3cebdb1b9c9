pub mod models;

pub use models::booking::{Booking, BookingPatch, NewBooking};
pub use models::ride::{NewRide, Ride, RidePatch};
pub use models::user::{NewUser, User, UserPatch};
