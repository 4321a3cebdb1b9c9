//! Business-rule seam between the HTTP handlers and the repositories.
//!
//! Each service forwards to its repository unchanged, turning missing rows
//! into [`CoreError::NotFound`] and rejecting payloads that would store
//! nonsensical values.

mod booking;
mod ride;
mod user;

pub use booking::BookingService;
pub use ride::RideService;
pub use user::UserService;

use crate::{CoreError, CoreResult};

fn require_positive_seats(number_of_seats: i32) -> CoreResult<()> {
    if number_of_seats < 1 {
        return Err(CoreError::ValidationError(format!(
            "number_of_seats must be at least 1, got {}",
            number_of_seats
        )));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: f64) -> CoreResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_count_bounds() {
        assert!(require_positive_seats(1).is_ok());
        assert!(require_positive_seats(0).is_err());
        assert!(require_positive_seats(-3).is_err());
    }

    #[test]
    fn test_non_negative_rejects_nan() {
        assert!(require_non_negative("price", 0.0).is_ok());
        assert!(require_non_negative("price", f64::NAN).is_err());
        assert!(require_non_negative("price", f64::INFINITY).is_err());
        assert!(require_non_negative("price", -0.5).is_err());
    }
}
