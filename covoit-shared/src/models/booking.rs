use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seats reserved by a user on a ride.
///
/// `ride_id` and `user_id` are not checked against existing rows, and the
/// ride's seat count is not decremented: a booking is a record of intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: Uuid,
    pub ride_id: Uuid,
    pub user_id: Uuid,
    pub number_of_seats: i32,
    pub total_price: f64,
    pub booking_time: DateTime<Utc>,
}

/// Body of `POST /bookings`. `booking_time` defaults to the insertion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBooking {
    pub ride_id: Uuid,
    pub user_id: Uuid,
    pub number_of_seats: i32,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub booking_time: Option<DateTime<Utc>>,
}

impl NewBooking {
    pub fn into_booking(self, booking_id: Uuid, now: DateTime<Utc>) -> Booking {
        Booking {
            booking_id,
            ride_id: self.ride_id,
            user_id: self.user_id,
            number_of_seats: self.number_of_seats,
            total_price: self.total_price,
            booking_time: self.booking_time.unwrap_or(now),
        }
    }
}

/// Body of `PATCH /bookings`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingPatch {
    pub ride_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub number_of_seats: Option<i32>,
    pub total_price: Option<f64>,
    pub booking_time: Option<DateTime<Utc>>,
}

impl BookingPatch {
    pub fn apply_to(&self, booking: &mut Booking) {
        if let Some(ride_id) = self.ride_id {
            booking.ride_id = ride_id;
        }
        if let Some(user_id) = self.user_id {
            booking.user_id = user_id;
        }
        if let Some(number_of_seats) = self.number_of_seats {
            booking.number_of_seats = number_of_seats;
        }
        if let Some(total_price) = self.total_price {
            booking.total_price = total_price;
        }
        if let Some(booking_time) = self.booking_time {
            booking.booking_time = booking_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_booking_time_falls_back_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap();
        let new_booking = NewBooking {
            ride_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            number_of_seats: 2,
            total_price: 24.0,
            booking_time: None,
        };

        let booking = new_booking.into_booking(Uuid::new_v4(), now);
        assert_eq!(booking.booking_time, now);
        assert_eq!(booking.number_of_seats, 2);
    }

    #[test]
    fn test_patch_can_move_booking_to_another_ride() {
        let original_ride = Uuid::new_v4();
        let other_ride = Uuid::new_v4();
        let mut booking = NewBooking {
            ride_id: original_ride,
            user_id: Uuid::new_v4(),
            number_of_seats: 1,
            total_price: 12.0,
            booking_time: None,
        }
        .into_booking(Uuid::new_v4(), Utc::now());

        let patch = BookingPatch {
            ride_id: Some(other_ride),
            ..Default::default()
        };
        patch.apply_to(&mut booking);

        assert_eq!(booking.ride_id, other_ride);
        assert_eq!(booking.total_price, 12.0);
    }
}
