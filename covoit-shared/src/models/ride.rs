use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A trip offered by a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ride {
    pub ride_id: Uuid,
    pub origin: String,
    pub destination: String,
    pub driver_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub distance: f64,
    pub price: f64,
    pub number_of_seats: i32,
}

/// Body of `POST /rides`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRide {
    pub origin: String,
    pub destination: String,
    pub driver_id: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub price: f64,
    pub number_of_seats: i32,
}

impl NewRide {
    pub fn into_ride(self, ride_id: Uuid) -> Ride {
        Ride {
            ride_id,
            origin: self.origin,
            destination: self.destination,
            driver_id: self.driver_id,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            distance: self.distance,
            price: self.price,
            number_of_seats: self.number_of_seats,
        }
    }
}

/// Body of `PATCH /rides`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RidePatch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub driver_id: Option<Uuid>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub distance: Option<f64>,
    pub price: Option<f64>,
    pub number_of_seats: Option<i32>,
}

impl RidePatch {
    pub fn apply_to(&self, ride: &mut Ride) {
        if let Some(origin) = &self.origin {
            ride.origin = origin.clone();
        }
        if let Some(destination) = &self.destination {
            ride.destination = destination.clone();
        }
        if let Some(driver_id) = self.driver_id {
            ride.driver_id = driver_id;
        }
        if let Some(departure_time) = self.departure_time {
            ride.departure_time = departure_time;
        }
        if let Some(arrival_time) = self.arrival_time {
            ride.arrival_time = arrival_time;
        }
        if let Some(distance) = self.distance {
            ride.distance = distance;
        }
        if let Some(price) = self.price {
            ride.price = price;
        }
        if let Some(number_of_seats) = self.number_of_seats {
            ride.number_of_seats = number_of_seats;
        }
    }
}
