use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use covoit_shared::{NewRide, Ride, RidePatch};

use super::{require_non_negative, require_positive_seats};
use crate::repository::RideRepository;
use crate::{CoreError, CoreResult};

#[derive(Clone)]
pub struct RideService {
    repo: Arc<dyn RideRepository>,
}

impl RideService {
    pub fn new(repo: Arc<dyn RideRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CoreResult<Vec<Ride>> {
        Ok(self.repo.list_rides().await?)
    }

    pub async fn find_by_id(&self, ride_id: Uuid) -> CoreResult<Ride> {
        self.repo
            .find_ride_by_id(ride_id)
            .await?
            .ok_or_else(|| not_found(ride_id))
    }

    pub async fn create(&self, new_ride: NewRide) -> CoreResult<Ride> {
        require_positive_seats(new_ride.number_of_seats)?;
        require_non_negative("distance", new_ride.distance)?;
        require_non_negative("price", new_ride.price)?;
        if new_ride.arrival_time < new_ride.departure_time {
            return Err(CoreError::ValidationError(
                "arrival_time must not precede departure_time".to_string(),
            ));
        }

        let ride = self.repo.create_ride(&new_ride).await?;
        info!("Ride created: {} ({} -> {})", ride.ride_id, ride.origin, ride.destination);
        Ok(ride)
    }

    /// A patch that moves only one timestamp is checked against the stored
    /// row by the repository, which reports it as a validation error.
    pub async fn update(&self, ride_id: Uuid, patch: RidePatch) -> CoreResult<Ride> {
        if let Some(seats) = patch.number_of_seats {
            require_positive_seats(seats)?;
        }
        if let Some(distance) = patch.distance {
            require_non_negative("distance", distance)?;
        }
        if let Some(price) = patch.price {
            require_non_negative("price", price)?;
        }
        if let (Some(departure), Some(arrival)) = (patch.departure_time, patch.arrival_time) {
            if arrival < departure {
                return Err(CoreError::ValidationError(
                    "arrival_time must not precede departure_time".to_string(),
                ));
            }
        }

        let ride = self
            .repo
            .update_ride(ride_id, &patch)
            .await?
            .ok_or_else(|| not_found(ride_id))?;
        info!("Ride updated: {}", ride_id);
        Ok(ride)
    }

    pub async fn delete(&self, ride_id: Uuid) -> CoreResult<()> {
        if !self.repo.delete_ride(ride_id).await? {
            return Err(not_found(ride_id));
        }
        info!("Ride deleted: {}", ride_id);
        Ok(())
    }
}

fn not_found(ride_id: Uuid) -> CoreError {
    CoreError::NotFound {
        entity: "ride",
        key: ride_id.to_string(),
    }
}
