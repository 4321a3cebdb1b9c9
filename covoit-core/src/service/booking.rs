use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use covoit_shared::{Booking, BookingPatch, NewBooking};

use super::{require_non_negative, require_positive_seats};
use crate::repository::BookingRepository;
use crate::{CoreError, CoreResult};

/// Bookings are advisory: the referenced ride and user are not looked up
/// and the ride's seat count is left as is.
#[derive(Clone)]
pub struct BookingService {
    repo: Arc<dyn BookingRepository>,
}

impl BookingService {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CoreResult<Vec<Booking>> {
        Ok(self.repo.list_bookings().await?)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> CoreResult<Vec<Booking>> {
        Ok(self.repo.list_bookings_for_user(user_id).await?)
    }

    pub async fn list_for_ride(&self, ride_id: Uuid) -> CoreResult<Vec<Booking>> {
        Ok(self.repo.list_bookings_for_ride(ride_id).await?)
    }

    pub async fn find_by_id(&self, booking_id: Uuid) -> CoreResult<Booking> {
        self.repo
            .find_booking_by_id(booking_id)
            .await?
            .ok_or_else(|| not_found(booking_id))
    }

    pub async fn create(&self, new_booking: NewBooking) -> CoreResult<Booking> {
        require_positive_seats(new_booking.number_of_seats)?;
        require_non_negative("total_price", new_booking.total_price)?;

        let booking = self.repo.create_booking(&new_booking).await?;
        info!(
            "Booking created: {} ({} seat(s) on ride {})",
            booking.booking_id, booking.number_of_seats, booking.ride_id
        );
        Ok(booking)
    }

    pub async fn update(&self, booking_id: Uuid, patch: BookingPatch) -> CoreResult<Booking> {
        if let Some(seats) = patch.number_of_seats {
            require_positive_seats(seats)?;
        }
        if let Some(total_price) = patch.total_price {
            require_non_negative("total_price", total_price)?;
        }

        let booking = self
            .repo
            .update_booking(booking_id, &patch)
            .await?
            .ok_or_else(|| not_found(booking_id))?;
        info!("Booking updated: {}", booking_id);
        Ok(booking)
    }

    pub async fn delete(&self, booking_id: Uuid) -> CoreResult<()> {
        if !self.repo.delete_booking(booking_id).await? {
            return Err(not_found(booking_id));
        }
        info!("Booking deleted: {}", booking_id);
        Ok(())
    }
}

fn not_found(booking_id: Uuid) -> CoreError {
    CoreError::NotFound {
        entity: "booking",
        key: booking_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRepository;

    fn new_booking(ride_id: Uuid, user_id: Uuid) -> NewBooking {
        NewBooking {
            ride_id,
            user_id,
            number_of_seats: 1,
            total_price: 9.5,
            booking_time: None,
        }
    }

    #[tokio::test]
    async fn test_booking_does_not_require_existing_ride() {
        let service = BookingService::new(Arc::new(InMemoryRepository::new()));

        // Neither id refers to a stored row.
        let booking = service
            .create(new_booking(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(service.find_by_id(booking.booking_id).await.unwrap(), booking);
    }

    #[tokio::test]
    async fn test_filters_by_user_and_ride() {
        let service = BookingService::new(Arc::new(InMemoryRepository::new()));
        let ride_a = Uuid::new_v4();
        let ride_b = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.create(new_booking(ride_a, alice)).await.unwrap();
        service.create(new_booking(ride_b, alice)).await.unwrap();
        service.create(new_booking(ride_a, bob)).await.unwrap();

        assert_eq!(service.list().await.unwrap().len(), 3);
        assert_eq!(service.list_for_user(alice).await.unwrap().len(), 2);
        assert_eq!(service.list_for_ride(ride_a).await.unwrap().len(), 2);
        assert!(service.list_for_ride(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_negative_total_price() {
        let service = BookingService::new(Arc::new(InMemoryRepository::new()));
        let mut payload = new_booking(Uuid::new_v4(), Uuid::new_v4());
        payload.total_price = -1.0;

        let err = service.create(payload).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = BookingService::new(Arc::new(InMemoryRepository::new()));
        let booking = service
            .create(new_booking(Uuid::new_v4(), Uuid::new_v4()))
            .await
            .unwrap();

        service.delete(booking.booking_id).await.unwrap();
        let err = service.delete(booking.booking_id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { entity: "booking", .. }));
    }
}
