//! In-memory implementation of every repository trait.
//!
//! Backs the service and handler tests. `set_unavailable(true)` makes every
//! call fail the way a lost database connection would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;
use covoit_shared::{Booking, BookingPatch, NewBooking, NewRide, NewUser, Ride, RidePatch, User, UserPatch};

use crate::repository::{
    BookingRepository, RepositoryError, RepositoryResult, RideRepository, UserRepository,
};

#[derive(Default)]
pub struct InMemoryRepository {
    users: RwLock<HashMap<Uuid, User>>,
    rides: RwLock<HashMap<Uuid, Ride>>,
    bookings: RwLock<HashMap<Uuid, Booking>>,
    unavailable: AtomicBool,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn ride_count(&self) -> usize {
        self.rides.read().await.len()
    }

    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }

    fn check_available(&self, context: &str) -> RepositoryResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::storage(context, "storage unavailable"));
        }
        Ok(())
    }
}

fn email_taken(users: &HashMap<Uuid, User>, email: &str, except: Option<Uuid>) -> bool {
    users
        .values()
        .any(|u| u.email == email && Some(u.user_id) != except)
}

fn duplicate_email(email: &str) -> RepositoryError {
    RepositoryError::Duplicate(format!("email {} is already registered", email))
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn list_users(&self) -> RepositoryResult<Vec<User>> {
        self.check_available("could not retrieve users")?;
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> RepositoryResult<Option<User>> {
        self.check_available("could not retrieve user")?;
        Ok(self.users.read().await.get(&user_id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        self.check_available("could not retrieve user")?;
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        self.check_available("could not create user")?;
        let mut users = self.users.write().await;
        if email_taken(&users, &user.email, None) {
            return Err(duplicate_email(&user.email));
        }
        let user = user.clone().into_user(Uuid::new_v4());
        users.insert(user.user_id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, user_id: Uuid, patch: &UserPatch) -> RepositoryResult<Option<User>> {
        self.check_available("could not update user")?;
        let mut users = self.users.write().await;
        if !users.contains_key(&user_id) {
            return Ok(None);
        }
        if let Some(email) = &patch.email {
            if email_taken(&users, email, Some(user_id)) {
                return Err(duplicate_email(email));
            }
        }
        Ok(users.get_mut(&user_id).map(|user| {
            patch.apply_to(user);
            user.clone()
        }))
    }

    async fn delete_user(&self, user_id: Uuid) -> RepositoryResult<bool> {
        self.check_available("could not delete user")?;
        Ok(self.users.write().await.remove(&user_id).is_some())
    }
}

#[async_trait]
impl RideRepository for InMemoryRepository {
    async fn list_rides(&self) -> RepositoryResult<Vec<Ride>> {
        self.check_available("could not retrieve rides")?;
        let mut rides: Vec<Ride> = self.rides.read().await.values().cloned().collect();
        rides.sort_by_key(|r| r.departure_time);
        Ok(rides)
    }

    async fn find_ride_by_id(&self, ride_id: Uuid) -> RepositoryResult<Option<Ride>> {
        self.check_available("could not retrieve ride")?;
        Ok(self.rides.read().await.get(&ride_id).cloned())
    }

    async fn create_ride(&self, ride: &NewRide) -> RepositoryResult<Ride> {
        self.check_available("could not create ride")?;
        let ride = ride.clone().into_ride(Uuid::new_v4());
        self.rides.write().await.insert(ride.ride_id, ride.clone());
        Ok(ride)
    }

    async fn update_ride(&self, ride_id: Uuid, patch: &RidePatch) -> RepositoryResult<Option<Ride>> {
        self.check_available("could not update ride")?;
        let mut rides = self.rides.write().await;
        let Some(stored) = rides.get_mut(&ride_id) else {
            return Ok(None);
        };
        let mut updated = stored.clone();
        patch.apply_to(&mut updated);
        if updated.arrival_time < updated.departure_time {
            return Err(RepositoryError::Constraint(format!(
                "could not update ride {}: arrival_time must not precede departure_time",
                ride_id
            )));
        }
        *stored = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_ride(&self, ride_id: Uuid) -> RepositoryResult<bool> {
        self.check_available("could not delete ride")?;
        Ok(self.rides.write().await.remove(&ride_id).is_some())
    }
}

impl InMemoryRepository {
    async fn bookings_where(&self, keep: impl Fn(&Booking) -> bool) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .read()
            .await
            .values()
            .filter(|&b| keep(b))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.booking_time);
        bookings
    }
}

#[async_trait]
impl BookingRepository for InMemoryRepository {
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>> {
        self.check_available("could not retrieve bookings")?;
        Ok(self.bookings_where(|_| true).await)
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Booking>> {
        self.check_available("could not retrieve bookings")?;
        Ok(self.bookings_where(|b| b.user_id == user_id).await)
    }

    async fn list_bookings_for_ride(&self, ride_id: Uuid) -> RepositoryResult<Vec<Booking>> {
        self.check_available("could not retrieve bookings")?;
        Ok(self.bookings_where(|b| b.ride_id == ride_id).await)
    }

    async fn find_booking_by_id(&self, booking_id: Uuid) -> RepositoryResult<Option<Booking>> {
        self.check_available("could not retrieve booking")?;
        Ok(self.bookings.read().await.get(&booking_id).cloned())
    }

    async fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking> {
        self.check_available("could not create booking")?;
        let booking = booking.clone().into_booking(Uuid::new_v4(), Utc::now());
        self.bookings
            .write()
            .await
            .insert(booking.booking_id, booking.clone());
        Ok(booking)
    }

    async fn update_booking(
        &self,
        booking_id: Uuid,
        patch: &BookingPatch,
    ) -> RepositoryResult<Option<Booking>> {
        self.check_available("could not update booking")?;
        Ok(self.bookings.write().await.get_mut(&booking_id).map(|booking| {
            patch.apply_to(booking);
            booking.clone()
        }))
    }

    async fn delete_booking(&self, booking_id: Uuid) -> RepositoryResult<bool> {
        self.check_available("could not delete booking")?;
        Ok(self.bookings.write().await.remove(&booking_id).is_some())
    }
}
