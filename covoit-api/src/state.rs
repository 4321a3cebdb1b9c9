use std::sync::Arc;
use covoit_core::{BookingRepository, RideRepository, UserRepository};
use covoit_core::{BookingService, RideService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub rides: RideService,
    pub bookings: BookingService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        rides: Arc<dyn RideRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            users: UserService::new(users),
            rides: RideService::new(rides),
            bookings: BookingService::new(bookings),
        }
    }

    /// Builds the state from a single backend serving all three entities.
    pub fn with_repository<R>(repo: Arc<R>) -> Self
    where
        R: UserRepository + RideRepository + BookingRepository + 'static,
    {
        Self::new(repo.clone(), repo.clone(), repo)
    }
}
