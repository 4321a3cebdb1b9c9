//! Exercises the Postgres repositories against a real database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p covoit-store -- --ignored`.

use chrono::{Duration, TimeZone, Utc};
use covoit_core::repository::{BookingRepository, RepositoryError, RideRepository, UserRepository};
use covoit_shared::{BookingPatch, NewBooking, NewRide, NewUser, RidePatch, UserPatch};
use covoit_store::{PgBookingRepository, PgRideRepository, PgUserRepository};
use sqlx::PgPool;
use uuid::Uuid;

fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Jeanne".into(),
        last_name: "Durand".into(),
        email: email.into(),
        phone: "0611223344".into(),
        address: "3 place Bellecour, Lyon".into(),
    }
}

#[sqlx::test(migrations = "../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_repository(pool: PgPool) -> anyhow::Result<()> {
    let repo = PgUserRepository::new(pool);

    let created = repo.create_user(&new_user("jeanne@test.com")).await?;
    assert!(!created.user_id.is_nil());

    let by_email = repo.find_user_by_email("jeanne@test.com").await?;
    assert_eq!(by_email.as_ref(), Some(&created));

    let duplicate = repo.create_user(&new_user("jeanne@test.com")).await;
    assert!(matches!(duplicate, Err(RepositoryError::Duplicate(_))));

    let patch = UserPatch {
        last_name: Some("Durand-Petit".into()),
        ..Default::default()
    };
    let updated = repo.update_user(created.user_id, &patch).await?.expect("user exists");
    assert_eq!(updated.last_name, "Durand-Petit");
    assert_eq!(updated.phone, created.phone);

    assert!(repo.update_user(Uuid::new_v4(), &patch).await?.is_none());

    assert_eq!(repo.list_users().await?.len(), 1);
    assert!(repo.delete_user(created.user_id).await?);
    assert!(!repo.delete_user(created.user_id).await?);
    assert!(repo.find_user_by_id(created.user_id).await?.is_none());
    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_ride_repository(pool: PgPool) -> anyhow::Result<()> {
    let repo = PgRideRepository::new(pool);
    let departure = Utc.with_ymd_and_hms(2025, 9, 5, 17, 30, 0).unwrap();

    let payload = NewRide {
        origin: "Bordeaux".into(),
        destination: "Toulouse".into(),
        driver_id: Uuid::new_v4(),
        departure_time: departure,
        arrival_time: departure + Duration::hours(2),
        distance: 245.0,
        price: 18.0,
        number_of_seats: 4,
    };
    let created = repo.create_ride(&payload).await?;
    assert_eq!(created, payload.clone().into_ride(created.ride_id));

    let patch = RidePatch {
        number_of_seats: Some(2),
        ..Default::default()
    };
    let updated = repo.update_ride(created.ride_id, &patch).await?.expect("ride exists");
    assert_eq!(updated.number_of_seats, 2);
    assert_eq!(updated.destination, "Toulouse");

    let early_arrival = RidePatch {
        arrival_time: Some(departure - Duration::hours(1)),
        ..Default::default()
    };
    let rejected = repo.update_ride(created.ride_id, &early_arrival).await;
    assert!(matches!(rejected, Err(RepositoryError::Constraint(_))));
    let stored = repo.find_ride_by_id(created.ride_id).await?.expect("ride exists");
    assert_eq!(stored.arrival_time, created.arrival_time);

    assert!(repo.delete_ride(created.ride_id).await?);
    assert!(repo.list_rides().await?.is_empty());
    Ok(())
}

#[sqlx::test(migrations = "../migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_booking_repository(pool: PgPool) -> anyhow::Result<()> {
    let repo = PgBookingRepository::new(pool);
    let ride_id = Uuid::new_v4();
    let user_id = Uuid::new_v4();

    let without_time = repo
        .create_booking(&NewBooking {
            ride_id,
            user_id,
            number_of_seats: 2,
            total_price: 36.0,
            booking_time: None,
        })
        .await?;

    let booked_at = Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap();
    let with_time = repo
        .create_booking(&NewBooking {
            ride_id: Uuid::new_v4(),
            user_id,
            number_of_seats: 1,
            total_price: 18.0,
            booking_time: Some(booked_at),
        })
        .await?;
    assert_eq!(with_time.booking_time, booked_at);

    assert_eq!(repo.list_bookings().await?.len(), 2);
    assert_eq!(repo.list_bookings_for_user(user_id).await?.len(), 2);
    assert_eq!(repo.list_bookings_for_ride(ride_id).await?, vec![without_time.clone()]);

    let patch = BookingPatch {
        number_of_seats: Some(3),
        ..Default::default()
    };
    let updated = repo
        .update_booking(without_time.booking_id, &patch)
        .await?
        .expect("booking exists");
    assert_eq!(updated.number_of_seats, 3);

    assert!(repo.delete_booking(with_time.booking_id).await?);
    assert!(repo.find_booking_by_id(with_time.booking_id).await?.is_none());
    Ok(())
}
