use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use sqlx::PgPool;
use covoit_core::repository::{RepositoryResult, RideRepository};
use covoit_shared::{NewRide, Ride, RidePatch};

use crate::database::storage_error;

pub struct PgRideRepository {
    pool: PgPool,
}

impl PgRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RideRow {
    ride_id: Uuid,
    origin: String,
    destination: String,
    driver_id: Uuid,
    departure_time: DateTime<Utc>,
    arrival_time: DateTime<Utc>,
    distance: f64,
    price: f64,
    number_of_seats: i32,
}

impl From<RideRow> for Ride {
    fn from(row: RideRow) -> Self {
        Ride {
            ride_id: row.ride_id,
            origin: row.origin,
            destination: row.destination,
            driver_id: row.driver_id,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            distance: row.distance,
            price: row.price,
            number_of_seats: row.number_of_seats,
        }
    }
}

const RIDE_COLUMNS: &str = "ride_id, origin, destination, driver_id, departure_time, arrival_time, distance, price, number_of_seats";

#[async_trait]
impl RideRepository for PgRideRepository {
    async fn list_rides(&self) -> RepositoryResult<Vec<Ride>> {
        let rows: Vec<RideRow> = sqlx::query_as(&format!(
            "SELECT {} FROM rides ORDER BY departure_time",
            RIDE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("could not retrieve rides", e))?;

        Ok(rows.into_iter().map(Ride::from).collect())
    }

    async fn find_ride_by_id(&self, ride_id: Uuid) -> RepositoryResult<Option<Ride>> {
        let row: Option<RideRow> = sqlx::query_as(&format!(
            "SELECT {} FROM rides WHERE ride_id = $1",
            RIDE_COLUMNS
        ))
        .bind(ride_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not retrieve ride {}", ride_id), e))?;

        Ok(row.map(Ride::from))
    }

    async fn create_ride(&self, ride: &NewRide) -> RepositoryResult<Ride> {
        let row: RideRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO rides (origin, destination, driver_id, departure_time, arrival_time, distance, price, number_of_seats)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            RIDE_COLUMNS
        ))
        .bind(&ride.origin)
        .bind(&ride.destination)
        .bind(ride.driver_id)
        .bind(ride.departure_time)
        .bind(ride.arrival_time)
        .bind(ride.distance)
        .bind(ride.price)
        .bind(ride.number_of_seats)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("could not create ride", e))?;

        Ok(row.into())
    }

    async fn update_ride(&self, ride_id: Uuid, patch: &RidePatch) -> RepositoryResult<Option<Ride>> {
        let row: Option<RideRow> = sqlx::query_as(&format!(
            r#"
            UPDATE rides
            SET origin = COALESCE($2, origin),
                destination = COALESCE($3, destination),
                driver_id = COALESCE($4, driver_id),
                departure_time = COALESCE($5, departure_time),
                arrival_time = COALESCE($6, arrival_time),
                distance = COALESCE($7, distance),
                price = COALESCE($8, price),
                number_of_seats = COALESCE($9, number_of_seats)
            WHERE ride_id = $1
            RETURNING {}
            "#,
            RIDE_COLUMNS
        ))
        .bind(ride_id)
        .bind(patch.origin.as_deref())
        .bind(patch.destination.as_deref())
        .bind(patch.driver_id)
        .bind(patch.departure_time)
        .bind(patch.arrival_time)
        .bind(patch.distance)
        .bind(patch.price)
        .bind(patch.number_of_seats)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not update ride {}", ride_id), e))?;

        Ok(row.map(Ride::from))
    }

    async fn delete_ride(&self, ride_id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM rides WHERE ride_id = $1")
            .bind(ride_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(format!("could not delete ride {}", ride_id), e))?;

        Ok(result.rows_affected() > 0)
    }
}
