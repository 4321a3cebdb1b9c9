use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use sqlx::PgPool;
use covoit_core::repository::{BookingRepository, RepositoryResult};
use covoit_shared::{Booking, BookingPatch, NewBooking};

use crate::database::storage_error;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        column: &'static str,
        id: Uuid,
    ) -> RepositoryResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE {} = $1 ORDER BY booking_time",
            BOOKING_COLUMNS, column
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not retrieve bookings with {} {}", column, id), e))?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: Uuid,
    ride_id: Uuid,
    user_id: Uuid,
    number_of_seats: i32,
    total_price: f64,
    booking_time: DateTime<Utc>,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Booking {
            booking_id: row.booking_id,
            ride_id: row.ride_id,
            user_id: row.user_id,
            number_of_seats: row.number_of_seats,
            total_price: row.total_price,
            booking_time: row.booking_time,
        }
    }
}

const BOOKING_COLUMNS: &str = "booking_id, ride_id, user_id, number_of_seats, total_price, booking_time";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn list_bookings(&self) -> RepositoryResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings ORDER BY booking_time",
            BOOKING_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("could not retrieve bookings", e))?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> RepositoryResult<Vec<Booking>> {
        self.list_where("user_id", user_id).await
    }

    async fn list_bookings_for_ride(&self, ride_id: Uuid) -> RepositoryResult<Vec<Booking>> {
        self.list_where("ride_id", ride_id).await
    }

    async fn find_booking_by_id(&self, booking_id: Uuid) -> RepositoryResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE booking_id = $1",
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not retrieve booking {}", booking_id), e))?;

        Ok(row.map(Booking::from))
    }

    async fn create_booking(&self, booking: &NewBooking) -> RepositoryResult<Booking> {
        let row: BookingRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings (ride_id, user_id, number_of_seats, total_price, booking_time)
            VALUES ($1, $2, $3, $4, COALESCE($5, NOW()))
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(booking.ride_id)
        .bind(booking.user_id)
        .bind(booking.number_of_seats)
        .bind(booking.total_price)
        .bind(booking.booking_time)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not create booking on ride {}", booking.ride_id), e))?;

        Ok(row.into())
    }

    async fn update_booking(
        &self,
        booking_id: Uuid,
        patch: &BookingPatch,
    ) -> RepositoryResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            r#"
            UPDATE bookings
            SET ride_id = COALESCE($2, ride_id),
                user_id = COALESCE($3, user_id),
                number_of_seats = COALESCE($4, number_of_seats),
                total_price = COALESCE($5, total_price),
                booking_time = COALESCE($6, booking_time)
            WHERE booking_id = $1
            RETURNING {}
            "#,
            BOOKING_COLUMNS
        ))
        .bind(booking_id)
        .bind(patch.ride_id)
        .bind(patch.user_id)
        .bind(patch.number_of_seats)
        .bind(patch.total_price)
        .bind(patch.booking_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error(format!("could not update booking {}", booking_id), e))?;

        Ok(row.map(Booking::from))
    }

    async fn delete_booking(&self, booking_id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error(format!("could not delete booking {}", booking_id), e))?;

        Ok(result.rows_affected() > 0)
    }
}
