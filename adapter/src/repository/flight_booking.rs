use crate::database::{model::flight_booking::FlightBookingRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::booking::BookingStatus;
use kernel::model::flight::{event::CreateFlightBooking, FlightBooking};
use kernel::model::id::FlightBookingId;
use kernel::repository::flight_booking::FlightBookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct FlightBookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl FlightBookingRepository for FlightBookingRepositoryImpl {
    // PENDING で作成し、発券はチェックアウト時にまとめて行う
    async fn create(&self, event: CreateFlightBooking) -> AppResult<FlightBookingId> {
        let flight_booking_id = FlightBookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO flight_bookings
                    (flight_booking_id, user_id, itinerary_id, flight_number,
                     departure_date, origin, destination, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(flight_booking_id)
        .bind(event.user_id)
        .bind(event.itinerary_id)
        .bind(&event.flight_number)
        .bind(event.departure_date)
        .bind(&event.origin)
        .bind(&event.destination)
        .bind(BookingStatus::Pending)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No flight booking record has been created".into(),
            ));
        }

        Ok(flight_booking_id)
    }

    async fn find_by_id(
        &self,
        flight_booking_id: FlightBookingId,
    ) -> AppResult<Option<FlightBooking>> {
        let row: Option<FlightBookingRow> = sqlx::query_as(
            r#"
                SELECT
                    flight_booking_id,
                    user_id,
                    itinerary_id,
                    flight_number,
                    departure_date,
                    origin,
                    destination,
                    status,
                    provider_ref
                FROM flight_bookings
                WHERE flight_booking_id = $1
            "#,
        )
        .bind(flight_booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(FlightBooking::from))
    }
}
