use crate::database::{
    model::flight_booking::FlightBookingRow, model::hotel_booking::HotelBookingRow,
    model::itinerary::ItineraryRow, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::booking::{BookingStatus, HotelBooking};
use kernel::model::flight::FlightBooking;
use kernel::model::id::{ItineraryId, UserId};
use kernel::model::itinerary::{
    event::ConfirmItinerary, Itinerary, ItineraryDetail, ItineraryStatus,
};
use kernel::repository::itinerary::ItineraryRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ItineraryRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ItineraryRepository for ItineraryRepositoryImpl {
    // ユーザーの計画中（PENDING）旅程を返す。なければ作成する。
    // 「1 ユーザー 1 計画中旅程」は DB 制約ではなく find-or-create の運用で保つ
    async fn find_or_create_pending(&self, user_id: UserId) -> AppResult<Itinerary> {
        let existing: Option<ItineraryRow> = sqlx::query_as(
            r#"
                SELECT itinerary_id, user_id, status
                FROM itineraries
                WHERE user_id = $1 AND status = $2
                ORDER BY created_at ASC
                LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(ItineraryStatus::Pending)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if let Some(row) = existing {
            return Ok(Itinerary::from(row));
        }

        let row: ItineraryRow = sqlx::query_as(
            r#"
                INSERT INTO itineraries (user_id, status)
                VALUES ($1, $2)
                RETURNING itinerary_id, user_id, status
            "#,
        )
        .bind(user_id)
        .bind(ItineraryStatus::Pending)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(Itinerary::from(row))
    }

    async fn find_pending_by_user(&self, user_id: UserId) -> AppResult<Option<ItineraryDetail>> {
        let itinerary: Option<ItineraryRow> = sqlx::query_as(
            r#"
                SELECT itinerary_id, user_id, status
                FROM itineraries
                WHERE user_id = $1 AND status = $2
                ORDER BY created_at ASC
                LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(ItineraryStatus::Pending)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(itinerary) = itinerary else {
            return Ok(None);
        };

        let hotel_booking = self
            .find_attached_hotel_booking(itinerary.itinerary_id)
            .await?;
        let flight_booking = self
            .find_attached_flight_booking(itinerary.itinerary_id)
            .await?;

        Ok(Some(ItineraryDetail {
            itinerary: Itinerary::from(itinerary),
            hotel_booking,
            flight_booking,
        }))
    }

    // 確定直後の読み直しにも使うため、旅程の状態では絞らない
    async fn find_detail_by_id(
        &self,
        itinerary_id: ItineraryId,
    ) -> AppResult<Option<ItineraryDetail>> {
        let itinerary: Option<ItineraryRow> = sqlx::query_as(
            r#"
                SELECT itinerary_id, user_id, status
                FROM itineraries
                WHERE itinerary_id = $1
            "#,
        )
        .bind(itinerary_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(itinerary) = itinerary else {
            return Ok(None);
        };

        let hotel_booking = self
            .find_attached_hotel_booking(itinerary.itinerary_id)
            .await?;
        let flight_booking = self
            .find_attached_flight_booking(itinerary.itinerary_id)
            .await?;

        Ok(Some(ItineraryDetail {
            itinerary: Itinerary::from(itinerary),
            hotel_booking,
            flight_booking,
        }))
    }

    // チェックアウト成功時の一括確定。
    // 旅程・ホテル予約・フライト予約の状態遷移を 1 トランザクションで行い、
    // 途中で失敗した場合は何も確定しない
    async fn confirm(&self, event: ConfirmItinerary) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let res = sqlx::query(
            r#"
                UPDATE itineraries
                SET status = $2
                WHERE itinerary_id = $1 AND status = $3
            "#,
        )
        .bind(event.itinerary_id)
        .bind(ItineraryStatus::Confirmed)
        .bind(ItineraryStatus::Pending)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "確定できる旅程（{}）がありませんでした。",
                event.itinerary_id
            )));
        }

        if let Some(hotel_booking_id) = event.hotel_booking_id {
            let res = sqlx::query(
                r#"
                    UPDATE hotel_bookings
                    SET status = $2
                    WHERE hotel_booking_id = $1 AND status = $3
                "#,
            )
            .bind(hotel_booking_id)
            .bind(BookingStatus::Confirmed)
            .bind(BookingStatus::Pending)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No hotel booking record has been confirmed".into(),
                ));
            }
        }

        if let Some(flight_booking_id) = event.flight_booking_id {
            let provider_ref = event.provider_ref.as_ref().map(|r| r.0.as_str());
            let res = sqlx::query(
                r#"
                    UPDATE flight_bookings
                    SET status = $2, provider_ref = $4
                    WHERE flight_booking_id = $1 AND status = $3
                "#,
            )
            .bind(flight_booking_id)
            .bind(BookingStatus::Confirmed)
            .bind(BookingStatus::Pending)
            .bind(provider_ref)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No flight booking record has been confirmed".into(),
                ));
            }
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

impl ItineraryRepositoryImpl {
    async fn find_attached_hotel_booking(
        &self,
        itinerary_id: ItineraryId,
    ) -> AppResult<Option<HotelBooking>> {
        let row: Option<HotelBookingRow> = sqlx::query_as(
            r#"
                SELECT
                    hotel_booking_id,
                    room_type_id,
                    hotel_id,
                    user_id,
                    itinerary_id,
                    check_in_date,
                    check_out_date,
                    status,
                    created_at
                FROM hotel_bookings
                WHERE itinerary_id = $1 AND status <> $2
                ORDER BY created_at DESC
                LIMIT 1
            "#,
        )
        .bind(itinerary_id)
        .bind(BookingStatus::Cancelled)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(HotelBooking::from))
    }

    async fn find_attached_flight_booking(
        &self,
        itinerary_id: ItineraryId,
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
                WHERE itinerary_id = $1 AND status <> $2
                ORDER BY created_at DESC
                LIMIT 1
            "#,
        )
        .bind(itinerary_id)
        .bind(BookingStatus::Cancelled)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(FlightBooking::from))
    }
}
