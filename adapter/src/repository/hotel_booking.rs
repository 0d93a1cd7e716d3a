use crate::database::{
    model::hotel_booking::HotelBookingRow, model::room_type::RoomTypeRow, ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::booking::{
    event::{CancelHotelBooking, CreateHotelBooking},
    BookingStatus, HotelBooking,
};
use kernel::model::hotel::RoomAvailability;
use kernel::model::id::{HotelBookingId, UserId};
use kernel::repository::hotel_booking::HotelBookingRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HotelBookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HotelBookingRepository for HotelBookingRepositoryImpl {
    // 予約を作成する。
    // CONFIRMED 指定時は作成前に定員チェックを行う。
    // 定員チェックの読み取りと INSERT は意図的に別ステートメントで、
    // 直列化トランザクションも行ロックも使わない。同時リクエスト同士が
    // 両方チェックを通過し 1 室超過し得るのは既知の挙動で、許容している。
    async fn create(&self, event: CreateHotelBooking) -> AppResult<HotelBookingId> {
        // 客室タイプの存在確認
        let room_type: Option<RoomTypeRow> = sqlx::query_as(
            r#"
                SELECT
                    room_type_id,
                    hotel_id,
                    room_type_name,
                    total_rooms,
                    price_per_night
                FROM room_types
                WHERE room_type_id = $1
            "#,
        )
        .bind(event.room_type_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(room_type) = room_type else {
            return Err(AppError::EntityNotFound(format!(
                "客室タイプ（{}）が見つかりませんでした。",
                event.room_type_id
            )));
        };

        // PENDING は枠を消費しないため定員チェックを行わない
        if event.status == BookingStatus::Confirmed {
            let overlap_count: i64 = sqlx::query_scalar(
                r#"
                    SELECT COUNT(*)
                    FROM hotel_bookings
                    WHERE room_type_id = $1
                      AND status = $2
                      AND check_in_date <= $4
                      AND check_out_date >= $3
                "#,
            )
            .bind(event.room_type_id)
            .bind(BookingStatus::Confirmed)
            .bind(event.stay.start)
            .bind(event.stay.end)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

            RoomAvailability {
                room_type_id: event.room_type_id,
                total_rooms: room_type.total_rooms,
                overlap_count,
            }
            .check_admission()?;
        }

        let hotel_booking_id = HotelBookingId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO hotel_bookings
                    (hotel_booking_id, room_type_id, hotel_id, user_id, itinerary_id,
                     check_in_date, check_out_date, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(hotel_booking_id)
        .bind(event.room_type_id)
        .bind(room_type.hotel_id)
        .bind(event.user_id)
        .bind(event.itinerary_id)
        .bind(event.stay.start)
        .bind(event.stay.end)
        .bind(event.status)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No hotel booking record has been created".into(),
            ));
        }

        Ok(hotel_booking_id)
    }

    // 予約者本人によるキャンセル。CANCELLED は終端状態
    async fn cancel(&self, event: CancelHotelBooking) -> AppResult<()> {
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
                WHERE hotel_booking_id = $1
            "#,
        )
        .bind(event.hotel_booking_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(row) = row else {
            return Err(AppError::EntityNotFound(format!(
                "予約（{}）が見つかりませんでした。",
                event.hotel_booking_id
            )));
        };

        if row.user_id != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }

        if row.status == BookingStatus::Cancelled {
            return Err(AppError::UnprocessableEntity(format!(
                "予約（{}）はすでにキャンセル済みです。",
                event.hotel_booking_id
            )));
        }

        let res = sqlx::query(
            r#"
                UPDATE hotel_bookings
                SET status = $2
                WHERE hotel_booking_id = $1
            "#,
        )
        .bind(event.hotel_booking_id)
        .bind(BookingStatus::Cancelled)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No hotel booking record has been cancelled".into(),
            ));
        }

        Ok(())
    }

    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<HotelBooking>> {
        let rows: Vec<HotelBookingRow> = sqlx::query_as(
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
                WHERE user_id = $1
                ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(HotelBooking::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kernel::model::date_range::DateRange;
    use kernel::model::id::RoomTypeId;
    use std::str::FromStr;

    const GUEST_ID: &str = "9582f9de-0fd1-4892-b20c-70139a7eb95b";
    const GUEST2_ID: &str = "d33d2a07-cbb5-4b35-8f0a-3452ba2cc67c";
    const DOUBLE_ID: &str = "98a4e152-3a43-4e8e-9cb4-27d6f8b5f4d5";
    const SINGLE_ID: &str = "aaf8bdf5-3cb7-4c04-8233-935cb84b4d8c";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stay(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    fn create_event(
        room_type_id: &str,
        user_id: &str,
        range: DateRange,
        status: BookingStatus,
    ) -> CreateHotelBooking {
        CreateHotelBooking::new(
            RoomTypeId::from_str(room_type_id).unwrap(),
            UserId::from_str(user_id).unwrap(),
            None,
            range,
            status,
        )
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_admission_denies_when_full(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelBookingRepositoryImpl::new(ConnectionPool::new(pool));
        let range = stay(date(2025, 6, 1), date(2025, 6, 5));

        // Double は 2 室。2 件まで確定でき、3 件目は拒否される
        repo.create(create_event(DOUBLE_ID, GUEST_ID, range, BookingStatus::Confirmed))
            .await?;
        repo.create(create_event(DOUBLE_ID, GUEST2_ID, range, BookingStatus::Confirmed))
            .await?;

        let res = repo
            .create(create_event(DOUBLE_ID, GUEST_ID, range, BookingStatus::Confirmed))
            .await;
        assert!(matches!(res, Err(AppError::NoRoomAvailable(_))));

        // 完全に離れた期間なら受け付ける
        repo.create(create_event(
            DOUBLE_ID,
            GUEST_ID,
            stay(date(2025, 8, 1), date(2025, 8, 5)),
            BookingStatus::Confirmed,
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_pending_skips_capacity_check(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelBookingRepositoryImpl::new(ConnectionPool::new(pool));
        let range = stay(date(2025, 6, 1), date(2025, 6, 5));

        // Single は 1 室。満室でも PENDING は作成できる
        repo.create(create_event(SINGLE_ID, GUEST_ID, range, BookingStatus::Confirmed))
            .await?;
        repo.create(create_event(SINGLE_ID, GUEST2_ID, range, BookingStatus::Pending))
            .await?;
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_admission_uses_inclusive_overlap(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelBookingRepositoryImpl::new(ConnectionPool::new(pool));

        // Single（1 室）に [06-01, 06-05) の確定予約
        repo.create(create_event(
            SINGLE_ID,
            GUEST_ID,
            stay(date(2025, 6, 1), date(2025, 6, 5)),
            BookingStatus::Confirmed,
        ))
        .await?;

        // 期間が重なる予約は拒否
        let res = repo
            .create(create_event(
                SINGLE_ID,
                GUEST2_ID,
                stay(date(2025, 6, 3), date(2025, 6, 7)),
                BookingStatus::Confirmed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::NoRoomAvailable(_))));

        // チェックアウト日 == チェックイン日の背中合わせも、
        // 包含的な重複判定では「重複あり」となり拒否される
        let res = repo
            .create(create_event(
                SINGLE_ID,
                GUEST2_ID,
                stay(date(2025, 6, 5), date(2025, 6, 7)),
                BookingStatus::Confirmed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::NoRoomAvailable(_))));

        // 1 日空ければ受け付ける
        repo.create(create_event(
            SINGLE_ID,
            GUEST2_ID,
            stay(date(2025, 6, 6), date(2025, 6, 8)),
            BookingStatus::Confirmed,
        ))
        .await?;
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_create_rejects_unknown_room_type(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelBookingRepositoryImpl::new(ConnectionPool::new(pool));
        let res = repo
            .create(CreateHotelBooking::new(
                RoomTypeId::new(),
                UserId::from_str(GUEST_ID)?,
                None,
                stay(date(2025, 6, 1), date(2025, 6, 5)),
                BookingStatus::Confirmed,
            ))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_cancel_is_owner_only_and_terminal(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelBookingRepositoryImpl::new(ConnectionPool::new(pool));
        let booking_id = repo
            .create(create_event(
                DOUBLE_ID,
                GUEST_ID,
                stay(date(2025, 6, 1), date(2025, 6, 5)),
                BookingStatus::Confirmed,
            ))
            .await?;

        // 他人はキャンセルできない
        let res = repo
            .cancel(CancelHotelBooking::new(
                booking_id,
                UserId::from_str(GUEST2_ID)?,
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));

        repo.cancel(CancelHotelBooking::new(
            booking_id,
            UserId::from_str(GUEST_ID)?,
        ))
        .await?;

        // CANCELLED は終端状態
        let res = repo
            .cancel(CancelHotelBooking::new(
                booking_id,
                UserId::from_str(GUEST_ID)?,
            ))
            .await;
        assert!(matches!(res, Err(AppError::UnprocessableEntity(_))));
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_cancelled_booking_frees_capacity(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = HotelBookingRepositoryImpl::new(ConnectionPool::new(pool));
        let range = stay(date(2025, 6, 1), date(2025, 6, 5));

        let booking_id = repo
            .create(create_event(SINGLE_ID, GUEST_ID, range, BookingStatus::Confirmed))
            .await?;
        repo.cancel(CancelHotelBooking::new(
            booking_id,
            UserId::from_str(GUEST_ID)?,
        ))
        .await?;

        // キャンセル済みの予約は在庫を消費しない
        repo.create(create_event(SINGLE_ID, GUEST2_ID, range, BookingStatus::Confirmed))
            .await?;
        Ok(())
    }
}
