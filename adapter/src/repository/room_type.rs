use crate::database::{
    model::hotel_booking::HotelBookingRow,
    model::room_type::{RoomAvailabilityRow, RoomTypeRow, RoomTypeWithHotelRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::booking::{select_over_capacity, BookingStatus, HotelBooking};
use kernel::model::date_range::DateRange;
use kernel::model::hotel::{event::ResizeRoomType, RoomAvailability, RoomType, RoomTypeWithHotel};
use kernel::model::id::{RoomTypeId, UserId};
use kernel::repository::room_type::RoomTypeRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct RoomTypeRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomTypeRepository for RoomTypeRepositoryImpl {
    // 指定期間の在庫状況を読む。
    // 重複判定は包含的な述語（check_in_date <= 終了日 AND check_out_date >= 開始日）。
    // 終了日ちょうどにチェックアウトする予約も「重複あり」として数える。
    async fn find_availability(
        &self,
        room_type_id: RoomTypeId,
        range: &DateRange,
    ) -> AppResult<Option<RoomAvailability>> {
        let row: Option<RoomAvailabilityRow> = sqlx::query_as(
            r#"
                SELECT
                    rt.room_type_id,
                    rt.total_rooms,
                    (
                        SELECT COUNT(*)
                        FROM hotel_bookings AS hb
                        WHERE hb.room_type_id = rt.room_type_id
                          AND hb.status = $2
                          AND hb.check_in_date <= $4
                          AND hb.check_out_date >= $3
                    ) AS overlap_count
                FROM room_types AS rt
                WHERE rt.room_type_id = $1
            "#,
        )
        .bind(room_type_id)
        .bind(BookingStatus::Confirmed)
        .bind(range.start)
        .bind(range.end)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(RoomAvailability::from))
    }

    async fn find_all_by_owner(&self, owner_id: UserId) -> AppResult<Vec<RoomType>> {
        let rows: Vec<RoomTypeRow> = sqlx::query_as(
            r#"
                SELECT
                    rt.room_type_id,
                    rt.hotel_id,
                    rt.room_type_name,
                    rt.total_rooms,
                    rt.price_per_night
                FROM room_types AS rt
                INNER JOIN hotels AS h ON rt.hotel_id = h.hotel_id
                WHERE h.owner_id = $1
                ORDER BY rt.created_at ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(RoomType::from).collect())
    }

    async fn find_with_hotel(
        &self,
        room_type_id: RoomTypeId,
    ) -> AppResult<Option<RoomTypeWithHotel>> {
        let row: Option<RoomTypeWithHotelRow> = sqlx::query_as(
            r#"
                SELECT
                    rt.room_type_id,
                    rt.hotel_id,
                    rt.room_type_name,
                    rt.total_rooms,
                    rt.price_per_night,
                    h.owner_id,
                    h.hotel_name,
                    h.address
                FROM room_types AS rt
                INNER JOIN hotels AS h ON rt.hotel_id = h.hotel_id
                WHERE rt.room_type_id = $1
            "#,
        )
        .bind(room_type_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(RoomTypeWithHotel::from))
    }

    // 総室数を変更する。縮小時は以下をひとつのトランザクションで行う。
    // - 対象期間（指定なしなら実質無制限）に重なる CONFIRMED 予約を新しい順に取得
    // - 超過分（件数 - 新容量）を新しい順にキャンセルし、対象ユーザーへ通知を作成
    // - 総室数を更新
    async fn resize(&self, event: ResizeRoomType) -> AppResult<RoomTypeWithHotel> {
        if event.new_total_rooms < 0 {
            return Err(AppError::UnprocessableEntity(format!(
                "総室数には 0 以上の値を指定してください（指定値 = {}）。",
                event.new_total_rooms
            )));
        }

        let mut tx = self.db.begin().await?;

        // 対象の客室タイプとオーナー確認
        let current: Option<RoomTypeWithHotelRow> = sqlx::query_as(
            r#"
                SELECT
                    rt.room_type_id,
                    rt.hotel_id,
                    rt.room_type_name,
                    rt.total_rooms,
                    rt.price_per_night,
                    h.owner_id,
                    h.hotel_name,
                    h.address
                FROM room_types AS rt
                INNER JOIN hotels AS h ON rt.hotel_id = h.hotel_id
                WHERE rt.room_type_id = $1
            "#,
        )
        .bind(event.room_type_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(current) = current else {
            return Err(AppError::EntityNotFound(format!(
                "客室タイプ（{}）が見つかりませんでした。",
                event.room_type_id
            )));
        };

        if current.owner_id != event.requested_user {
            return Err(AppError::ForbiddenOperation);
        }

        // 容量が増える（または変わらない）場合はカスケード不要
        if event.new_total_rooms < current.total_rooms {
            let range = event.period.unwrap_or_else(DateRange::unbounded);

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
                    WHERE room_type_id = $1
                      AND status = $2
                      AND check_in_date <= $4
                      AND check_out_date >= $3
                    ORDER BY created_at DESC
                "#,
            )
            .bind(event.room_type_id)
            .bind(BookingStatus::Confirmed)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

            let overlapping: Vec<HotelBooking> =
                rows.into_iter().map(HotelBooking::from).collect();
            // 新しい予約から順にキャンセルし、先に確定した予約を保護する
            let cancelled = select_over_capacity(overlapping, event.new_total_rooms);

            if !cancelled.is_empty() {
                let ids: Vec<Uuid> = cancelled
                    .iter()
                    .map(|b| b.hotel_booking_id.raw())
                    .collect();
                let res = sqlx::query(
                    r#"
                        UPDATE hotel_bookings
                        SET status = $2
                        WHERE hotel_booking_id = ANY($1)
                    "#,
                )
                .bind(&ids)
                .bind(BookingStatus::Cancelled)
                .execute(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

                if res.rows_affected() < cancelled.len() as u64 {
                    return Err(AppError::NoRowsAffectedError(
                        "Not all excess bookings have been cancelled".into(),
                    ));
                }

                for booking in &cancelled {
                    let message = format!(
                        "客室数の変更に伴い、{}（{}）の {} 〜 {} のご予約はキャンセルになりました。",
                        current.hotel_name,
                        current.room_type_name,
                        booking.stay.start,
                        booking.stay.end
                    );
                    sqlx::query(
                        r#"
                            INSERT INTO notifications (user_id, message, hotel_booking_id)
                            VALUES ($1, $2, $3)
                        "#,
                    )
                    .bind(booking.user_id)
                    .bind(message)
                    .bind(booking.hotel_booking_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;
                }
            }
        }

        let res = sqlx::query(
            r#"
                UPDATE room_types
                SET total_rooms = $2
                WHERE room_type_id = $1
            "#,
        )
        .bind(event.room_type_id)
        .bind(event.new_total_rooms)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room type record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        self.find_with_hotel(event.room_type_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "客室タイプ（{}）が見つかりませんでした。",
                    event.room_type_id
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    // fixtures/common.sql の ID
    const OWNER_ID: &str = "050afe56-c3da-4448-8e4d-6f44007d2ca5";
    const GUEST_ID: &str = "9582f9de-0fd1-4892-b20c-70139a7eb95b";
    const GUEST2_ID: &str = "d33d2a07-cbb5-4b35-8f0a-3452ba2cc67c";
    const HOTEL_ID: &str = "2f3b4bbc-85a9-44ed-9d86-5ca1b7f4a8a0";
    const DOUBLE_ID: &str = "98a4e152-3a43-4e8e-9cb4-27d6f8b5f4d5";
    const SINGLE_ID: &str = "aaf8bdf5-3cb7-4c04-8233-935cb84b4d8c";
    const SUITE_ID: &str = "3d39e11c-d565-4b45-b8a4-8575a4c95ae6";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
        DateRange::new(start, end).unwrap()
    }

    // created_at を明示して CONFIRMED 予約を直接挿入する
    async fn insert_confirmed_booking(
        pool: &sqlx::PgPool,
        room_type_id: &str,
        user_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        created_minutes: i32,
    ) -> anyhow::Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
                INSERT INTO hotel_bookings
                    (room_type_id, hotel_id, user_id, check_in_date, check_out_date,
                     status, created_at)
                VALUES
                    ($1::uuid, $2::uuid, $3::uuid, $4, $5, 'CONFIRMED',
                     TIMESTAMPTZ '2025-05-01 00:00:00+00' + make_interval(mins => $6))
                RETURNING hotel_booking_id
            "#,
        )
        .bind(room_type_id)
        .bind(HOTEL_ID)
        .bind(user_id)
        .bind(check_in)
        .bind(check_out)
        .bind(created_minutes)
        .fetch_one(pool)
        .await?;
        Ok(id)
    }

    async fn booking_status(pool: &sqlx::PgPool, id: Uuid) -> anyhow::Result<String> {
        let status: String =
            sqlx::query_scalar("SELECT status::text FROM hotel_bookings WHERE hotel_booking_id = $1")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(status)
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_availability_without_bookings_equals_total(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool));

        let av = repo
            .find_availability(
                RoomTypeId::from_str(DOUBLE_ID)?,
                &range(date(2025, 6, 1), date(2025, 6, 5)),
            )
            .await?
            .unwrap();
        assert_eq!(av.total_rooms, 2);
        assert_eq!(av.overlap_count, 0);
        assert_eq!(av.remaining(), 2);

        // 存在しない客室タイプは None
        let missing = repo
            .find_availability(
                RoomTypeId::new(),
                &range(date(2025, 6, 1), date(2025, 6, 5)),
            )
            .await?;
        assert!(missing.is_none());
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_availability_ignores_disjoint_and_non_confirmed(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        // 期間外の CONFIRMED 予約
        insert_confirmed_booking(&pool, DOUBLE_ID, GUEST_ID, date(2025, 6, 1), date(2025, 6, 5), 0)
            .await?;
        // 期間内だが PENDING の予約
        sqlx::query(
            r#"
                INSERT INTO hotel_bookings
                    (room_type_id, hotel_id, user_id, check_in_date, check_out_date, status)
                VALUES ($1::uuid, $2::uuid, $3::uuid, $4, $5, 'PENDING')
            "#,
        )
        .bind(DOUBLE_ID)
        .bind(HOTEL_ID)
        .bind(GUEST_ID)
        .bind(date(2025, 6, 10))
        .bind(date(2025, 6, 12))
        .execute(&pool)
        .await?;

        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool));
        let av = repo
            .find_availability(
                RoomTypeId::from_str(DOUBLE_ID)?,
                &range(date(2025, 6, 10), date(2025, 6, 12)),
            )
            .await?
            .unwrap();
        assert_eq!(av.overlap_count, 0);
        assert_eq!(av.remaining(), 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_availability_counts_inclusive_boundary(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        // チェックアウト日が検索開始日と同じ予約も「重複」として数える
        insert_confirmed_booking(&pool, SINGLE_ID, GUEST_ID, date(2025, 6, 5), date(2025, 6, 10), 0)
            .await?;

        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool));
        let av = repo
            .find_availability(
                RoomTypeId::from_str(SINGLE_ID)?,
                &range(date(2025, 6, 10), date(2025, 6, 12)),
            )
            .await?
            .unwrap();
        assert_eq!(av.overlap_count, 1);
        assert_eq!(av.remaining(), 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_resize_shrink_cancels_newest_first_and_notifies(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let stay_start = date(2025, 7, 1);
        let stay_end = date(2025, 7, 5);
        let b1 =
            insert_confirmed_booking(&pool, SUITE_ID, GUEST_ID, stay_start, stay_end, 10).await?;
        let b2 =
            insert_confirmed_booking(&pool, SUITE_ID, GUEST2_ID, stay_start, stay_end, 20).await?;
        let b3 =
            insert_confirmed_booking(&pool, SUITE_ID, GUEST_ID, stay_start, stay_end, 30).await?;

        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let updated = repo
            .resize(ResizeRoomType::new(
                RoomTypeId::from_str(SUITE_ID)?,
                UserId::from_str(OWNER_ID)?,
                1,
                None,
            ))
            .await?;

        assert_eq!(updated.room_type.total_rooms, 1);
        assert_eq!(updated.hotel.hotel_name, "Sakura Grand Hotel");

        // 新しい 2 件（b3, b2）がキャンセルされ、最初の予約は残る
        assert_eq!(booking_status(&pool, b1).await?, "CONFIRMED");
        assert_eq!(booking_status(&pool, b2).await?, "CANCELLED");
        assert_eq!(booking_status(&pool, b3).await?, "CANCELLED");

        let notification_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
                .fetch_one(&pool)
                .await?;
        assert_eq!(notification_count, 2);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_resize_grow_never_cancels(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let b1 = insert_confirmed_booking(
            &pool,
            SUITE_ID,
            GUEST_ID,
            date(2025, 7, 1),
            date(2025, 7, 5),
            10,
        )
        .await?;

        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        let updated = repo
            .resize(ResizeRoomType::new(
                RoomTypeId::from_str(SUITE_ID)?,
                UserId::from_str(OWNER_ID)?,
                5,
                None,
            ))
            .await?;

        assert_eq!(updated.room_type.total_rooms, 5);
        assert_eq!(booking_status(&pool, b1).await?, "CONFIRMED");

        let notification_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
                .fetch_one(&pool)
                .await?;
        assert_eq!(notification_count, 0);
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_resize_bounded_period_spares_outside_bookings(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        // 8 月の予約は対象期間（7 月）の外なのでキャンセルされない
        let july =
            insert_confirmed_booking(&pool, SINGLE_ID, GUEST_ID, date(2025, 7, 1), date(2025, 7, 5), 10)
                .await?;
        let august =
            insert_confirmed_booking(&pool, SINGLE_ID, GUEST2_ID, date(2025, 8, 1), date(2025, 8, 5), 20)
                .await?;

        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool.clone()));
        repo.resize(ResizeRoomType::new(
            RoomTypeId::from_str(SINGLE_ID)?,
            UserId::from_str(OWNER_ID)?,
            0,
            Some(range(date(2025, 7, 1), date(2025, 7, 31))),
        ))
        .await?;

        assert_eq!(booking_status(&pool, july).await?, "CANCELLED");
        assert_eq!(booking_status(&pool, august).await?, "CONFIRMED");
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../../fixtures", scripts("common")))]
    async fn test_resize_requires_owner(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = RoomTypeRepositoryImpl::new(ConnectionPool::new(pool));
        let res = repo
            .resize(ResizeRoomType::new(
                RoomTypeId::from_str(SUITE_ID)?,
                UserId::from_str(GUEST_ID)?,
                1,
                None,
            ))
            .await;
        assert!(matches!(res, Err(AppError::ForbiddenOperation)));
        Ok(())
    }
}
