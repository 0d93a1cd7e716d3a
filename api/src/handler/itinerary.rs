use std::sync::Arc;

use axum::{extract::State, Json};
use kernel::client::flight::FlightProviderClient;
use kernel::model::flight::FlightOrder;
use kernel::model::itinerary::{event::ConfirmItinerary, ItineraryDetail};
use kernel::model::notification::event::CreateNotification;
use kernel::model::user::User;
use kernel::repository::{
    itinerary::ItineraryRepository, notification::NotificationRepository,
    room_type::RoomTypeRepository,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::itinerary::ItineraryResponse;

pub async fn show_current_itinerary(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ItineraryResponse>> {
    let detail = registry
        .itinerary_repository()
        .find_pending_by_user(user.id())
        .await?
        .ok_or_else(|| AppError::EntityNotFound("計画中の旅程がありません。".into()))?;
    Ok(Json(ItineraryResponse::from(detail)))
}

pub async fn checkout_itinerary(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<ItineraryResponse>> {
    let detail = run_checkout(
        &user.user,
        registry.itinerary_repository(),
        registry.room_type_repository(),
        registry.flight_provider_client(),
        registry.notification_repository(),
    )
    .await?;
    Ok(Json(ItineraryResponse::from(detail)))
}

// チェックアウト本体。全予約が確定できる場合のみ旅程を確定し、
// 一つでも確定できなければ何も書き込まない
async fn run_checkout(
    user: &User,
    itinerary_repository: Arc<dyn ItineraryRepository>,
    room_type_repository: Arc<dyn RoomTypeRepository>,
    flight_provider_client: Arc<dyn FlightProviderClient>,
    notification_repository: Arc<dyn NotificationRepository>,
) -> AppResult<ItineraryDetail> {
    let detail = itinerary_repository
        .find_pending_by_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("計画中の旅程がありません。".into()))?;

    // ホテル予約は作成時から状況が変わっている可能性があるため、
    // 書き込みや外部呼び出しの前に定員を再チェックする。
    // 満室ならフライトの発券にも進まない
    if let Some(hotel_booking) = &detail.hotel_booking {
        let availability = room_type_repository
            .find_availability(hotel_booking.room_type_id, &hotel_booking.stay)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!(
                    "客室タイプ（room_type_id = {}）が見つかりませんでした。",
                    hotel_booking.room_type_id
                ))
            })?;
        availability.check_admission()?;
    }

    // フライトがあれば外部プロバイダーで発券する。失敗すれば旅程はそのまま残る
    let provider_ref = match &detail.flight_booking {
        Some(flight_booking) => Some(
            flight_provider_client
                .book_flight(FlightOrder {
                    flight_number: flight_booking.flight_number.clone(),
                    departure_date: flight_booking.departure_date,
                    origin: flight_booking.origin.clone(),
                    destination: flight_booking.destination.clone(),
                    passenger_name: user.user_name.clone(),
                })
                .await?,
        ),
        None => None,
    };

    itinerary_repository
        .confirm(ConfirmItinerary::new(
            detail.itinerary.itinerary_id,
            detail
                .hotel_booking
                .as_ref()
                .map(|b| b.hotel_booking_id),
            detail
                .flight_booking
                .as_ref()
                .map(|f| f.flight_booking_id),
            provider_ref,
        ))
        .await?;

    notification_repository
        .create(CreateNotification::new(
            user.user_id,
            "旅程が確定しました。ご利用ありがとうございます。".into(),
            detail.hotel_booking.as_ref().map(|b| b.hotel_booking_id),
        ))
        .await?;

    // 確定後の内容を DB から読み直して返す
    itinerary_repository
        .find_detail_by_id(detail.itinerary.itinerary_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "旅程（{}）が見つかりませんでした。",
                detail.itinerary.itinerary_id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adapter::database::ConnectionPool;
    use adapter::repository::{
        flight_booking::FlightBookingRepositoryImpl, hotel_booking::HotelBookingRepositoryImpl,
        itinerary::ItineraryRepositoryImpl, notification::NotificationRepositoryImpl,
        room_type::RoomTypeRepositoryImpl,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use kernel::model::booking::{event::CreateHotelBooking, BookingStatus};
    use kernel::model::date_range::DateRange;
    use kernel::model::flight::{event::CreateFlightBooking, ProviderBookingRef};
    use kernel::model::id::{RoomTypeId, UserId};
    use kernel::model::itinerary::{Itinerary, ItineraryStatus};
    use kernel::repository::{
        flight_booking::FlightBookingRepository, hotel_booking::HotelBookingRepository,
    };
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GUEST_ID: &str = "9582f9de-0fd1-4892-b20c-70139a7eb95b";
    const GUEST2_ID: &str = "d33d2a07-cbb5-4b35-8f0a-3452ba2cc67c";
    const SINGLE_ID: &str = "aaf8bdf5-3cb7-4c04-8233-935cb84b4d8c";

    // 発券依頼の回数を記録するだけのプロバイダー
    #[derive(Default)]
    struct RecordingFlightProviderClient {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl FlightProviderClient for RecordingFlightProviderClient {
        async fn book_flight(&self, _order: FlightOrder) -> AppResult<ProviderBookingRef> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ProviderBookingRef("FP-TEST-001".into()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn guest() -> User {
        User {
            user_id: UserId::from_str(GUEST_ID).unwrap(),
            user_name: "Takashi Tanaka".into(),
            email: "tanaka@example.com".into(),
        }
    }

    // Single（1 室）に PENDING のホテル予約とフライト予約を載せた旅程を作る
    async fn build_pending_itinerary(
        db: &ConnectionPool,
        user_id: UserId,
        stay: DateRange,
    ) -> anyhow::Result<Itinerary> {
        let itinerary = ItineraryRepositoryImpl::new(db.clone())
            .find_or_create_pending(user_id)
            .await?;
        HotelBookingRepositoryImpl::new(db.clone())
            .create(CreateHotelBooking::new(
                RoomTypeId::from_str(SINGLE_ID)?,
                user_id,
                Some(itinerary.itinerary_id),
                stay,
                BookingStatus::Pending,
            ))
            .await?;
        FlightBookingRepositoryImpl::new(db.clone())
            .create(CreateFlightBooking::new(
                user_id,
                itinerary.itinerary_id,
                "NH006".into(),
                stay.start,
                "NGO".into(),
                "HNL".into(),
            ))
            .await?;
        Ok(itinerary)
    }

    #[sqlx::test(
        migrations = "../adapter/migrations",
        fixtures(path = "../../../adapter/fixtures", scripts("common"))
    )]
    async fn test_checkout_aborts_before_provider_when_room_sold_out(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool.clone());
        let user = guest();
        let stay = DateRange::new(date(2025, 6, 1), date(2025, 6, 5)).unwrap();

        let itinerary = build_pending_itinerary(&db, user.user_id, stay).await?;

        // 旅程の作成後に別のユーザーが唯一の 1 室を確定で埋める
        HotelBookingRepositoryImpl::new(db.clone())
            .create(CreateHotelBooking::new(
                RoomTypeId::from_str(SINGLE_ID)?,
                UserId::from_str(GUEST2_ID)?,
                None,
                stay,
                BookingStatus::Confirmed,
            ))
            .await?;

        let provider = Arc::new(RecordingFlightProviderClient::default());
        let res = run_checkout(
            &user,
            Arc::new(ItineraryRepositoryImpl::new(db.clone())),
            Arc::new(RoomTypeRepositoryImpl::new(db.clone())),
            provider.clone(),
            Arc::new(NotificationRepositoryImpl::new(db.clone())),
        )
        .await;

        // 定員超過で中止され、プロバイダーは一度も呼ばれない
        assert!(matches!(res, Err(AppError::NoRoomAvailable(_))));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        // 旅程と各予約は PENDING のまま残る
        let itinerary_status: String =
            sqlx::query_scalar("SELECT status::text FROM itineraries WHERE itinerary_id = $1")
                .bind(itinerary.itinerary_id)
                .fetch_one(&pool)
                .await?;
        assert_eq!(itinerary_status, "PENDING");

        let hotel_status: String = sqlx::query_scalar(
            "SELECT status::text FROM hotel_bookings WHERE itinerary_id = $1",
        )
        .bind(itinerary.itinerary_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(hotel_status, "PENDING");

        let flight_status: String = sqlx::query_scalar(
            "SELECT status::text FROM flight_bookings WHERE itinerary_id = $1",
        )
        .bind(itinerary.itinerary_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(flight_status, "PENDING");

        let notification_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM notifications")
            .fetch_one(&pool)
            .await?;
        assert_eq!(notification_count, 0);
        Ok(())
    }

    #[sqlx::test(
        migrations = "../adapter/migrations",
        fixtures(path = "../../../adapter/fixtures", scripts("common"))
    )]
    async fn test_checkout_confirms_all_legs_and_books_flight(
        pool: sqlx::PgPool,
    ) -> anyhow::Result<()> {
        let db = ConnectionPool::new(pool.clone());
        let user = guest();
        let stay = DateRange::new(date(2025, 6, 1), date(2025, 6, 5)).unwrap();

        build_pending_itinerary(&db, user.user_id, stay).await?;

        let provider = Arc::new(RecordingFlightProviderClient::default());
        let detail = run_checkout(
            &user,
            Arc::new(ItineraryRepositoryImpl::new(db.clone())),
            Arc::new(RoomTypeRepositoryImpl::new(db.clone())),
            provider.clone(),
            Arc::new(NotificationRepositoryImpl::new(db.clone())),
        )
        .await?;

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        // 返る内容は DB の確定後の状態
        assert_eq!(detail.itinerary.status, ItineraryStatus::Confirmed);
        assert_eq!(
            detail.hotel_booking.unwrap().status,
            BookingStatus::Confirmed
        );
        let flight = detail.flight_booking.unwrap();
        assert_eq!(flight.status, BookingStatus::Confirmed);
        assert_eq!(flight.provider_ref.as_deref(), Some("FP-TEST-001"));

        let notification_count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1",
        )
        .bind(user.user_id)
        .fetch_one(&pool)
        .await?;
        assert_eq!(notification_count, 1);
        Ok(())
    }
}
