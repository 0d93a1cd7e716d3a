use crate::model::flight::{event::CreateFlightBooking, FlightBooking};
use crate::model::id::FlightBookingId;
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait FlightBookingRepository: Send + Sync {
    // PENDING のフライト予約を作成する。発券は旅程のチェックアウト時に行う
    async fn create(&self, event: CreateFlightBooking) -> AppResult<FlightBookingId>;
    async fn find_by_id(&self, flight_booking_id: FlightBookingId)
        -> AppResult<Option<FlightBooking>>;
}
