use crate::model::flight::{FlightOrder, ProviderBookingRef};
use async_trait::async_trait;
use shared::error::AppResult;

// 外部のフライト予約プロバイダー。中身は不透明で、
// 発券に成功すると予約参照番号を返す
#[async_trait]
pub trait FlightProviderClient: Send + Sync {
    async fn book_flight(&self, order: FlightOrder) -> AppResult<ProviderBookingRef>;
}
