use crate::model::booking::{
    event::{CancelHotelBooking, CreateHotelBooking},
    HotelBooking,
};
use crate::model::id::{HotelBookingId, UserId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait HotelBookingRepository: Send + Sync {
    // 予約を作成する。CONFIRMED 指定時は作成前に定員チェックを行う
    async fn create(&self, event: CreateHotelBooking) -> AppResult<HotelBookingId>;
    // 予約者本人によるキャンセル。CANCELLED は終端状態
    async fn cancel(&self, event: CancelHotelBooking) -> AppResult<()>;
    async fn find_all_by_user(&self, user_id: UserId) -> AppResult<Vec<HotelBooking>>;
}
