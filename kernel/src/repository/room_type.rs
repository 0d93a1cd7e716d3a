use crate::model::date_range::DateRange;
use crate::model::hotel::{event::ResizeRoomType, RoomAvailability, RoomType, RoomTypeWithHotel};
use crate::model::id::{RoomTypeId, UserId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomTypeRepository: Send + Sync {
    // 指定期間の在庫状況（総室数と重複する CONFIRMED 予約数）を読む
    async fn find_availability(
        &self,
        room_type_id: RoomTypeId,
        range: &DateRange,
    ) -> AppResult<Option<RoomAvailability>>;
    // オーナーの所有ホテルに属する客室タイプの一覧を取得する
    async fn find_all_by_owner(&self, owner_id: UserId) -> AppResult<Vec<RoomType>>;
    async fn find_with_hotel(&self, room_type_id: RoomTypeId)
        -> AppResult<Option<RoomTypeWithHotel>>;
    // 総室数を変更する。縮小時は超過分の CONFIRMED 予約を
    // 新しい順にキャンセルし、対象ユーザーへ通知を作成する
    async fn resize(&self, event: ResizeRoomType) -> AppResult<RoomTypeWithHotel>;
}
