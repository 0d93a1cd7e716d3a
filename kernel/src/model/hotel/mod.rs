use crate::model::id::{HotelId, RoomTypeId, UserId};
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug)]
pub struct Hotel {
    pub hotel_id: HotelId,
    pub owner_id: UserId,
    pub hotel_name: String,
    pub address: String,
}

#[derive(Debug)]
pub struct RoomType {
    pub room_type_id: RoomTypeId,
    pub hotel_id: HotelId,
    pub room_type_name: String,
    pub total_rooms: i32,
    pub price_per_night: i32,
}

#[derive(Debug)]
pub struct RoomTypeWithHotel {
    pub room_type: RoomType,
    pub hotel: Hotel,
}

// 指定期間の在庫状況の読み取り結果。
// overlap_count は期間に重なる CONFIRMED 予約の件数。
#[derive(Debug, Clone, Copy)]
pub struct RoomAvailability {
    pub room_type_id: RoomTypeId,
    pub total_rooms: i32,
    pub overlap_count: i64,
}

impl RoomAvailability {
    // 残室数。容量不変条件が既に破られていた場合でも負にはしない
    pub fn remaining(&self) -> i64 {
        (self.total_rooms as i64 - self.overlap_count).max(0)
    }

    // 予約確定前の定員チェック
    pub fn check_admission(&self) -> AppResult<()> {
        if self.overlap_count >= self.total_rooms as i64 {
            return Err(AppError::NoRoomAvailable(format!(
                "指定された期間に空室がありません（room_type_id = {}）。",
                self.room_type_id
            )));
        }
        Ok(())
    }
}
