use crate::model::date_range::DateRange;
use crate::model::id::{RoomTypeId, UserId};
use derive_new::new;

// 客室数の変更。period が None の場合は実質無制限の範囲を対象とする
#[derive(new)]
pub struct ResizeRoomType {
    pub room_type_id: RoomTypeId,
    pub requested_user: UserId,
    pub new_total_rooms: i32,
    pub period: Option<DateRange>,
}
