use crate::model::date_range::DateRange;
use crate::model::id::{HotelBookingId, HotelId, ItineraryId, RoomTypeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod event;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    sqlx::Type,
    strum::Display,
    strum::EnumString,
)]
#[sqlx(type_name = "booking_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct HotelBooking {
    pub hotel_booking_id: HotelBookingId,
    pub room_type_id: RoomTypeId,
    pub hotel_id: HotelId,
    pub user_id: UserId,
    pub itinerary_id: Option<ItineraryId>,
    pub stay: DateRange,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

// 在庫縮小時にキャンセル対象となる予約を選ぶ。
// overlapping_newest_first は作成日時の新しい順に並んでいること。
// 新しい予約から順に（excess = 件数 - 新容量）件をキャンセル対象とし、
// 先に確定した予約を保護する。
pub fn select_over_capacity(
    mut overlapping_newest_first: Vec<HotelBooking>,
    new_total_rooms: i32,
) -> Vec<HotelBooking> {
    let keep = new_total_rooms.max(0) as usize;
    let excess = overlapping_newest_first.len().saturating_sub(keep);
    overlapping_newest_first.truncate(excess);
    overlapping_newest_first
}
