use crate::model::booking::HotelBooking;
use crate::model::flight::FlightBooking;
use crate::model::id::{ItineraryId, UserId};
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
#[sqlx(type_name = "itinerary_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum ItineraryStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Itinerary {
    pub itinerary_id: ItineraryId,
    pub user_id: UserId,
    pub status: ItineraryStatus,
}

// 計画中の旅程と、それに紐づく各予約（ホテル・フライトは各高々 1 件）
#[derive(Debug)]
pub struct ItineraryDetail {
    pub itinerary: Itinerary,
    pub hotel_booking: Option<HotelBooking>,
    pub flight_booking: Option<FlightBooking>,
}
