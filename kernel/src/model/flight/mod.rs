use crate::model::booking::BookingStatus;
use crate::model::id::{FlightBookingId, ItineraryId, UserId};
use chrono::NaiveDate;

pub mod event;

#[derive(Debug, Clone)]
pub struct FlightBooking {
    pub flight_booking_id: FlightBookingId,
    pub user_id: UserId,
    pub itinerary_id: Option<ItineraryId>,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub status: BookingStatus,
    // 外部予約プロバイダーが発行する予約参照番号
    pub provider_ref: Option<String>,
}

// 外部プロバイダーへの発券依頼
#[derive(Debug, Clone)]
pub struct FlightOrder {
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub passenger_name: String,
}

#[derive(Debug, Clone)]
pub struct ProviderBookingRef(pub String);
