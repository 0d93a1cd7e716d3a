use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::booking::{BookingStatus, HotelBooking};
use kernel::model::id::{HotelBookingId, HotelId, ItineraryId, RoomTypeId};
use serde::{Deserialize, Serialize};

// 作成時に指定できるステータス。CANCELLED での新規作成は受け付けない
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingRequestStatus {
    #[default]
    Pending,
    Confirmed,
}

impl From<BookingRequestStatus> for BookingStatus {
    fn from(value: BookingRequestStatus) -> Self {
        match value {
            BookingRequestStatus::Pending => BookingStatus::Pending,
            BookingRequestStatus::Confirmed => BookingStatus::Confirmed,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelBookingRequest {
    #[garde(skip)]
    pub check_in_date: NaiveDate,
    #[garde(skip)]
    pub check_out_date: NaiveDate,
    #[garde(skip)]
    #[serde(default)]
    pub status: BookingRequestStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedHotelBookingResponse {
    pub hotel_booking_id: HotelBookingId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBookingResponse {
    pub hotel_booking_id: HotelBookingId,
    pub room_type_id: RoomTypeId,
    pub hotel_id: HotelId,
    pub itinerary_id: Option<ItineraryId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<HotelBooking> for HotelBookingResponse {
    fn from(value: HotelBooking) -> Self {
        Self {
            hotel_booking_id: value.hotel_booking_id,
            room_type_id: value.room_type_id,
            hotel_id: value.hotel_id,
            itinerary_id: value.itinerary_id,
            check_in_date: value.stay.start,
            check_out_date: value.stay.end,
            status: value.status,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelBookingsResponse {
    pub items: Vec<HotelBookingResponse>,
}
