use crate::model::flight::ProviderBookingRef;
use crate::model::id::{FlightBookingId, HotelBookingId, ItineraryId};
use derive_new::new;

// チェックアウト成功時に旅程と紐づく予約を一括で CONFIRMED にする
#[derive(new)]
pub struct ConfirmItinerary {
    pub itinerary_id: ItineraryId,
    pub hotel_booking_id: Option<HotelBookingId>,
    pub flight_booking_id: Option<FlightBookingId>,
    pub provider_ref: Option<ProviderBookingRef>,
}
