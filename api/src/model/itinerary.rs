use kernel::model::id::ItineraryId;
use kernel::model::itinerary::{ItineraryDetail, ItineraryStatus};
use serde::Serialize;

use crate::model::flight_booking::FlightBookingResponse;
use crate::model::hotel_booking::HotelBookingResponse;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    pub itinerary_id: ItineraryId,
    pub status: ItineraryStatus,
    pub hotel_booking: Option<HotelBookingResponse>,
    pub flight_booking: Option<FlightBookingResponse>,
}

impl From<ItineraryDetail> for ItineraryResponse {
    fn from(value: ItineraryDetail) -> Self {
        Self {
            itinerary_id: value.itinerary.itinerary_id,
            status: value.itinerary.status,
            hotel_booking: value.hotel_booking.map(HotelBookingResponse::from),
            flight_booking: value.flight_booking.map(FlightBookingResponse::from),
        }
    }
}
