use chrono::NaiveDate;
use garde::Validate;
use kernel::model::booking::BookingStatus;
use kernel::model::flight::FlightBooking;
use kernel::model::id::{FlightBookingId, ItineraryId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlightBookingRequest {
    #[garde(length(min = 1))]
    pub flight_number: String,
    #[garde(skip)]
    pub departure_date: NaiveDate,
    #[garde(length(min = 1))]
    pub origin: String,
    #[garde(length(min = 1))]
    pub destination: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFlightBookingResponse {
    pub flight_booking_id: FlightBookingId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightBookingResponse {
    pub flight_booking_id: FlightBookingId,
    pub itinerary_id: Option<ItineraryId>,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub status: BookingStatus,
    pub provider_ref: Option<String>,
}

impl From<FlightBooking> for FlightBookingResponse {
    fn from(value: FlightBooking) -> Self {
        Self {
            flight_booking_id: value.flight_booking_id,
            itinerary_id: value.itinerary_id,
            flight_number: value.flight_number,
            departure_date: value.departure_date,
            origin: value.origin,
            destination: value.destination,
            status: value.status,
            provider_ref: value.provider_ref,
        }
    }
}
