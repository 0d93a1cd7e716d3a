use chrono::NaiveDate;
use kernel::model::booking::BookingStatus;
use kernel::model::flight::FlightBooking;
use kernel::model::id::{FlightBookingId, ItineraryId, UserId};

#[derive(sqlx::FromRow)]
pub struct FlightBookingRow {
    pub flight_booking_id: FlightBookingId,
    pub user_id: UserId,
    pub itinerary_id: Option<ItineraryId>,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub status: BookingStatus,
    pub provider_ref: Option<String>,
}

impl From<FlightBookingRow> for FlightBooking {
    fn from(value: FlightBookingRow) -> Self {
        let FlightBookingRow {
            flight_booking_id,
            user_id,
            itinerary_id,
            flight_number,
            departure_date,
            origin,
            destination,
            status,
            provider_ref,
        } = value;
        FlightBooking {
            flight_booking_id,
            user_id,
            itinerary_id,
            flight_number,
            departure_date,
            origin,
            destination,
            status,
            provider_ref,
        }
    }
}
