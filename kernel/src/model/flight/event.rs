use crate::model::id::{ItineraryId, UserId};
use chrono::NaiveDate;
use derive_new::new;

#[derive(new)]
pub struct CreateFlightBooking {
    pub user_id: UserId,
    pub itinerary_id: ItineraryId,
    pub flight_number: String,
    pub departure_date: NaiveDate,
    pub origin: String,
    pub destination: String,
}
