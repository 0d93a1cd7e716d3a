use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::booking::{BookingStatus, HotelBooking};
use kernel::model::date_range::DateRange;
use kernel::model::id::{HotelBookingId, HotelId, ItineraryId, RoomTypeId, UserId};

#[derive(sqlx::FromRow)]
pub struct HotelBookingRow {
    pub hotel_booking_id: HotelBookingId,
    pub room_type_id: RoomTypeId,
    pub hotel_id: HotelId,
    pub user_id: UserId,
    pub itinerary_id: Option<ItineraryId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<HotelBookingRow> for HotelBooking {
    fn from(value: HotelBookingRow) -> Self {
        let HotelBookingRow {
            hotel_booking_id,
            room_type_id,
            hotel_id,
            user_id,
            itinerary_id,
            check_in_date,
            check_out_date,
            status,
            created_at,
        } = value;
        HotelBooking {
            hotel_booking_id,
            room_type_id,
            hotel_id,
            user_id,
            itinerary_id,
            // check_in_date < check_out_date は DB の CHECK 制約で保証されている
            stay: DateRange {
                start: check_in_date,
                end: check_out_date,
            },
            status,
            created_at,
        }
    }
}
