use kernel::model::id::{ItineraryId, UserId};
use kernel::model::itinerary::{Itinerary, ItineraryStatus};

#[derive(sqlx::FromRow)]
pub struct ItineraryRow {
    pub itinerary_id: ItineraryId,
    pub user_id: UserId,
    pub status: ItineraryStatus,
}

impl From<ItineraryRow> for Itinerary {
    fn from(value: ItineraryRow) -> Self {
        let ItineraryRow {
            itinerary_id,
            user_id,
            status,
        } = value;
        Itinerary {
            itinerary_id,
            user_id,
            status,
        }
    }
}
