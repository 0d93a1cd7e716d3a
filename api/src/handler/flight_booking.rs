use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::flight::event::CreateFlightBooking;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;
use crate::model::flight_booking::{CreateFlightBookingRequest, CreatedFlightBookingResponse};

// フライト予約は必ず計画中の旅程に載せる。発券はチェックアウト時
pub async fn create_flight_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateFlightBookingRequest>,
) -> AppResult<(StatusCode, Json<CreatedFlightBookingResponse>)> {
    req.validate(&())?;

    let itinerary = registry
        .itinerary_repository()
        .find_or_create_pending(user.id())
        .await?;

    let flight_booking_id = registry
        .flight_booking_repository()
        .create(CreateFlightBooking::new(
            user.id(),
            itinerary.itinerary_id,
            req.flight_number,
            req.departure_date,
            req.origin,
            req.destination,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedFlightBookingResponse { flight_booking_id }),
    ))
}
