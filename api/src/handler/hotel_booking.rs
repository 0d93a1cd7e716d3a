use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::booking::event::{CancelHotelBooking, CreateHotelBooking};
use kernel::model::booking::BookingStatus;
use kernel::model::date_range::DateRange;
use kernel::model::id::{HotelBookingId, RoomTypeId};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;
use crate::model::hotel_booking::{
    CreateHotelBookingRequest, CreatedHotelBookingResponse, HotelBookingResponse,
    HotelBookingsResponse,
};

pub async fn create_hotel_booking(
    user: AuthorizedUser,
    Path(room_type_id): Path<RoomTypeId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateHotelBookingRequest>,
) -> AppResult<(StatusCode, Json<CreatedHotelBookingResponse>)> {
    req.validate(&())?;

    let stay = DateRange::new(req.check_in_date, req.check_out_date)?;
    let status = BookingStatus::from(req.status);

    // PENDING の予約は計画中の旅程に載せる（なければ旅程を作る）
    let itinerary_id = match status {
        BookingStatus::Pending => Some(
            registry
                .itinerary_repository()
                .find_or_create_pending(user.id())
                .await?
                .itinerary_id,
        ),
        _ => None,
    };

    let hotel_booking_id = registry
        .hotel_booking_repository()
        .create(CreateHotelBooking::new(
            room_type_id,
            user.id(),
            itinerary_id,
            stay,
            status,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedHotelBookingResponse { hotel_booking_id }),
    ))
}

pub async fn cancel_hotel_booking(
    user: AuthorizedUser,
    Path(hotel_booking_id): Path<HotelBookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .hotel_booking_repository()
        .cancel(CancelHotelBooking::new(hotel_booking_id, user.id()))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn show_my_hotel_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<HotelBookingsResponse>> {
    let items = registry
        .hotel_booking_repository()
        .find_all_by_user(user.id())
        .await?
        .into_iter()
        .map(HotelBookingResponse::from)
        .collect();
    Ok(Json(HotelBookingsResponse { items }))
}
