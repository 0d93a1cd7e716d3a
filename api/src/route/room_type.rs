use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::hotel_booking::create_hotel_booking;
use crate::handler::room_type::{
    show_owner_availability, show_room_type_availability, update_room_type_rooms,
};

pub fn build_room_type_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/:room_type_id/availability", get(show_room_type_availability))
        .route("/:room_type_id", put(update_room_type_rooms))
        .route("/:room_type_id/bookings", post(create_hotel_booking));

    Router::new()
        .nest("/room-types", routers)
        .route("/owner/availability", get(show_owner_availability))
}
