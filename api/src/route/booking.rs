use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::flight_booking::create_flight_booking;
use crate::handler::hotel_booking::{cancel_hotel_booking, show_my_hotel_bookings};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let hotel_routers = Router::new()
        .route("/me", get(show_my_hotel_bookings))
        .route("/:hotel_booking_id", delete(cancel_hotel_booking));

    Router::new()
        .nest("/bookings", hotel_routers)
        .route("/flights/bookings", post(create_flight_booking))
}
