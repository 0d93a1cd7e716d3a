use axum::Router;
use registry::AppRegistry;

use crate::route::{
    auth::build_auth_routers, booking::build_booking_routers,
    itinerary::build_itinerary_routers, notification::build_notification_routers,
    room_type::build_room_type_routers,
};

pub fn routes() -> Router<AppRegistry> {
    let routers = Router::new()
        .merge(build_auth_routers())
        .merge(build_room_type_routers())
        .merge(build_booking_routers())
        .merge(build_itinerary_routers())
        .merge(build_notification_routers());

    Router::new().nest("/api/v1", routers)
}
