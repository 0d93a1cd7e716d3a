use axum::{routing::get, routing::post, Router};
use registry::AppRegistry;

use crate::handler::itinerary::{checkout_itinerary, show_current_itinerary};

pub fn build_itinerary_routers() -> Router<AppRegistry> {
    let routers = Router::new()
        .route("/current", get(show_current_itinerary))
        .route("/current/checkout", post(checkout_itinerary));

    Router::new().nest("/itineraries", routers)
}
