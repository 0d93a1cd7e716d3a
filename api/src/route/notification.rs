use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::notification::show_my_notifications;

pub fn build_notification_routers() -> Router<AppRegistry> {
    let routers = Router::new().route("/me", get(show_my_notifications));

    Router::new().nest("/notifications", routers)
}
