use axum::{extract::State, Json};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::extractor::AuthorizedUser;
use crate::model::notification::{NotificationResponse, NotificationsResponse};

pub async fn show_my_notifications(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<NotificationsResponse>> {
    let items = registry
        .notification_repository()
        .find_all_by_user(user.id())
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();
    Ok(Json(NotificationsResponse { items }))
}
