use axum::{
    extract::{Path, Query, State},
    Json,
};
use garde::Validate;
use kernel::model::date_range::DateRange;
use kernel::model::hotel::event::ResizeRoomType;
use kernel::model::id::RoomTypeId;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::extractor::AuthorizedUser;
use crate::model::room_type::{
    AvailabilityQuery, AvailabilityResponse, OwnerAvailabilityItem, OwnerAvailabilityResponse,
    RoomTypeResponse, UpdateRoomTypeRoomsRequest,
};

// 認証不要の空室検索
pub async fn show_room_type_availability(
    Path(room_type_id): Path<RoomTypeId>,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AvailabilityResponse>> {
    let range = DateRange::new(query.start_date, query.end_date)?;
    let availability = registry
        .room_type_repository()
        .find_availability(room_type_id, &range)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "客室タイプ（room_type_id = {room_type_id}）が見つかりませんでした。"
            ))
        })?;
    Ok(Json(AvailabilityResponse::from(availability)))
}

// オーナー向け。所有する全客室タイプの在庫状況を一覧で返す
pub async fn show_owner_availability(
    user: AuthorizedUser,
    Query(query): Query<AvailabilityQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OwnerAvailabilityResponse>> {
    let range = DateRange::new(query.start_date, query.end_date)?;
    let room_types = registry
        .room_type_repository()
        .find_all_by_owner(user.id())
        .await?;

    let mut items = Vec::with_capacity(room_types.len());
    for room_type in room_types {
        if let Some(availability) = registry
            .room_type_repository()
            .find_availability(room_type.room_type_id, &range)
            .await?
        {
            items.push(OwnerAvailabilityItem {
                room_type_id: room_type.room_type_id,
                room_type_name: room_type.room_type_name,
                total_rooms: availability.total_rooms,
                available_rooms: availability.remaining(),
            });
        }
    }

    Ok(Json(OwnerAvailabilityResponse { items }))
}

// 総室数の変更。縮小時は超過予約のキャンセルと通知を伴う
pub async fn update_room_type_rooms(
    user: AuthorizedUser,
    Path(room_type_id): Path<RoomTypeId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomTypeRoomsRequest>,
) -> AppResult<Json<RoomTypeResponse>> {
    req.validate(&())?;

    let period = match (req.start_date, req.end_date) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)?),
        (None, None) => None,
        _ => {
            return Err(AppError::UnprocessableEntity(
                "期間を指定する場合は開始日と終了日の両方を指定してください。".into(),
            ))
        }
    };

    let updated = registry
        .room_type_repository()
        .resize(ResizeRoomType::new(
            room_type_id,
            user.id(),
            req.total_rooms,
            period,
        ))
        .await?;

    Ok(Json(RoomTypeResponse::from(updated)))
}
