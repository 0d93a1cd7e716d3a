use crate::model::id::{ItineraryId, UserId};
use crate::model::itinerary::{event::ConfirmItinerary, Itinerary, ItineraryDetail};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ItineraryRepository: Send + Sync {
    // ユーザーの PENDING 旅程を返す。なければ作成する
    // （DB 制約ではなく find-or-create で「1 ユーザー 1 計画中旅程」を保つ）
    async fn find_or_create_pending(&self, user_id: UserId) -> AppResult<Itinerary>;
    async fn find_pending_by_user(&self, user_id: UserId) -> AppResult<Option<ItineraryDetail>>;
    // 状態を問わず旅程と紐づく予約を読む（キャンセル済みの予約は除く）
    async fn find_detail_by_id(&self, itinerary_id: ItineraryId)
        -> AppResult<Option<ItineraryDetail>>;
    // 旅程と紐づく予約を 1 トランザクションで CONFIRMED にする
    async fn confirm(&self, event: ConfirmItinerary) -> AppResult<()>;
}
