use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One logged exercise submission. `created_at` is the sole key for all
/// date-range filtering and list ordering.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserScoreHistory {
    pub id: Uuid,
    pub score_info_id: Uuid,
    pub time: i32,
    pub distance: i32,
    pub image_url: String,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
