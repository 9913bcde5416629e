use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// A member identified by their LINE id. Owns exactly one score info row,
/// provisioned in the same transaction that creates the user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub line_id: String,
    pub display_name: String,
    pub profile_image_url: String,
    pub rank: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub base: String,
    pub status: String,
    pub score_info_id: Uuid,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
