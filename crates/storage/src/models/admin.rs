use chrono::NaiveDateTime;
use sqlx::FromRow;
use uuid::Uuid;

/// Administrator principal. Deliberately not `Serialize`: credential fields
/// must never reach a response body, so responses go through
/// `dto::auth::AdminResponse`.
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
