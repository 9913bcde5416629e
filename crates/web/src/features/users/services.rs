use sqlx::PgPool;
use storage::{
    dto::user::{UserCreateRequest, UserDetailResponse, UserListQuery, UserUpdateRequest},
    error::Result,
    models::User,
    repository::user::UserRepository,
};
use uuid::Uuid;

/// Admin listing with filters and pagination
pub async fn list_users(pool: &PgPool, query: &UserListQuery) -> Result<(Vec<User>, i64)> {
    let repo = UserRepository::new(pool);
    repo.list(query).await
}

/// Fetch one member with their score info
pub async fn get_user(pool: &PgPool, user_id: Uuid) -> Result<UserDetailResponse> {
    let repo = UserRepository::new(pool);
    repo.find_detailed_by_id(user_id).await
}

/// Create a member; their score info row is provisioned in the same
/// transaction
pub async fn create_user(pool: &PgPool, req: &UserCreateRequest) -> Result<UserDetailResponse> {
    let repo = UserRepository::new(pool);
    repo.create(req).await
}

/// Update a member's profile and return the refreshed record
pub async fn update_user(
    pool: &PgPool,
    user_id: Uuid,
    req: &UserUpdateRequest,
) -> Result<UserDetailResponse> {
    let repo = UserRepository::new(pool);

    let updated = repo.update(user_id, req).await?;
    repo.find_detailed_by_id(updated.id).await
}

/// Soft-delete a member
pub async fn delete_user(pool: &PgPool, user_id: Uuid) -> Result<()> {
    let repo = UserRepository::new(pool);
    repo.soft_delete(user_id).await
}
