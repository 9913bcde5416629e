use sqlx::PgPool;
use storage::{
    dto::auth::UserLoginRequest,
    dto::user::UserDetailResponse,
    error::Result,
    models::Admin,
    repository::{admin::AdminRepository, user::UserRepository},
};

/// Resolve a member by LINE id, refreshing their display fields when the
/// sign-in payload carries new values
pub async fn user_sign_in(pool: &PgPool, req: &UserLoginRequest) -> Result<UserDetailResponse> {
    let repo = UserRepository::new(pool);

    let user = repo.find_by_line_id(&req.line_id).await?;

    if req.display_name.is_some() || req.profile_image_url.is_some() {
        repo.update_display(
            user.id,
            req.display_name.as_deref(),
            req.profile_image_url.as_deref(),
        )
        .await?;

        return repo.find_detailed_by_id(user.id).await;
    }

    Ok(user)
}

/// Look up an admin by (already lower-cased) username
pub async fn find_admin(pool: &PgPool, username: &str) -> Result<Admin> {
    let repo = AdminRepository::new(pool);
    repo.find_by_username(username).await
}
