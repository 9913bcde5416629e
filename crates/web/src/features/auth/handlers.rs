use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::auth::{AdminLoginRequest, AdminSignInResponse, UserLoginRequest, UserSignInResponse},
    dto::common::ResponseModel,
    error::StorageError,
};
use validator::Validate;

use crate::auth::password;
use crate::auth::tokens::TokenIssuer;
use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/auth/user/sign-in",
    request_body = UserLoginRequest,
    responses(
        (status = 200, description = "Member authenticated", body = ResponseModel<UserSignInResponse>),
        (status = 404, description = "Unknown LINE id")
    ),
    tag = "auth"
)]
pub async fn user_sign_in(
    State(db): State<Database>,
    State(tokens): State<TokenIssuer>,
    Json(req): Json<UserLoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::user_sign_in(db.pool(), &req).await?;
    let token = tokens
        .issue(user.id)
        .map_err(|e| WebError::InternalServerError(e.to_string()))?;

    Ok(Json(ResponseModel::of(UserSignInResponse { token, user })).into_response())
}

#[utoipa::path(
    post,
    path = "/auth/admin/sign-in",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Admin authenticated", body = ResponseModel<AdminSignInResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn admin_sign_in(
    State(db): State<Database>,
    State(tokens): State<TokenIssuer>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    // Usernames are case-folded: "Admin1" and "admin1" are the same account.
    let username = req.username.to_lowercase();

    let admin = services::find_admin(db.pool(), &username)
        .await
        .map_err(|e| match e {
            StorageError::NotFound => WebError::Unauthorized,
            other => WebError::from(other),
        })?;

    if !password::verify_password(&req.password, &admin.password) {
        return Err(WebError::Unauthorized);
    }

    let token = tokens
        .issue(admin.id)
        .map_err(|e| WebError::InternalServerError(e.to_string()))?;

    Ok(Json(ResponseModel::of(AdminSignInResponse {
        token,
        admin: admin.into(),
    }))
    .into_response())
}
