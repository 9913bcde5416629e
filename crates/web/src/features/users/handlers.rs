use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::auth::UserSignInResponse,
    dto::common::ResponseModel,
    dto::user::{UserCreateRequest, UserDetailResponse, UserListQuery, UserUpdateRequest},
    models::User,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::tokens::TokenIssuer;
use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/user/info",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The calling member", body = ResponseModel<UserDetailResponse>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn get_me(Extension(current): Extension<CurrentUser>) -> Result<Response, WebError> {
    Ok(Json(ResponseModel::of(current.0)).into_response())
}

#[utoipa::path(
    get,
    path = "/user",
    params(UserListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Members, newest first", body = ResponseModel<Vec<User>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn list_users(
    State(db): State<Database>,
    Query(query): Query<UserListQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let (users, total) = services::list_users(db.pool(), &query).await?;

    Ok(Json(ResponseModel::with_total(users, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member found", body = ResponseModel<UserDetailResponse>),
        (status = 404, description = "Member not found")
    ),
    tag = "users"
)]
pub async fn get_user(
    State(db): State<Database>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let user = services::get_user(db.pool(), user_id).await?;

    Ok(Json(ResponseModel::of(user)).into_response())
}

#[utoipa::path(
    post,
    path = "/user",
    request_body = UserCreateRequest,
    responses(
        (status = 201, description = "Member created with their score info", body = ResponseModel<UserSignInResponse>),
        (status = 400, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(db): State<Database>,
    State(tokens): State<TokenIssuer>,
    Json(req): Json<UserCreateRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::create_user(db.pool(), &req).await?;
    let token = tokens
        .issue(user.id)
        .map_err(|e| WebError::InternalServerError(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(ResponseModel::of(UserSignInResponse { token, user })),
    )
        .into_response())
}

#[utoipa::path(
    patch,
    path = "/user",
    request_body = UserUpdateRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Profile updated", body = ResponseModel<UserDetailResponse>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users"
)]
pub async fn update_me(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let user = services::update_user(db.pool(), current.0.id, &req).await?;

    Ok(Json(ResponseModel::of(user)).into_response())
}

#[utoipa::path(
    delete,
    path = "/user/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "Member id")
    ),
    responses(
        (status = 200, description = "Member soft-deleted"),
        (status = 404, description = "Member not found")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(db): State<Database>,
    Path(user_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_user(db.pool(), user_id).await?;

    Ok(Json(ResponseModel::of("succeeded")).into_response())
}
