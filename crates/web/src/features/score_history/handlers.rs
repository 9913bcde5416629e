use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::{PaginationParams, ResponseModel},
    dto::score_history::{
        ScoreHistoryCreateRequest, ScoreHistoryDetailResponse, ScoreHistoryListQuery,
    },
    models::UserScoreHistory,
    period::ReportPeriod,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::CurrentUser;

use super::services;

#[utoipa::path(
    get,
    path = "/user-score-history",
    params(ScoreHistoryListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Submissions in range, newest first", body = ResponseModel<Vec<ScoreHistoryDetailResponse>>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "score-history"
)]
pub async fn list_history(
    State(db): State<Database>,
    Query(query): Query<ScoreHistoryListQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let period = ReportPeriod::for_days(query.start_date, query.end_date);
    let (entries, total) = services::list_history(db.pool(), &period, &query).await?;

    Ok(Json(ResponseModel::with_total(entries, total)).into_response())
}

#[utoipa::path(
    get,
    path = "/user-score-history/user",
    params(PaginationParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The calling member's submissions, newest first", body = ResponseModel<Vec<UserScoreHistory>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "score-history"
)]
pub async fn list_my_history(
    State(db): State<Database>,
    Extension(current): Extension<CurrentUser>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Response, WebError> {
    pagination.validate().map_err(WebError::BadRequest)?;

    let (entries, total) =
        services::list_for_score_info(db.pool(), current.0.score.id, &pagination).await?;

    Ok(Json(ResponseModel::with_total(entries, total)).into_response())
}

#[utoipa::path(
    post,
    path = "/user-score-history",
    request_body = ScoreHistoryCreateRequest,
    responses(
        (status = 200, description = "Submission recorded", body = ResponseModel<UserScoreHistory>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Score info not found")
    ),
    tag = "score-history"
)]
pub async fn create_history(
    State(db): State<Database>,
    Json(req): Json<ScoreHistoryCreateRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let entry = services::create_history(db.pool(), &req).await?;

    Ok(Json(ResponseModel::of(entry)).into_response())
}

#[utoipa::path(
    delete,
    path = "/user-score-history/{history_id}",
    params(
        ("history_id" = Uuid, Path, description = "Submission id")
    ),
    responses(
        (status = 200, description = "Submission soft-deleted"),
        (status = 404, description = "Submission not found")
    ),
    tag = "score-history"
)]
pub async fn delete_history(
    State(db): State<Database>,
    Path(history_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_history(db.pool(), history_id).await?;

    Ok(Json(ResponseModel::of("succeeded")).into_response())
}
