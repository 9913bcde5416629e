use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::ResponseModel,
    dto::score_info::{RankingEntry, RankingQuery},
    period::ReportPeriod,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/user-score-info",
    params(RankingQuery),
    responses(
        (status = 200, description = "Members ranked by distance for the month", body = ResponseModel<Vec<RankingEntry>>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "score-info"
)]
pub async fn get_ranking(
    State(db): State<Database>,
    Query(query): Query<RankingQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let period = ReportPeriod::for_month(query.year, query.month)
        .ok_or_else(|| WebError::BadRequest("month must be between 1 and 12".to_string()))?;

    let (entries, total) = services::get_ranking(db.pool(), &period, &query).await?;

    Ok(Json(ResponseModel::with_total(entries, total)).into_response())
}
