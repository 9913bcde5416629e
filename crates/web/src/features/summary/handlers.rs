use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::common::ResponseModel,
    dto::summary::{SummaryQuery, SummaryResponse},
    period::ReportPeriod,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/summary/all-summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Member count and activity totals for the month", body = ResponseModel<SummaryResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "summary"
)]
pub async fn all_summary(
    State(db): State<Database>,
    Query(query): Query<SummaryQuery>,
) -> Result<Response, WebError> {
    query.validate().map_err(WebError::BadRequest)?;

    let period = ReportPeriod::for_month(query.year, query.month)
        .ok_or_else(|| WebError::BadRequest("month must be between 1 and 12".to_string()))?;

    let summary = services::all_summary(db.pool(), &period, query.base.as_deref()).await?;

    Ok(Json(ResponseModel::of(summary)).into_response())
}
