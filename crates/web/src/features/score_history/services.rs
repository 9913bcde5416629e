use sqlx::PgPool;
use storage::{
    dto::common::PaginationParams,
    dto::score_history::{
        ScoreHistoryCreateRequest, ScoreHistoryDetailResponse, ScoreHistoryListQuery,
    },
    error::Result,
    models::UserScoreHistory,
    period::ReportPeriod,
    repository::{score_history::ScoreHistoryRepository, score_info::ScoreInfoRepository},
};
use uuid::Uuid;

/// Admin listing over a day range with optional filters
pub async fn list_history(
    pool: &PgPool,
    period: &ReportPeriod,
    query: &ScoreHistoryListQuery,
) -> Result<(Vec<ScoreHistoryDetailResponse>, i64)> {
    let repo = ScoreHistoryRepository::new(pool);
    repo.list_admin(period, query).await
}

/// One member's own submissions
pub async fn list_for_score_info(
    pool: &PgPool,
    score_info_id: Uuid,
    pagination: &PaginationParams,
) -> Result<(Vec<UserScoreHistory>, i64)> {
    let repo = ScoreHistoryRepository::new(pool);
    repo.list_for_score_info(score_info_id, pagination).await
}

/// Record a submission. The target score info must exist and be live;
/// history must never dangle from a deleted aggregation root.
pub async fn create_history(
    pool: &PgPool,
    req: &ScoreHistoryCreateRequest,
) -> Result<UserScoreHistory> {
    ScoreInfoRepository::new(pool)
        .find_by_id(req.user_score_info_id)
        .await?;

    let repo = ScoreHistoryRepository::new(pool);
    repo.create(req).await
}

/// Soft-delete a submission
pub async fn delete_history(pool: &PgPool, history_id: Uuid) -> Result<()> {
    let repo = ScoreHistoryRepository::new(pool);
    repo.soft_delete(history_id).await
}
