use sqlx::PgPool;
use storage::{
    dto::score_info::{RankingEntry, RankingQuery},
    error::Result,
    period::ReportPeriod,
    repository::score_info::ScoreInfoRepository,
};

/// Monthly distance ranking with the period's history attached per entry
pub async fn get_ranking(
    pool: &PgPool,
    period: &ReportPeriod,
    query: &RankingQuery,
) -> Result<(Vec<RankingEntry>, i64)> {
    let repo = ScoreInfoRepository::new(pool);
    repo.ranking(period, query).await
}
