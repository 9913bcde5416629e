use sqlx::PgPool;
use storage::{
    dto::summary::SummaryResponse, error::Result, period::ReportPeriod,
    repository::summary::SummaryRepository,
};

/// Roster size plus the period's distance and time totals. The member count
/// spans every base even when the totals are base-filtered.
pub async fn all_summary(
    pool: &PgPool,
    period: &ReportPeriod,
    base: Option<&str>,
) -> Result<SummaryResponse> {
    let repo = SummaryRepository::new(pool);

    let total_member = repo.member_count().await?;
    let (total_distance, total_time) = repo.period_totals(period, base).await?;

    Ok(SummaryResponse {
        total_member,
        total_distance,
        total_time,
    })
}
