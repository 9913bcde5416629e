use sqlx::{FromRow, PgPool, QueryBuilder};

use crate::error::Result;
use crate::period::ReportPeriod;

use super::not_deleted;

#[derive(FromRow)]
struct TotalsRow {
    total_distance: i64,
    total_time: i64,
}

pub struct SummaryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SummaryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Count of live members. Unfiltered on purpose: the summary's member
    /// figure covers the whole roster even when the activity totals are
    /// base-scoped.
    pub async fn member_count(&self) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM users WHERE {}",
            not_deleted("users")
        );

        let count = sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Summed distance and time over live history in the period, optionally
    /// restricted to one base via the owning member
    pub async fn period_totals(
        &self,
        period: &ReportPeriod,
        base: Option<&str>,
    ) -> Result<(i64, i64)> {
        let mut qb = QueryBuilder::new(
            "SELECT COALESCE(SUM(h.distance), 0)::BIGINT AS total_distance, \
             COALESCE(SUM(h.time), 0)::BIGINT AS total_time \
             FROM user_score_history h \
             INNER JOIN user_score_info si ON si.id = h.score_info_id",
        );

        if base.is_some() {
            qb.push(" INNER JOIN users u ON u.score_info_id = si.id");
        }

        qb.push(format!(
            " WHERE {} AND {}",
            not_deleted("h"),
            not_deleted("si")
        ));
        qb.push(" AND h.created_at >= ");
        qb.push_bind(period.start());
        qb.push(" AND h.created_at < ");
        qb.push_bind(period.end());

        if let Some(base) = base {
            qb.push(" AND u.base = ");
            qb.push_bind(base.to_string());
        }

        let totals = qb.build_query_as::<TotalsRow>().fetch_one(self.pool).await?;

        Ok((totals.total_distance, totals.total_time))
    }
}
