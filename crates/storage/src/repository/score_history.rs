use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::score_history::{
    ScoreHistoryCreateRequest, ScoreHistoryDetailResponse, ScoreHistoryListQuery,
};
use crate::error::{Result, StorageError};
use crate::models::{User, UserScoreHistory};
use crate::period::ReportPeriod;

use super::not_deleted;

const HISTORY_COLUMNS: &str =
    "id, score_info_id, time, distance, image_url, is_deleted, created_at, updated_at";

#[derive(FromRow)]
struct HistoryWithUserRow {
    id: Uuid,
    score_info_id: Uuid,
    time: i32,
    distance: i32,
    image_url: String,
    is_deleted: bool,
    created_at: chrono::NaiveDateTime,
    updated_at: chrono::NaiveDateTime,
    user_id: Uuid,
    line_id: String,
    display_name: String,
    profile_image_url: String,
    rank: String,
    first_name: String,
    last_name: String,
    gender: String,
    base: String,
    status: String,
    user_score_info_id: Uuid,
    user_is_deleted: bool,
    user_created_at: chrono::NaiveDateTime,
    user_updated_at: chrono::NaiveDateTime,
}

impl From<HistoryWithUserRow> for ScoreHistoryDetailResponse {
    fn from(row: HistoryWithUserRow) -> Self {
        Self {
            id: row.id,
            score_info_id: row.score_info_id,
            time: row.time,
            distance: row.distance,
            image_url: row.image_url,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: User {
                id: row.user_id,
                line_id: row.line_id,
                display_name: row.display_name,
                profile_image_url: row.profile_image_url,
                rank: row.rank,
                first_name: row.first_name,
                last_name: row.last_name,
                gender: row.gender,
                base: row.base,
                status: row.status,
                score_info_id: row.user_score_info_id,
                is_deleted: row.user_is_deleted,
                created_at: row.user_created_at,
                updated_at: row.user_updated_at,
            },
        }
    }
}

pub struct ScoreHistoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreHistoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Admin listing: live entries within the day range, joined with the
    /// submitting member, optional base and name filters, newest first
    pub async fn list_admin(
        &self,
        period: &ReportPeriod,
        query: &ScoreHistoryListQuery,
    ) -> Result<(Vec<ScoreHistoryDetailResponse>, i64)> {
        let total = {
            let mut qb = QueryBuilder::new(
                "SELECT COUNT(*) FROM user_score_history h \
                 INNER JOIN user_score_info si ON si.id = h.score_info_id \
                 INNER JOIN users u ON u.score_info_id = si.id",
            );
            push_admin_filters(&mut qb, period, query);

            qb.build_query_scalar::<i64>().fetch_one(self.pool).await?
        };

        let mut qb = QueryBuilder::new(
            "SELECT h.id, h.score_info_id, h.time, h.distance, h.image_url, h.is_deleted, \
             h.created_at, h.updated_at, \
             u.id AS user_id, u.line_id, u.display_name, u.profile_image_url, u.rank, \
             u.first_name, u.last_name, u.gender, u.base, u.status, \
             u.score_info_id AS user_score_info_id, u.is_deleted AS user_is_deleted, \
             u.created_at AS user_created_at, u.updated_at AS user_updated_at \
             FROM user_score_history h \
             INNER JOIN user_score_info si ON si.id = h.score_info_id \
             INNER JOIN users u ON u.score_info_id = si.id",
        );
        push_admin_filters(&mut qb, period, query);
        qb.push(" ORDER BY h.created_at DESC LIMIT ");
        qb.push_bind(query.pagination().limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(query.pagination().offset() as i64);

        let rows = qb
            .build_query_as::<HistoryWithUserRow>()
            .fetch_all(self.pool)
            .await?;

        Ok((
            rows.into_iter().map(ScoreHistoryDetailResponse::from).collect(),
            total,
        ))
    }

    /// A member's own entries, newest first
    pub async fn list_for_score_info(
        &self,
        score_info_id: Uuid,
        pagination: &PaginationParams,
    ) -> Result<(Vec<UserScoreHistory>, i64)> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM user_score_history \
             WHERE score_info_id = $1 AND {}",
            not_deleted("user_score_history")
        );
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(score_info_id)
            .fetch_one(self.pool)
            .await?;

        let sql = format!(
            "SELECT {HISTORY_COLUMNS} FROM user_score_history \
             WHERE score_info_id = $1 AND {} \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            not_deleted("user_score_history")
        );
        let entries = sqlx::query_as::<_, UserScoreHistory>(&sql)
            .bind(score_info_id)
            .bind(pagination.limit() as i64)
            .bind(pagination.offset() as i64)
            .fetch_all(self.pool)
            .await?;

        Ok((entries, total))
    }

    /// Insert one submission against a score info row
    pub async fn create(&self, req: &ScoreHistoryCreateRequest) -> Result<UserScoreHistory> {
        let sql = format!(
            "INSERT INTO user_score_history (score_info_id, time, distance, image_url) \
             VALUES ($1, $2, $3, $4) RETURNING {HISTORY_COLUMNS}"
        );

        let entry = sqlx::query_as::<_, UserScoreHistory>(&sql)
            .bind(req.user_score_info_id)
            .bind(req.time)
            .bind(req.distance)
            .bind(&req.image_url)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_foreign_key_violation() {
                    StorageError::ConstraintViolation("score info does not exist".to_string())
                } else {
                    err
                }
            })?;

        Ok(entry)
    }

    /// Soft-delete one submission
    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let sql = format!(
            "UPDATE user_score_history SET is_deleted = TRUE, updated_at = now() \
             WHERE id = $1 AND {}",
            not_deleted("user_score_history")
        );

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_admin_filters(
    qb: &mut QueryBuilder<'_, sqlx::Postgres>,
    period: &ReportPeriod,
    query: &ScoreHistoryListQuery,
) {
    qb.push(format!(
        " WHERE {} AND {}",
        not_deleted("h"),
        not_deleted("si")
    ));
    qb.push(" AND h.created_at >= ");
    qb.push_bind(period.start());
    qb.push(" AND h.created_at < ");
    qb.push_bind(period.end());

    if let Some(ref base) = query.base {
        qb.push(" AND u.base = ");
        qb.push_bind(base.clone());
    }

    if let Some(ref text) = query.search_text {
        let pattern = format!("%{text}%");
        qb.push(" AND (u.first_name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.last_name ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}
