use std::collections::HashMap;

use sqlx::{FromRow, PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::PaginationParams;
use crate::dto::score_info::{RankingEntry, RankingQuery};
use crate::error::{Result, StorageError};
use crate::models::{User, UserScoreHistory, UserScoreInfo};
use crate::period::ReportPeriod;

use super::not_deleted;

#[derive(Debug, Clone, FromRow)]
struct RankedRow {
    id: Uuid,
    sum_distance: i64,
}

#[derive(FromRow)]
struct InfoOwnerRow {
    id: Uuid,
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
    user_is_deleted: bool,
    user_created_at: chrono::NaiveDateTime,
    user_updated_at: chrono::NaiveDateTime,
}

impl InfoOwnerRow {
    fn into_pair(self) -> (UserScoreInfo, User) {
        let score = UserScoreInfo {
            id: self.id,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        let user = User {
            id: self.user_id,
            line_id: self.line_id,
            display_name: self.display_name,
            profile_image_url: self.profile_image_url,
            rank: self.rank,
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            base: self.base,
            status: self.status,
            score_info_id: score.id,
            is_deleted: self.user_is_deleted,
            created_at: self.user_created_at,
            updated_at: self.user_updated_at,
        };

        (score, user)
    }
}

pub struct ScoreInfoRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ScoreInfoRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a live score info row by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<UserScoreInfo> {
        let sql = format!(
            "SELECT id, is_deleted, created_at, updated_at FROM user_score_info \
             WHERE id = $1 AND {}",
            not_deleted("user_score_info")
        );

        let score = sqlx::query_as::<_, UserScoreInfo>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(score)
    }

    /// Rank members by distance accumulated within the period.
    ///
    /// The aggregate is materialized and sorted in full before the page is
    /// sliced: a LIMIT/OFFSET inside the grouped query would be applied
    /// against pre-aggregation rows and return wrong pages. Only the page's
    /// entities are re-fetched afterwards.
    pub async fn ranking(
        &self,
        period: &ReportPeriod,
        query: &RankingQuery,
    ) -> Result<(Vec<RankingEntry>, i64)> {
        let ranked = self.fetch_ranked_ids(period, query).await?;
        let total = ranked.len() as i64;

        let page = slice_page(&ranked, &query.pagination());
        if page.is_empty() {
            return Ok((Vec::new(), total));
        }

        let ids: Vec<Uuid> = page.iter().map(|row| row.id).collect();
        let owners = self.fetch_owners(&ids).await?;
        let history = self.fetch_period_history(&ids, period).await?;

        Ok((assemble_page(&page, owners, history), total))
    }

    /// The grouped aggregate: one row per live score info, summing the
    /// period's live history. The period restriction lives in the join
    /// condition so members without submissions keep a zero sum instead of
    /// dropping out.
    async fn fetch_ranked_ids(
        &self,
        period: &ReportPeriod,
        query: &RankingQuery,
    ) -> Result<Vec<RankedRow>> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT si.id, COALESCE(SUM(h.distance), 0)::BIGINT AS sum_distance \
             FROM user_score_info si \
             LEFT JOIN users u ON u.score_info_id = si.id AND {} \
             LEFT JOIN user_score_history h ON h.score_info_id = si.id AND {} \
             AND h.created_at >= ",
            not_deleted("u"),
            not_deleted("h"),
        ));
        qb.push_bind(period.start());
        qb.push(" AND h.created_at < ");
        qb.push_bind(period.end());
        qb.push(format!(" WHERE {}", not_deleted("si")));

        if let Some(ref base) = query.base {
            qb.push(" AND u.base = ");
            qb.push_bind(base);
        }

        if let Some(ref text) = query.search_text {
            let pattern = format!("%{text}%");
            qb.push(" AND (u.first_name ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR u.last_name ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        qb.push(
            " GROUP BY si.id, si.created_at \
             ORDER BY COALESCE(SUM(h.distance), 0) DESC, si.created_at DESC, si.id DESC",
        );

        let rows = qb.build_query_as::<RankedRow>().fetch_all(self.pool).await?;

        Ok(rows)
    }

    async fn fetch_owners(&self, ids: &[Uuid]) -> Result<Vec<(UserScoreInfo, User)>> {
        let sql = format!(
            "SELECT si.id, si.is_deleted, si.created_at, si.updated_at, \
             u.id AS user_id, u.line_id, u.display_name, u.profile_image_url, u.rank, \
             u.first_name, u.last_name, u.gender, u.base, u.status, \
             u.is_deleted AS user_is_deleted, u.created_at AS user_created_at, \
             u.updated_at AS user_updated_at \
             FROM user_score_info si \
             INNER JOIN users u ON u.score_info_id = si.id AND {} \
             WHERE si.id = ANY($1) AND {}",
            not_deleted("u"),
            not_deleted("si"),
        );

        let rows = sqlx::query_as::<_, InfoOwnerRow>(&sql)
            .bind(ids)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(InfoOwnerRow::into_pair).collect())
    }

    async fn fetch_period_history(
        &self,
        ids: &[Uuid],
        period: &ReportPeriod,
    ) -> Result<Vec<UserScoreHistory>> {
        let sql = format!(
            "SELECT id, score_info_id, time, distance, image_url, is_deleted, \
             created_at, updated_at \
             FROM user_score_history \
             WHERE score_info_id = ANY($1) AND {} \
             AND created_at >= $2 AND created_at < $3 \
             ORDER BY created_at DESC",
            not_deleted("user_score_history")
        );

        let rows = sqlx::query_as::<_, UserScoreHistory>(&sql)
            .bind(ids)
            .bind(period.start())
            .bind(period.end())
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }
}

fn slice_page<T: Clone>(rows: &[T], pagination: &PaginationParams) -> Vec<T> {
    rows.iter()
        .skip(pagination.offset() as usize)
        .take(pagination.limit() as usize)
        .cloned()
        .collect()
}

/// Stitch the page back together in ranked order, attaching each entry's
/// period history and precomputed sum. Ids whose entities vanished between
/// the two queries are skipped rather than emitted half-empty.
fn assemble_page(
    page: &[RankedRow],
    owners: Vec<(UserScoreInfo, User)>,
    history: Vec<UserScoreHistory>,
) -> Vec<RankingEntry> {
    let mut owner_map: HashMap<Uuid, (UserScoreInfo, User)> =
        owners.into_iter().map(|pair| (pair.0.id, pair)).collect();

    let mut history_map: HashMap<Uuid, Vec<UserScoreHistory>> = HashMap::new();
    for entry in history {
        history_map.entry(entry.score_info_id).or_default().push(entry);
    }

    page.iter()
        .filter_map(|row| {
            let (score, user) = owner_map.remove(&row.id)?;
            Some(RankingEntry {
                id: score.id,
                is_deleted: score.is_deleted,
                created_at: score.created_at,
                updated_at: score.updated_at,
                user,
                history: history_map.remove(&row.id).unwrap_or_default(),
                sum_distance: row.sum_distance,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn score_info(id: Uuid) -> UserScoreInfo {
        UserScoreInfo {
            id,
            is_deleted: false,
            created_at: at(1),
            updated_at: at(1),
        }
    }

    fn user(score_info_id: Uuid, first_name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            line_id: format!("line-{first_name}"),
            display_name: first_name.to_string(),
            profile_image_url: String::new(),
            rank: String::new(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            gender: "male".to_string(),
            base: "HQ".to_string(),
            status: "active".to_string(),
            score_info_id,
            is_deleted: false,
            created_at: at(1),
            updated_at: at(1),
        }
    }

    fn submission(score_info_id: Uuid, distance: i32, day: u32) -> UserScoreHistory {
        UserScoreHistory {
            id: Uuid::new_v4(),
            score_info_id,
            time: 30,
            distance,
            image_url: String::new(),
            is_deleted: false,
            created_at: at(day),
            updated_at: at(day),
        }
    }

    #[test]
    fn page_keeps_ranked_order_and_attaches_history() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        let page = vec![
            RankedRow {
                id: first,
                sum_distance: 12,
            },
            RankedRow {
                id: second,
                sum_distance: 7,
            },
        ];
        // owners arrive in storage order, not ranked order
        let owners = vec![
            (score_info(second), user(second, "Beta")),
            (score_info(first), user(first, "Alpha")),
        ];
        let history = vec![
            submission(second, 7, 4),
            submission(first, 5, 2),
            submission(first, 7, 3),
        ];

        let entries = assemble_page(&page, owners, history);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, first);
        assert_eq!(entries[0].sum_distance, 12);
        assert_eq!(entries[0].history.len(), 2);
        assert_eq!(entries[1].id, second);
        assert_eq!(entries[1].history.len(), 1);
    }

    #[test]
    fn member_without_submissions_keeps_zero_sum_and_empty_history() {
        let idle = Uuid::new_v4();

        let page = vec![RankedRow {
            id: idle,
            sum_distance: 0,
        }];
        let owners = vec![(score_info(idle), user(idle, "Idle"))];

        let entries = assemble_page(&page, owners, Vec::new());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].sum_distance, 0);
        assert!(entries[0].history.is_empty());
    }

    #[test]
    fn rows_without_a_live_owner_are_skipped() {
        let ghost = Uuid::new_v4();
        let live = Uuid::new_v4();

        let page = vec![
            RankedRow {
                id: ghost,
                sum_distance: 9,
            },
            RankedRow {
                id: live,
                sum_distance: 3,
            },
        ];
        let owners = vec![(score_info(live), user(live, "Live"))];

        let entries = assemble_page(&page, owners, Vec::new());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, live);
    }

    #[test]
    fn concatenated_pages_reproduce_the_full_ranking_exactly_once() {
        let rows: Vec<RankedRow> = (0..25)
            .map(|i| RankedRow {
                id: Uuid::new_v4(),
                sum_distance: 25 - i,
            })
            .collect();

        let mut seen = Vec::new();
        for page in 1..=3 {
            let pagination = PaginationParams { page, page_size: 10 };
            seen.extend(slice_page(&rows, &pagination).into_iter().map(|r| r.id));
        }

        let expected: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn slice_past_the_end_is_empty() {
        let rows = vec![RankedRow {
            id: Uuid::new_v4(),
            sum_distance: 1,
        }];
        let pagination = PaginationParams {
            page: 5,
            page_size: 10,
        };

        assert!(slice_page(&rows, &pagination).is_empty());
    }
}
