use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use crate::dto::user::{UserCreateRequest, UserDetailResponse, UserListQuery, UserUpdateRequest};
use crate::error::{Result, StorageError};
use crate::models::{User, UserScoreInfo};

use super::not_deleted;

const USER_COLUMNS: &str = "id, line_id, display_name, profile_image_url, rank, first_name, \
     last_name, gender, base, status, score_info_id, is_deleted, created_at, updated_at";

const SCORE_INFO_COLUMNS: &str = "id, is_deleted, created_at, updated_at";

pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a live user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 AND {}",
            not_deleted("users")
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Find a live user by ID together with their score info row
    pub async fn find_detailed_by_id(&self, id: Uuid) -> Result<UserDetailResponse> {
        let user = self.find_by_id(id).await?;
        let score = self.load_score(user.score_info_id).await?;

        Ok(UserDetailResponse::from((user, score)))
    }

    /// Find a live user by their external LINE id
    pub async fn find_by_line_id(&self, line_id: &str) -> Result<UserDetailResponse> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE line_id = $1 AND {} \
             ORDER BY created_at DESC LIMIT 1",
            not_deleted("users")
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(line_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        let score = self.load_score(user.score_info_id).await?;

        Ok(UserDetailResponse::from((user, score)))
    }

    /// Admin listing with optional base and name filters, newest first
    pub async fn list(&self, query: &UserListQuery) -> Result<(Vec<User>, i64)> {
        let total = {
            let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM users u WHERE ");
            qb.push(not_deleted("u"));
            push_user_filters(&mut qb, query.base.as_deref(), query.search_text.as_deref());

            qb.build_query_scalar::<i64>().fetch_one(self.pool).await?
        };

        let mut qb = QueryBuilder::new(format!(
            "SELECT u.{} FROM users u WHERE ",
            USER_COLUMNS.replace(", ", ", u.")
        ));
        qb.push(not_deleted("u"));
        push_user_filters(&mut qb, query.base.as_deref(), query.search_text.as_deref());
        qb.push(" ORDER BY u.created_at DESC LIMIT ");
        qb.push_bind(query.pagination().limit() as i64);
        qb.push(" OFFSET ");
        qb.push_bind(query.pagination().offset() as i64);

        let users = qb.build_query_as::<User>().fetch_all(self.pool).await?;

        Ok((users, total))
    }

    /// Create a member and their score info row in one transaction
    pub async fn create(&self, req: &UserCreateRequest) -> Result<UserDetailResponse> {
        let mut tx = self.pool.begin().await?;

        let score = sqlx::query_as::<_, UserScoreInfo>(&format!(
            "INSERT INTO user_score_info DEFAULT VALUES RETURNING {SCORE_INFO_COLUMNS}"
        ))
        .fetch_one(&mut *tx)
        .await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (line_id, display_name, profile_image_url, rank, first_name, \
             last_name, gender, base, score_info_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&req.line_id)
        .bind(&req.display_name)
        .bind(req.profile_image_url.as_deref().unwrap_or_default())
        .bind(&req.rank)
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.gender)
        .bind(&req.base)
        .bind(score.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(UserDetailResponse::from((user, score)))
    }

    /// Replace a member's profile fields
    pub async fn update(&self, id: Uuid, req: &UserUpdateRequest) -> Result<User> {
        let sql = format!(
            "UPDATE users SET display_name = $2, \
             profile_image_url = COALESCE($3, profile_image_url), rank = $4, \
             first_name = $5, last_name = $6, gender = $7, base = $8, updated_at = now() \
             WHERE id = $1 AND {} RETURNING {USER_COLUMNS}",
            not_deleted("users")
        );

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&req.display_name)
            .bind(req.profile_image_url.as_deref())
            .bind(&req.rank)
            .bind(&req.first_name)
            .bind(&req.last_name)
            .bind(&req.gender)
            .bind(&req.base)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Refresh the LINE display fields on sign-in; absent fields keep their
    /// stored values
    pub async fn update_display(
        &self,
        id: Uuid,
        display_name: Option<&str>,
        profile_image_url: Option<&str>,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE users SET display_name = COALESCE($2, display_name), \
             profile_image_url = COALESCE($3, profile_image_url), updated_at = now() \
             WHERE id = $1 AND {}",
            not_deleted("users")
        );

        sqlx::query(&sql)
            .bind(id)
            .bind(display_name)
            .bind(profile_image_url)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Soft-delete a member; the row is retained and excluded from reads
    pub async fn soft_delete(&self, id: Uuid) -> Result<()> {
        let sql = format!(
            "UPDATE users SET is_deleted = TRUE, updated_at = now() WHERE id = $1 AND {}",
            not_deleted("users")
        );

        let result = sqlx::query(&sql).bind(id).execute(self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Load the score info relation; deletion state is intentionally not
    /// filtered here, the owning user is the visibility gate
    async fn load_score(&self, score_info_id: Uuid) -> Result<UserScoreInfo> {
        let sql = format!("SELECT {SCORE_INFO_COLUMNS} FROM user_score_info WHERE id = $1");

        let score = sqlx::query_as::<_, UserScoreInfo>(&sql)
            .bind(score_info_id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(score)
    }
}

fn push_user_filters(
    qb: &mut QueryBuilder<'_, sqlx::Postgres>,
    base: Option<&str>,
    search_text: Option<&str>,
) {
    if let Some(base) = base {
        qb.push(" AND u.base = ");
        qb.push_bind(base.to_string());
    }

    if let Some(text) = search_text {
        let pattern = format!("%{text}%");
        qb.push(" AND (u.first_name ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR u.last_name ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
}
