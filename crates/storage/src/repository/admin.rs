use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Admin;

use super::not_deleted;

const ADMIN_COLUMNS: &str = "id, username, password, is_deleted, created_at, updated_at";

pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find a live admin by username. Callers lower-case the username before
    /// lookup; stored usernames are lower-case by construction.
    pub async fn find_by_username(&self, username: &str) -> Result<Admin> {
        let sql = format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE username = $1 AND {}",
            not_deleted("admins")
        );

        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(username)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(admin)
    }

    /// Find a live admin by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Admin> {
        let sql = format!(
            "SELECT {ADMIN_COLUMNS} FROM admins WHERE id = $1 AND {}",
            not_deleted("admins")
        );

        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(admin)
    }

    /// Create an admin with an already-hashed password
    pub async fn create(&self, username: &str, password_hash: &str) -> Result<Admin> {
        let sql = format!(
            "INSERT INTO admins (username, password) VALUES ($1, $2) \
             RETURNING {ADMIN_COLUMNS}"
        );

        let admin = sqlx::query_as::<_, Admin>(&sql)
            .bind(username)
            .bind(password_hash)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                let err = StorageError::from(e);
                if err.is_unique_violation() {
                    StorageError::ConstraintViolation("username is already taken".to_string())
                } else {
                    err
                }
            })?;

        Ok(admin)
    }
}
