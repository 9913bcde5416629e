use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{User, UserScoreHistory};

/// Query for the monthly ranking: calendar month plus optional base and
/// name filters.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct RankingQuery {
    #[serde(default = "crate::dto::common::default_page")]
    pub page: u32,
    #[serde(default = "crate::dto::common::default_page_size")]
    pub page_size: u32,
    pub month: u32,
    pub year: i32,
    pub base: Option<String>,
    pub search_text: Option<String>,
}

impl RankingQuery {
    pub fn pagination(&self) -> super::common::PaginationParams {
        super::common::PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if self.month < 1 || self.month > 12 {
            return Err("month must be between 1 and 12".to_string());
        }
        if self.year < 1970 || self.year > 9999 {
            return Err("year is out of range".to_string());
        }

        Ok(())
    }
}

/// One ranked row: the score info record with its owner, the period's
/// history, and the period's summed distance.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub id: Uuid,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub user: User,
    pub history: Vec<UserScoreHistory>,
    pub sum_distance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(month: u32, year: i32) -> RankingQuery {
        RankingQuery {
            page: 1,
            page_size: 50,
            month,
            year,
            base: None,
            search_text: None,
        }
    }

    #[test]
    fn calendar_months_pass_validation() {
        assert!(query(1, 2025).validate().is_ok());
        assert!(query(12, 2025).validate().is_ok());
    }

    #[test]
    fn out_of_range_month_is_rejected() {
        assert!(query(0, 2025).validate().is_err());
        assert!(query(13, 2025).validate().is_err());
    }
}
