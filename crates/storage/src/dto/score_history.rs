use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::User;

/// Request payload for logging one exercise submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryCreateRequest {
    #[validate(range(min = 0, message = "time must not be negative"))]
    pub time: i32,

    #[validate(range(min = 0, message = "distance must not be negative"))]
    pub distance: i32,

    #[validate(length(min = 1, max = 500, message = "imageUrl is required"))]
    pub image_url: String,

    pub user_score_info_id: Uuid,
}

/// Admin listing filter: whole-day date range, optional base and name search
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryListQuery {
    #[serde(default = "crate::dto::common::default_page")]
    pub page: u32,
    #[serde(default = "crate::dto::common::default_page_size")]
    pub page_size: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub base: Option<String>,
    pub search_text: Option<String>,
}

impl ScoreHistoryListQuery {
    pub fn pagination(&self) -> super::common::PaginationParams {
        super::common::PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if self.end_date < self.start_date {
            return Err("endDate must not precede startDate".to_string());
        }

        Ok(())
    }
}

/// History entry joined with the submitting member, for admin review tables
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryDetailResponse {
    pub id: Uuid,
    pub score_info_id: Uuid,
    pub time: i32,
    pub distance: i32,
    pub image_url: String,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_date_range_is_rejected() {
        let query = ScoreHistoryListQuery {
            page: 1,
            page_size: 50,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 20).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            base: None,
            search_text: None,
        };

        assert!(query.validate().is_err());
    }

    #[test]
    fn negative_distance_is_rejected() {
        let req = ScoreHistoryCreateRequest {
            time: 30,
            distance: -1,
            image_url: "https://cdn.example.com/proof.jpg".to_string(),
            user_score_info_id: Uuid::new_v4(),
        };

        assert!(req.validate().is_err());
    }
}
