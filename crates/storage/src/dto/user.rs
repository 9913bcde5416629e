use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::{User, UserScoreInfo};

/// Request payload for creating a new member
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateRequest {
    #[validate(length(min = 1, max = 255, message = "lineId is required"))]
    pub line_id: String,

    #[validate(length(min = 1, max = 255))]
    pub display_name: String,

    #[validate(length(max = 500))]
    pub profile_image_url: Option<String>,

    #[validate(length(max = 255))]
    pub rank: String,

    #[validate(length(min = 1, max = 255, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255, message = "Last name is required"))]
    pub last_name: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(length(min = 1, max = 255, message = "Base is required"))]
    pub base: String,
}

/// Request payload for a member updating their own profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    #[validate(length(min = 1, max = 255))]
    pub display_name: String,

    #[validate(length(max = 500))]
    pub profile_image_url: Option<String>,

    #[validate(length(max = 255))]
    pub rank: String,

    #[validate(length(min = 1, max = 255))]
    pub first_name: String,

    #[validate(length(min = 1, max = 255))]
    pub last_name: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(length(min = 1, max = 255))]
    pub base: String,
}

// Pagination fields are inlined rather than #[serde(flatten)]-ed: the query
// deserializer buffers flattened fields as strings and refuses the numeric
// ones afterwards.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    #[serde(default = "crate::dto::common::default_page")]
    pub page: u32,
    #[serde(default = "crate::dto::common::default_page_size")]
    pub page_size: u32,
    pub base: Option<String>,
    pub search_text: Option<String>,
}

impl UserListQuery {
    pub fn pagination(&self) -> super::common::PaginationParams {
        super::common::PaginationParams {
            page: self.page,
            page_size: self.page_size,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

/// A member together with their score info row
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailResponse {
    pub id: uuid::Uuid,
    pub line_id: String,
    pub display_name: String,
    pub profile_image_url: String,
    pub rank: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub base: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    pub score: UserScoreInfo,
}

impl From<(User, UserScoreInfo)> for UserDetailResponse {
    fn from((user, score): (User, UserScoreInfo)) -> Self {
        Self {
            id: user.id,
            line_id: user.line_id,
            display_name: user.display_name,
            profile_image_url: user.profile_image_url,
            rank: user.rank,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
            base: user.base,
            status: user.status,
            is_deleted: user.is_deleted,
            created_at: user.created_at,
            updated_at: user.updated_at,
            score,
        }
    }
}

// Validation helpers

pub(crate) fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    const VALID_GENDERS: &[&str] = &["male", "female"];

    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_gender"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> UserCreateRequest {
        UserCreateRequest {
            line_id: "U4af4980629".to_string(),
            display_name: "runner".to_string(),
            profile_image_url: None,
            rank: "Sgt.".to_string(),
            first_name: "Somchai".to_string(),
            last_name: "J.".to_string(),
            gender: "male".to_string(),
            base: "HQ".to_string(),
        }
    }

    #[test]
    fn valid_create_request_passes() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn unknown_gender_is_rejected() {
        let mut req = create_request();
        req.gender = "other".to_string();

        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_line_id_is_rejected() {
        let mut req = create_request();
        req.line_id = String::new();

        assert!(req.validate().is_err());
    }

}
