use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Admin;

use super::user::UserDetailResponse;

/// Member sign-in: the LINE id arrives already verified by the client-side
/// LINE login flow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserLoginRequest {
    #[validate(length(min = 1, max = 255, message = "lineId is required"))]
    pub line_id: String,

    #[validate(length(max = 255))]
    pub display_name: Option<String>,

    #[validate(length(max = 500))]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, max = 255, message = "username is required"))]
    pub username: String,

    #[validate(length(min = 1, max = 255, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthToken {
    pub access_token: String,
}

/// Admin record with the credential columns stripped
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    pub id: Uuid,
    pub is_deleted: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Admin> for AdminResponse {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            is_deleted: admin.is_deleted,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSignInResponse {
    pub token: AuthToken,
    pub user: UserDetailResponse,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignInResponse {
    pub token: AuthToken,
    pub admin: AdminResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_response_never_carries_credentials() {
        let admin = Admin {
            id: Uuid::new_v4(),
            username: "admin1".to_string(),
            password: "$argon2id$stub".to_string(),
            is_deleted: false,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        };

        let body = serde_json::to_value(AdminResponse::from(admin)).unwrap();

        assert!(body.get("username").is_none());
        assert!(body.get("password").is_none());
        assert!(body.get("id").is_some());
    }
}
