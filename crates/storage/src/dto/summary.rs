use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query for the all-members summary of one calendar month
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub month: u32,
    pub year: i32,
    pub base: Option<String>,
}

impl SummaryQuery {
    pub fn validate(&self) -> Result<(), String> {
        if self.month < 1 || self.month > 12 {
            return Err("month must be between 1 and 12".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_member: i64,
    pub total_distance: i64,
    pub total_time: i64,
}
