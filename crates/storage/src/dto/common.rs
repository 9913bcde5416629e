use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

pub(crate) fn default_page() -> u32 {
    1
}

pub(crate) fn default_page_size() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.page_size < 1 || self.page_size > 100 {
            return Err("pageSize must be between 1 and 100".to_string());
        }
        Ok(())
    }

    pub fn offset(&self) -> u32 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

/// Uniform success envelope: `{ data, meta? }`. List endpoints set
/// `meta.total` to the pre-pagination match count.
#[derive(Debug, Serialize, ToSchema)]
pub struct ResponseModel<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> ResponseModel<T> {
    pub fn of(data: T) -> Self {
        Self { data, meta: None }
    }

    pub fn with_total(data: T, total: i64) -> Self {
        Self {
            data,
            meta: Some(Meta { total }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_apply_when_params_are_absent() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();

        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 50);
    }

    #[test]
    fn offset_is_zero_based_from_page_one() {
        let params = PaginationParams {
            page: 3,
            page_size: 20,
        };

        assert_eq!(params.offset(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn pagination_bounds_are_enforced() {
        let zero_page = PaginationParams {
            page: 0,
            page_size: 50,
        };
        assert!(zero_page.validate().is_err());

        let oversized = PaginationParams {
            page: 1,
            page_size: 101,
        };
        assert!(oversized.validate().is_err());

        assert!(PaginationParams::default().validate().is_ok());
    }

    #[test]
    fn envelope_omits_meta_unless_set() {
        let bare = serde_json::to_value(ResponseModel::of("ok")).unwrap();
        assert!(bare.get("meta").is_none());

        let listed = serde_json::to_value(ResponseModel::with_total(vec![1, 2], 9)).unwrap();
        assert_eq!(listed["meta"]["total"], 9);
    }
}
