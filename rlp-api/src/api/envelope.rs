//! Response envelope
//!
//! Success: `{"success": true, "data": ..., "meta": {...}}` where `meta` is
//! present only on list/search responses.
//! Error: `{"success": false, "error": {"code", "message", "type", "details"}}`.

use rlp_common::pagination::PageMeta;
use serde::Serialize;
use serde_json::Value;

/// Successful response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Single-record or message payload (no pagination metadata)
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    /// List/search payload with pagination metadata
    pub fn paged(data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: &'static str,
    pub details: Option<Value>,
}

/// Failed response wrapper
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    pub fn new(error: ErrorBody) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlp_common::pagination::{calculate_pagination, PageRequest};
    use serde_json::json;

    #[test]
    fn test_single_record_has_no_meta() {
        let value = serde_json::to_value(ApiResponse::data(json!({"id": 1}))).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"]["id"], 1);
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn test_paged_carries_meta() {
        let meta = calculate_pagination(21, PageRequest::from_page(1, 10));
        let value = serde_json::to_value(ApiResponse::paged(vec![1, 2, 3], meta)).unwrap();
        assert_eq!(value["meta"]["total"], 21);
        assert_eq!(value["meta"]["page"], 1);
        assert_eq!(value["meta"]["per_page"], 10);
        assert_eq!(value["meta"]["total_pages"], 3);
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ErrorEnvelope::new(ErrorBody {
            code: 404,
            message: "Recipe 5 not found".to_string(),
            error_type: "not_found",
            details: None,
        });
        let value = serde_json::to_value(envelope).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"]["code"], 404);
        assert_eq!(value["error"]["type"], "not_found");
        assert!(value["error"]["details"].is_null());
    }
}
