//! Request types for the Vacation Entitlement Engine API.
//!
//! Record bodies use [`RecordInput`](crate::roster::RecordInput) directly;
//! this module holds the remaining query and body shapes.

use serde::{Deserialize, Serialize};

use crate::models::RecordId;

/// Query string of the roster listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    /// Requested page; anything that is not a whole number means page 1.
    #[serde(default)]
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested page number, defaulting to 1.
    pub fn page_number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

/// Body of the bulk delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteManyRequest {
    /// Records to delete.
    pub ids: Vec<RecordId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_number_defaults_to_one() {
        assert_eq!(PageQuery::default().page_number(), 1);
        let query = PageQuery {
            page: Some("abc".to_string()),
        };
        assert_eq!(query.page_number(), 1);
    }

    #[test]
    fn test_page_number_parses() {
        let query = PageQuery {
            page: Some("3".to_string()),
        };
        assert_eq!(query.page_number(), 3);
    }

    #[test]
    fn test_deserialize_delete_many_request() {
        let request: DeleteManyRequest = serde_json::from_str(r#"{"ids": [1, 2, 5]}"#).unwrap();
        assert_eq!(request.ids, vec![RecordId(1), RecordId(2), RecordId(5)]);
    }
}
