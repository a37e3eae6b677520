use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::pagination::PageQuery;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyPayload {
    #[validate(length(min = 1, message = "application message must not be empty"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RespondPayload {
    pub decision: String,
    pub response_message: Option<String>,
}

/// `rol` must match the authenticated role; enforced in the service.
/// Pagination fields are inlined rather than flattened: the query-string
/// deserializer cannot carry numeric fields through `#[serde(flatten)]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationsQuery {
    pub rol: String,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

impl ApplicationsQuery {
    pub fn pagination(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}
