use serde::{Deserialize, Serialize};

use crate::dto::pagination::PageQuery;

/// Pagination fields are inlined rather than flattened: the query-string
/// deserializer cannot carry numeric fields through `#[serde(flatten)]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsQuery {
    #[serde(rename = "usuarioId")]
    pub usuario_id: i64,
    pub page: Option<i64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<i64>,
}

impl NotificationsQuery {
    pub fn pagination(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountQuery {
    #[serde(rename = "usuarioId")]
    pub usuario_id: i64,
}

/// Wire shape the original client polls: `{"contador": n}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub contador: i64,
}
