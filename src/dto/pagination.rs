use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Query half of the pagination contract shared by every list endpoint.
/// Bounds are validated before any query runs; the per-endpoint maximum
/// varies (offers and notifications allow 100, applications 50).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

impl PageQuery {
    pub fn validate(self, max_page_size: i64) -> Result<Pagination> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page < 1 || page_size < 1 || page_size > max_page_size {
            return Err(Error::BadRequest(
                "Invalid pagination parameters".to_string(),
            ));
        }
        Ok(Pagination { page, page_size })
    }
}

/// Response half of the contract: `hasMore` is derived from the same query
/// that produced `items`, never from a second differently-filtered count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, pg: Pagination, total: i64) -> Self {
        let has_more = pg.offset() + (items.len() as i64) < total;
        Self {
            items,
            page: pg.page,
            page_size: pg.page_size,
            total,
            has_more,
        }
    }

    pub fn empty(pg: Pagination) -> Self {
        Self::new(Vec::new(), pg, 0)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            has_more: self.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, page_size: Option<i64>) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn defaults_apply_when_params_absent() {
        let pg = query(None, None).validate(100).unwrap();
        assert_eq!(pg.page, 1);
        assert_eq!(pg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(pg.offset(), 0);
    }

    #[test]
    fn bounds_are_enforced_before_any_query() {
        assert!(query(Some(0), None).validate(100).is_err());
        assert!(query(Some(-3), Some(10)).validate(100).is_err());
        assert!(query(Some(1), Some(0)).validate(100).is_err());
        assert!(query(Some(1), Some(101)).validate(100).is_err());
        assert!(query(Some(1), Some(51)).validate(50).is_err());
        assert!(query(Some(1), Some(100)).validate(100).is_ok());
        assert!(query(Some(1), Some(50)).validate(50).is_ok());
    }

    #[test]
    fn offset_is_page_minus_one_times_size() {
        let pg = query(Some(3), Some(20)).validate(100).unwrap();
        assert_eq!(pg.offset(), 40);
    }

    #[test]
    fn has_more_uses_skip_plus_returned_count() {
        let pg = query(Some(1), Some(2)).validate(100).unwrap();
        let page = Page::new(vec![1, 2], pg, 5);
        assert!(page.has_more);

        let pg = query(Some(3), Some(2)).validate(100).unwrap();
        let page = Page::new(vec![5], pg, 5);
        assert!(!page.has_more);

        // Full last page: skip + len == total.
        let pg = query(Some(2), Some(2)).validate(100).unwrap();
        let page = Page::new(vec![3, 4], pg, 4);
        assert!(!page.has_more);
    }

    #[test]
    fn empty_page_has_no_more() {
        let pg = query(Some(1), Some(10)).validate(100).unwrap();
        let page: Page<i32> = Page::empty(pg);
        assert_eq!(page.total, 0);
        assert!(!page.has_more);
        assert!(page.items.is_empty());
    }

    #[test]
    fn envelope_serializes_with_camel_case_keys() {
        let pg = query(Some(1), Some(2)).validate(100).unwrap();
        let page = Page::new(vec![1], pg, 3);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("pageSize").is_some());
        assert!(json.get("hasMore").is_some());
        assert!(json.get("items").is_some());
        assert!(json.get("total").is_some());
    }
}
