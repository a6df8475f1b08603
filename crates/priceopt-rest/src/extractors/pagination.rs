//! Pagination extractor.

use priceopt_core::PageRequest;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Zero-based page index.
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size, clamped to 1..=100.
    #[serde(default)]
    pub size: Option<usize>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request: PageRequest = PaginationQuery::default().into();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_size_is_clamped() {
        let request: PageRequest = PaginationQuery {
            page: Some(2),
            size: Some(1000),
        }
        .into();
        assert_eq!(request.page, 2);
        assert_eq!(request.size, 100);
    }
}
