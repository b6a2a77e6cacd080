//! Endpoint method groups
//!
//! Each method is thin plumbing: build query params, call the transport,
//! unwrap the payload. The transport does the signing, throttling and
//! envelope handling.

pub mod account;
pub mod market;
pub mod trading;

pub use account::AccountEndpoints;
pub use market::MarketEndpoints;
pub use trading::TradingEndpoints;

/// Sort direction for paginated listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// Pagination knobs shared by the listing endpoints
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    /// Return objects from before (or after, with ascending sort) this ID
    pub marker: Option<String>,
    /// Sort direction by creation time
    pub sort: Option<SortOrder>,
    /// Maximum number of objects to return (API caps at 100)
    pub limit: Option<u32>,
}

impl Pagination {
    /// No pagination: the API defaults apply
    pub fn none() -> Self {
        Self::default()
    }

    /// Limit the number of returned objects
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Page from the given marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Set the sort direction
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub(crate) fn push_params(&self, params: &mut Vec<(&'static str, String)>) {
        if let Some(marker) = &self.marker {
            params.push(("marker", marker.clone()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params() {
        let mut params = Vec::new();
        Pagination::none()
            .with_limit(25)
            .with_marker("51101")
            .with_sort(SortOrder::Ascending)
            .push_params(&mut params);

        assert_eq!(
            params,
            vec![
                ("marker", "51101".to_string()),
                ("sort", "asc".to_string()),
                ("limit", "25".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_pagination_pushes_nothing() {
        let mut params = Vec::new();
        Pagination::none().push_params(&mut params);
        assert!(params.is_empty());
    }
}
