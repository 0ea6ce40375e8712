//! Pagination session options

use serde::{Deserialize, Serialize};

/// Options for a pagination session
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginateOptions {
    /// Stop after this many pages even if more are reported (unlimited if unset)
    #[serde(default)]
    pub max_pages: Option<usize>,
}

impl PaginateOptions {
    /// Limit the session to `max_pages` pages
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Validate options
    pub fn validate(&self) -> crate::Result<()> {
        if self.max_pages == Some(0) {
            return Err(crate::GraphQLError::InvalidOptions(
                "'maxPages' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether `pages_fetched` pages already exhaust the page budget
    pub fn limit_reached(&self, pages_fetched: usize) -> bool {
        self.max_pages.is_some_and(|max| pages_fetched >= max)
    }
}
