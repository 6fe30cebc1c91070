//! Pagination types
//!
//! Defines the bound on a paginated query and the step decision taken after
//! each page.

use crate::backend::QueryObjectsPage;
use crate::error::{Error, Result};
use crate::types::QUERY_OBJECTS_TARGET;
use serde::{Deserialize, Serialize};

/// Result of inspecting a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available starting at this cursor
    Continue {
        /// Cursor echoed back verbatim in the next request
        marker: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Decide the next step from a page
    ///
    /// The cursor is only read when the page reports more results.
    pub fn from_page(page: &QueryObjectsPage) -> Result<Self> {
        if !page.has_more_results {
            return Ok(Self::Done);
        }

        page.marker
            .clone()
            .map(|marker| Self::Continue { marker })
            .ok_or_else(|| Error::missing_field(QUERY_OBJECTS_TARGET, "marker"))
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Configuration for pagination behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Upper bound on pages fetched by one query; `None` follows the cursor
    /// for as long as the server keeps reporting more results
    #[serde(default)]
    pub max_pages: Option<u32>,
}

impl PaginationConfig {
    /// Follow the cursor without a bound
    pub fn unbounded() -> Self {
        Self { max_pages: None }
    }

    /// Stop with an error once `max_pages` pages have been fetched and more remain
    pub fn with_max_pages(max_pages: u32) -> Self {
        Self {
            max_pages: Some(max_pages),
        }
    }

    /// Fail if another page would exceed the bound
    pub fn check(&self, pages_fetched: u32) -> Result<()> {
        match self.max_pages {
            Some(max_pages) if pages_fetched >= max_pages => {
                Err(Error::PageLimitExceeded { max_pages })
            }
            _ => Ok(()),
        }
    }
}
