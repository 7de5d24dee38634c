//! Pagination types for the backend's paged list responses
//!
//! The backend returns Spring-style pages: `{content, totalElements, ...}`.
//! Only the fields the client consumes are modeled; everything else in the
//! payload is ignored on deserialization.

use serde::{Deserialize, Serialize};

/// One page of results from a paged backend query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page
    pub content: Vec<T>,
    /// Total number of items across all pages
    #[serde(default)]
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Creates an empty page
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
        }
    }

    /// Returns true if this page carries no items
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of items on this page (not the overall total)
    pub fn len(&self) -> usize {
        self.content.len()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Query parameters for a paged list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub size: u32,
    /// Sort expression, `property,direction`
    pub sort: String,
}

impl PageRequest {
    /// Creates a request for the given page with the default sort
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    /// Replaces the sort expression
    pub fn sorted_by(mut self, sort: impl Into<String>) -> Self {
        self.sort = sort.into();
        self
    }
}

impl Default for PageRequest {
    /// First page of twenty, newest quotes first
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: "createdAt,desc".to_string(),
        }
    }
}
