//! # PageStore: interface between the pipeline and the external store
//!
//! This module defines the single trait (`PageStore`) the reconciliation
//! pipeline talks through, plus its supporting types. The trait covers
//! both the locator (find a page by issue number) and the writer
//! (create, full update, status-only update).
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so the integration tests can
//!   drive the pipeline against a deterministic `MockPageStore`.
//!
//! ## Adding New Store Backends
//! - Implement the trait for your backend.
//! - Keep "no match" an `Ok(None)` from `find_page`; `StoreError` is for
//!   transport and API failures only.

use async_trait::async_trait;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

use crate::event::IssueEvent;
use crate::status::StatusLabel;

/// Weak reference to a page in the external store, obtained from the
/// lookup. The page is not owned by this process and may be deleted or
/// edited out of band at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRef {
    pub id: String,
}

/// Failure of a remote store call.
#[derive(Debug)]
pub enum StoreError {
    /// The HTTP request itself failed (connection, timeout, TLS).
    Transport(reqwest::Error),
    /// The store answered with a non-success status.
    Api { status: u16, message: String },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Transport(e) => write!(f, "store request failed: {e}"),
            StoreError::Api { status, message } => {
                write!(f, "store returned status {status}: {message}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Transport(e) => Some(e),
            StoreError::Api { .. } => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Transport(e)
    }
}

/// Trait for locating and writing issue pages in the external store.
/// Implemented by the real Notion client and by test mocks.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Looks up the page correlated with the given issue number.
    /// At most one page exists per issue; the first match wins.
    async fn find_page(&self, issue_number: u64) -> Result<Option<PageRef>, StoreError>;

    /// Creates a page with the full property set, including the
    /// correlation key.
    async fn create_page(&self, event: &IssueEvent) -> Result<PageRef, StoreError>;

    /// Rewrites title, status, URL and assignees of an existing page.
    /// The correlation key is never rewritten.
    async fn update_page(&self, page: &PageRef, event: &IssueEvent) -> Result<(), StoreError>;

    /// Rewrites only the status property of an existing page.
    async fn update_status(&self, page: &PageRef, status: StatusLabel) -> Result<(), StoreError>;
}
