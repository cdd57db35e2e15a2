//! The hosting-API seam.
//!
//! The gate talks to the repository host through [`RepositoryHost`] so that
//! core carries no HTTP client dependency. The production implementation
//! (octocrab-backed) lives in `chartgate-github`; tests script a mock.

use crate::error::Result;
use async_trait::async_trait;

/// The shape of a file-content response from the hosting API.
///
/// The contents endpoint does not always return file bytes: asking for a
/// directory yields a listing, and oversized files yield a pointer without
/// an inline payload. Both collapse to [`RemoteContent::NotInline`], which
/// the gate treats the same as an absent original version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteContent {
    /// The response carried the file's decoded text content.
    Inline(String),
    /// The response had no inline payload (directory listing, large-file
    /// pointer, or similar).
    NotInline,
}

/// Read-only repository host operations consumed by the gate.
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Check whether a git ref exists on the repository.
    ///
    /// Implementations map lookup failures of any kind to `Ok(false)`; an
    /// `Err` from this method is still treated as "not found" by the gate.
    ///
    /// # Errors
    ///
    /// Implementations may surface transport failures, though callers do
    /// not distinguish them from a missing ref.
    async fn ref_exists(&self, owner: &str, repo: &str, reference: &str) -> Result<bool>;

    /// Fetch a file's content at a ref.
    ///
    /// # Errors
    ///
    /// An `Err` means the file could not be fetched at that ref; the gate
    /// recovers from it (new-chart path) rather than failing the run.
    async fn file_at_ref(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<RemoteContent>;
}
