//! The page-fetching seam and the page data model.
//!
//! This module defines the [`PageFetcher`] trait that the traversal logic
//! is written against, plus the common [`Page`]/[`Entry`] types. The real
//! HTTP + Atom implementation lives in [`atom`]; tests use the in-memory
//! chain in `memory` instead, so none of the cursor algebra ever touches
//! the network in a test.

mod atom;
#[cfg(test)]
pub mod memory;
mod page;

pub use atom::AtomFetcher;
pub use page::{Entry, Page};

use thiserror::Error;

/// The result of resolving a URL: either a page, or a definitive "no such
/// resource".
///
/// The distinction is load-bearing for chain traversal: `NotFound` on a URL
/// that no link pointed at means end-of-history, while `NotFound` behind an
/// explicit navigation link means the chain is broken. Anything else (I/O,
/// timeout, server error) is a [`FetchError`] and aborts the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Page(Page),
    NotFound,
}

/// A fetch attempt that failed for reasons other than logical absence.
/// Always treated as transient: the cycle aborts with the cursor untouched
/// and the caller may retry later.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Trait every page source must implement.
///
/// Implementations must be idempotent and side-effect free beyond the
/// network call itself: the traversal may re-fetch the same URL across
/// cycles and relies on observing a consistent chain within one cycle.
pub trait PageFetcher {
    /// Resolve a URL to a page, a definitive absence, or a transient error.
    fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError>;
}
