//! Classified errors for one poll cycle.
//!
//! The caller of a poll cycle needs to react differently to each failure
//! class, so every error here is a distinct variant rather than a stringly
//! `anyhow` chain: transient failures are retried on the next cycle with the
//! cursor untouched, while a corrupt cursor needs an operator to intervene.

use thiserror::Error;

/// A failed poll cycle. No variant ever leaves a partially-written cursor
/// behind; the stored cursor is only replaced after a fully successful cycle.
#[derive(Debug, Error)]
pub enum PollError {
    /// Network failure, timeout, or unexpected server error on a page fetch.
    /// Safe to retry the whole cycle later.
    #[error("transient fetch failure for {url}: {source}")]
    Transient {
        url: String,
        #[source]
        source: crate::feed::FetchError,
    },

    /// Cold start could not reach any page at all from the configured head
    /// URL. May self-heal when the service recovers.
    #[error("no resumable origin reachable from {head_url}")]
    UnresolvableOrigin { head_url: String },

    /// The stored cursor names an archive or entry that no longer exists.
    /// Retrying blindly would repeat the same inconsistency, so this is
    /// surfaced distinctly instead of silently restarting from page start
    /// (which would risk duplicate or skipped delivery).
    #[error("stored cursor names entry {entry_id:?} missing from archive {feed_id}")]
    CorruptCursor {
        feed_id: String,
        entry_id: Option<String>,
    },

    /// A navigation link points at a page the server reports missing. This
    /// is distinct from the legitimate absence of a link (end of chain).
    #[error("archive link {url} points to a missing page")]
    ChainBroken { url: String },
}
