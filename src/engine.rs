//! One polling cycle: resolve the cursor, collect the next batch.
//!
//! The engine is deliberately stateless: a cycle is a pure function of the
//! stored cursor and the chain as observed through the fetcher. Nothing is
//! retried internally and nothing is persisted here; a failed cycle returns
//! a classified [`PollError`] and changes nothing, and only a fully
//! successful cycle produces a new cursor for the caller to store.

use crate::collect::EntryCollector;
use crate::cursor::Cursor;
use crate::error::PollError;
use crate::feed::{Entry, PageFetcher};
use crate::resolve::CursorResolver;
use crate::walk::ChainWalker;

/// The result of one successful cycle.
#[derive(Debug)]
pub struct Batch {
    /// Undelivered entries in strict delivery order. May be empty.
    pub entries: Vec<Entry>,
    /// Cursor to persist for the next cycle. `None` only when the input
    /// cursor was absent and the chain delivered nothing (an empty feed on
    /// cold start); otherwise it equals the input cursor when the batch is
    /// empty, or names the last delivered entry.
    pub cursor: Option<Cursor>,
}

pub struct PollEngine<'a> {
    fetcher: &'a dyn PageFetcher,
    feed_base: &'a str,
    head_url: &'a str,
    max_entries: usize,
}

impl<'a> PollEngine<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        feed_base: &'a str,
        head_url: &'a str,
        max_entries: usize,
    ) -> Self {
        Self {
            fetcher,
            feed_base,
            head_url,
            max_entries,
        }
    }

    /// Run one poll cycle against the feed.
    pub fn poll_once(&self, stored: Option<&Cursor>) -> Result<Batch, PollError> {
        let walker = ChainWalker::new(self.fetcher, self.feed_base);
        let resolved = CursorResolver::new(&walker, self.head_url).resolve(stored)?;
        let (entries, cursor) = EntryCollector::new(&walker, self.max_entries).collect(&resolved)?;
        Ok(Batch {
            entries,
            // An empty batch leaves the caller's cursor unchanged.
            cursor: cursor.or_else(|| stored.cloned()),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests — end-to-end properties over an in-memory chain
// ---------------------------------------------------------------------------
