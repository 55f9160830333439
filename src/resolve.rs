//! Turning a possibly-absent stored cursor into a definite starting point.
//!
//! Warm start is trivial: the stored `(feed_id, entry_id)` pair is the
//! starting point and collection resumes strictly after that entry. Cold
//! start has to locate the origin of history: walk backward from the
//! configured head URL until a page with no older link is reached, then
//! seed collection with a synthetic cursor placed before that page's first
//! entry.

use tracing::{debug, info};

use crate::cursor::Cursor;
use crate::error::PollError;
use crate::walk::ChainWalker;

pub struct CursorResolver<'a> {
    walker: &'a ChainWalker<'a>,
    head_url: &'a str,
}

impl<'a> CursorResolver<'a> {
    pub fn new(walker: &'a ChainWalker<'a>, head_url: &'a str) -> Self {
        Self { walker, head_url }
    }

    /// Resolve the starting point for one collection pass.
    ///
    /// Never writes anything: resolution failures leave no partial cursor
    /// behind.
    pub fn resolve(&self, stored: Option<&Cursor>) -> Result<Cursor, PollError> {
        match stored {
            Some(cursor) => {
                debug!(%cursor, "warm start, resuming after stored cursor");
                Ok(cursor.clone())
            }
            None => self.resolve_cold(),
        }
    }

    /// Walk backward from the configured head URL to the origin page.
    fn resolve_cold(&self) -> Result<Cursor, PollError> {
        info!(head_url = self.head_url, "cold start, locating origin page");

        // If the head itself cannot be reached there is nothing to resume
        // from at all; report that as one condition so the caller can retry
        // the whole cycle once the service is back.
        let mut page = match self.walker.fetch_url(self.head_url) {
            Ok(Some(page)) => page,
            Ok(None) | Err(PollError::Transient { .. }) => {
                return Err(PollError::UnresolvableOrigin {
                    head_url: self.head_url.to_string(),
                })
            }
            Err(other) => return Err(other),
        };

        while let Some(older) = self.walker.step_backward(&page)? {
            page = older;
        }

        info!(origin = %page.id, "origin page located");
        Ok(Cursor::page_start(&page.id))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
