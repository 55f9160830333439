//! Collecting the next batch of undelivered entries.
//!
//! Starting from a resolved cursor, walks forward through the chain and
//! flattens pages into one chronologically-ordered batch. Only the starting
//! page needs filtering (everything up to and including the cursor entry is
//! already delivered); every later page is entirely undelivered. The batch
//! is capped at a configured maximum, but pages are never split: the cap
//! bounds how many pages are fetched, so the final page may overshoot it.

use tracing::{debug, info};

use crate::cursor::Cursor;
use crate::error::PollError;
use crate::feed::{Entry, Page};
use crate::walk::ChainWalker;

pub struct EntryCollector<'a> {
    walker: &'a ChainWalker<'a>,
    max_entries: usize,
}

impl<'a> EntryCollector<'a> {
    pub fn new(walker: &'a ChainWalker<'a>, max_entries: usize) -> Self {
        Self {
            walker,
            max_entries,
        }
    }

    /// Collect up to (roughly) `max_entries` undelivered entries after the
    /// given cursor, in strict delivery order.
    ///
    /// Returns the batch plus the cursor of the last delivered entry, or
    /// `None` for the cursor when the batch is empty (caught up; the caller
    /// keeps whatever cursor it already had).
    pub fn collect(&self, start: &Cursor) -> Result<(Vec<Entry>, Option<Cursor>), PollError> {
        debug!(cursor = %start, max = self.max_entries, "collecting entries");

        // The starting page is named by the cursor; if it has vanished the
        // cursor is stale and resuming anywhere else would duplicate or
        // skip deliveries.
        let mut page = self
            .walker
            .fetch_archive(&start.feed_id)?
            .ok_or_else(|| PollError::CorruptCursor {
                feed_id: start.feed_id.clone(),
                entry_id: start.entry_id.clone(),
            })?;

        let mut entries = filter_delivered(&page, start)?;
        // The new cursor always names the page the last entry actually
        // lives in, so a trailing empty page can never leave behind a
        // cursor that fails its own lookup on the next cycle.
        let mut cursor = entries.last().map(|e| Cursor::new(&page.id, &e.id));

        while entries.len() < self.max_entries {
            let Some(next) = self.walker.step_forward(&page)? else {
                break; // caught up to head
            };
            let mut fresh = next.chronological_entries();
            if let Some(last) = fresh.last() {
                cursor = Some(Cursor::new(&next.id, &last.id));
            }
            entries.append(&mut fresh);
            page = next;
        }

        info!(
            count = entries.len(),
            cursor = %cursor.as_ref().unwrap_or(start),
            "collection pass complete"
        );
        Ok((entries, cursor))
    }
}

/// Drop every entry of the starting page up to and including the cursor
/// entry, by exact id match (ids are opaque; they are never ordered or
/// compared as timestamps).
///
/// A cursor entry that is absent from its own page means the stored cursor
/// is stale or corrupt; starting from the page top instead would silently
/// re-deliver, so this fails the cycle.
fn filter_delivered(page: &Page, cursor: &Cursor) -> Result<Vec<Entry>, PollError> {
    let chronological = page.chronological_entries();
    let Some(last_delivered) = &cursor.entry_id else {
        // Cold-start synthetic cursor: nothing delivered yet.
        return Ok(chronological);
    };

    match chronological.iter().position(|e| &e.id == last_delivered) {
        Some(index) => Ok(chronological[index + 1..].to_vec()),
        None => Err(PollError::CorruptCursor {
            feed_id: cursor.feed_id.clone(),
            entry_id: cursor.entry_id.clone(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
