//! The core data types: one archive page and the entries it carries.
//!
//! A `Page` is one fetched unit of the feed. Pages form a single chain from
//! the origin archive (no older-link) to the head archive (no newer-link),
//! ordered oldest to newest. On the wire each page stores its entries
//! newest-first, so anything that processes entries in delivery order must
//! reverse within the page first — and only within the page; the chain
//! direction is already oldest-to-newest.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single event entry, immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Opaque stable identifier, unique across the whole chain. This is the
    /// only field the cursor algebra relies on; ids are compared by exact
    /// match, never ordered.
    pub id: String,
    /// Display title of the event.
    pub title: String,
    /// Timestamp the source attached, if any. Informational only; delivery
    /// order comes from chain position, not from this field.
    pub updated: Option<DateTime<Utc>>,
    /// Raw event payload, if the entry carried one.
    pub content: Option<String>,
}

/// One fetched archive page: wire-ordered entries plus navigation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Archive identifier, as referenced by cursors (`Cursor::feed_id`).
    pub id: String,
    /// Entries in wire order, newest first.
    pub entries: Vec<Entry>,
    /// Link to the older archive. Absent on the origin page.
    pub prev_url: Option<String>,
    /// Link to the newer archive. Absent on the head page.
    pub next_url: Option<String>,
}

impl Page {
    /// Entries in chronological (delivery) order, oldest first.
    ///
    /// Pure per-page transform of the newest-first wire order. Never apply
    /// this across pages.
    pub fn chronological_entries(&self) -> Vec<Entry> {
        let mut entries = self.entries.clone();
        entries.reverse();
        entries
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
