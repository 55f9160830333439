//! The resume cursor: "last delivered entry and the archive it lives in".
//!
//! Externally the cursor is a single opaque token, `feed_id;entry_id`,
//! persisted by the caller and passed back unmodified. The token `"0"`, an
//! empty string, or no token at all mean the feed has never been polled
//! (cold start). Internally the entry part is optional: `None` is the
//! synthetic cold-start cursor meaning "deliver everything in this page".

use std::fmt;

/// Delimiter between the archive id and the entry id in the token form.
pub const FEED_ENTRY_SEPARATOR: char = ';';

/// Position of the last delivered entry within the archive chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    /// Identifier of the archive page the entry lives in.
    pub feed_id: String,
    /// Identifier of the last delivered entry, or `None` to deliver the
    /// whole page (cold start seeded at the origin page).
    pub entry_id: Option<String>,
}

impl Cursor {
    pub fn new(feed_id: impl Into<String>, entry_id: impl Into<String>) -> Self {
        Self {
            feed_id: feed_id.into(),
            entry_id: Some(entry_id.into()),
        }
    }

    /// The synthetic cursor placed just before the first entry of a page.
    pub fn page_start(feed_id: impl Into<String>) -> Self {
        Self {
            feed_id: feed_id.into(),
            entry_id: None,
        }
    }

    /// Parse a persisted token. Returns `None` for the cold-start sentinels
    /// (`"0"` or an empty string); malformed tokens (no separator) are
    /// rejected so a truncated state file cannot masquerade as a cursor.
    pub fn parse(token: &str) -> Result<Option<Self>, BadCursorToken> {
        let token = token.trim();
        if token.is_empty() || token == "0" {
            return Ok(None);
        }
        match token.split_once(FEED_ENTRY_SEPARATOR) {
            Some((feed_id, entry_id)) if !feed_id.is_empty() && !entry_id.is_empty() => {
                Ok(Some(Cursor::new(feed_id, entry_id)))
            }
            _ => Err(BadCursorToken {
                token: token.to_string(),
            }),
        }
    }
}

/// A persisted token that is neither a cold-start sentinel nor a valid
/// `feed_id;entry_id` pair.
#[derive(Debug, thiserror::Error)]
#[error("malformed cursor token {token:?} (expected \"feed_id;entry_id\" or \"0\")")]
pub struct BadCursorToken {
    pub token: String,
}

impl fmt::Display for Cursor {
    /// The external token form. A cursor with no entry part is an internal
    /// intermediate state and is never persisted, so it renders as the
    /// cold-start sentinel.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entry_id {
            Some(entry_id) => write!(f, "{}{}{}", self.feed_id, FEED_ENTRY_SEPARATOR, entry_id),
            None => write!(f, "0"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
