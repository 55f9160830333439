//! In-memory [`PageFetcher`] used by the traversal tests.
//!
//! Models a whole archive chain as plain data: pages are registered oldest
//! to newest and the navigation links between them are wired automatically.
//! Individual URLs can be made to report "missing" (to simulate a broken
//! chain or a stale cursor) or to fail transiently.

use std::collections::HashSet;

use super::{Entry, FetchError, FetchOutcome, Page, PageFetcher};

pub struct MemoryFeed {
    base: String,
    pages: Vec<Page>,
    missing: HashSet<String>,
    failing: HashSet<String>,
}

impl MemoryFeed {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            pages: Vec::new(),
            missing: HashSet::new(),
            failing: HashSet::new(),
        }
    }

    /// Build a whole chain in one call: each element is
    /// `(archive_id, entry ids in chronological order)`.
    pub fn chain(base: impl Into<String>, pages: &[(&str, &[&str])]) -> Self {
        let mut feed = Self::new(base);
        for (id, entries) in pages {
            feed.push_page(id, entries);
        }
        feed
    }

    /// Append a page at the head of the chain. Entry ids are given in
    /// chronological order and stored newest-first, as on the wire.
    pub fn push_page(&mut self, id: &str, chronological_ids: &[&str]) {
        let mut entries: Vec<Entry> = chronological_ids
            .iter()
            .map(|id| Entry {
                id: id.to_string(),
                title: format!("event {id}"),
                updated: None,
                content: None,
            })
            .collect();
        entries.reverse();

        let prev_url = self.pages.last().map(|p| self.url(&p.id));
        let url = self.url(id);
        if let Some(previous_head) = self.pages.last_mut() {
            previous_head.next_url = Some(url);
        }
        self.pages.push(Page {
            id: id.to_string(),
            entries,
            prev_url,
            next_url: None,
        });
    }

    /// Publish one more entry into the current head page (newest-first on
    /// the wire, so it goes in front).
    pub fn publish(&mut self, entry_id: &str) {
        let head = self.pages.last_mut().expect("publish into an empty chain");
        head.entries.insert(
            0,
            Entry {
                id: entry_id.to_string(),
                title: format!("event {entry_id}"),
                updated: None,
                content: None,
            },
        );
    }

    pub fn url(&self, id: &str) -> String {
        format!("{}{id}", self.base)
    }

    /// The URL a client would be configured with as its "last known" feed.
    pub fn head_url(&self) -> String {
        self.pages
            .last()
            .map(|p| self.url(&p.id))
            .unwrap_or_else(|| self.base.clone())
    }

    /// Make a URL report `NotFound` even though links may still point at it.
    pub fn mark_missing(&mut self, id: &str) {
        let url = self.url(id);
        self.missing.insert(url);
    }

    /// Make a URL fail with a transient error.
    pub fn mark_failing(&mut self, id: &str) {
        let url = self.url(id);
        self.failing.insert(url);
    }
}

impl PageFetcher for MemoryFeed {
    fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        if self.failing.contains(url) {
            return Err(FetchError::new(format!("simulated outage at {url}")));
        }
        if self.missing.contains(url) {
            return Ok(FetchOutcome::NotFound);
        }
        match self.pages.iter().find(|p| self.url(&p.id) == url) {
            Some(page) => Ok(FetchOutcome::Page(page.clone())),
            None => Ok(FetchOutcome::NotFound),
        }
    }
}
