//! Single-step traversal of the archive chain.
//!
//! Each page's neighbours are only discoverable by reading the page itself,
//! so traversal is inherently sequential: one fetch per step, in chain
//! order. The walker distinguishes the two flavours of "nothing there" —
//! a page with no link in the requested direction is a legitimate end of
//! the chain, while a link that is present but resolves to `NotFound`
//! means the chain is broken.

use tracing::debug;

use crate::error::PollError;
use crate::feed::{FetchOutcome, Page, PageFetcher};

pub struct ChainWalker<'a> {
    fetcher: &'a dyn PageFetcher,
    feed_base: &'a str,
}

impl<'a> ChainWalker<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, feed_base: &'a str) -> Self {
        Self { fetcher, feed_base }
    }

    /// Fetch an archive page by its id (as stored in a cursor).
    /// `Ok(None)` means the archive does not exist; the caller decides what
    /// that implies.
    pub fn fetch_archive(&self, feed_id: &str) -> Result<Option<Page>, PollError> {
        self.fetch_url(&format!("{}{feed_id}", self.feed_base))
    }

    /// Fetch an arbitrary URL, mapping logical absence to `None`.
    pub fn fetch_url(&self, url: &str) -> Result<Option<Page>, PollError> {
        match self.fetcher.fetch(url) {
            Ok(FetchOutcome::Page(page)) => Ok(Some(page)),
            Ok(FetchOutcome::NotFound) => Ok(None),
            Err(source) => Err(PollError::Transient {
                url: url.to_string(),
                source,
            }),
        }
    }

    /// Step to the older archive. `Ok(None)` when `page` is the origin.
    pub fn step_backward(&self, page: &Page) -> Result<Option<Page>, PollError> {
        match &page.prev_url {
            Some(url) => self.follow_link(url).map(Some),
            None => Ok(None),
        }
    }

    /// Step to the newer archive. `Ok(None)` when `page` is the head
    /// (caught up, nothing newer published yet).
    pub fn step_forward(&self, page: &Page) -> Result<Option<Page>, PollError> {
        match &page.next_url {
            Some(url) => self.follow_link(url).map(Some),
            None => Ok(None),
        }
    }

    /// Follow an explicit navigation link. Here `NotFound` is never an
    /// acceptable answer: a link pointed at the page, so its absence means
    /// the chain is broken mid-way.
    fn follow_link(&self, url: &str) -> Result<Page, PollError> {
        debug!(url, "following archive link");
        match self.fetch_url(url)? {
            Some(page) => Ok(page),
            None => Err(PollError::ChainBroken {
                url: url.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::memory::MemoryFeed;

    const BASE: &str = "mem://feed/";

    #[test]
    fn steps_both_directions() {
        let feed = MemoryFeed::chain(BASE, &[("a1", &["e1"]), ("a2", &["e2"])]);
        let walker = ChainWalker::new(&feed, BASE);

        let origin = walker.fetch_archive("a1").unwrap().unwrap();
        assert!(walker.step_backward(&origin).unwrap().is_none());

        let head = walker.step_forward(&origin).unwrap().unwrap();
        assert_eq!(head.id, "a2");
        assert!(walker.step_forward(&head).unwrap().is_none());

        let back = walker.step_backward(&head).unwrap().unwrap();
        assert_eq!(back.id, "a1");
    }

    #[test]
    fn missing_archive_is_none_not_error() {
        let feed = MemoryFeed::chain(BASE, &[("a1", &["e1"])]);
        let walker = ChainWalker::new(&feed, BASE);
        assert!(walker.fetch_archive("nope").unwrap().is_none());
    }

    #[test]
    fn missing_page_behind_link_is_chain_broken() {
        let mut feed = MemoryFeed::chain(BASE, &[("a1", &["e1"]), ("a2", &["e2"])]);
        feed.mark_missing("a2");
        let walker = ChainWalker::new(&feed, BASE);

        let origin = walker.fetch_archive("a1").unwrap().unwrap();
        match walker.step_forward(&origin) {
            Err(PollError::ChainBroken { url }) => assert_eq!(url, feed.url("a2")),
            other => panic!("expected ChainBroken, got {other:?}"),
        }
    }

    #[test]
    fn fetch_failure_is_transient() {
        let mut feed = MemoryFeed::chain(BASE, &[("a1", &["e1"])]);
        feed.mark_failing("a1");
        let walker = ChainWalker::new(&feed, BASE);

        match walker.fetch_archive("a1") {
            Err(PollError::Transient { url, .. }) => assert_eq!(url, feed.url("a1")),
            other => panic!("expected Transient, got {other:?}"),
        }
    }
}
