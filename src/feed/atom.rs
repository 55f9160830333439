//! HTTP + Atom implementation of [`PageFetcher`].
//!
//! Fetches an archive page over HTTP using a blocking [`reqwest`] client and
//! parses the Atom document with the [`atom_syndication`] crate. The archive
//! chain uses RFC 5005 navigation links: `prev-archive` points at the older
//! archive and `next-archive` at the newer one.
//!
//! Parsing is split into the pure [`parse_page`] function (no I/O) so that
//! tests can exercise the codec without hitting the network.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::Identity;
use tracing::debug;

use super::{Entry, FetchError, FetchOutcome, Page, PageFetcher};

const LINK_REL_PREVIOUS_ARCHIVE: &str = "prev-archive";
const LINK_REL_NEXT_ARCHIVE: &str = "next-archive";
const LINK_REL_SELF: &str = "self";

/// Fetches Atom archive pages over HTTP(S), optionally authenticating with
/// a PKCS#12 client certificate.
pub struct AtomFetcher {
    client: Client,
}

impl AtomFetcher {
    /// Build a fetcher with a per-request timeout and no client certificate.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::build(timeout, None)
    }

    /// Build a fetcher that presents a PKCS#12 client certificate on every
    /// request. The certificate is explicit configuration here rather than
    /// process-global TLS state; nothing else in the crate knows about it.
    pub fn with_client_certificate(
        timeout: Duration,
        pkcs12_file: &Path,
        password: &str,
    ) -> Result<Self> {
        let der = fs::read(pkcs12_file)
            .with_context(|| format!("reading client certificate {}", pkcs12_file.display()))?;
        let identity = Identity::from_pkcs12_der(&der, password)
            .with_context(|| format!("loading client certificate {}", pkcs12_file.display()))?;
        Self::build(timeout, Some(identity))
    }

    fn build(timeout: Duration, identity: Option<Identity>) -> Result<Self> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(identity) = identity {
            builder = builder.identity(identity);
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl PageFetcher for AtomFetcher {
    fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        debug!(url, "fetching archive page");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::new(format!("request failed: {e}")))?;

        let status = response.status();
        if status.is_client_error() {
            // Logical absence (the original accepted exactly success and
            // client-error responses); the caller decides whether this is
            // end-of-chain or a broken link.
            debug!(url, %status, "archive page not found");
            return Ok(FetchOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::new(format!("unexpected status {status}")));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::new(format!("reading response body: {e}")))?;
        let page = parse_page(body.as_ref())?;
        Ok(FetchOutcome::Page(page))
    }
}

/// Parse an Atom archive document into a [`Page`].
///
/// Entries are kept in wire order (newest first); reordering is the
/// traversal's job. The archive id is the last path segment of the `self`
/// link, falling back to the last segment of the feed id.
pub fn parse_page(body: &[u8]) -> Result<Page, FetchError> {
    let feed = atom_syndication::Feed::read_from(body)
        .map_err(|e| FetchError::new(format!("feed document parse failed: {e}")))?;

    let id = link_href(&feed, LINK_REL_SELF)
        .map(last_path_segment)
        .unwrap_or_else(|| last_path_segment(feed.id()));

    let entries = feed
        .entries()
        .iter()
        .map(|entry| Entry {
            id: entry.id().to_string(),
            title: entry.title().as_str().to_string(),
            updated: Some(entry.updated().with_timezone(&Utc)),
            content: entry.content().and_then(|c| c.value()).map(String::from),
        })
        .collect();

    Ok(Page {
        id,
        entries,
        prev_url: link_href(&feed, LINK_REL_PREVIOUS_ARCHIVE).map(String::from),
        next_url: link_href(&feed, LINK_REL_NEXT_ARCHIVE).map(String::from),
    })
}

/// The href of the first link with the given `rel`, if any.
fn link_href<'a>(feed: &'a atom_syndication::Feed, rel: &str) -> Option<&'a str> {
    feed.links()
        .iter()
        .find(|link| link.rel().eq_ignore_ascii_case(rel))
        .map(|link| link.href())
}

/// Everything after the last `/`, or the whole string if there is none.
fn last_path_segment(value: &str) -> String {
    value.rsplit('/').next().unwrap_or(value).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
