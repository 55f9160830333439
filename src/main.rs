//! atompoll — incremental consumer of an append-only Atom archive chain.
//!
//! ## Architecture overview
//!
//! ```text
//! stored cursor ──► resolve.rs ──► collect.rs ──► (entries, new cursor)
//!                       │               │
//!                       └── walk.rs ────┘
//!                              │
//!                          feed/ (PageFetcher)
//! ```
//!
//! * **`feed/`** — the `PageFetcher` trait, the `Page`/`Entry` model, and
//!   the HTTP + Atom implementation.
//! * **`cursor`** — the opaque resume token and its algebra.
//! * **`walk`** — single-step chain traversal in either direction.
//! * **`resolve`** — cold/warm start resolution to a definite start point.
//! * **`collect`** — filtered, ordered, capped batch collection.
//! * **`engine`** — one poll cycle as a pure function of (cursor, chain).
//! * **`main`** — wires everything together: config, logging, the poll
//!   loop, and cursor persistence around each cycle.

mod collect;
mod config;
mod cursor;
mod engine;
mod error;
mod feed;
mod resolve;
mod walk;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::Config;
use cursor::Cursor;
use engine::PollEngine;
use error::PollError;
use feed::AtomFetcher;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("atompoll.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("loading configuration {}", config_path.display()))?;

    let fetcher = match &config.tls {
        Some(tls) => AtomFetcher::with_client_certificate(
            config.fetch_timeout(),
            &tls.pkcs12_file,
            &tls.pkcs12_password,
        )?,
        None => AtomFetcher::new(config.fetch_timeout())?,
    };

    let mut cursor = read_cursor(&config.state_file)?;
    info!(
        feed_base = %config.feed_base,
        cursor = %cursor.as_ref().map(Cursor::to_string).unwrap_or_else(|| "0".into()),
        "starting poll loop"
    );

    let engine = PollEngine::new(
        &fetcher,
        &config.feed_base,
        &config.head_url,
        config.max_entries,
    );

    loop {
        match engine.poll_once(cursor.as_ref()) {
            Ok(batch) => {
                for entry in &batch.entries {
                    // One JSON document per delivered event.
                    println!("{}", serde_json::to_string(entry)?);
                }
                info!(delivered = batch.entries.len(), "cycle complete");
                if batch.cursor != cursor {
                    if let Some(new_cursor) = &batch.cursor {
                        write_cursor(&config.state_file, new_cursor)?;
                    }
                    cursor = batch.cursor;
                }
            }
            // The cursor is never touched on a failed cycle; transient
            // classes are simply retried on the next tick.
            Err(e @ PollError::CorruptCursor { .. }) => {
                error!("stored cursor needs operator attention: {e}");
            }
            Err(e) => {
                warn!("poll cycle failed, will retry: {e}");
            }
        }
        thread::sleep(config.poll_interval());
    }
}

/// Restore the persisted cursor token, treating a missing state file as a
/// cold start.
fn read_cursor(path: &Path) -> Result<Option<Cursor>> {
    match fs::read_to_string(path) {
        Ok(token) => {
            Cursor::parse(&token).with_context(|| format!("state file {}", path.display()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading state file {}", path.display())),
    }
}

/// Persist the cursor token atomically: write a sibling temp file, then
/// rename over the state file, so a crash mid-write can never leave a
/// truncated token behind.
fn write_cursor(path: &Path, cursor: &Cursor) -> Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, cursor.to_string())
        .with_context(|| format!("writing state file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("replacing state file {}", path.display()))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
