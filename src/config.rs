//! Configuration loading and validation.
//!
//! All runtime knobs live in one TOML file:
//!
//! ```toml
//! feed_base = "https://api.example.se/uppfoljning/feed/"
//! head_url  = "https://api.example.se/uppfoljning/feed/recent"
//! state_file = "atompoll.cursor"
//! max_entries = 100
//! poll_interval_secs = 60
//! fetch_timeout_secs = 30
//!
//! [tls]
//! pkcs12_file = "client.p12"
//! pkcs12_password = "secret"
//! ```
//!
//! `feed_base` and `head_url` are required; everything else has a default.
//! The `[tls]` table is only needed when the feed requires a client
//! certificate — it is deliberately explicit configuration instead of
//! being inferred from the URL scheme or set up as process-global state.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL that archive ids are appended to when resolving a cursor
    /// back to its page.
    pub feed_base: String,

    /// URL of the current (head) archive, the starting point for locating
    /// the origin of history on a cold start.
    pub head_url: String,

    /// Where the cursor token is persisted between runs.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Soft cap on entries per poll cycle (never split mid-page).
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Seconds between poll cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Deadline for each individual page fetch, in seconds.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Optional client-certificate authentication.
    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TlsConfig {
    /// PKCS#12 bundle presented as the client identity.
    pub pkcs12_file: PathBuf,
    /// Password protecting the bundle.
    pub pkcs12_password: String,
}

fn default_state_file() -> PathBuf {
    PathBuf::from("atompoll.cursor")
}

fn default_max_entries() -> usize {
    100
}

fn default_poll_interval_secs() -> u64 {
    60
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.feed_base.trim().is_empty() {
            return Err(ConfigError::Invalid("feed_base must not be empty".into()));
        }
        if self.head_url.trim().is_empty() {
            return Err(ConfigError::Invalid("head_url must not be empty".into()));
        }
        if self.max_entries == 0 {
            return Err(ConfigError::Invalid("max_entries must be at least 1".into()));
        }
        if let Some(tls) = &self.tls {
            if tls.pkcs12_file.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "tls.pkcs12_file must not be empty".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load(contents: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        Config::load(file.path())
    }

    #[test]
    fn minimal_config_gets_defaults() {
        let config = load(
            r#"
feed_base = "https://api.example.se/feed/"
head_url = "https://api.example.se/feed/recent"
"#,
        )
        .unwrap();

        assert_eq!(config.max_entries, 100);
        assert_eq!(config.poll_interval(), Duration::from_secs(60));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.state_file, PathBuf::from("atompoll.cursor"));
        assert!(config.tls.is_none());
    }

    #[test]
    fn tls_table_is_parsed() {
        let config = load(
            r#"
feed_base = "https://api.example.se/feed/"
head_url = "https://api.example.se/feed/recent"

[tls]
pkcs12_file = "client.p12"
pkcs12_password = "secret"
"#,
        )
        .unwrap();

        let tls = config.tls.unwrap();
        assert_eq!(tls.pkcs12_file, PathBuf::from("client.p12"));
        assert_eq!(tls.pkcs12_password, "secret");
    }

    #[test]
    fn empty_feed_base_is_rejected() {
        let err = load(
            r#"
feed_base = ""
head_url = "https://api.example.se/feed/recent"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_cap_is_rejected() {
        let err = load(
            r#"
feed_base = "https://api.example.se/feed/"
head_url = "https://api.example.se/feed/recent"
max_entries = 0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let err = load(r#"head_url = "https://api.example.se/feed/recent""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
