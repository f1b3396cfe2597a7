//! # Config - environment-driven settings
//!
//! Every setting has a default matching a stock Linux system and can be
//! overridden through the environment:
//!
//! ```text
//! LASTLOG_PATH          log file to read          (default: "/var/log/lastlog")
//! LASTLOG_PASSWD        account database          (default: "/etc/passwd")
//! LASTLOG_PAGE_RECORDS  records per page          (default: 512)
//! LASTLOG_TIME_BYTES    timestamp width, 4 or 8   (default: 4)
//! LASTLOG_LINE_SIZE     terminal field width      (default: 32)
//! LASTLOG_HOST_SIZE     host field width          (default: 256)
//! ```
//!
//! Values that are present but unparsable are errors, not silently replaced
//! by the default.

use record::{CodecError, RecordLayout, TimeWidth, DEFAULT_HOST_SIZE, DEFAULT_LINE_SIZE};
use std::path::PathBuf;
use store::DEFAULT_PAGE_RECORDS;
use thiserror::Error;

pub const DEFAULT_LOG_PATH: &str = "/var/log/lastlog";
pub const DEFAULT_PASSWD_PATH: &str = "/etc/passwd";

/// Errors raised while building a [`Config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but is not a valid value.
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },

    /// The widths do not describe a usable record layout.
    #[error("invalid record layout: {0}")]
    Layout(#[from] CodecError),
}

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_path: PathBuf,
    pub passwd_path: PathBuf,
    pub page_records: usize,
    pub layout: RecordLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            passwd_path: PathBuf::from(DEFAULT_PASSWD_PATH),
            page_records: DEFAULT_PAGE_RECORDS,
            layout: RecordLayout::default(),
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `lookup` returns `None` for unset keys. Used directly by tests so they
    /// do not have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let page_records = parse_positive(&lookup, "LASTLOG_PAGE_RECORDS", DEFAULT_PAGE_RECORDS)?;
        let time_bytes = parse_positive(&lookup, "LASTLOG_TIME_BYTES", 4)?;
        let line_size = parse_positive(&lookup, "LASTLOG_LINE_SIZE", DEFAULT_LINE_SIZE)?;
        let host_size = parse_positive(&lookup, "LASTLOG_HOST_SIZE", DEFAULT_HOST_SIZE)?;

        let layout = RecordLayout::new(TimeWidth::from_bytes(time_bytes)?, line_size, host_size)?;

        Ok(Self {
            log_path: PathBuf::from(env_or("LASTLOG_PATH", DEFAULT_LOG_PATH)),
            passwd_path: PathBuf::from(env_or("LASTLOG_PASSWD", DEFAULT_PASSWD_PATH)),
            page_records,
            layout,
        })
    }
}

/// Parses `var` as a non-zero `usize`, falling back to `default` if unset.
fn parse_positive<F>(lookup: &F, var: &'static str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::Invalid { var, value: raw }),
        },
    }
}
