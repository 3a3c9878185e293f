//! Configuration for a janitor run.
//!
//! Everything is resolved once at startup into a [`Config`] that is passed by
//! reference to the components that need it.

use std::env;
use std::time::Duration;

use crate::error::{JanitorError, Result};

/// Linear API endpoint
pub const LINEAR_API_URL: &str = "https://api.linear.app/graphql";

/// Default HTTP timeout for a single GraphQL call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_VAR: &str = "LINEAR_API_KEY";
pub const DRY_RUN_VAR: &str = "DRY_RUN";
pub const API_URL_VAR: &str = "LINEAR_API_URL";
pub const TIMEOUT_VAR: &str = "LINEAR_TIMEOUT_SECS";
pub const DELETION_ENABLED_VAR: &str = "LABEL_DELETION_ENABLED";

/// Resolved janitor configuration.
#[derive(Clone)]
pub struct Config {
    /// Linear API key, sent verbatim in the `Authorization` header.
    pub api_key: String,
    /// When true nothing is mutated. Only the literal `false` turns it off.
    pub dry_run: bool,
    /// Whether a confirmed run actually calls the delete mutation.
    pub deletion_enabled: bool,
    /// GraphQL endpoint.
    pub api_url: String,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("dry_run", &self.dry_run)
            .field("deletion_enabled", &self.deletion_enabled)
            .field("api_url", &self.api_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns [`JanitorError::Config`] if `LINEAR_API_KEY` is unset or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// An unset `DRY_RUN` keeps dry-run enabled; there is no separate
    /// "missing flag" error.
    ///
    /// # Errors
    /// Returns [`JanitorError::Config`] if the API key is missing or the
    /// timeout is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                JanitorError::Config(format!("Missing {API_KEY_VAR} environment variable."))
            })?;

        let dry_run = parse_dry_run(lookup(DRY_RUN_VAR).as_deref());

        let deletion_enabled = lookup(DELETION_ENABLED_VAR).is_some_and(|v| parse_enabled(&v));

        let api_url = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| LINEAR_API_URL.to_string());

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    JanitorError::Config(format!(
                        "{TIMEOUT_VAR} must be a positive number of seconds, got {raw:?}"
                    ))
                })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            dry_run,
            deletion_enabled,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Dry-run stays on unless the value is exactly `false`.
#[must_use]
pub fn parse_dry_run(value: Option<&str>) -> bool {
    !matches!(value, Some("false"))
}

fn parse_enabled(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("true") || value == "1"
}
