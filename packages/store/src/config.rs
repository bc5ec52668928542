//! Immutable store configuration.

use std::collections::BTreeMap;

use crate::Error;

/// Configuration for a [`crate::DocumentStore`].
///
/// Core options are typed fields; everything a specific backend understands
/// goes into the passthrough map via [`Config::backend_option`]. The split
/// happens at build time and the struct never changes afterwards, so
/// caller-owned data is never mutated.
///
/// # Example
///
/// ```rust
/// use nestdb_store::Config;
///
/// let config = Config::new("file:///var/lib/mydb")
///     .warn_ready(false)
///     .backend_option("create_missing", "true");
/// assert_eq!(config.url(), "file:///var/lib/mydb");
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    url: String,
    warn_ready: bool,
    log_errors: bool,
    backend_options: BTreeMap<String, String>,
}

impl Config {
    /// Start a configuration for the given backend connection URL.
    ///
    /// Recognized schemes: `mem://` (in-memory) and `file://<dir>` (one JSON
    /// file per document). `warn_ready` and `log_errors` default to `true`.
    pub fn new(url: impl Into<String>) -> Self {
        Config {
            url: url.into(),
            warn_ready: true,
            log_errors: true,
            backend_options: BTreeMap::new(),
        }
    }

    /// Whether to emit a one-time readiness record (with round-trip latency)
    /// after the first successful connect.
    #[must_use]
    pub fn warn_ready(mut self, enabled: bool) -> Self {
        self.warn_ready = enabled;
        self
    }

    /// Whether recoverable operation failures are additionally logged via
    /// `tracing` before being returned to the caller.
    #[must_use]
    pub fn log_errors(mut self, enabled: bool) -> Self {
        self.log_errors = enabled;
        self
    }

    /// Add a backend passthrough option (e.g. `create_missing` for the file
    /// backend). Unrecognized options are ignored by backends.
    #[must_use]
    pub fn backend_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.backend_options.insert(key.into(), value.into());
        self
    }

    /// The backend connection URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn warn_ready_enabled(&self) -> bool {
        self.warn_ready
    }

    pub fn log_errors_enabled(&self) -> bool {
        self.log_errors
    }

    /// The backend passthrough options.
    pub fn backend_options(&self) -> &BTreeMap<String, String> {
        &self.backend_options
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.url.is_empty() {
            return Err(Error::Configuration {
                message: "the \"url\" option was not provided".to_string(),
            });
        }
        Ok(())
    }
}
