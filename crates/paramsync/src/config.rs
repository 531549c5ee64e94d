#![forbid(unsafe_code)]

//! Synchronizer options.
//!
//! [`SyncOptions`] controls how cell-driven URL writes are committed. The
//! defaults reproduce the classic behavior: every write pushes a history entry
//! and an empty encoded value is kept as `?name=`.
//!
//! With the `policy-config` feature, options can be loaded from TOML or JSON:
//!
//! ```toml
//! history = "replace"
//! empty = "remove"
//! ```

use paramsync_router::NavigateOptions;

#[cfg(feature = "policy-config")]
use crate::error::SyncError;

/// How a URL write lands in history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum HistoryMode {
    /// Each write adds an entry (back button steps through values).
    #[default]
    Push,
    /// Each write overwrites the current entry.
    Replace,
}

/// What to do when the encoded value is the empty string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EmptyValue {
    /// Write `?name=`.
    #[default]
    Keep,
    /// Drop the parameter from the query string.
    Remove,
}

/// Options for one synchronizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SyncOptions {
    /// Whether URL writes push a history entry or replace the current one.
    pub history: HistoryMode,
    /// How an encoded empty string is written.
    pub empty: EmptyValue,
}

impl SyncOptions {
    /// Set the history mode.
    #[must_use]
    pub fn with_history(mut self, history: HistoryMode) -> Self {
        self.history = history;
        self
    }

    /// Set the empty-value policy.
    #[must_use]
    pub fn with_empty(mut self, empty: EmptyValue) -> Self {
        self.empty = empty;
        self
    }

    /// Navigation options for URL writes.
    #[must_use]
    pub fn navigate_options(&self) -> NavigateOptions {
        NavigateOptions {
            replace: self.history == HistoryMode::Replace,
        }
    }
}

#[cfg(feature = "policy-config")]
impl SyncOptions {
    /// Parse options from TOML. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, SyncError> {
        toml::from_str(source).map_err(|err| SyncError::ConfigParse(err.to_string()))
    }

    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json_str(source: &str) -> Result<Self, SyncError> {
        serde_json::from_str(source).map_err(|err| SyncError::ConfigParse(err.to_string()))
    }

    /// Load from a `.toml` or `.json` file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, SyncError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&source),
            Some("json") => Self::from_json_str(&source),
            _ => Err(SyncError::UnsupportedConfigFormat(
                path.display().to_string(),
            )),
        }
    }
}
