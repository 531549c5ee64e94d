#![forbid(unsafe_code)]

//! Synchronizer errors.
//!
//! Converter failures are deliberately absent: a panicking decode or encode
//! function unwinds through whichever notification triggered it.

/// Errors from attaching a synchronizer or loading its options.
#[derive(Debug)]
pub enum SyncError {
    /// The tracked parameter name was empty.
    EmptyParamName,
    /// An options file could not be read.
    ConfigIo(std::io::Error),
    /// An options document could not be parsed.
    ConfigParse(String),
    /// An options file had an extension other than `.toml` or `.json`.
    UnsupportedConfigFormat(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyParamName => write!(f, "query parameter name must not be empty"),
            Self::ConfigIo(err) => write!(f, "failed to read sync options: {err}"),
            Self::ConfigParse(msg) => write!(f, "invalid sync options: {msg}"),
            Self::UnsupportedConfigFormat(path) => {
                write!(f, "unsupported sync options format: {path}")
            }
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ConfigIo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        Self::ConfigIo(err)
    }
}
