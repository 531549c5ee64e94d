#![forbid(unsafe_code)]

//! Router errors.

/// Errors from navigation and location parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A navigation target was neither absolute (`/..`) nor a search (`?..`)
    /// or hash (`#..`) fragment.
    InvalidPath(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(to) => write!(f, "invalid navigation target: {to:?}"),
        }
    }
}

impl std::error::Error for RouterError {}
