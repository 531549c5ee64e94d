#![forbid(unsafe_code)]

//! Router locations.
//!
//! A [`Location`] is the `pathname`, `search` and `hash` triple of a URL
//! without origin. `search` keeps its leading `?` and `hash` its leading `#`;
//! either is the empty string when absent.

use std::fmt;

use crate::error::RouterError;
use crate::params::SearchParams;

/// The path portion of a URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pathname: String,
    search: String,
    hash: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::root()
    }
}

impl Location {
    /// The `/` location.
    #[must_use]
    pub fn root() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }

    /// Parse an absolute target such as `/list?page=2#top`.
    pub fn parse(to: &str) -> Result<Self, RouterError> {
        if !to.starts_with('/') {
            return Err(RouterError::InvalidPath(to.to_string()));
        }
        let (rest, hash) = match to.find('#') {
            Some(at) => (&to[..at], &to[at..]),
            None => (to, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(at) => (&rest[..at], &rest[at..]),
            None => (rest, ""),
        };
        Ok(Self {
            pathname: pathname.to_string(),
            search: normalize(search),
            hash: normalize(hash),
        })
    }

    /// Resolve a navigation target against this location.
    ///
    /// `?query` keeps the pathname, `#hash` keeps pathname and search, and an
    /// absolute path replaces everything.
    pub fn resolve(&self, to: &str) -> Result<Self, RouterError> {
        if to.starts_with('?') {
            let (search, hash) = match to.find('#') {
                Some(at) => (&to[..at], &to[at..]),
                None => (to, ""),
            };
            return Ok(Self {
                pathname: self.pathname.clone(),
                search: normalize(search),
                hash: normalize(hash),
            });
        }
        if to.starts_with('#') {
            return Ok(Self {
                pathname: self.pathname.clone(),
                search: self.search.clone(),
                hash: normalize(to),
            });
        }
        Self::parse(to)
    }

    #[must_use]
    pub fn pathname(&self) -> &str {
        &self.pathname
    }

    /// The query string including its `?`, or `""`.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The fragment including its `#`, or `""`.
    #[must_use]
    pub fn hash(&self) -> &str {
        &self.hash
    }

    #[must_use]
    pub fn search_params(&self) -> SearchParams {
        SearchParams::parse(&self.search)
    }

    /// Same pathname with `params` as the query string and no fragment.
    #[must_use]
    pub fn with_search_params(&self, params: &SearchParams) -> Self {
        let search = if params.is_empty() {
            String::new()
        } else {
            format!("?{params}")
        };
        Self {
            pathname: self.pathname.clone(),
            search,
            hash: String::new(),
        }
    }

    /// `pathname + search + hash`.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// A lone `?` or `#` carries nothing.
fn normalize(part: &str) -> String {
    if part.len() == 1 {
        String::new()
    } else {
        part.to_string()
    }
}
