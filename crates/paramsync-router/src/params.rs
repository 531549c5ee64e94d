#![forbid(unsafe_code)]

//! Query-string parameter collections.
//!
//! [`SearchParams`] behaves like the browser's `URLSearchParams`: pairs keep
//! their insertion order, names may repeat, and lookups by name return the
//! first match.
//!
//! # Invariants
//!
//! 1. `parse` accepts an optional leading `?`; `+` decodes to a space and
//!    percent escapes are decoded (invalid UTF-8 is replaced, never rejected).
//! 2. `set(name, v)` leaves exactly one pair named `name`, at the position of
//!    the first old occurrence, or appended if there was none.
//! 3. `to_string()` never includes the leading `?`.

use std::fmt;

use url::form_urlencoded;

/// Ordered multimap of query-string pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    /// An empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without its leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value stored under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value stored under `name`, in order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.pairs.iter().any(|(key, _)| key == name)
    }

    /// Set `name` to exactly one `value`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.pairs.iter().position(|(key, _)| *key == name) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(key, _)| {
                    let keep = index <= first || *key != name;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((name, value)),
        }
    }

    /// Add a pair, keeping any existing values for `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Remove every pair named `name`.
    pub fn delete(&mut self, name: &str) {
        self.pairs.retain(|(key, _)| key != name);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        f.write_str(&encoded)
    }
}

impl From<&str> for SearchParams {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_strips_question_mark() {
        let params = SearchParams::parse("?page=2&sort=name");
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("sort"), Some("name"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn parse_empty_and_bare_question_mark() {
        assert!(SearchParams::parse("").is_empty());
        assert!(SearchParams::parse("?").is_empty());
    }

    #[test]
    fn present_but_empty_value_is_not_absent() {
        let params = SearchParams::parse("filter=&q");
        assert_eq!(params.get("filter"), Some(""));
        assert_eq!(params.get("q"), Some(""));
        assert_eq!(params.get("missing"), None);
    }

    #[test]
    fn decodes_plus_and_percent_escapes() {
        let params = SearchParams::parse("q=hello+world&emoji=%F0%9F%9A%80&amp=a%26b");
        assert_eq!(params.get("q"), Some("hello world"));
        assert_eq!(params.get("emoji"), Some("🚀"));
        assert_eq!(params.get("amp"), Some("a&b"));
    }

    #[test]
    fn serializes_with_form_encoding() {
        let mut params = SearchParams::new();
        params.set("q", "hello world");
        params.set("tag", "a&b=c");
        assert_eq!(params.to_string(), "q=hello+world&tag=a%26b%3Dc");
    }

    #[test]
    fn set_replaces_first_and_drops_duplicates() {
        let mut params = SearchParams::parse("a=1&b=2&a=3&c=4&a=5");
        params.set("a", "x");
        assert_eq!(params.to_string(), "a=x&b=2&c=4");
    }

    #[test]
    fn set_appends_when_missing() {
        let mut params = SearchParams::parse("a=1");
        params.set("b", "2");
        assert_eq!(params.to_string(), "a=1&b=2");
    }

    #[test]
    fn append_and_get_all() {
        let mut params = SearchParams::new();
        params.append("tag", "rust");
        params.append("tag", "web");
        assert_eq!(params.get("tag"), Some("rust"));
        assert_eq!(params.get_all("tag").collect::<Vec<_>>(), vec!["rust", "web"]);
    }

    #[test]
    fn delete_removes_every_occurrence() {
        let mut params = SearchParams::parse("a=1&b=2&a=3");
        params.delete("a");
        assert!(!params.has("a"));
        assert_eq!(params.to_string(), "b=2");
    }

    #[test]
    fn from_iterator_keeps_order() {
        let params: SearchParams = [("z", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("z", "1"), ("a", "2")]);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn serialize_then_parse_preserves_pairs(
                pairs in proptest::collection::vec(("[a-z]{1,6}", "\\PC{0,12}"), 0..8)
            ) {
                let params: SearchParams = pairs.iter().cloned().collect();
                let reparsed = SearchParams::parse(&params.to_string());
                prop_assert_eq!(reparsed, params);
            }

            #[test]
            fn set_leaves_single_occurrence(
                query in "([a-c]=[0-9]{0,2}&){0,6}",
                value in "[a-z0-9 ]{0,8}"
            ) {
                let mut params = SearchParams::parse(&query);
                params.set("a", value.clone());
                prop_assert_eq!(params.get_all("a").count(), 1);
                prop_assert_eq!(params.get("a"), Some(value.as_str()));
            }
        }
    }
}
