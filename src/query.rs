//! Explicit query-string building.
//!
//! Filters are turned into `(key, value)` pairs by hand rather than through
//! serialization, which keeps empty values out and allows repeated keys for
//! array parameters.

use std::fmt::Display;

/// Ordered list of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. Empty values are skipped.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Display) -> Self {
        self.push(key, value);
        self
    }

    /// Append a pair when `value` is present and non-empty.
    #[must_use]
    pub fn with_opt<V: Display>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append one pair per value under the same key.
    #[must_use]
    pub fn with_each<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Append a pair. Empty values are skipped.
    pub fn push(&mut self, key: &str, value: impl Display) {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
    }

    /// Replace every pair whose key appears in `overrides`, then append the
    /// overrides. Keys present only here are kept in order.
    #[must_use]
    pub fn merged_with(mut self, overrides: &QueryParams) -> Self {
        self.pairs
            .retain(|(key, _)| !overrides.pairs.iter().any(|(k, _)| k == key));
        self.pairs.extend(overrides.pairs.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(&key, value);
        }
        params
    }
}

/// Conversion of a typed filter into query parameters.
pub trait ToQuery {
    fn to_query(&self) -> QueryParams;
}

impl ToQuery for QueryParams {
    fn to_query(&self) -> QueryParams {
        self.clone()
    }
}

impl ToQuery for () {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_empty_values() {
        let query = QueryParams::new()
            .with("a", "")
            .with_opt::<u32>("b", None)
            .with_opt("c", Some(3))
            .with_opt("d", Some(""));
        assert_eq!(query.len(), 1);
        assert_eq!(query.get("c"), Some("3"));
    }

    #[test]
    fn test_repeated_keys() {
        let query = QueryParams::new().with_each("status", ["open", "closed"]);
        let pairs: Vec<_> = query.iter().collect();
        assert_eq!(pairs, vec![("status", "open"), ("status", "closed")]);
    }

    #[test]
    fn test_merge_overrides_win() {
        let base = QueryParams::new()
            .with("page", 1)
            .with("limit", 20)
            .with_each("tag", ["x", "y"]);
        let overrides = QueryParams::new().with("page", 4).with("tag", "z");

        let merged = base.merged_with(&overrides);
        let pairs: Vec<_> = merged.iter().collect();
        assert_eq!(pairs, vec![("limit", "20"), ("page", "4"), ("tag", "z")]);
    }
}
