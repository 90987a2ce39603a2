//! Query parameter names and the urlencoded wire form shared by the URL
//! assembler and the request decoder.

use serde::Deserializer;
use serde::de::{Deserialize, IgnoredAny};
use thiserror::Error;

pub const SEARCH: &str = "search";
pub const CURSOR: &str = "cursor";
pub const BEFORE: &str = "before";
pub const AFTER: &str = "after";
pub const EXHIBITION: &str = "exhibition";
pub const KI: &str = "ki";
pub const COLLECTIONS: &str = "collections";
pub const VOCABULARY: &str = "vocabulary";
pub const SORT_FIELD: &str = "sortField";
pub const SORT_ORDER: &str = "sortOrder";

/// Separator between the values of a multi-select filter.
pub const FILTER_SEPARATOR: char = ',';

#[derive(Debug, Error)]
/// Errors produced while encoding query parameters.
pub enum UrlError {
    #[error("cannot encode query parameters: {0}")]
    Encode(#[from] serde_html_form::ser::Error),
}

/// Ordered list of query parameters, encoded as
/// `application/x-www-form-urlencoded`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an earlier value in place.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(key, _)| *key == name) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((name, value)),
        }
    }

    /// Adds `name` with an empty value, the wire form of a boolean flag.
    pub fn set_flag(&mut self, name: &'static str) {
        self.set(name, String::new());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(key, _)| *key)
    }

    pub fn encode(&self) -> Result<String, UrlError> {
        Ok(serde_html_form::to_string(&self.pairs)?)
    }
}

/// Joins filter values, terminating every value (the last one included) with
/// [`FILTER_SEPARATOR`]. Returns an empty string for no values.
pub fn join_filter_values<I, S>(values: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().fold(String::new(), |mut joined, value| {
        joined.push_str(value.as_ref());
        joined.push(FILTER_SEPARATOR);
        joined
    })
}

/// Deserializes a valueless flag: a present key is `true` whatever its
/// value, including an empty one. Pair with `#[serde(default)]`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    IgnoredAny::deserialize(deserializer)?;
    Ok(true)
}

/// Splits a joined filter value, trimming entries and dropping empty ones.
pub fn split_filter_values(joined: &str) -> impl Iterator<Item = &str> {
    joined
        .split(FILTER_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_appends_separator_after_every_value() {
        assert_eq!(join_filter_values(["art", "photo"]), "art,photo,");
        assert_eq!(join_filter_values(["art"]), "art,");
        assert_eq!(join_filter_values(Vec::<String>::new()), "");
    }

    #[test]
    fn split_ignores_trailing_separator_and_blanks() {
        let parts: Vec<_> = split_filter_values(" 1, 2,,3 ,").collect();
        assert_eq!(parts, vec!["1", "2", "3"]);
    }

    #[test]
    fn set_replaces_in_place_and_keeps_order() {
        let mut params = QueryParams::new();
        params.set(SEARCH, "a");
        params.set(CURSOR, "c1");
        params.set(SEARCH, "b");
        params.set_flag(KI);

        assert_eq!(params.names().collect::<Vec<_>>(), vec![SEARCH, CURSOR, KI]);
        assert_eq!(params.get(SEARCH), Some("b"));
        assert_eq!(params.encode().unwrap(), "search=b&cursor=c1&ki=");
    }

    #[test]
    fn encode_uses_form_encoding() {
        let mut params = QueryParams::new();
        params.set(SEARCH, "black cats & dogs");
        params.set(COLLECTIONS, "art,photo,");
        assert_eq!(
            params.encode().unwrap(),
            "search=black+cats+%26+dogs&collections=art%2Cphoto%2C"
        );
    }
}
