//! Parser for the free-text search field.
//!
//! The field accepts a mix of plain words, quoted phrases and `key:value`
//! filters, e.g. `author:"John Doe" lorem "ipsum dolor"`.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while parsing the search text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("unterminated quote starting at byte {position}")]
    UnterminatedQuote { position: usize },
}

/// Search text split into property filters and remaining free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    /// `key:value` filters; the last occurrence of a key wins.
    pub filters: BTreeMap<String, String>,
    /// Free text with quoted phrases kept intact, joined by single spaces.
    pub text: String,
}

impl ParsedQuery {
    /// Treats `raw` as plain free text without any filters.
    pub fn verbatim(raw: &str) -> Self {
        Self {
            filters: BTreeMap::new(),
            text: raw.trim().to_string(),
        }
    }
}

/// Parses the search field contents into filters and free text.
pub fn parse_query(input: &str) -> Result<ParsedQuery, QueryParseError> {
    let mut filters = BTreeMap::new();
    let mut text: Vec<&str> = Vec::new();

    let mut pos = 0;
    while pos < input.len() {
        let trimmed = input[pos..].trim_start();
        if trimmed.is_empty() {
            break;
        }
        let start = input.len() - trimmed.len();
        let end = scan_item(input, start)?;
        let item = &input[start..end];

        match split_property(item) {
            Some((key, value)) => {
                filters.insert(key.to_string(), unquote(value).to_string());
            }
            None => text.push(item),
        }
        pos = end;
    }

    Ok(ParsedQuery {
        filters,
        text: text.join(" "),
    })
}

/// Returns the end offset of the item starting at `start`. Whitespace inside
/// quotes belongs to the item.
fn scan_item(input: &str, start: usize) -> Result<usize, QueryParseError> {
    let mut open_quote: Option<usize> = None;
    for (offset, c) in input[start..].char_indices() {
        let pos = start + offset;
        match (open_quote, c) {
            (Some(_), '"') => open_quote = None,
            (Some(_), _) => {}
            (None, '"') => open_quote = Some(pos),
            (None, c) if c.is_whitespace() => return Ok(pos),
            (None, _) => {}
        }
    }
    match open_quote {
        Some(position) => Err(QueryParseError::UnterminatedQuote { position }),
        None => Ok(input.len()),
    }
}

fn split_property(item: &str) -> Option<(&str, &str)> {
    let (key, value) = item.split_once(':')?;
    if value.is_empty() || !is_identifier(key) {
        return None;
    }
    Some((key, value))
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
