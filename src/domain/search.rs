//! Search requests as they travel through URLs.

use serde::{Deserialize, Serialize};

use crate::domain::params::{self, QueryParams, UrlError, join_filter_values, split_filter_values};
use crate::domain::query::{ParsedQuery, parse_query};
use crate::domain::types::{CollectionId, VocabularyId};

/// Position in a paginated result list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pagination {
    /// First page.
    #[default]
    None,
    /// Opaque continuation cursor.
    Cursor { cursor: String },
    /// Before/after markers around the current page.
    Window {
        before: Option<String>,
        after: Option<String>,
    },
}

impl Pagination {
    pub fn cursor(cursor: impl Into<String>) -> Self {
        Self::Cursor {
            cursor: cursor.into(),
        }
    }

    pub fn window(before: Option<String>, after: Option<String>) -> Self {
        Self::Window { before, after }
    }
}

/// Sort field with an optional order. Never exists without a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortDirective {
    pub field: String,
    pub order: Option<String>,
}

impl SortDirective {
    /// Returns `None` when `field` is missing or empty; an empty `order` is
    /// dropped.
    pub fn new(field: Option<String>, order: Option<String>) -> Option<Self> {
        let field = field.filter(|field| !field.is_empty())?;
        Some(Self {
            field,
            order: order.filter(|order| !order.is_empty()),
        })
    }
}

/// Call-time parameters of a search navigation that do not come from the
/// form controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchContext {
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub exhibition: bool,
    #[serde(default)]
    pub ki: bool,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
}

impl SearchContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.pagination = Pagination::cursor(cursor);
        self
    }

    pub fn window(mut self, before: Option<String>, after: Option<String>) -> Self {
        self.pagination = Pagination::window(before, after);
        self
    }

    pub fn exhibition(mut self, exhibition: bool) -> Self {
        self.exhibition = exhibition;
        self
    }

    pub fn ki(mut self, ki: bool) -> Self {
        self.ki = ki;
        self
    }

    pub fn sort(mut self, field: impl Into<String>, order: Option<String>) -> Self {
        self.sort_field = Some(field.into());
        self.sort_order = order;
        self
    }

    /// Effective sort directive; the order is ignored without a field.
    pub fn sort_directive(&self) -> Option<SortDirective> {
        SortDirective::new(self.sort_field.clone(), self.sort_order.clone())
    }
}

/// Raw query parameters accepted by the search page.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SearchQueryParams {
    pub search: Option<String>,
    pub cursor: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub exhibition: bool,
    pub ki: bool,
    pub collections: Option<String>,
    pub vocabulary: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: Option<String>,
}

/// Every value of every known key, in query order.
#[derive(Debug, Default, Deserialize)]
struct RawSearchQuery {
    #[serde(default)]
    search: Vec<String>,
    #[serde(default)]
    cursor: Vec<String>,
    #[serde(default)]
    before: Vec<String>,
    #[serde(default)]
    after: Vec<String>,
    #[serde(default)]
    exhibition: Vec<String>,
    #[serde(default)]
    ki: Vec<String>,
    #[serde(default)]
    collections: Vec<String>,
    #[serde(default)]
    vocabulary: Vec<String>,
    #[serde(default, rename = "sortField")]
    sort_field: Vec<String>,
    #[serde(default, rename = "sortOrder")]
    sort_order: Vec<String>,
}

fn first(values: Vec<String>) -> Option<String> {
    values.into_iter().next()
}

impl SearchQueryParams {
    /// Decodes a raw query string. The first value of a repeated key wins
    /// and unknown keys are ignored.
    pub fn from_query(query: &str) -> Self {
        let raw: RawSearchQuery = match serde_html_form::from_str(query) {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!("cannot decode query '{query}': {err}");
                return Self::default();
            }
        };

        Self {
            search: first(raw.search),
            cursor: first(raw.cursor),
            before: first(raw.before),
            after: first(raw.after),
            exhibition: !raw.exhibition.is_empty(),
            ki: !raw.ki.is_empty(),
            collections: first(raw.collections),
            vocabulary: first(raw.vocabulary),
            sort_field: first(raw.sort_field),
            sort_order: first(raw.sort_order),
        }
    }
}

/// Decoded search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Search text exactly as submitted.
    pub search: String,
    /// Search text split into filters and free text.
    pub query: ParsedQuery,
    pub pagination: Pagination,
    pub exhibition: bool,
    pub ki: bool,
    pub collections: Vec<CollectionId>,
    pub vocabulary: Vec<VocabularyId>,
    pub sort: Option<SortDirective>,
}

impl SearchRequest {
    /// Decodes the request. Never fails: malformed search text is kept as
    /// free text and malformed filter entries are skipped.
    pub fn from_params(params: SearchQueryParams) -> Self {
        let search = params.search.unwrap_or_default();
        let query = match parse_query(&search) {
            Ok(query) => query,
            Err(err) => {
                log::error!("cannot parse query '{search}': {err}");
                ParsedQuery::verbatim(&search)
            }
        };

        let non_empty = |value: Option<String>| value.filter(|value| !value.is_empty());
        let pagination = match (
            non_empty(params.cursor),
            non_empty(params.before),
            non_empty(params.after),
        ) {
            (Some(cursor), _, _) => Pagination::Cursor { cursor },
            (None, None, None) => Pagination::None,
            (None, before, after) => Pagination::Window { before, after },
        };

        let collections = params
            .collections
            .as_deref()
            .map(|joined| {
                split_filter_values(joined)
                    .filter_map(|part| part.parse::<CollectionId>().ok())
                    .collect()
            })
            .unwrap_or_default();

        let vocabulary = params
            .vocabulary
            .as_deref()
            .map(|joined| {
                split_filter_values(joined)
                    .filter_map(|part| VocabularyId::new(part).ok())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            search,
            query,
            pagination,
            exhibition: params.exhibition,
            ki: params.ki,
            collections,
            vocabulary,
            sort: SortDirective::new(params.sort_field, params.sort_order),
        }
    }

    pub fn has_collection(&self, id: CollectionId) -> bool {
        self.collections.contains(&id)
    }

    /// Whether `term` was requested, with or without the namespace `prefix`.
    pub fn has_vocabulary(&self, term: &VocabularyId, prefix: &str) -> bool {
        let bare = term.without_prefix(prefix);
        self.vocabulary
            .iter()
            .any(|requested| requested == term || requested.as_str() == bare)
    }

    /// Parameters that reproduce the current search without pagination,
    /// flags or sorting. Only non-empty parameters are written.
    pub fn canonical_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if !self.search.is_empty() {
            query.set(params::SEARCH, self.search.as_str());
        }
        if !self.collections.is_empty() {
            query.set(
                params::COLLECTIONS,
                join_filter_values(self.collections.iter().map(ToString::to_string)),
            );
        }
        if !self.vocabulary.is_empty() {
            query.set(
                params::VOCABULARY,
                join_filter_values(self.vocabulary.iter().map(VocabularyId::as_str)),
            );
        }
        query
    }

    /// Encoded [`Self::canonical_params`].
    pub fn canonical_query(&self) -> Result<String, UrlError> {
        self.canonical_params().encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(query: &str) -> SearchRequest {
        SearchRequest::from_params(SearchQueryParams::from_query(query))
    }

    #[test]
    fn decodes_every_parameter() {
        let request = decode(
            "search=author%3A%22Jane%22+cats&cursor=abc&exhibition=&ki=&collections=3%2C7%2C\
             &vocabulary=poster%2Cmap%2C&sortField=title&sortOrder=asc",
        );

        assert_eq!(request.search, "author:\"Jane\" cats");
        assert_eq!(request.query.filters["author"], "Jane");
        assert_eq!(request.query.text, "cats");
        assert_eq!(request.pagination, Pagination::cursor("abc"));
        assert!(request.exhibition);
        assert!(request.ki);
        assert_eq!(
            request.collections,
            vec![CollectionId::new(3).unwrap(), CollectionId::new(7).unwrap()]
        );
        assert_eq!(
            request
                .vocabulary
                .iter()
                .map(VocabularyId::as_str)
                .collect::<Vec<_>>(),
            vec!["poster", "map"]
        );
        assert_eq!(
            request.sort,
            Some(SortDirective {
                field: "title".to_string(),
                order: Some("asc".to_string()),
            })
        );
    }

    #[test]
    fn repeated_keys_keep_first_value() {
        let params = SearchQueryParams::from_query(
            "search=a&search=b&collections=1%2C&collections=2%2C&ki=&ki=x&page=3",
        );
        assert_eq!(params.search.as_deref(), Some("a"));
        assert_eq!(params.collections.as_deref(), Some("1,"));
        assert!(params.ki);
        assert!(!params.exhibition);

        let request = SearchRequest::from_params(params);
        assert_eq!(request.search, "a");
        assert_eq!(request.collections, vec![CollectionId::new(1).unwrap()]);
    }

    #[test]
    fn skips_invalid_collection_ids() {
        let request = decode("collections=0%2Cabc%2C5%2C%2C");
        assert_eq!(request.collections, vec![CollectionId::new(5).unwrap()]);
    }

    #[test]
    fn sort_order_requires_field() {
        let request = decode("sortOrder=desc");
        assert_eq!(request.sort, None);

        let request = decode("sortField=&sortOrder=desc");
        assert_eq!(request.sort, None);
    }

    #[test]
    fn window_pagination_when_no_cursor() {
        let request = decode("before=b1&after=");
        assert_eq!(
            request.pagination,
            Pagination::window(Some("b1".to_string()), None)
        );
        assert_eq!(decode("cursor=").pagination, Pagination::None);
    }

    #[test]
    fn malformed_search_text_is_kept_verbatim() {
        let request = decode("search=%22open+phrase");
        assert!(request.query.filters.is_empty());
        assert_eq!(request.query.text, "\"open phrase");
    }

    #[test]
    fn missing_flags_are_false() {
        let request = decode("search=");
        assert!(!request.ki);
        assert!(!request.exhibition);
        assert!(request.collections.is_empty());
        assert!(request.vocabulary.is_empty());
    }

    #[test]
    fn canonical_query_reencodes_filters_only() {
        let request = decode("search=cats&cursor=abc&ki=&collections=3%2C+7&vocabulary=map");
        assert_eq!(
            request.canonical_query().unwrap(),
            "search=cats&collections=3%2C7%2C&vocabulary=map%2C"
        );
        assert_eq!(decode("").canonical_query().unwrap(), "");
    }

    #[test]
    fn vocabulary_match_ignores_namespace() {
        let request = decode("vocabulary=poster%2C");
        let prefixed = VocabularyId::new("voc:generic:poster").unwrap();
        let other = VocabularyId::new("voc:generic:map").unwrap();
        assert!(request.has_vocabulary(&prefixed, "voc:generic:"));
        assert!(!request.has_vocabulary(&other, "voc:generic:"));
    }
}
