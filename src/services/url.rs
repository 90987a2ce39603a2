//! Assembles search URLs from form state.

use crate::domain::params::{self, QueryParams, UrlError, join_filter_values};
use crate::domain::search::{Pagination, SearchContext};
use crate::domain::types::strip_namespace;
use crate::forms::{FilterControl, FormState};
use crate::models::config::{EmptySelection, PaginationStyle, SearchUrlConfig};

/// Destination of an assembled search URL: a browser location, a redirect
/// response, a link in a template.
pub trait Navigator {
    fn navigate(&mut self, location: &str);
}

/// Navigator that records the location for an HTTP redirect.
#[derive(Debug, Default)]
pub struct RedirectTarget {
    location: Option<String>,
}

impl RedirectTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn into_location(self) -> Option<String> {
        self.location
    }
}

impl Navigator for RedirectTarget {
    fn navigate(&mut self, location: &str) {
        self.location = Some(location.to_string());
    }
}

/// Collects the query parameters for the current form state.
///
/// `search` is always written. Everything else is written only when present,
/// non-empty and recognised by `config`.
pub fn search_params<F>(context: &SearchContext, form: &F, config: &SearchUrlConfig) -> QueryParams
where
    F: FormState + ?Sized,
{
    let mut query = QueryParams::new();
    query.set(params::SEARCH, form.search_text().unwrap_or_default());

    match (&context.pagination, config.pagination) {
        (Pagination::None, _) => {}
        (Pagination::Cursor { cursor }, PaginationStyle::Cursor) => {
            if !cursor.is_empty() {
                query.set(params::CURSOR, cursor.as_str());
            }
        }
        (Pagination::Window { before, after }, PaginationStyle::BeforeAfter) => {
            if let Some(before) = non_empty(before) {
                query.set(params::BEFORE, before);
            }
            if let Some(after) = non_empty(after) {
                query.set(params::AFTER, after);
            }
        }
        (pagination, style) => {
            log::debug!("Ignoring {pagination:?} for {style:?} pagination");
        }
    }

    if context.exhibition && config.exhibition_flag {
        query.set_flag(params::EXHIBITION);
    }
    if context.ki && config.ki_flag {
        query.set_flag(params::KI);
    }

    if config.collection_filter {
        let buttons = form.collection_buttons();
        let controls = if buttons.is_empty() {
            form.collection_checkboxes()
        } else {
            buttons
        };
        if let Some(value) = joined_selection(&controls, config.empty_selection, |value| value) {
            query.set(params::COLLECTIONS, value);
        }
    }

    if config.vocabulary_filter {
        let prefix = config.vocabulary_prefix.as_deref().unwrap_or_default();
        let controls = form.vocabulary_buttons();
        if let Some(value) = joined_selection(&controls, config.empty_selection, |value| {
            strip_namespace(value, prefix)
        }) {
            query.set(params::VOCABULARY, value);
        }
    }

    if let Some(sort) = context.sort_directive() {
        query.set(params::SORT_FIELD, sort.field);
        if let Some(order) = sort.order {
            query.set(params::SORT_ORDER, order);
        }
    }

    query
}

/// Returns `base?query` for the current form state.
pub fn build_search_url<F>(
    base: &str,
    context: &SearchContext,
    form: &F,
    config: &SearchUrlConfig,
) -> Result<String, UrlError>
where
    F: FormState + ?Sized,
{
    let query = search_params(context, form, config).encode()?;
    Ok(format!("{base}?{query}"))
}

/// Builds the search URL and hands it to `navigator`.
pub fn submit_search<F, N>(
    base: &str,
    context: &SearchContext,
    form: &F,
    config: &SearchUrlConfig,
    navigator: &mut N,
) -> Result<(), UrlError>
where
    F: FormState + ?Sized,
    N: Navigator + ?Sized,
{
    let url = build_search_url(base, context, form, config)?;
    log::debug!("Navigating to {url}");
    navigator.navigate(&url);
    Ok(())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Joins the selected values of a group. A group without controls yields
/// nothing; a group without a selection follows `policy`.
fn joined_selection(
    controls: &[FilterControl],
    policy: EmptySelection,
    normalize: impl Fn(&str) -> &str,
) -> Option<String> {
    let selected: Vec<&str> = controls
        .iter()
        .filter_map(FilterControl::selected_value)
        .map(normalize)
        .collect();

    if !selected.is_empty() {
        return Some(join_filter_values(selected));
    }
    match policy {
        EmptySelection::Emit if !controls.is_empty() => Some(String::new()),
        _ => None,
    }
}
