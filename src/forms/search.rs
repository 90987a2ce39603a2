//! The search form as submitted by a browser without scripting.

use serde::Deserialize;

use crate::domain::params::deserialize_flag;
use crate::domain::search::{Pagination, SearchContext};
use crate::forms::{FilterControl, FormError, FormState};
use crate::models::config::PaginationStyle;

/// Urlencoded search form. Multi-select groups arrive as repeated keys, and
/// only selected controls are submitted. A rendered group also posts a
/// hidden `*_group` marker so an empty selection is still visible.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: Option<String>,
    /// Values of the selected collection toggle buttons.
    #[serde(default)]
    pub collection: Vec<String>,
    /// Values of the checked collection checkboxes.
    #[serde(default)]
    pub collection_check: Vec<String>,
    /// Values of the selected vocabulary controls, possibly namespaced.
    #[serde(default)]
    pub vocabulary: Vec<String>,
    /// Set when the page rendered collection checkboxes.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub collection_group: bool,
    /// Set when the page rendered vocabulary controls.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub vocabulary_group: bool,
    pub cursor: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub exhibition: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub ki: bool,
    #[serde(rename = "sortField")]
    pub sort_field: Option<String>,
    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

impl SearchForm {
    /// Decodes an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &[u8]) -> Result<Self, FormError> {
        Ok(serde_html_form::from_bytes(body)?)
    }

    /// Pagination, flags and sorting carried by hidden inputs. Only the
    /// pagination tokens of `style` are read.
    pub fn context(&self, style: PaginationStyle) -> SearchContext {
        let pagination = match style {
            PaginationStyle::Cursor => match self.cursor.as_deref() {
                Some(cursor) if !cursor.is_empty() => Pagination::cursor(cursor),
                _ => Pagination::None,
            },
            PaginationStyle::BeforeAfter => match (&self.before, &self.after) {
                (None, None) => Pagination::None,
                (before, after) => Pagination::window(before.clone(), after.clone()),
            },
            PaginationStyle::None => Pagination::None,
        };

        SearchContext {
            pagination,
            exhibition: self.exhibition,
            ki: self.ki,
            sort_field: self.sort_field.clone(),
            sort_order: self.sort_order.clone(),
        }
    }
}

fn selected_controls(values: &[String]) -> Vec<FilterControl> {
    values.iter().map(FilterControl::selected).collect()
}

/// Selected controls of a group; a rendered group with nothing selected
/// reads as one unselected control.
fn group_controls(values: &[String], rendered: bool) -> Vec<FilterControl> {
    if values.is_empty() && rendered {
        return vec![FilterControl::default()];
    }
    selected_controls(values)
}

impl FormState for SearchForm {
    fn search_text(&self) -> Option<String> {
        self.search.clone()
    }

    fn collection_buttons(&self) -> Vec<FilterControl> {
        selected_controls(&self.collection)
    }

    fn collection_checkboxes(&self) -> Vec<FilterControl> {
        group_controls(&self.collection_check, self.collection_group)
    }

    fn vocabulary_buttons(&self) -> Vec<FilterControl> {
        group_controls(&self.vocabulary, self.vocabulary_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_keys_become_selected_controls() {
        let form = SearchForm::parse(
            b"search=cats&collection_check=3&collection_check=7&vocabulary=voc%3Ageneric%3Amap",
        )
        .unwrap();

        assert_eq!(form.search_text().as_deref(), Some("cats"));
        assert!(form.collection_buttons().is_empty());
        assert_eq!(
            form.collection_checkboxes(),
            vec![FilterControl::selected("3"), FilterControl::selected("7")]
        );
        assert_eq!(
            form.vocabulary_buttons(),
            vec![FilterControl::selected("voc:generic:map")]
        );
    }

    #[test]
    fn hidden_inputs_build_context() {
        let form =
            SearchForm::parse(b"search=&cursor=c2&ki=&sortField=date&sortOrder=desc").unwrap();
        let context = form.context(PaginationStyle::Cursor);

        assert_eq!(context.pagination, Pagination::cursor("c2"));
        assert!(context.ki);
        assert!(!context.exhibition);
        assert_eq!(context.sort_field.as_deref(), Some("date"));
        assert_eq!(context.sort_order.as_deref(), Some("desc"));
    }

    #[test]
    fn pagination_follows_configured_style() {
        let form = SearchForm::parse(b"cursor=x&before=b1").unwrap();
        assert_eq!(form.context(PaginationStyle::Cursor).pagination, Pagination::cursor("x"));
        assert_eq!(
            form.context(PaginationStyle::BeforeAfter).pagination,
            Pagination::window(Some("b1".to_string()), None)
        );
        assert_eq!(form.context(PaginationStyle::None).pagination, Pagination::None);
        assert_eq!(
            SearchForm::parse(b"cursor=")
                .unwrap()
                .context(PaginationStyle::Cursor)
                .pagination,
            Pagination::None
        );
    }

    #[test]
    fn rendered_group_without_selection_has_one_unselected_control() {
        let form = SearchForm::parse(b"search=cats&collection_group=&vocabulary_group=").unwrap();
        assert_eq!(form.collection_checkboxes(), vec![FilterControl::default()]);
        assert_eq!(form.vocabulary_buttons(), vec![FilterControl::default()]);

        let form = SearchForm::parse(b"collection_group=&collection_check=3").unwrap();
        assert_eq!(form.collection_checkboxes(), vec![FilterControl::selected("3")]);

        let form = SearchForm::parse(b"search=cats").unwrap();
        assert!(form.collection_checkboxes().is_empty());
        assert!(form.vocabulary_buttons().is_empty());
    }

    #[test]
    fn missing_search_field_reads_as_none() {
        let form = SearchForm::parse(b"").unwrap();
        assert_eq!(form.search_text(), None);
    }
}
