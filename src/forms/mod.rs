//! Search form state as seen by the URL assembler.
//!
//! The assembler never touches a rendering environment directly; it reads
//! the current form through [`FormState`]. A browser page, a submitted HTML
//! form and a JSON snapshot are all just implementations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("cannot decode form: {0}")]
    Decode(#[from] serde_html_form::de::Error),
}

/// A single filter control: a toggle button or a checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterControl {
    /// Machine-readable value; controls without one are ignored.
    #[serde(default)]
    pub value: Option<String>,
    /// Toggle button `selected` attribute, or checkbox checked state.
    #[serde(default)]
    pub selected: bool,
}

impl FilterControl {
    pub fn new(value: impl Into<String>, selected: bool) -> Self {
        Self {
            value: Some(value.into()),
            selected,
        }
    }

    /// A control that is selected and carries `value`.
    pub fn selected(value: impl Into<String>) -> Self {
        Self::new(value, true)
    }

    /// Value of the control when it is selected.
    pub fn selected_value(&self) -> Option<&str> {
        if self.selected {
            self.value.as_deref()
        } else {
            None
        }
    }
}

/// Read access to the current state of a search form.
pub trait FormState {
    /// Current value of the search input, `None` when the form has none.
    fn search_text(&self) -> Option<String>;
    /// Collection toggle buttons in document order.
    fn collection_buttons(&self) -> Vec<FilterControl>;
    /// Collection checkboxes in document order, used only when the form
    /// renders no collection buttons.
    fn collection_checkboxes(&self) -> Vec<FilterControl>;
    /// Vocabulary toggle buttons in document order.
    fn vocabulary_buttons(&self) -> Vec<FilterControl>;
}

/// Point-in-time copy of a search form, e.g. posted as JSON by a script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub collection_buttons: Vec<FilterControl>,
    #[serde(default)]
    pub collection_checkboxes: Vec<FilterControl>,
    #[serde(default)]
    pub vocabulary_buttons: Vec<FilterControl>,
}

impl FormState for FormSnapshot {
    fn search_text(&self) -> Option<String> {
        self.search.clone()
    }

    fn collection_buttons(&self) -> Vec<FilterControl> {
        self.collection_buttons.clone()
    }

    fn collection_checkboxes(&self) -> Vec<FilterControl> {
        self.collection_checkboxes.clone()
    }

    fn vocabulary_buttons(&self) -> Vec<FilterControl> {
        self.vocabulary_buttons.clone()
    }
}
