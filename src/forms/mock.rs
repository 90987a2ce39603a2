//! Mock form state for isolating the URL assembler in tests.

use mockall::mock;

use crate::forms::{FilterControl, FormState};

mock! {
    pub SearchForm {}

    impl FormState for SearchForm {
        fn search_text(&self) -> Option<String>;
        fn collection_buttons(&self) -> Vec<FilterControl>;
        fn collection_checkboxes(&self) -> Vec<FilterControl>;
        fn vocabulary_buttons(&self) -> Vec<FilterControl>;
    }
}
