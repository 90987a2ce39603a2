use serde::Serialize;

use crate::domain::search::SearchRequest;
use crate::domain::types::CollectionId;

/// Collection filter rendered on the search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionFacet {
    pub id: CollectionId,
    pub title: String,
    pub checked: bool,
}

/// Vocabulary filter rendered on the search page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VocabularyFacet {
    /// Control value, including any namespace prefix.
    pub value: String,
    /// Display name without the namespace prefix.
    pub name: String,
    pub checked: bool,
}

/// Data required to render the search template.
#[derive(Debug, Serialize)]
pub struct SearchPageData {
    /// Decoded request echoed back into the form.
    pub request: SearchRequest,
    pub collections: Vec<CollectionFacet>,
    pub vocabulary: Vec<VocabularyFacet>,
    /// Encoded parameters reproducing the current search, for links.
    pub search_params: String,
    /// Target of the search form.
    pub search_base: String,
}
