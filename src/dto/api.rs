//! DTOs exposed by the search API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::search::SearchContext;
use crate::forms::FormSnapshot;

/// Body accepted by `/api/v1/search-url`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchUrlPayload {
    /// Current form controls.
    #[serde(default)]
    pub form: FormSnapshot,
    /// Pagination, flags and sorting of the navigation.
    #[serde(default)]
    pub context: SearchContext,
}

/// Result payload returned by [`crate::services::api::search_url`].
#[derive(Debug, Serialize)]
pub struct SearchUrlResponse {
    pub url: String,
}
