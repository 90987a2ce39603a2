use crate::domain::search::{SearchQueryParams, SearchRequest};
use crate::dto::api::{SearchUrlPayload, SearchUrlResponse};
use crate::models::config::ServerConfig;
use crate::services::ServiceResult;
use crate::services::url::build_search_url;

/// Decodes the search query for API consumers.
pub fn decode_search(params: SearchQueryParams) -> SearchRequest {
    SearchRequest::from_params(params)
}

/// Builds the search URL for a form snapshot posted by a script.
pub fn search_url(payload: SearchUrlPayload, config: &ServerConfig) -> ServiceResult<SearchUrlResponse> {
    let url = build_search_url(
        &config.search_base,
        &payload.context,
        &payload.form,
        &config.search_url,
    )?;
    Ok(SearchUrlResponse { url })
}
