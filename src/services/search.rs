use crate::domain::search::{SearchQueryParams, SearchRequest};
use crate::domain::types::{GENERIC_VOCABULARY_PREFIX, VocabularyId};
use crate::dto::search::{CollectionFacet, SearchPageData, VocabularyFacet};
use crate::forms::search::SearchForm;
use crate::models::config::ServerConfig;
use crate::services::url::{RedirectTarget, submit_search};
use crate::services::{ServiceError, ServiceResult};

/// Decodes the request and marks the configured filters it selects.
pub fn load_search_page(
    params: SearchQueryParams,
    config: &ServerConfig,
) -> ServiceResult<SearchPageData> {
    let request = SearchRequest::from_params(params);
    let prefix = config
        .search_url
        .vocabulary_prefix
        .as_deref()
        .unwrap_or(GENERIC_VOCABULARY_PREFIX);

    let collections = config
        .collections
        .iter()
        .map(|collection| CollectionFacet {
            id: collection.id,
            title: collection.title.clone(),
            checked: request.has_collection(collection.id),
        })
        .collect();

    let vocabulary = config
        .vocabulary
        .iter()
        .filter_map(|value| match VocabularyId::new(value.as_str()) {
            Ok(term) => Some(term),
            Err(err) => {
                log::warn!("Skipping configured vocabulary term '{value}': {err}");
                None
            }
        })
        .map(|term| VocabularyFacet {
            name: term.without_prefix(prefix).to_string(),
            checked: request.has_vocabulary(&term, prefix),
            value: term.into_inner(),
        })
        .collect();

    let search_params = request.canonical_query()?;

    Ok(SearchPageData {
        request,
        collections,
        vocabulary,
        search_params,
        search_base: config.search_base.clone(),
    })
}

/// Decodes a submitted search form and returns the redirect location.
pub fn submit_search_form(body: &[u8], config: &ServerConfig) -> ServiceResult<String> {
    let form = SearchForm::parse(body).map_err(|err| {
        log::error!("Failed to decode search form: {err}");
        ServiceError::Form(err.to_string())
    })?;

    let context = form.context(config.search_url.pagination);
    let mut target = RedirectTarget::new();
    submit_search(
        &config.search_base,
        &context,
        &form,
        &config.search_url,
        &mut target,
    )?;

    Ok(target
        .into_location()
        .unwrap_or_else(|| config.search_base.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CollectionId;
    use crate::models::config::{CollectionConfig, PaginationStyle, SearchUrlConfig};

    fn server_config() -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            templates_dir: "templates/**/*".to_string(),
            search_base: "/search".to_string(),
            search_url: SearchUrlConfig::default(),
            collections: vec![
                CollectionConfig {
                    id: CollectionId::new(3).unwrap(),
                    title: "Posters".to_string(),
                },
                CollectionConfig {
                    id: CollectionId::new(7).unwrap(),
                    title: "Maps".to_string(),
                },
            ],
            vocabulary: vec![
                "voc:generic:paper".to_string(),
                "voc:generic:linen".to_string(),
                " ".to_string(),
            ],
        }
    }

    fn params(query: &str) -> SearchQueryParams {
        SearchQueryParams::from_query(query)
    }

    #[test]
    fn page_marks_requested_filters() {
        let page = load_search_page(
            params("search=cats&collections=7%2C&vocabulary=paper%2C"),
            &server_config(),
        )
        .unwrap();

        let checked: Vec<_> = page
            .collections
            .iter()
            .map(|facet| (facet.title.as_str(), facet.checked))
            .collect();
        assert_eq!(checked, vec![("Posters", false), ("Maps", true)]);

        assert_eq!(page.vocabulary.len(), 2);
        assert_eq!(page.vocabulary[0].name, "paper");
        assert_eq!(page.vocabulary[0].value, "voc:generic:paper");
        assert!(page.vocabulary[0].checked);
        assert!(!page.vocabulary[1].checked);

        assert_eq!(
            page.search_params,
            "search=cats&collections=7%2C&vocabulary=paper%2C"
        );
        assert_eq!(page.search_base, "/search");
    }

    #[test]
    fn submitted_form_redirects_to_assembled_url() {
        let location = submit_search_form(
            b"search=cats&collection_check=3&collection_check=7\
              &vocabulary=voc%3Ageneric%3Apaper&ki=&sortField=title",
            &server_config(),
        )
        .unwrap();

        assert_eq!(
            location,
            "/search?search=cats&ki=&collections=3%2C7%2C&vocabulary=paper%2C&sortField=title"
        );
    }

    #[test]
    fn submitted_form_reads_configured_pagination_style() {
        let mut config = server_config();
        config.search_url.pagination = PaginationStyle::BeforeAfter;

        let location = submit_search_form(b"search=cats&cursor=x&before=b1", &config).unwrap();

        assert_eq!(location, "/search?search=cats&before=b1");
    }
}
