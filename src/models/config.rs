//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::domain::types::GENERIC_VOCABULARY_PREFIX;

/// Pagination parameters a search form understands.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStyle {
    /// Single opaque `cursor`.
    #[default]
    Cursor,
    /// `before` / `after` markers.
    BeforeAfter,
    /// No pagination parameters at all.
    None,
}

/// What to write for a filter group with controls but no selection.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelection {
    /// Leave the parameter out.
    #[default]
    Omit,
    /// Write the parameter with an empty value.
    Emit,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Which parameters the search URL carries and how they are written.
pub struct SearchUrlConfig {
    pub pagination: PaginationStyle,
    pub exhibition_flag: bool,
    pub ki_flag: bool,
    pub collection_filter: bool,
    pub vocabulary_filter: bool,
    /// Namespace removed from vocabulary values; `None` keeps them verbatim.
    pub vocabulary_prefix: Option<String>,
    pub empty_selection: EmptySelection,
}

impl Default for SearchUrlConfig {
    fn default() -> Self {
        Self {
            pagination: PaginationStyle::Cursor,
            exhibition_flag: true,
            ki_flag: true,
            collection_filter: true,
            vocabulary_filter: true,
            vocabulary_prefix: Some(GENERIC_VOCABULARY_PREFIX.to_string()),
            empty_selection: EmptySelection::Omit,
        }
    }
}

#[cfg(feature = "server")]
pub use server::{CollectionConfig, ConfigError, ServerConfig};

#[cfg(feature = "server")]
mod server {
    use std::path::Path;

    use config::Config;
    use serde::Deserialize;
    use thiserror::Error;
    use validator::{Validate, ValidationError, ValidationErrors};

    use super::SearchUrlConfig;
    use crate::domain::types::CollectionId;

    #[derive(Debug, Error)]
    /// Errors raised while loading the server configuration.
    pub enum ConfigError {
        #[error("cannot load settings: {0}")]
        Load(#[from] config::ConfigError),

        #[error("invalid settings: {0}")]
        Invalid(#[from] ValidationErrors),
    }

    #[derive(Clone, Debug, Deserialize)]
    /// Collection offered as a filter on the search page.
    pub struct CollectionConfig {
        pub id: CollectionId,
        pub title: String,
    }

    fn default_search_base() -> String {
        "/search".to_string()
    }

    fn validate_search_base(value: &str) -> Result<(), ValidationError> {
        if value.is_empty() || value.contains('?') {
            return Err(ValidationError::new("search_base"));
        }
        Ok(())
    }

    #[derive(Clone, Debug, Deserialize, Validate)]
    /// Basic configuration shared across handlers.
    pub struct ServerConfig {
        #[validate(length(min = 1))]
        pub address: String,
        #[validate(range(min = 1))]
        pub port: u16,
        #[validate(length(min = 1))]
        pub templates_dir: String,
        /// URL the search form navigates to.
        #[serde(default = "default_search_base")]
        #[validate(custom(function = "validate_search_base"))]
        pub search_base: String,
        #[serde(default)]
        pub search_url: SearchUrlConfig,
        #[serde(default)]
        pub collections: Vec<CollectionConfig>,
        /// Vocabulary terms offered as filters, as rendered in the controls.
        #[serde(default)]
        pub vocabulary: Vec<String>,
    }

    impl ServerConfig {
        /// Loads `{config_dir}/default.yaml`, the optional
        /// `{config_dir}/{app_env}.yaml` and `APP_*` environment overrides.
        pub fn load(config_dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
            let default_file = config_dir.join("default");
            let env_file = config_dir.join(app_env);

            let settings = Config::builder()
                .add_source(config::File::with_name(&default_file.to_string_lossy()))
                .add_source(
                    config::File::with_name(&env_file.to_string_lossy()).required(false),
                )
                .add_source(config::Environment::with_prefix("APP"))
                .build()?;

            let server_config = settings.try_deserialize::<ServerConfig>()?;
            server_config.validate()?;
            Ok(server_config)
        }
    }
}
