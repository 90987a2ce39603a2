//! Business logic behind the search routes.

use thiserror::Error;

use crate::domain::params::UrlError;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod search;
pub mod url;

#[derive(Debug, Error)]
/// Errors returned by the service layer.
pub enum ServiceError {
    #[error("invalid form: {0}")]
    Form(String),

    #[error(transparent)]
    Url(#[from] UrlError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
