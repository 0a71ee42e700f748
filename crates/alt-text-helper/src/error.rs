use thiserror::Error;

#[derive(Error, Debug)]
pub enum HelperError {
    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] crate::review::SessionError),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, HelperError>;
