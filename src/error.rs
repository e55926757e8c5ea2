use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors from the external geocoding collaborator.
///
/// These never propagate past the search resolver boundary; the resolver
/// absorbs them and reports `NoMatch`.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("geocode request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("geocode response malformed: {0}")]
    Malformed(String),
}

/// Errors from the listing datastore collaborator.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("bulk load failed: {0}")]
    LoadFailed(String),

    #[error("subscription failed: {0}")]
    SubscribeFailed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
