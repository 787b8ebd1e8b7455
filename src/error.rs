use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, Error, Diagnostic, PartialEq, Eq)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Timeout,
    Network,
    Decode,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Timeout { .. } => FetchErrorKind::Timeout,
            FetchError::Network { .. } | FetchError::Status { .. } => FetchErrorKind::Network,
            FetchError::Decode { .. } => FetchErrorKind::Decode,
        }
    }

    pub fn request_url(&self) -> &str {
        match self {
            FetchError::Timeout { url }
            | FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::Status { status: 404, .. })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum PokedexError {
    #[error("invalid pokemon identifier: {0}")]
    InvalidIdentifier(String),

    #[error("invalid sort key: {0}")]
    InvalidSortKey(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config value: {0}")]
    InvalidConfig(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;

    use super::*;

    #[test]
    fn fetch_errors_surface_through_pokedex_error() {
        let fetch = FetchError::Status {
            url: "https://pokeapi.co/api/v2/pokemon/0".to_string(),
            status: 404,
        };
        assert_eq!(fetch.request_url(), "https://pokeapi.co/api/v2/pokemon/0");
        assert!(fetch.is_not_found());

        let err = PokedexError::from(fetch.clone());
        assert_eq!(err.to_string(), fetch.to_string());
        assert!(Diagnostic::url(&err).is_none());
        assert!(Diagnostic::code(&err).is_none());
    }
}
