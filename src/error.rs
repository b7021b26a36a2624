use thiserror::Error;

/// Error types that can occur when talking to model hosts or serving evaluations.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Errors returned by the model host
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// Configuration loading or parsing errors
    #[error("Config error: {0}")]
    ConfigError(String),
    /// Generic error
    #[error("Generic error: {0}")]
    Generic(String),
    /// JSON serialization/deserialization errors
    #[error("JSON parse error: {0}")]
    JsonError(String),
}

/// Converts reqwest HTTP errors into ArenaErrors
impl From<reqwest::Error> for ArenaError {
    fn from(err: reqwest::Error) -> Self {
        ArenaError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ArenaError {
    fn from(err: serde_json::Error) -> Self {
        ArenaError::JsonError(format!(
            "{} at line {} column {}",
            err,
            err.line(),
            err.column()
        ))
    }
}

impl From<std::io::Error> for ArenaError {
    fn from(err: std::io::Error) -> Self {
        ArenaError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for ArenaError {
    fn from(err: toml::de::Error) -> Self {
        ArenaError::ConfigError(err.to_string())
    }
}
