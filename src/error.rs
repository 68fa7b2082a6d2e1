use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch document: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to parse stored data: {0}")]
    StoreParse(#[from] serde_json::Error),

    // Specific HTTP status code errors
    #[error("Document not found (404): {url}")]
    SourceNotFound { url: String },

    #[error("Source server error ({status}): {message} (URL: {url})")]
    SourceServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Source rejected request ({status}): {message} (URL: {url})")]
    SourceClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Source rate limit exceeded (429): {message} (URL: {url})")]
    SourceRateLimit { message: String, url: String },

    // Network-specific errors
    #[error("Network timeout while fetching: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Proxy relay chain errors
    #[error("All {attempts} relay proxies failed for: {url}")]
    ProxyExhausted { url: String, attempts: usize },

    // Document-level errors
    #[error("Source returned an empty document: {url}")]
    EmptyDocument { url: String },

    // Fixture store errors
    #[error("Fixture store read failed: {0}")]
    StoreRead(String),

    #[error("Fixture store write failed: {0}")]
    StoreWrite(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a document not found error
    pub fn source_not_found(url: impl Into<String>) -> Self {
        Self::SourceNotFound { url: url.into() }
    }

    /// Create a source server error (5xx status codes)
    pub fn source_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::SourceServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a source client error (4xx status codes except 404 and 429)
    pub fn source_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::SourceClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a rate limit error
    pub fn source_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::SourceRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a proxy exhaustion error
    pub fn proxy_exhausted(url: impl Into<String>, attempts: usize) -> Self {
        Self::ProxyExhausted {
            url: url.into(),
            attempts,
        }
    }

    /// Create an empty document error
    pub fn empty_document(url: impl Into<String>) -> Self {
        Self::EmptyDocument { url: url.into() }
    }

    /// Create a store read error
    pub fn store_read(msg: impl Into<String>) -> Self {
        Self::StoreRead(msg.into())
    }

    /// Create a store write error
    pub fn store_write(msg: impl Into<String>) -> Self {
        Self::StoreWrite(msg.into())
    }

    /// Check if error is retryable (network issues, server errors, rate limits)
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::SourceServerError { .. }
                | AppError::SourceRateLimit { .. }
        )
    }
}
