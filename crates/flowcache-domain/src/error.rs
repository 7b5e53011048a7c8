//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Flowcache core
#[derive(Error, Debug)]
pub enum Error {
    /// A backend primitive failed (connection drop, wrong key type, timeout)
    #[error("Backend error during {operation}: {message}")]
    Backend {
        /// Backend operation that failed (e.g. `GET`, `ZADD`)
        operation: String,
        /// Description of the failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The cache store is in degrade mode and skipped the backend entirely
    #[error("Cache backend unavailable, {operation} skipped")]
    BackendUnavailable {
        /// Operation that was short-circuited
        operation: String,
    },

    /// A value could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Backend error creation methods
impl Error {
    /// Create a backend error without an underlying source
    pub fn backend<O: Into<String>, S: Into<String>>(operation: O, message: S) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend error wrapping the driver error
    pub fn backend_with_source<O, E>(operation: O, source: E) -> Self
    where
        O: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend {
            operation: operation.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a degrade-mode error for a skipped operation
    pub fn unavailable<O: Into<String>>(operation: O) -> Self {
        Self::BackendUnavailable {
            operation: operation.into(),
        }
    }

    /// Create a serialization error wrapping the encoder error
    pub fn serialization<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification helpers
impl Error {
    /// Whether this error came from the backend (transient or degraded)
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. } | Self::BackendUnavailable { .. })
    }

    /// Whether this error is a programming error that must reach the caller
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. } | Self::Json { .. })
    }
}
