//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the multi-layer cache
///
/// Tier-level failures (`Unavailable`, `Corrupt`) are absorbed by the cache
/// facade and turned into misses. Caller-contract violations
/// (`MissingParameter`, `UnknownPattern`, `InvalidPattern`) are surfaced.
#[derive(Error, Debug)]
pub enum Error {
    /// Distributed tier or invalidation bus unreachable or timed out
    #[error("Cache tier unavailable: {message}")]
    Unavailable {
        /// Description of the failed operation
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cached value could not be decoded
    #[error("Corrupt cache entry '{key}': {message}")]
    Corrupt {
        /// Key holding the undecodable value
        key: String,
        /// Decoder message
        message: String,
    },

    /// Template resolution was given an incomplete scope
    #[error("Missing parameter '{parameter}' for key template '{template}'")]
    MissingParameter {
        /// Template being resolved
        template: String,
        /// Placeholder without a supplied value
        parameter: String,
    },

    /// No pattern registered under the requested name
    #[error("Unknown cache pattern: {name}")]
    UnknownPattern {
        /// Requested pattern name
        name: String,
    },

    /// Key template or invalidation pattern is malformed
    #[error("Invalid key pattern '{pattern}': {message}")]
    InvalidPattern {
        /// Offending pattern text
        pattern: String,
        /// What is wrong with it
        message: String,
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

    /// Infrastructure operation error
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Tier error creation methods
impl Error {
    /// Create an unavailable error
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create an unavailable error with source
    pub fn unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a corrupt entry error
    pub fn corrupt<K: Into<String>, S: Into<String>>(key: K, message: S) -> Self {
        Self::Corrupt {
            key: key.into(),
            message: message.into(),
        }
    }
}

// Pattern error creation methods
impl Error {
    /// Create a missing parameter error
    pub fn missing_parameter<T: Into<String>, P: Into<String>>(template: T, parameter: P) -> Self {
        Self::MissingParameter {
            template: template.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an unknown pattern error
    pub fn unknown_pattern<S: Into<String>>(name: S) -> Self {
        Self::UnknownPattern { name: name.into() }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern<P: Into<String>, S: Into<String>>(pattern: P, message: S) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an infrastructure error with source
    pub fn infrastructure_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// Whether this error means a tier could not be reached
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Whether this error reports a caller-contract violation that must be
    /// surfaced instead of degraded into a miss
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. } | Self::UnknownPattern { .. } | Self::InvalidPattern { .. }
        )
    }
}
