//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Message carried by every quota rejection
pub const QUOTA_EXCEEDED_MESSAGE: &str = "Monthly AI generation limit reached";

/// Main error type for the Photo Diary engine
#[derive(Error, Debug)]
pub enum Error {
    /// No binding exists in the service registry for the requested type
    #[error("Service not registered: {type_name}")]
    NotRegistered {
        /// Fully qualified name of the requested type
        type_name: String,
    },

    /// A synchronous lookup hit a binding that must be resolved asynchronously first
    #[error("Service {type_name} requires async initialization; resolve it with get_async first")]
    RequiresAsyncInitialization {
        /// Fully qualified name of the requested type
        type_name: String,
    },

    /// A factory re-entered the resolution of a type it is itself constructing
    #[error("Circular dependency detected while resolving {type_name}")]
    CircularDependency {
        /// Type whose resolution was re-entered
        type_name: String,
    },

    /// Service construction failed inside a factory
    #[error("Factory error: {message}")]
    Factory {
        /// Description of the construction failure
        message: String,
    },

    /// The monthly AI generation quota has no headroom left
    #[error("{message}")]
    QuotaExceeded {
        /// Human readable rejection message
        message: String,
    },

    /// The persistence collaborator failed or returned an unreadable record
    #[error("Persistence error: {message}")]
    Persistence {
        /// Description of the persistence failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The purchase backend refused or failed a request
    #[error("Purchase error: {message}")]
    Purchase {
        /// Description of the purchase failure
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
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

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Registry error creation methods
impl Error {
    /// Create a not registered error for the given type name
    pub fn not_registered<S: Into<String>>(type_name: S) -> Self {
        Self::NotRegistered {
            type_name: type_name.into(),
        }
    }

    /// Create a requires async initialization error for the given type name
    pub fn requires_async_initialization<S: Into<String>>(type_name: S) -> Self {
        Self::RequiresAsyncInitialization {
            type_name: type_name.into(),
        }
    }

    /// Create a circular dependency error for the given type name
    pub fn circular_dependency<S: Into<String>>(type_name: S) -> Self {
        Self::CircularDependency {
            type_name: type_name.into(),
        }
    }

    /// Create a factory error
    pub fn factory<S: Into<String>>(message: S) -> Self {
        Self::Factory {
            message: message.into(),
        }
    }
}

// Subscription error creation methods
impl Error {
    /// Create the quota exceeded error
    pub fn quota_exceeded() -> Self {
        Self::QuotaExceeded {
            message: QUOTA_EXCEEDED_MESSAGE.to_string(),
        }
    }

    /// Create a persistence error
    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// Create a persistence error with source
    pub fn persistence_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a purchase error
    pub fn purchase<S: Into<String>>(message: S) -> Self {
        Self::Purchase {
            message: message.into(),
        }
    }
}

// General error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
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

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is a quota rejection
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded { .. })
    }

    /// Whether this error came from the persistence collaborator
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Json { .. })
    }
}
