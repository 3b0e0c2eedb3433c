use thiserror::Error;

/// Unified error type for trace-model operations
#[derive(Error, Debug)]
pub enum TraceModelError {
    #[error("Unrecognized {enum_name} value: {input}")]
    UnrecognizedValue { enum_name: String, input: String },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in trace-model
pub type Result<T> = std::result::Result<T, TraceModelError>;

impl TraceModelError {
    /// Create an unrecognized-value error for the named enumeration
    pub fn unrecognized(enum_name: impl Into<String>, input: impl ToString) -> Self {
        TraceModelError::UnrecognizedValue {
            enum_name: enum_name.into(),
            input: input.to_string(),
        }
    }

    /// Create a key-not-found error from a displayable key description
    pub fn key_not_found(key: impl Into<String>) -> Self {
        TraceModelError::KeyNotFound(key.into())
    }

    /// Create an invalid-argument error with context
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        TraceModelError::InvalidArgument(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TraceModelError::Config(msg.into())
    }
}
