//! Error types for microlife-types

/// Result type alias for value construction
pub type Result<T> = std::result::Result<T, Error>;

/// Value construction errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input rejected before it reaches the device
    #[error("Invalid value: {0}")]
    Validation(String),

    /// Stored text that does not parse
    #[error("Parse error: {0}")]
    Parse(String),
}
