//! High-level error types

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Core protocol error: {0}")]
    Core(#[from] microlife_core::Error),
    
    #[error("Transport error: {0}")]
    Transport(#[from] microlife_transport::Error),
    
    #[error("Type error: {0}")]
    Types(#[from] microlife_types::Error),
}

impl Error {
    /// Check if the device did not answer the last command
    pub fn is_unresponsive(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_unresponsive())
    }
}
