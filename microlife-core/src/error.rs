//! Error types for microlife-core

use std::fmt;

/// Result type alias for microlife operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why the device is considered unresponsive
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unresponsive {
    /// Fewer bytes than the smallest valid response
    #[error("only {received} bytes received")]
    ShortResponse {
        received: usize,
    },

    /// First report did not carry the ACK status
    #[error("status 0x{status:02X} instead of ACK")]
    NotAcknowledged {
        status: u8,
    },
}

/// Core protocol errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Device did not answer, or refused the command
    #[error("Device not responding: {0}")]
    Unresponsive(Unresponsive),

    /// Report length byte outside the valid range
    #[error("Invalid report length byte 0x{value:02X} at offset {offset}")]
    InvalidReportLength {
        offset: usize,
        value: u8,
    },

    /// Response is too short to hold the expected content
    #[error("Response too short: expected at least {expected} bytes, got {actual} bytes")]
    ResponseTooShort {
        expected: usize,
        actual: usize,
    },

    /// A field could not be decoded
    #[error("Malformed {field} field: {reason}")]
    MalformedField {
        field: &'static str,
        reason: String,
    },

    /// Unknown command opcode
    #[error("Unknown command opcode: 0x{0:02X}")]
    UnknownCommand(u8),
}

impl Error {
    /// Build a [`Error::MalformedField`]
    pub fn malformed(field: &'static str, reason: impl fmt::Display) -> Self {
        Self::MalformedField {
            field,
            reason: reason.to_string(),
        }
    }

    /// Check if the device failed to answer
    pub fn is_unresponsive(&self) -> bool {
        matches!(self, Self::Unresponsive(_))
    }

    /// Check if the response was received but could not be decoded
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidReportLength { .. }
                | Self::ResponseTooShort { .. }
                | Self::MalformedField { .. }
        )
    }
}
