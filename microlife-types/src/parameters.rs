//! Device parameter block

use std::fmt;

/// Raw parameter block returned by the ReadParameters command
///
/// Both fields are kept exactly as the device sent them. The identifier
/// field is echoed back verbatim when setting the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceParameters {
    /// 14-character date field
    pub date: String,

    /// Identifier field, still ASCII-hex encoded and padded
    pub identifier_field: String,
}

impl DeviceParameters {
    pub fn new(date: impl Into<String>, identifier_field: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            identifier_field: identifier_field.into(),
        }
    }
}

impl fmt::Display for DeviceParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameters[date: {}, id: {}]", self.date, self.identifier_field)
    }
}
