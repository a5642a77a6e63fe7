//! Monitor command opcodes

use std::fmt;

use crate::error::{Error, Result};

/// Command opcodes
///
/// Each request starts with exactly one command frame carrying one of these.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    /// Dump identifier and stored measurements
    ReadRecords = 0x22,

    /// Write control block (set identifier, delete data)
    WriteControl = 0x23,

    /// Read stored identifier
    ReadIdentifier = 0x24,

    /// Read date and identifier parameters
    ReadParameters = 0x26,

    /// Set device clock
    SetTime = 0x27,

    /// Read serial number
    ReadSerial = 0x3e,
}

impl Command {
    /// Get command name
    pub fn name(self) -> &'static str {
        match self {
            Self::ReadRecords => "READ_RECORDS",
            Self::WriteControl => "WRITE_CONTROL",
            Self::ReadIdentifier => "READ_ID",
            Self::ReadParameters => "READ_PARAMETERS",
            Self::SetTime => "SET_TIME",
            Self::ReadSerial => "READ_SERIAL",
        }
    }
}

impl From<Command> for u8 {
    fn from(cmd: Command) -> u8 {
        cmd as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0x22 => Ok(Self::ReadRecords),
            0x23 => Ok(Self::WriteControl),
            0x24 => Ok(Self::ReadIdentifier),
            0x26 => Ok(Self::ReadParameters),
            0x27 => Ok(Self::SetTime),
            0x3e => Ok(Self::ReadSerial),
            _ => Err(Error::UnknownCommand(value)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(0x{:02X})", self.name(), *self as u8)
    }
}
