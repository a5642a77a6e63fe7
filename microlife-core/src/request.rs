//! Request builders
//!
//! Write requests are an opcode frame followed by an ASCII payload that
//! ends with its own checksum.

use std::fmt;

use chrono::NaiveDateTime;
use microlife_types::Identifier;
use tracing::debug;

use crate::{
    checksum,
    command::Command,
    constants::request::{
        DELETE_DATA, ID_FIELD_WIDTH, ID_FILLER, SET_ID_PREFIX, SET_ID_ZERO_RUN, TIME_FORMAT,
        TIME_SEPARATOR,
    },
    encoding,
};

/// A request ready to be framed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Opcode sent first
    pub command: Command,

    /// ASCII payload, checksum included
    pub payload: String,
}

impl Request {
    pub fn new(command: Command, payload: impl Into<String>) -> Self {
        Self {
            command,
            payload: payload.into(),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request[{}](len={})", self.command, self.payload.len())
    }
}

/// Identifier as the 22-digit ASCII-hex field, `9`-padded
pub fn identifier_field(identifier: &Identifier) -> String {
    let mut field = encoding::encode_text(identifier.as_str());
    let padding = ID_FIELD_WIDTH.saturating_sub(field.len());
    field.extend(std::iter::repeat_n(ID_FILLER, padding));
    field
}

/// Replace the stored identifier; measurements are kept
///
/// # Examples
///
/// ```
/// use microlife_core::{request, Command};
/// use microlife_types::Identifier;
///
/// let id = Identifier::new("AB").unwrap();
/// let req = request::set_identifier(&id);
///
/// assert_eq!(req.command, Command::WriteControl);
/// assert!(req.payload.starts_with("000100014142999999999999999999"));
/// ```
pub fn set_identifier(identifier: &Identifier) -> Request {
    let mut payload =
        String::with_capacity(SET_ID_PREFIX.len() + ID_FIELD_WIDTH + SET_ID_ZERO_RUN + 2);
    payload.push_str(SET_ID_PREFIX);
    payload.push_str(&identifier_field(identifier));
    payload.extend(std::iter::repeat_n('0', SET_ID_ZERO_RUN));

    let payload = checksum::append(payload);

    debug!(identifier = %identifier, "Built set-identifier request");

    Request::new(Command::WriteControl, payload)
}

/// Erase all stored measurements; the identifier is kept
pub fn delete_data() -> Request {
    Request::new(Command::WriteControl, DELETE_DATA)
}

/// Set the device clock
///
/// `identifier_field` is the raw field from a ReadParameters response,
/// echoed back so the stored identifier is left unchanged.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use microlife_core::request;
///
/// let at = NaiveDate::from_ymd_opt(2023, 6, 15)
///     .unwrap()
///     .and_hms_opt(10, 30, 5)
///     .unwrap();
/// let req = request::set_time(at, "4142");
///
/// assert!(req.payload.starts_with("0615202310300500004142"));
/// ```
pub fn set_time(at: NaiveDateTime, identifier_field: &str) -> Request {
    let mut payload = at.format(TIME_FORMAT).to_string();
    payload.push_str(TIME_SEPARATOR);
    payload.push_str(identifier_field);

    let payload = checksum::append(payload);

    debug!(time = %at, "Built set-time request");

    Request::new(Command::SetTime, payload)
}
