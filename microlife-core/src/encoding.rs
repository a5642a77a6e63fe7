//! ASCII-hex text fields
//!
//! Text travels as two hex digits per character, e.g. `"AB"` is sent as
//! `"4142"`. Variable-length fields are padded with a filler digit and the
//! reader finds their end by scanning for a two-character sentinel.

use tracing::trace;

use crate::constants::layout::SENTINELS;
use crate::error::{Error, Result};

/// Hex-encode text, two lowercase digits per byte
///
/// # Examples
///
/// ```
/// use microlife_core::encoding;
///
/// assert_eq!(encoding::encode_text("Az"), "417a");
/// ```
pub fn encode_text(text: &str) -> String {
    hex::encode(text.as_bytes())
}

/// Decode an ASCII-hex field back into text
///
/// # Errors
///
/// [`Error::MalformedField`] if the field has odd length, contains a
/// non-hex digit, or does not decode to UTF-8.
pub fn decode_text(field: &'static str, ascii_hex: &[u8]) -> Result<String> {
    let bytes = hex::decode(ascii_hex).map_err(|e| Error::malformed(field, e))?;

    String::from_utf8(bytes).map_err(|e| Error::malformed(field, e))
}

/// Parse an ASCII-hex number
pub fn decode_number(field: &'static str, ascii_hex: &[u8]) -> Result<u16> {
    let digits = std::str::from_utf8(ascii_hex).map_err(|e| Error::malformed(field, e))?;

    u16::from_str_radix(digits, 16)
        .map_err(|e| Error::malformed(field, format!("'{}': {}", digits, e)))
}

/// Find where a sentinel-terminated field ends
///
/// Scans `window` for `"99"` and, only if absent, for `"00"`. Returns the
/// offset of the first match. Firmware variants pad with either digit and
/// neither is known to take precedence, so both scans are kept in order.
pub fn find_terminator(window: &[u8]) -> Option<usize> {
    let found = SENTINELS.iter().find_map(|sentinel| {
        window
            .windows(2)
            .position(|pair| pair == sentinel.as_slice())
    });

    trace!(window_len = window.len(), terminator = ?found, "Scanned for sentinel");

    found
}
