//! Response decoders
//!
//! Every decoder takes the reassembled [`Response`](crate::report::Response)
//! content. All fields are ASCII: either hex-encoded text, hex numbers or
//! plain digits.

use microlife_types::{DeviceParameters, MeasurementMode, MeasurementRecord, RecordSet};
use tracing::{debug, trace};

use crate::{
    constants::layout::{
        ID_WINDOW, PARAM_DATE, PARAM_ID, RECORD_COUNT, RECORD_ID_START, RECORD_ID_WINDOW,
        RECORD_STRIDE, RECORDS_START, record,
    },
    encoding::{decode_number, decode_text, find_terminator},
    error::{Error, Result},
};

fn ensure_len(content: &[u8], expected: usize) -> Result<()> {
    if content.len() < expected {
        return Err(Error::ResponseTooShort {
            expected,
            actual: content.len(),
        });
    }
    Ok(())
}

fn ascii(field: &'static str, bytes: &[u8]) -> Result<String> {
    if !bytes.is_ascii() {
        return Err(Error::malformed(field, "non-ASCII bytes"));
    }
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Decode a ReadIdentifier response
///
/// The identifier occupies the first 22 characters, padded with `9` or `0`
/// depending on firmware. A full-width identifier has no padding at all.
///
/// # Examples
///
/// ```
/// use microlife_core::response;
///
/// let id = response::identifier(b"4a4f484e99999999999999").unwrap();
/// assert_eq!(id, "JOHN");
/// ```
pub fn identifier(content: &[u8]) -> Result<String> {
    let window = &content[..content.len().min(ID_WINDOW)];
    let end = find_terminator(window).unwrap_or(window.len());

    let id = decode_text("identifier", &window[..end])?;

    debug!(identifier = %id, "Decoded identifier");
    Ok(id)
}

/// Decode a ReadSerial response
pub fn serial(content: &[u8]) -> Result<String> {
    let serial = decode_text("serial", content)?;

    debug!(serial = %serial, "Decoded serial number");
    Ok(serial)
}

/// Decode a ReadParameters response
///
/// Both fields are returned undecoded. The identifier field is clamped to
/// the end of the content.
pub fn parameters(content: &[u8]) -> Result<DeviceParameters> {
    ensure_len(content, PARAM_ID.start)?;

    let date = ascii("date", &content[PARAM_DATE])?;
    let id_end = content.len().min(PARAM_ID.end);
    let identifier_field = ascii("identifier", &content[PARAM_ID.start..id_end])?;

    let params = DeviceParameters::new(date, identifier_field);
    debug!("Decoded {}", params);
    Ok(params)
}

/// Decode a ReadRecords response
///
/// # Layout
///
/// ```text
/// 0      4        8                  16          30     32
/// ┌──────┬────────┬──────────────────┬───────────┬──────┐
/// │count │  ....  │ identifier (hex) │ ...99/00  │  ..  │  header
/// └──────┴────────┴──────────────────┴───────────┴──────┘
/// 0          10     12      16      19      22      24          32
/// ┌──────────┬──────┬───────┬───────┬───────┬───────┬───────────┐
/// │YYMMDDHHMM│ mode │  ...  │ pulse │dia x4 │  sys  │    ...    │  record
/// └──────────┴──────┴───────┴───────┴───────┴───────┴───────────┘
/// ```
///
/// A count of zero yields an empty [`RecordSet`].
///
/// # Errors
///
/// [`Error::MalformedField`] if the identifier has no sentinel or a field
/// does not decode; [`Error::ResponseTooShort`] if the content ends before
/// the last announced record.
pub fn records(content: &[u8]) -> Result<RecordSet> {
    ensure_len(content, RECORD_ID_WINDOW.end)?;

    let count = decode_number("record count", &content[RECORD_COUNT])?;

    let pos = find_terminator(&content[RECORD_ID_WINDOW])
        .ok_or_else(|| Error::malformed("identifier", "no 99/00 terminator"))?;
    let identifier = decode_text(
        "identifier",
        &content[RECORD_ID_START..RECORD_ID_WINDOW.start + pos],
    )?;

    debug!(identifier = %identifier, count, "Decoding record dump");

    let records = (0..usize::from(count))
        .map(|index| {
            let base = RECORDS_START + index * RECORD_STRIDE;
            ensure_len(content, base + record::USED_LEN)?;
            decode_record(&content[base..])
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RecordSet::new(identifier, records))
}

/// Decode one record stride
fn decode_record(raw: &[u8]) -> Result<MeasurementRecord> {
    let date = format_date(&raw[record::DATE])?;
    let mode = MeasurementMode::from_flag(&ascii("mode", &raw[record::MODE])?);
    let pulse = decode_number("pulse", &raw[record::PULSE])?;
    let diastolic =
        decode_number("diastolic", &raw[record::DIASTOLIC])? / record::DIASTOLIC_SCALE;
    let systolic = decode_number("systolic", &raw[record::SYSTOLIC])?;

    let record = MeasurementRecord::new(date, mode, pulse, diastolic, systolic);
    trace!("Decoded record: {}", record);
    Ok(record)
}

/// Render `YYMMDDHHMM` as `20YY-MM-DD HH:MM`
fn format_date(raw: &[u8]) -> Result<String> {
    if !raw.iter().all(u8::is_ascii_digit) {
        return Err(Error::malformed(
            "date",
            format!("'{}' is not all digits", String::from_utf8_lossy(raw)),
        ));
    }

    let d = |range: std::ops::Range<usize>| String::from_utf8_lossy(&raw[range]).into_owned();

    Ok(format!(
        "20{}-{}-{} {}:{}",
        d(0..2),
        d(2..4),
        d(4..6),
        d(6..8),
        d(8..10)
    ))
}
