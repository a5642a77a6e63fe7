//! HID report framing and response reassembly

use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use tracing::{debug, trace};

use crate::{
    command::Command,
    constants::{
        REPORT_SIZE,
        frame::{COMMAND_HEADER, MAX_CHUNK},
        response::{ACK, LENGTH_BIAS, MAX_REPORT_PAYLOAD, MIN_RAW_LEN, TRAILER_LEN},
    },
    error::{Error, Result, Unresponsive},
};

/// One HID report
pub type Report = [u8; REPORT_SIZE];

/// Build the frame that selects a command
///
/// # Frame Structure
///
/// ```text
/// ┌──────┬──────┬──────┬──────┬────────┬──────┬──────┬──────┐
/// │ 0x04 │ 0x12 │ 0x16 │ 0x18 │ opcode │ 0x00 │ 0x00 │ 0x00 │
/// └──────┴──────┴──────┴──────┴────────┴──────┴──────┴──────┘
/// ```
///
/// # Examples
///
/// ```
/// use microlife_core::{report, Command};
///
/// let frame = report::command_frame(Command::ReadSerial);
/// assert_eq!(frame, [0x04, 0x12, 0x16, 0x18, 0x3e, 0, 0, 0]);
/// ```
pub fn command_frame(command: Command) -> Report {
    let mut frame = [0u8; REPORT_SIZE];
    frame[..COMMAND_HEADER.len()].copy_from_slice(&COMMAND_HEADER);
    frame[COMMAND_HEADER.len()] = command.into();
    frame
}

/// Split a request payload into payload frames
///
/// # Frame Structure
///
/// ```text
/// ┌────────┬──────────────────────────────┐
/// │ length │ payload, zero-padded to 7    │
/// │ 1 byte │ 7 bytes                      │
/// └────────┴──────────────────────────────┘
/// ```
///
/// Full chunks declare `0x07`. A trailing partial chunk declares its own
/// length.
///
/// # Examples
///
/// ```
/// use microlife_core::report;
///
/// let frames = report::payload_frames(b"0123456789");
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[0][0], 7);
/// assert_eq!(frames[1], [3, b'7', b'8', b'9', 0, 0, 0, 0]);
/// ```
pub fn payload_frames(data: &[u8]) -> Vec<Report> {
    let full_frame_count = data.len() / MAX_CHUNK;
    let remainder = data.len() % MAX_CHUNK;

    let mut frames = Vec::with_capacity(full_frame_count + usize::from(remainder != 0));

    for index in 0..full_frame_count {
        let start = index * MAX_CHUNK;
        frames.push(payload_frame(&data[start..start + MAX_CHUNK]));
    }

    if remainder != 0 {
        let start = full_frame_count * MAX_CHUNK;
        frames.push(payload_frame(&data[start..]));
    }

    trace!(
        payload_len = data.len(),
        full_frames = full_frame_count,
        partial_len = remainder,
        "Framed payload"
    );

    frames
}

fn payload_frame(chunk: &[u8]) -> Report {
    debug_assert!(chunk.len() <= MAX_CHUNK);

    let mut frame = [0u8; REPORT_SIZE];
    frame[0] = chunk.len() as u8;
    frame[1..=chunk.len()].copy_from_slice(chunk);
    frame
}

/// Payload length declared by byte 0 of a report
fn declared_length(value: u8, offset: usize) -> Result<usize> {
    match value.checked_sub(LENGTH_BIAS) {
        Some(len) if usize::from(len) <= MAX_REPORT_PAYLOAD => Ok(usize::from(len)),
        _ => Err(Error::InvalidReportLength { offset, value }),
    }
}

/// Decoded response content
///
/// `content` is the concatenated payload of all reports with the status
/// byte and the two trailing checksum bytes removed.
#[derive(Clone, PartialEq, Eq)]
pub struct Response {
    content: Bytes,
    payload_len: usize,
}

impl Response {
    /// Response content
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Declared payload length summed over all reports (trailer included)
    ///
    /// This is the total of the report length bytes less the status byte.
    pub fn payload_len(&self) -> usize {
        self.payload_len
    }

    /// Logical content length, `payload_len - 2`
    pub fn len(&self) -> usize {
        self.payload_len - TRAILER_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_content(self) -> Bytes {
        self.content
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("payload_len", &self.payload_len)
            .field("content", &String::from_utf8_lossy(&self.content))
            .finish()
    }
}

/// Collects incoming reports until the device goes quiet
///
/// # Report Structure
///
/// ```text
/// first report:  ┌────────────┬────────┬───────────────────────┐
///                │ 0xF0 + len │ status │ payload (len - 1)     │
///                └────────────┴────────┴───────────────────────┘
/// next reports:  ┌────────────┬────────────────────────────────┐
///                │ 0xF0 + len │ payload (len)                  │
///                └────────────┴────────────────────────────────┘
/// ```
///
/// The status byte sits inside the first report's declared length but is
/// not payload.
///
/// # Examples
///
/// ```
/// use microlife_core::report::Reassembler;
///
/// let mut reassembler = Reassembler::new();
/// reassembler.push(&[0xF7, 0x06, b'4', b'1', b'4', b'2', b'X', b'Y']);
///
/// let response = reassembler.finish().unwrap();
/// assert_eq!(response.content(), b"4142");
/// assert_eq!(response.payload_len(), 6);
/// ```
#[derive(Debug, Default)]
pub struct Reassembler {
    raw: BytesMut,
    reads: usize,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the bytes of one read
    pub fn push(&mut self, data: &[u8]) {
        trace!("Report {}: {:02X?}", self.reads, data);
        self.raw.put_slice(data);
        self.reads += 1;
    }

    /// Raw bytes received so far
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    /// Validate the collected reports and extract the content
    ///
    /// # Errors
    ///
    /// - [`Error::Unresponsive`] if fewer than 3 bytes arrived or the first
    ///   report is not acknowledged. Nothing is decoded in that case.
    /// - [`Error::InvalidReportLength`] if a length byte is out of range.
    /// - [`Error::ResponseTooShort`] if a report is cut short or the payload
    ///   cannot hold the trailer.
    pub fn finish(self) -> Result<Response> {
        let raw = self.raw.freeze();

        if raw.len() < MIN_RAW_LEN {
            return Err(Error::Unresponsive(Unresponsive::ShortResponse {
                received: raw.len(),
            }));
        }

        let status = raw[1];
        if status != ACK {
            return Err(Error::Unresponsive(Unresponsive::NotAcknowledged { status }));
        }

        let mut content = BytesMut::with_capacity(raw.len());
        let mut payload_len = 0;

        for (index, report) in raw.chunks(REPORT_SIZE).enumerate() {
            let offset = index * REPORT_SIZE;
            let declared = declared_length(report[0], offset)?;

            let start = if index == 0 { 2 } else { 1 };
            let end = 1 + declared;

            if end > report.len() {
                return Err(Error::ResponseTooShort {
                    expected: offset + end,
                    actual: raw.len(),
                });
            }

            if end > start {
                content.put_slice(&report[start..end]);
                payload_len += end - start;
            }
        }

        if payload_len < TRAILER_LEN {
            return Err(Error::ResponseTooShort {
                expected: TRAILER_LEN,
                actual: payload_len,
            });
        }

        content.truncate(payload_len - TRAILER_LEN);

        debug!(
            reads = self.reads,
            raw_len = raw.len(),
            payload_len,
            "Reassembled response"
        );

        Ok(Response {
            content: content.freeze(),
            payload_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Frame `content` + trailer the way the device does
    fn device_reports(content: &[u8]) -> Vec<Report> {
        let mut payload = content.to_vec();
        payload.extend_from_slice(b"CS");

        let mut reports = Vec::new();
        let first_len = payload.len().min(6);
        let mut first = [0u8; REPORT_SIZE];
        first[0] = LENGTH_BIAS + first_len as u8 + 1;
        first[1] = ACK;
        first[2..2 + first_len].copy_from_slice(&payload[..first_len]);
        reports.push(first);

        for chunk in payload[first_len..].chunks(7) {
            let mut report = [0u8; REPORT_SIZE];
            report[0] = LENGTH_BIAS + chunk.len() as u8;
            report[1..=chunk.len()].copy_from_slice(chunk);
            reports.push(report);
        }

        reports
    }

    #[test]
    fn test_command_frame() {
        assert_eq!(
            command_frame(Command::ReadRecords),
            [0x04, 0x12, 0x16, 0x18, 0x22, 0x00, 0x00, 0x00]
        );
        assert_eq!(command_frame(Command::WriteControl)[4], 0x23);
    }

    #[test]
    fn test_payload_frames_exact_multiple() {
        let frames = payload_frames(b"ABCDEFGHIJKLMN");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], [7, b'A', b'B', b'C', b'D', b'E', b'F', b'G']);
        assert_eq!(frames[1], [7, b'H', b'I', b'J', b'K', b'L', b'M', b'N']);
    }

    #[test]
    fn test_payload_frames_partial() {
        let frames = payload_frames(b"ABCDEFGHI");
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1], [2, b'H', b'I', 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_payload_frames_empty() {
        assert!(payload_frames(b"").is_empty());
    }

    #[test]
    fn test_payload_frames_delete_request() {
        // 34 characters: 4 full frames and a 6-byte tail
        let frames = payload_frames(b"0000000100000000000000000000000016");
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[4], [6, b'0', b'0', b'0', b'0', b'1', b'6', 0]);
    }

    #[test]
    fn test_reassemble_multiple_reports() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF7, 0x06, b'a', b'b', b'c', b'd', b'e', b'f']);
        reassembler.push(&[0xF4, b'g', b'h', b'X', b'Y', 0, 0, 0]);

        let response = reassembler.finish().unwrap();
        assert_eq!(response.content(), b"abcdefgh");
        // 7 + 4 declared, less the status byte
        assert_eq!(response.payload_len(), 10);
        assert_eq!(response.len(), 8);
    }

    #[test]
    fn test_reassemble_ignores_padding() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF5, 0x06, b'4', b'1', b'Z', b'Z', 0xAA, 0xBB]);

        let response = reassembler.finish().unwrap();
        assert_eq!(response.content(), b"41");
    }

    #[test]
    fn test_reassemble_split_reads() {
        // short reads are stitched back into 8-byte reports
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF7, 0x06, b'a', b'b']);
        reassembler.push(&[b'c', b'd', b'X', b'Y']);

        let response = reassembler.finish().unwrap();
        assert_eq!(response.content(), b"abcd");
    }

    #[test]
    fn test_reassemble_too_short() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF1, 0x06]);

        let result = reassembler.finish();
        assert!(matches!(
            result,
            Err(Error::Unresponsive(Unresponsive::ShortResponse { received: 2 }))
        ));
    }

    #[test]
    fn test_reassemble_nothing_received() {
        let result = Reassembler::new().finish();
        assert!(matches!(
            result,
            Err(Error::Unresponsive(Unresponsive::ShortResponse { received: 0 }))
        ));
    }

    #[test]
    fn test_reassemble_not_acknowledged() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF7, 0x15, b'a', b'b', b'c', b'd', b'X', b'Y']);

        let result = reassembler.finish();
        assert!(matches!(
            result,
            Err(Error::Unresponsive(Unresponsive::NotAcknowledged { status: 0x15 }))
        ));
    }

    #[test]
    fn test_reassemble_invalid_length_byte() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF7, 0x06, b'a', b'b', b'c', b'd', b'X', b'Y']);
        reassembler.push(&[0x42, 0, 0, 0, 0, 0, 0, 0]);

        let result = reassembler.finish();
        assert!(matches!(
            result,
            Err(Error::InvalidReportLength { offset: 8, value: 0x42 })
        ));
    }

    #[test]
    fn test_reassemble_length_above_seven() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF8, 0x06, b'a', b'b', b'c', b'd', b'X', b'Y']);

        assert!(matches!(
            reassembler.finish(),
            Err(Error::InvalidReportLength { offset: 0, value: 0xF8 })
        ));
    }

    #[test]
    fn test_reassemble_truncated_report() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF7, 0x06, b'a', b'b', b'c', b'd', b'X', b'Y']);
        reassembler.push(&[0xF5, b'e', b'f']);

        assert!(matches!(
            reassembler.finish(),
            Err(Error::ResponseTooShort { expected: 14, actual: 11 })
        ));
    }

    #[test]
    fn test_reassemble_missing_trailer() {
        let mut reassembler = Reassembler::new();
        reassembler.push(&[0xF2, 0x06, b'a', 0, 0, 0, 0, 0]);

        assert!(matches!(
            reassembler.finish(),
            Err(Error::ResponseTooShort { expected: 2, actual: 1 })
        ));
    }

    proptest! {
        #[test]
        fn prop_payload_frame_counts(data in proptest::collection::vec(any::<u8>(), 0..200)) {
            let frames = payload_frames(&data);
            let full = data.len() / MAX_CHUNK;
            let remainder = data.len() % MAX_CHUNK;

            prop_assert_eq!(frames.len(), full + usize::from(remainder != 0));
            for frame in &frames[..full] {
                prop_assert_eq!(frame[0] as usize, MAX_CHUNK);
            }
            if remainder != 0 {
                prop_assert_eq!(frames[full][0] as usize, remainder);
            }

            let rebuilt: Vec<u8> = frames
                .iter()
                .flat_map(|f| f[1..=f[0] as usize].to_vec())
                .collect();
            prop_assert_eq!(rebuilt, data);
        }

        #[test]
        fn prop_reassembly_lengths(content in "[0-9A-F]{0,120}") {
            let reports = device_reports(content.as_bytes());

            let declared: usize = reports
                .iter()
                .map(|r| (r[0] - LENGTH_BIAS) as usize)
                .sum();

            let mut reassembler = Reassembler::new();
            for report in &reports {
                reassembler.push(report);
            }
            let response = reassembler.finish().unwrap();

            // the status byte is declared but is not payload
            prop_assert_eq!(response.payload_len(), declared - 1);
            prop_assert_eq!(response.len(), response.payload_len() - 2);
            prop_assert_eq!(response.content().len(), response.len());
            prop_assert_eq!(response.content(), content.as_bytes());
        }
    }
}
