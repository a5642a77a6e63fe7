//! Protocol constants

/// USB vendor id of the monitor
pub const VENDOR_ID: u16 = 0x04b4;

/// USB product id of the monitor
pub const PRODUCT_ID: u16 = 0x5500;

/// Size of every HID report, both directions
pub const REPORT_SIZE: usize = 8;

/// Default read timeout per report (milliseconds)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1000;

/// Outgoing framing
pub mod frame {
    /// Fixed prefix of a command frame
    pub const COMMAND_HEADER: [u8; 4] = [0x04, 0x12, 0x16, 0x18];

    /// Payload bytes carried by one payload frame
    pub const MAX_CHUNK: usize = 7;
}

/// Incoming framing
pub mod response {
    /// Bias added to the payload length in byte 0 of each report
    pub const LENGTH_BIAS: u8 = 0xF0;

    /// Largest payload length a report may declare
    pub const MAX_REPORT_PAYLOAD: usize = 7;

    /// ACK status in byte 1 of the first report
    pub const ACK: u8 = 0x06;

    /// Smallest raw response the device sends
    pub const MIN_RAW_LEN: usize = 3;

    /// Trailing checksum/terminator bytes
    pub const TRAILER_LEN: usize = 2;
}

/// Request payload layout
pub mod request {
    /// Prefix of the set-identifier control block
    pub const SET_ID_PREFIX: &str = "00010001";

    /// Width of the ASCII-hex identifier field
    pub const ID_FIELD_WIDTH: usize = 22;

    /// Filler digit of the identifier field
    pub const ID_FILLER: char = '9';

    /// Zero run after the identifier field
    pub const SET_ID_ZERO_RUN: usize = 35;

    /// Delete-data control block, checksum included
    pub const DELETE_DATA: &str = "0000000100000000000000000000000016";

    /// Clock format of the set-time request
    pub const TIME_FORMAT: &str = "%m%d%Y%H%M%S";

    /// Separator between clock and identifier in the set-time request
    pub const TIME_SEPARATOR: &str = "0000";
}

/// Response content layout
pub mod layout {
    /// Identifier terminators, in scan order
    pub const SENTINELS: [&[u8; 2]; 2] = [b"99", b"00"];

    /// Identifier window of a ReadIdentifier response
    pub const ID_WINDOW: usize = 22;

    /// Date field of a ReadParameters response
    pub const PARAM_DATE: std::ops::Range<usize> = 0..14;

    /// Identifier field of a ReadParameters response
    pub const PARAM_ID: std::ops::Range<usize> = 18..80;

    /// Record count of a ReadRecords response
    pub const RECORD_COUNT: std::ops::Range<usize> = 0..4;

    /// Start of the identifier in a ReadRecords response
    pub const RECORD_ID_START: usize = 8;

    /// Sentinel window of a ReadRecords response
    pub const RECORD_ID_WINDOW: std::ops::Range<usize> = 16..30;

    /// Offset of the first record
    pub const RECORDS_START: usize = 32;

    /// Size of one record
    pub const RECORD_STRIDE: usize = 32;

    /// Field offsets within one record
    pub mod record {
        use std::ops::Range;

        pub const DATE: Range<usize> = 0..10;
        pub const MODE: Range<usize> = 10..12;
        pub const PULSE: Range<usize> = 16..19;
        pub const DIASTOLIC: Range<usize> = 19..22;
        pub const SYSTOLIC: Range<usize> = 22..24;

        /// Bytes of a record that are actually decoded
        pub const USED_LEN: usize = SYSTOLIC.end;

        /// Diastolic values are stored multiplied by this
        pub const DIASTOLIC_SCALE: u16 = 4;
    }
}
