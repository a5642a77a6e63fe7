//! Stored measurement records

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};

/// Format of [`MeasurementRecord::date`]
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Measurement mode flag of a record
///
/// The device stores a two-character flag per record. `"20"` is a plain
/// reading, every other value is reported as MAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementMode {
    /// Raw flag `"20"`, printed as `0`
    Standard,

    /// Any other flag, printed as `N`
    Mam,
}

impl MeasurementMode {
    /// Raw flag value for a standard reading
    pub const STANDARD_FLAG: &'static str = "20";

    /// Map the raw two-character flag
    pub fn from_flag(flag: &str) -> Self {
        if flag == Self::STANDARD_FLAG {
            Self::Standard
        } else {
            Self::Mam
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "0",
            Self::Mam => "N",
        }
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean arterial pressure from diastolic and systolic values
///
/// `dia + (sys - dia) / 3`, truncated toward zero.
///
/// # Examples
///
/// ```
/// use microlife_types::record::mean_arterial_pressure;
///
/// assert_eq!(mean_arterial_pressure(80, 120), 93);
/// ```
pub fn mean_arterial_pressure(diastolic: u16, systolic: u16) -> u16 {
    // Same value as dia + (sys - dia) / 3 without going negative when sys < dia
    let total = 2 * u32::from(diastolic) + u32::from(systolic);
    (total / 3) as u16
}

/// One stored blood pressure reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementRecord {
    /// Measurement date, `YYYY-MM-DD HH:MM`
    pub date: String,

    /// Measurement mode flag
    pub mode: MeasurementMode,

    /// Pulse (beats per minute)
    pub pulse: u16,

    /// Diastolic pressure (mmHg)
    pub diastolic: u16,

    /// Systolic pressure (mmHg)
    pub systolic: u16,
}

impl MeasurementRecord {
    pub fn new(
        date: impl Into<String>,
        mode: MeasurementMode,
        pulse: u16,
        diastolic: u16,
        systolic: u16,
    ) -> Self {
        Self {
            date: date.into(),
            mode,
            pulse,
            diastolic,
            systolic,
        }
    }

    /// Mean arterial pressure (mmHg)
    pub fn mean_arterial_pressure(&self) -> u16 {
        mean_arterial_pressure(self.diastolic, self.systolic)
    }

    /// Parse the measurement date
    pub fn timestamp(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| Error::Parse(format!("record date '{}': {}", self.date, e)))
    }
}

impl fmt::Display for MeasurementRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.date,
            self.pulse,
            self.diastolic,
            self.systolic,
            self.mean_arterial_pressure(),
            self.mode
        )
    }
}

/// Record dump read from the device
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSet {
    /// Identifier the records are stored under
    pub identifier: String,

    /// Records in device order
    pub records: Vec<MeasurementRecord>,
}

impl RecordSet {
    pub fn new(identifier: impl Into<String>, records: Vec<MeasurementRecord>) -> Self {
        Self {
            identifier: identifier.into(),
            records,
        }
    }

    /// True when the device holds no measurements
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MeasurementRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a MeasurementRecord;
    type IntoIter = std::slice::Iter<'a, MeasurementRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
