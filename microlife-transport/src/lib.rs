//! Transport layer for the Microlife protocol
//!
//! Provides fixed-size report I/O with the monitor.

pub mod error;
#[cfg(feature = "hid")]
pub mod hid;

pub use error::{Error, Result};
#[cfg(feature = "hid")]
pub use hid::HidTransport;

use std::time::Duration;

use bytes::Bytes;
use microlife_core::Report;

/// Report channel to the monitor
///
/// Writes are fire-and-forget. Reads return at most one report and an empty
/// buffer once nothing arrives within the timeout.
pub trait Transport: Send {
    /// Write one 8-byte report
    fn write_report(&mut self, report: &Report) -> Result<()>;
    
    /// Read up to one report, empty on timeout
    fn read_report(&mut self, timeout: Duration) -> Result<Bytes>;
    
    /// Human-readable device description
    fn description(&self) -> String;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        (**self).write_report(report)
    }
    
    fn read_report(&mut self, timeout: Duration) -> Result<Bytes> {
        (**self).read_report(timeout)
    }
    
    fn description(&self) -> String {
        (**self).description()
    }
}
