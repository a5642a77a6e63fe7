//! USB HID transport for Microlife monitors
//!
//! The monitor enumerates as a single HID interface (vendor 0x04b4,
//! product 0x5500) exchanging 8-byte reports without report ids.

use std::time::Duration;

use bytes::Bytes;
use hidapi::{HidApi, HidDevice};
use microlife_core::{PRODUCT_ID, REPORT_SIZE, Report, VENDOR_ID};
use tracing::{debug, trace, warn};

use crate::{Transport, error::*};

/// HID transport for the monitor
///
/// Owns the open device handle; the device is closed on drop.
pub struct HidTransport {
    device: HidDevice,
    vendor_id: u16,
    product_id: u16,
    path: String,
}

impl HidTransport {
    /// Open the single connected monitor
    pub fn open() -> Result<Self> {
        Self::open_with(VENDOR_ID, PRODUCT_ID)
    }

    /// Open the single device matching `vendor_id:product_id`
    ///
    /// # Errors
    ///
    /// - [`Error::DeviceNotFound`] if no device matches
    /// - [`Error::MultipleDevices`] if more than one does
    pub fn open_with(vendor_id: u16, product_id: u16) -> Result<Self> {
        let api = HidApi::new()?;

        let mut matches: Vec<_> = api
            .device_list()
            .filter(|d| d.vendor_id() == vendor_id && d.product_id() == product_id)
            .collect();

        // Some platforms list one entry per usage of the same interface
        matches.dedup_by(|a, b| a.path() == b.path());

        let info = match matches.as_slice() {
            [] => {
                return Err(Error::DeviceNotFound {
                    vendor_id,
                    product_id,
                });
            }
            [info] => *info,
            _ => {
                warn!("{} devices match {:04x}:{:04x}", matches.len(), vendor_id, product_id);
                return Err(Error::MultipleDevices {
                    vendor_id,
                    product_id,
                    count: matches.len(),
                });
            }
        };

        let path = info.path().to_string_lossy().into_owned();
        debug!("Opening {:04x}:{:04x} at {}", vendor_id, product_id, path);

        let device = info.open_device(&api)?;

        debug!("Opened {:04x}:{:04x}", vendor_id, product_id);

        Ok(Self {
            device,
            vendor_id,
            product_id,
            path,
        })
    }
}

impl Transport for HidTransport {
    fn write_report(&mut self, report: &Report) -> Result<()> {
        // hidapi expects the report id first; the monitor uses none (0)
        let mut buf = [0u8; REPORT_SIZE + 1];
        buf[1..].copy_from_slice(report);

        trace!("Writing report: {:02X?}", report);

        self.device.write(&buf)?;

        Ok(())
    }

    fn read_report(&mut self, timeout: Duration) -> Result<Bytes> {
        let mut buf = [0u8; REPORT_SIZE];
        let timeout_ms = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);

        let n = self.device.read_timeout(&mut buf, timeout_ms)?;

        if n == 0 {
            trace!("No report within {} ms", timeout_ms);
            return Ok(Bytes::new());
        }

        trace!("Read {} bytes: {:02X?}", n, &buf[..n]);

        Ok(Bytes::copy_from_slice(&buf[..n]))
    }

    fn description(&self) -> String {
        format!("{:04x}:{:04x} ({})", self.vendor_id, self.product_id, self.path)
    }
}
