//! High-level device interface

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, trace, warn};

use microlife_core::{
    Command, DEFAULT_READ_TIMEOUT_MS, Reassembler, Request, Response, report, request, response,
};
use microlife_transport::Transport;
use microlife_types::{DeviceParameters, Identifier, RecordSet};

use crate::error::Result;

/// Microlife blood pressure monitor
///
/// Session over one open transport. Every operation is a single blocking
/// request/response exchange; the device is borrowed mutably for its whole
/// duration.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "hid")]
/// # fn main() -> microlife::Result<()> {
/// use microlife::Device;
///
/// let mut device = Device::open()?;
///
/// let records = device.read_records()?;
/// for record in &records {
///     println!("{}", record);
/// }
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "hid"))]
/// # fn main() {}
/// ```
pub struct Device<T: Transport> {
    transport: T,
    read_timeout: Duration,
}

#[cfg(feature = "hid")]
impl Device<microlife_transport::HidTransport> {
    /// Open the single connected monitor over USB HID
    pub fn open() -> Result<Self> {
        let transport = microlife_transport::HidTransport::open()?;
        info!("Connected to {}", transport.description());
        Ok(Self::new(transport))
    }
}

impl<T: Transport> Device<T> {
    /// Create a device over an already open transport
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }

    /// Set the per-report read timeout
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give back the transport
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Read the stored identifier
    pub fn read_identifier(&mut self) -> Result<String> {
        debug!("Reading identifier...");

        let response = self.query(Command::ReadIdentifier)?;
        Ok(response::identifier(response.content())?)
    }

    /// Read the serial number
    pub fn read_serial(&mut self) -> Result<String> {
        debug!("Reading serial number...");

        let response = self.query(Command::ReadSerial)?;
        Ok(response::serial(response.content())?)
    }

    /// Read the raw date and identifier parameters
    pub fn read_parameters(&mut self) -> Result<DeviceParameters> {
        debug!("Reading parameters...");

        let response = self.query(Command::ReadParameters)?;
        Ok(response::parameters(response.content())?)
    }

    /// Replace the stored identifier; measurements are kept
    pub fn set_identifier(&mut self, identifier: &Identifier) -> Result<()> {
        info!("Setting identifier to '{}'", identifier);

        self.send_request(&request::set_identifier(identifier))
    }

    /// Erase all stored measurements; the identifier is kept
    pub fn delete_all_data(&mut self) -> Result<()> {
        warn!("Deleting all stored measurements...");

        self.send_request(&request::delete_data())
    }

    /// Set the device clock to the local time
    pub fn set_time_to_now(&mut self) -> Result<()> {
        let params = self.read_parameters()?;
        self.write_time(Local::now().naive_local(), &params)
    }

    /// Set the device clock
    pub fn set_time(&mut self, at: NaiveDateTime) -> Result<()> {
        let params = self.read_parameters()?;
        self.write_time(at, &params)
    }

    /// Read the identifier and all stored measurements
    ///
    /// An empty [`RecordSet`] means the device holds no measurements.
    pub fn read_records(&mut self) -> Result<RecordSet> {
        debug!("Reading records...");

        let response = self.query(Command::ReadRecords)?;
        let records = response::records(response.content())?;

        info!(
            "Read {} records for '{}'",
            records.len(),
            records.identifier
        );

        Ok(records)
    }

    // Helper methods

    fn write_time(&mut self, at: NaiveDateTime, params: &DeviceParameters) -> Result<()> {
        info!("Setting device time to {}", at);

        self.send_request(&request::set_time(at, &params.identifier_field))
    }

    /// Send a command and collect its response
    fn query(&mut self, command: Command) -> Result<Response> {
        self.send_command(command)?;
        self.read_response()
    }

    fn send_request(&mut self, request: &Request) -> Result<()> {
        trace!("Sending: {}", request);

        self.send_command(request.command)?;
        self.send_payload(&request.payload)
    }

    /// Write the command frame selecting `command`
    pub fn send_command(&mut self, command: Command) -> Result<()> {
        trace!("Sending command {}", command);

        self.transport.write_report(&report::command_frame(command))?;
        Ok(())
    }

    /// Write a payload as consecutive payload frames
    pub fn send_payload(&mut self, payload: &str) -> Result<()> {
        for frame in report::payload_frames(payload.as_bytes()) {
            self.transport.write_report(&frame)?;
        }
        Ok(())
    }

    /// Read reports until the device goes quiet and reassemble them
    pub fn read_response(&mut self) -> Result<Response> {
        let mut reassembler = Reassembler::new();

        loop {
            let data = self.transport.read_report(self.read_timeout)?;
            if data.is_empty() {
                break;
            }
            reassembler.push(&data);
        }

        let response = reassembler.finish()?;
        trace!("Received: {:?}", response);

        Ok(response)
    }
}
