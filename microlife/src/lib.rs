//! # microlife
//!
//! Rust implementation of the Microlife USB blood pressure monitor protocol.
//!
//! ## Features
//!
//! - Type-safe protocol implementation
//! - Blocking API over any [`Transport`]
//! - USB HID transport behind the `hid` feature
//! - Typed errors, no process exit on device failure
//!
//! ## Quick Start
//!
//! ```no_run
//! # #[cfg(feature = "hid")]
//! # fn main() -> microlife::Result<()> {
//! use microlife::Device;
//!
//! let mut device = Device::open()?;
//!
//! println!("id: {}", device.read_identifier()?);
//!
//! let records = device.read_records()?;
//! if records.is_empty() {
//!     println!("no measurements stored");
//! }
//! for record in &records {
//!     println!("{}", record);
//! }
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "hid"))]
//! # fn main() {}
//! ```

pub mod device;
pub mod error;

// Re-exports
pub use device::Device;
pub use error::{Error, Result};

// Re-export types
pub use microlife_core::{Command, PRODUCT_ID, Response, VENDOR_ID};
pub use microlife_transport::Transport;
#[cfg(feature = "hid")]
pub use microlife_transport::HidTransport;
pub use microlife_types::{
    DeviceParameters, Identifier, MeasurementMode, MeasurementRecord, RecordSet,
};
