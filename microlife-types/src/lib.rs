//! Type definitions for microlife

pub mod error;
pub mod identifier;
pub mod parameters;
pub mod record;

pub use error::{Error, Result};
pub use identifier::Identifier;
pub use parameters::DeviceParameters;
pub use record::{MeasurementMode, MeasurementRecord, RecordSet};
