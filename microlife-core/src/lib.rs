//! # microlife-core
//!
//! Core protocol implementation for Microlife USB blood pressure monitors.
//!
//! This crate provides the low-level protocol primitives:
//! - HID report framing and response reassembly
//! - Request checksum and ASCII-hex field encoding
//! - Request builders
//! - Response decoders
//! - Command definitions and protocol constants

pub mod checksum;
pub mod command;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod report;
pub mod request;
pub mod response;

pub use command::Command;
pub use error::{Error, Result, Unresponsive};
pub use report::{Reassembler, Report, Response};
pub use request::Request;

pub use constants::{DEFAULT_READ_TIMEOUT_MS, PRODUCT_ID, REPORT_SIZE, VENDOR_ID};
