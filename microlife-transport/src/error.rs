//! Transport errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Device {vendor_id:04x}:{product_id:04x} not found: absent or not powered on")]
    DeviceNotFound {
        vendor_id: u16,
        product_id: u16,
    },
    
    #[error("{count} devices match {vendor_id:04x}:{product_id:04x}, expected exactly one")]
    MultipleDevices {
        vendor_id: u16,
        product_id: u16,
        count: usize,
    },
    
    #[cfg(feature = "hid")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),
}
