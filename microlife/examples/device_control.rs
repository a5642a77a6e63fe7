//! Device control example

use microlife::{Device, Identifier};

fn main() -> microlife::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();
    
    let id = std::env::var("MONITOR_ID").unwrap_or_else(|_| "PATIENT".to_string());
    let id = Identifier::new(id)?;
    
    let mut device = Device::open()?;
    
    println!("Serial: {}", device.read_serial()?);
    println!("Current id: {}", device.read_identifier()?);
    
    // Sync the clock
    device.set_time_to_now()?;
    
    println!("Setting id to {}...", id);
    device.set_identifier(&id)?;
    
    println!("Done!");
    
    Ok(())
}
