//! Dump every stored measurement

use microlife::Device;

fn main() -> microlife::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut device = Device::open()?;

    let records = device.read_records()?;
    println!("Records for '{}'", records.identifier);

    if records.is_empty() {
        println!("No records stored");
        return Ok(());
    }

    for record in &records {
        println!("{}", record);
    }

    Ok(())
}
