//! Command-line front end for Microlife monitors

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use microlife::{Device, HidTransport, Identifier, RecordSet};

/// Read and manage a Microlife USB blood pressure monitor.
#[derive(Parser, Debug)]
#[command(name = "microlife", version, about)]
struct Cli {
    /// Vendor ID (hex, e.g. 0x04b4)
    #[arg(long, global = true, value_parser = parse_hex_u16, default_value = "0x04b4")]
    vid: u16,

    /// Product ID (hex, e.g. 0x5500)
    #[arg(long, global = true, value_parser = parse_hex_u16, default_value = "0x5500")]
    pid: u16,

    /// Per-report read timeout in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    timeout_ms: u64,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every stored measurement
    Records,
    /// Erase all measurements; the identifier is kept
    Delete,
    /// Set the device clock to the local time
    SetTime,
    /// Print the serial number
    Serial,
    /// Print the stored identifier
    GetId,
    /// Store a new identifier; measurements are kept
    SetId {
        /// Up to 11 printable ASCII characters. An id ending in ')', '9',
        /// 'I', 'Y', 'i' or 'y' is stored but cannot be read back.
        id: Identifier,
    },
}

fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let s = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(s, 16).map_err(|e| format!("invalid hex value '{s}': {e}"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_records(out: &mut impl Write, records: &RecordSet) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Records for id '{}'", records.identifier)?;
    writeln!(out)?;

    if records.is_empty() {
        writeln!(out, "No records stored")?;
        return Ok(());
    }

    writeln!(out, "date pulse dia syst map mam")?;
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let transport = HidTransport::open_with(cli.vid, cli.pid).with_context(|| {
        format!("Failed to open monitor {:04x}:{:04x}", cli.vid, cli.pid)
    })?;

    let mut device =
        Device::new(transport).with_read_timeout(Duration::from_millis(cli.timeout_ms));
    debug!("Running {:?}", cli.command);

    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Records => {
            let records = device.read_records().context("Failed to read records")?;
            print_records(&mut stdout, &records)?;
        }
        Commands::Delete => {
            device.delete_all_data().context("Failed to delete measurements")?;
        }
        Commands::SetTime => {
            device.set_time_to_now().context("Failed to set device time")?;
        }
        Commands::Serial => {
            let serial = device.read_serial().context("Failed to read serial number")?;
            writeln!(stdout, "serial: {}", serial)?;
        }
        Commands::GetId => {
            let id = device.read_identifier().context("Failed to read identifier")?;
            writeln!(stdout, "id: {}", id)?;
        }
        Commands::SetId { id } => {
            device.set_identifier(&id).context("Failed to set identifier")?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use microlife::{MeasurementMode, MeasurementRecord, PRODUCT_ID, VENDOR_ID};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_hex_u16() {
        assert_eq!(parse_hex_u16("0x04b4"), Ok(0x04b4));
        assert_eq!(parse_hex_u16("0X5500"), Ok(0x5500));
        assert_eq!(parse_hex_u16("5500"), Ok(0x5500));
        assert!(parse_hex_u16("0xZZZZ").is_err());
        assert!(parse_hex_u16("0x10000").is_err());
    }

    #[test]
    fn test_default_ids_match_monitor() {
        let cli = Cli::try_parse_from(["microlife", "records"]).unwrap();
        assert_eq!(cli.vid, VENDOR_ID);
        assert_eq!(cli.pid, PRODUCT_ID);
        assert_eq!(cli.timeout_ms, 1000);
        assert!(matches!(cli.command, Commands::Records));
    }

    #[test]
    fn test_set_id_validates() {
        let cli = Cli::try_parse_from(["microlife", "set-id", "JOHN"]).unwrap();
        match cli.command {
            Commands::SetId { id } => assert_eq!(id.as_str(), "JOHN"),
            other => panic!("unexpected command {:?}", other),
        }

        assert!(Cli::try_parse_from(["microlife", "set-id", "WAY-TOO-LONG-ID"]).is_err());
        assert!(Cli::try_parse_from(["microlife", "set-id"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "microlife", "-vv", "get-id", "--vid", "0x1234", "--timeout-ms", "250",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.vid, 0x1234);
        assert_eq!(cli.timeout_ms, 250);
        assert!(matches!(cli.command, Commands::GetId));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["microlife"]).is_err());
    }

    #[test]
    fn test_print_records() {
        let records = RecordSet::new(
            "JOHN",
            vec![
                MeasurementRecord::new("2023-06-15 10:30", MeasurementMode::Mam, 75, 80, 120),
                MeasurementRecord::new("2023-06-16 08:05", MeasurementMode::Standard, 62, 70, 115),
            ],
        );

        let mut out = Vec::new();
        print_records(&mut out, &records).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nRecords for id 'JOHN'\n\n\
             date pulse dia syst map mam\n\
             2023-06-15 10:30 75 80 120 93 N\n\
             2023-06-16 08:05 62 70 115 85 0\n"
        );
    }

    #[test]
    fn test_print_records_empty() {
        let mut out = Vec::new();
        print_records(&mut out, &RecordSet::new("JOHN", Vec::new())).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Records for id 'JOHN'"));
        assert!(text.ends_with("No records stored\n"));
        assert!(!text.contains("date pulse"));
    }
}
