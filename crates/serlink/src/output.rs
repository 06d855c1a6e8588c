use std::io::IsTerminal;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serlink_session::LogSeverity;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Device identity as resolved by the handshake.
pub struct DeviceSummary<'a> {
    pub name: &'a str,
    pub id: u8,
    pub version: u8,
    pub library_version: u8,
}

#[derive(Serialize)]
struct DeviceOutput<'a> {
    event: &'a str,
    device_name: &'a str,
    device_id: u8,
    device_version: u8,
    device_library_version: u8,
    timestamp: String,
}

#[derive(Serialize)]
struct LogOutput<'a> {
    event: &'a str,
    device_id: u8,
    severity: u8,
    severity_label: &'a str,
    message: &'a str,
    timestamp: String,
}

pub fn print_device_open(device: &DeviceSummary<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = DeviceOutput {
                event: "open",
                device_name: device.name,
                device_id: device.id,
                device_version: device.version,
                device_library_version: device.library_version,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["NAME", "ID", "VERSION", "LIBRARY", "STATUS"])
                .add_row(vec![
                    device.name.to_string(),
                    device.id.to_string(),
                    device.version.to_string(),
                    device.library_version.to_string(),
                    "CONNECTED".to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("device name: {}", device.name);
            println!("device id: {}", device.id);
            println!("device version: {}", device.version);
            println!("library version: {}", device.library_version);
            println!("status: CONNECTED");
        }
    }
}

pub fn print_device_log(device_id: u8, severity: u8, message: &str, format: OutputFormat) {
    let label = LogSeverity::from_wire(severity).label();
    match format {
        OutputFormat::Json => {
            let out = LogOutput {
                event: "log",
                device_id,
                severity,
                severity_label: label,
                message,
                timestamp: now_unix_seconds(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("[DEVICE::{device_id}] [{label}] {message}");
        }
    }
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
