use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod monitor;
pub mod ports;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Connect to a device, run the handshake and stream its log output.
    Monitor(MonitorArgs),
    /// Write a single raw command frame.
    Send(SendArgs),
    /// List serial ports visible on this machine.
    Ports(PortsArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Monitor(args) => monitor::run(args, format),
        Command::Send(args) => send::run(args, format),
        Command::Ports(args) => ports::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Serial port to open (e.g. /dev/ttyUSB0, COM3).
    pub port: String,
    /// Baud rate.
    #[arg(long, short = 'b', default_value = "9600")]
    pub baud: u32,
    /// Vector transfer timeout (e.g. 5s, 500ms).
    #[arg(long, default_value = "1s")]
    pub vector_timeout: String,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Serial port to open.
    pub port: String,
    /// Baud rate.
    #[arg(long, short = 'b', default_value = "9600")]
    pub baud: u32,
    /// Instruction byte (decimal or 0x-prefixed hex).
    #[arg(long, short = 'i')]
    pub instruction: String,
    /// First payload byte.
    #[arg(long, default_value = "0")]
    pub a0: String,
    /// Second payload byte.
    #[arg(long, default_value = "0")]
    pub a1: String,
    /// Third payload byte.
    #[arg(long, default_value = "0")]
    pub a2: String,
}

#[derive(Args, Debug, Default)]
pub struct PortsArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
