mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "serlink", version, about = "Serial device control CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level for the serlink crates (stderr). The SERLINK_LOG
    /// environment variable overrides this with full filter directives.
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_monitor_subcommand() {
        let cli = Cli::try_parse_from(["serlink", "monitor", "/dev/ttyUSB0", "--baud", "115200"])
            .expect("monitor args should parse");
        assert!(matches!(cli.command, Command::Monitor(_)));
    }

    #[test]
    fn parses_send_subcommand_with_hex_instruction() {
        let cli = Cli::try_parse_from([
            "serlink",
            "send",
            "/dev/ttyUSB0",
            "--instruction",
            "0x10",
            "--a0",
            "1",
        ])
        .expect("send args should parse");
        assert!(matches!(cli.command, Command::Send(_)));
    }

    #[test]
    fn send_requires_instruction() {
        let err = Cli::try_parse_from(["serlink", "send", "/dev/ttyUSB0"])
            .expect_err("send without --instruction should fail");
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn parses_ports_subcommand() {
        let cli = Cli::try_parse_from(["serlink", "ports", "--format", "json"])
            .expect("ports args should parse");
        assert!(matches!(cli.command, Command::Ports(_)));
    }
}
