use serlink_session::Session;
use serlink_transport::SerialPortLink;

use crate::cmd::SendArgs;
use crate::exit::{session_error, transport_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

pub fn run(args: SendArgs, _format: OutputFormat) -> CliResult<i32> {
    let instruction = parse_byte("--instruction", &args.instruction)?;
    let a0 = parse_byte("--a0", &args.a0)?;
    let a1 = parse_byte("--a1", &args.a1)?;
    let a2 = parse_byte("--a2", &args.a2)?;

    let link = SerialPortLink::open(&args.port, args.baud)
        .map_err(|err| transport_error("open failed", err))?;

    // Raw frame write: the wire contract allows commands in any state, so no
    // handshake is required here.
    let mut session = Session::new(link);
    session
        .write_command(instruction, a0, a1, a2)
        .map_err(|err| session_error("write failed", err))?;

    Ok(SUCCESS)
}

fn parse_byte(flag: &str, input: &str) -> CliResult<u8> {
    let input = input.trim();
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else {
        input.parse()
    };
    parsed.map_err(|_| CliError::new(USAGE, format!("{flag} expects a byte value, got '{input}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_byte_decimal_and_hex() {
        assert_eq!(parse_byte("--a0", "0").unwrap(), 0);
        assert_eq!(parse_byte("--a0", "255").unwrap(), 255);
        assert_eq!(parse_byte("--instruction", "0x10").unwrap(), 0x10);
        assert_eq!(parse_byte("--instruction", "0XFF").unwrap(), 0xFF);
    }

    #[test]
    fn parse_byte_rejects_out_of_range_and_garbage() {
        assert!(parse_byte("--a0", "256").is_err());
        assert!(parse_byte("--a0", "-1").is_err());
        assert!(parse_byte("--a0", "0xZZ").is_err());
        assert!(parse_byte("--a0", "ten").is_err());
    }
}
