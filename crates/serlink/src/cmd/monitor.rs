use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serlink_session::{Session, SessionConfig, SessionEvent, Step};
use serlink_transport::SerialPortLink;

use crate::cmd::MonitorArgs;
use crate::exit::{session_error, transport_error, CliError, CliResult, SUCCESS};
use crate::output::{print_device_log, print_device_open, DeviceSummary, OutputFormat};

/// How long to sleep when a poll step found nothing to read.
const IDLE_SLEEP: Duration = Duration::from_millis(2);

pub fn run(args: MonitorArgs, format: OutputFormat) -> CliResult<i32> {
    let vector_timeout = parse_duration(&args.vector_timeout)?;
    let link = SerialPortLink::open(&args.port, args.baud)
        .map_err(|err| transport_error("open failed", err))?;

    let config = SessionConfig {
        vector_transfer_timeout: vector_timeout,
        ..SessionConfig::default()
    };
    let mut session = Session::with_config(link, config);
    session
        .begin()
        .map_err(|err| session_error("handshake failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    install_ctrlc_handler(running.clone())?;

    while running.load(Ordering::SeqCst) {
        let step = session
            .poll()
            .map_err(|err| session_error("session failed", err))?;

        while let Some(event) = session.next_event() {
            match event {
                SessionEvent::Open => {
                    let summary = DeviceSummary {
                        name: session.device_name().unwrap_or(""),
                        id: session.device_id(),
                        version: session.device_version(),
                        library_version: session.device_library_version(),
                    };
                    print_device_open(&summary, format);
                }
                SessionEvent::Log { severity, message } => {
                    print_device_log(session.device_id(), severity, &message, format);
                }
            }
        }

        if step == Step::Idle {
            std::thread::sleep(IDLE_SLEEP);
        }
    }

    Ok(SUCCESS)
}

fn install_ctrlc_handler(running: Arc<AtomicBool>) -> CliResult<()> {
    ctrlc::set_handler(move || {
        running.store(false, Ordering::SeqCst);
    })
    .map_err(|err| {
        CliError::new(
            crate::exit::INTERNAL,
            format!("signal handler setup failed: {err}"),
        )
    })
}

pub(crate) fn parse_duration(input: &str) -> CliResult<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::new(
            crate::exit::USAGE,
            "duration must not be empty",
        ));
    }

    let (number, unit) = if let Some(num) = input.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = input.strip_suffix('s') {
        (num, "s")
    } else {
        (input, "s")
    };

    let value: u64 = number.parse().map_err(|_| {
        CliError::new(
            crate::exit::USAGE,
            format!("invalid duration value: {input}"),
        )
    })?;

    if value == 0 {
        return Err(CliError::new(
            crate::exit::USAGE,
            "duration must be greater than zero",
        ));
    }

    match unit {
        "ms" => Ok(Duration::from_millis(value)),
        _ => Ok(Duration::from_secs(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_seconds_and_millis() {
        assert_eq!(parse_duration("2s").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
        assert_eq!(parse_duration("3").unwrap(), Duration::from_secs(3));
    }

    #[test]
    fn parse_duration_rejects_invalid_values() {
        assert!(parse_duration("0s").is_err());
        assert!(parse_duration("bad").is_err());
        assert!(parse_duration("").is_err());
    }
}
