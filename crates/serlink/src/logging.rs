use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Environment variable holding filter directives (`target=level,...`).
/// When set it overrides `--log-level` entirely.
pub const LOG_ENV: &str = "SERLINK_LOG";

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// The requested level applies to the serlink crates only; everything else
/// (serialport and its transitive chatter) stays at `warn`.
fn default_directives(level: LogLevel) -> String {
    let level = level.as_str();
    format!(
        "warn,serlink={level},serlink_session={level},\
         serlink_transport={level},serlink_frame={level}"
    )
}

pub fn init_logging(format: LogFormat, level: LogLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
