/// Severity of a device log line, for display purposes.
///
/// The wire carries a raw byte; anything outside 1..=3 maps to `Invalid`.
/// An invalid severity is not a protocol error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSeverity {
    Error,
    Warning,
    Info,
    Invalid,
}

impl LogSeverity {
    /// Map the wire severity byte to its display category.
    pub fn from_wire(byte: u8) -> Self {
        match byte {
            1 => Self::Error,
            2 => Self::Warning,
            3 => Self::Info,
            _ => Self::Invalid,
        }
    }

    /// Display label, matching what the device documentation uses.
    pub fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Invalid => "INVALID",
        }
    }
}

impl std::fmt::Display for LogSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle events emitted by a session and drained by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Handshake completed: the device name resolved and the session is
    /// ready. Fires exactly once.
    Open,
    /// The device emitted a log line.
    Log {
        /// Raw severity byte as sent by the device.
        severity: u8,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_mapping() {
        assert_eq!(LogSeverity::from_wire(1), LogSeverity::Error);
        assert_eq!(LogSeverity::from_wire(2), LogSeverity::Warning);
        assert_eq!(LogSeverity::from_wire(3), LogSeverity::Info);
        assert_eq!(LogSeverity::from_wire(0), LogSeverity::Invalid);
        assert_eq!(LogSeverity::from_wire(0x7F), LogSeverity::Invalid);
    }

    #[test]
    fn severity_labels() {
        assert_eq!(LogSeverity::Error.label(), "ERROR");
        assert_eq!(LogSeverity::Warning.label(), "WARNING");
        assert_eq!(LogSeverity::Info.label(), "INFO");
        assert_eq!(LogSeverity::Invalid.label(), "INVALID");
        assert_eq!(LogSeverity::Info.to_string(), "INFO");
    }
}
