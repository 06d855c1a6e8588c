/// Errors that can occur on a serial link.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to open the named serial port.
    #[error("failed to open serial port {port}: {source}")]
    Open {
        port: String,
        source: std::io::Error,
    },

    /// An I/O error occurred on the link.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking read did not complete within the link's timeout.
    #[error("link read timed out")]
    Timeout,

    /// The other end of the link went away.
    #[error("link disconnected")]
    Disconnected,
}

pub type Result<T> = std::result::Result<T, TransportError>;
