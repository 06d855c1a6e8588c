use std::time::Duration;

/// Errors that can occur in a device session.
///
/// Every protocol-level variant is fatal to the session: there is no
/// resynchronization path on this wire format, so the session transitions to
/// `Faulted` and the caller must re-open the link to continue.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Link-level error.
    #[error("transport error: {0}")]
    Transport(#[from] serlink_transport::TransportError),

    /// Frame-level error (stream is desynchronized).
    #[error("frame error: {0}")]
    Frame(#[from] serlink_frame::FrameError),

    /// A frame arrived for an instruction with no registered handler.
    #[error("unknown instruction 0x{0:02X}")]
    UnknownInstruction(u8),

    /// A handler was already registered for this instruction byte.
    #[error("instruction 0x{0:02X} already has a registered handler")]
    DuplicateInstruction(u8),

    /// A vector was referenced before being announced, or after release.
    #[error("unknown vector key {0}")]
    UnknownKey(u16),

    /// The device reported an error (instruction 0x07) with this text.
    #[error("device reported error: {0}")]
    DeviceReported(String),

    /// The announced vector payload did not arrive within the deadline.
    #[error("vector {key} transfer timed out after {timeout:?} ({size} bytes expected)")]
    VectorTransferTimeout {
        key: u16,
        size: u16,
        timeout: Duration,
    },

    /// The session already faulted; re-open the link to continue.
    #[error("session is faulted")]
    Faulted,
}

pub type Result<T> = std::result::Result<T, SessionError>;
