/// Errors that can occur while decoding a control frame.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// Byte 5 of the frame was not the 0xFF terminator.
    ///
    /// There is no checksum beyond the terminator in this protocol, and no
    /// way to resynchronize the stream once it is violated.
    #[error("bad frame terminator 0x{found:02X} (expected 0xFF)")]
    BadTerminator { found: u8 },
}

pub type Result<T> = std::result::Result<T, FrameError>;
