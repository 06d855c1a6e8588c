use crate::error::{FrameError, Result};

/// Control frames are exactly this many bytes on the wire.
pub const FRAME_SIZE: usize = 6;

/// Terminator byte: every valid frame ends with 0xFF.
pub const TERMINATOR: u8 = 0xFF;

/// Reserved byte at offset 4, always written as 0x00.
///
/// Devices in the field do not set it, so it is deliberately unchecked on
/// decode.
pub const RESERVED: u8 = 0x00;

/// A decoded control frame.
///
/// Wire layout:
/// ```text
/// ┌─────────────┬──────┬──────┬──────┬──────────┬────────────┐
/// │ instruction │ a0   │ a1   │ a2   │ reserved │ terminator │
/// │ (1B)        │ (1B) │ (1B) │ (1B) │ 0x00     │ 0xFF       │
/// └─────────────┴──────┴──────┴──────┴──────────┴────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Selects which handler processes this frame.
    pub instruction: u8,
    pub a0: u8,
    pub a1: u8,
    pub a2: u8,
}

impl Frame {
    /// Create a new frame.
    pub fn new(instruction: u8, a0: u8, a1: u8, a2: u8) -> Self {
        Self {
            instruction,
            a0,
            a1,
            a2,
        }
    }

    /// Encode this frame into its wire bytes.
    pub fn encode(&self) -> [u8; FRAME_SIZE] {
        encode_frame(self.instruction, self.a0, self.a1, self.a2)
    }
}

/// Encode a control frame. Pure, cannot fail.
pub fn encode_frame(instruction: u8, a0: u8, a1: u8, a2: u8) -> [u8; FRAME_SIZE] {
    [instruction, a0, a1, a2, RESERVED, TERMINATOR]
}

/// Decode a control frame from its 6 wire bytes.
///
/// Fails with [`FrameError::BadTerminator`] when byte 5 is not 0xFF.
pub fn decode_frame(buf: &[u8; FRAME_SIZE]) -> Result<Frame> {
    if buf[5] != TERMINATOR {
        return Err(FrameError::BadTerminator { found: buf[5] });
    }
    Ok(Frame {
        instruction: buf[0],
        a0: buf[1],
        a1: buf[2],
        a2: buf[3],
    })
}

/// Size of the out-of-band payload announced by a vector frame.
///
/// The device packs it little-endian across frame bytes 1 and 2.
pub fn announce_size(buf: &[u8; FRAME_SIZE]) -> u16 {
    u16::from(buf[1]) | u16::from(buf[2]) << 8
}

/// Key of the vector announced by a vector frame, from frame bytes 3 and 4.
pub fn announce_key(buf: &[u8; FRAME_SIZE]) -> u16 {
    u16::from(buf[3]) | u16::from(buf[4]) << 8
}

/// Combine two payload bytes into a 16-bit vector key, low byte first.
pub fn vector_key(low: u8, high: u8) -> u16 {
    u16::from(low) | u16::from(high) << 8
}
