//! Fixed-size control frame codec for the serlink protocol.
//!
//! Every control message is exactly 6 bytes:
//! - An instruction byte selecting the handler
//! - Three payload bytes
//! - A reserved byte (written 0x00)
//! - A 0xFF terminator for stream-desync detection
//!
//! Variable-length data never rides inside a frame; it travels out-of-band
//! after a `VECTOR_ANNOUNCE` frame that names its size and 16-bit key.

pub mod codec;
pub mod error;
pub mod instruction;

pub use codec::{
    announce_key, announce_size, decode_frame, encode_frame, vector_key, Frame, FRAME_SIZE,
    RESERVED, TERMINATOR,
};
pub use error::{FrameError, Result};
pub use instruction::{
    instruction_name, is_builtin, is_reserved, DEVICE_ERROR, INFO, LOG, NAME, VECTOR_ANNOUNCE,
};
