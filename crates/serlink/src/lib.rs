//! Host-side engine for a point-to-point serial device control protocol.
//!
//! serlink talks to an embedded device over a byte-oriented serial link
//! using fixed 6-byte control frames plus an out-of-band side-channel for
//! variable-length blobs ("vectors") addressed by 16-bit key. The session
//! layer drives the info/name handshake, dispatches instructions to
//! built-in or user handlers, and surfaces device log lines as events.
//!
//! ```no_run
//! use serlink::{MemoryLink, Session, SessionEvent, Step};
//!
//! let mut session = Session::new(MemoryLink::new());
//! session.begin()?;
//! loop {
//!     if session.poll()? == Step::Idle {
//!         break;
//!     }
//!     while let Some(event) = session.next_event() {
//!         match event {
//!             SessionEvent::Open => println!("device: {:?}", session.device_name()),
//!             SessionEvent::Log { severity, message } => {
//!                 println!("[{severity}] {message}");
//!             }
//!         }
//!     }
//! }
//! # Ok::<(), serlink::SessionError>(())
//! ```

pub use serlink_frame::{
    announce_key, announce_size, decode_frame, encode_frame, instruction_name, is_builtin,
    is_reserved, vector_key, Frame, FrameError, DEVICE_ERROR, FRAME_SIZE, INFO, LOG, NAME,
    RESERVED, TERMINATOR, VECTOR_ANNOUNCE,
};
pub use serlink_session::{
    BuiltinCommand, CommandRegistry, Dispatch, LogSeverity, Session, SessionConfig, SessionError,
    SessionEvent, SessionState, Step,
};
pub use serlink_transport::{MemoryLink, SerialLink, TransportError};
#[cfg(feature = "serial")]
pub use serlink_transport::{available_ports, PortInfo, SerialPortLink};
