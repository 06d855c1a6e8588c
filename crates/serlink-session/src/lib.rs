//! Session layer for the serlink protocol.
//!
//! This is the engine: it owns the read loop semantics, the vector store,
//! and the command registry, implements the built-in instructions (info,
//! name, log), drives the handshake, and surfaces lifecycle events. One
//! caller drives it by polling; every protocol violation is fatal.

pub mod config;
pub mod error;
pub mod event;
pub mod registry;
pub mod session;
pub mod vector;

pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use event::{LogSeverity, SessionEvent};
pub use registry::{BuiltinCommand, CommandRegistry, Dispatch, UserHandler};
pub use session::{Session, SessionState, Step};
