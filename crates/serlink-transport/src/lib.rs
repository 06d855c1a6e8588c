//! Byte-oriented serial link abstraction for serlink.
//!
//! The protocol engine only needs five operations from its transport:
//! how many bytes are buffered, exact reads, a line read, writes, and flush.
//! [`SerialLink`] captures that surface; [`MemoryLink`] scripts it in-process
//! for tests and demos, and `SerialPortLink` (feature `serial`) talks to real
//! hardware.

pub mod error;
pub mod mem;
#[cfg(feature = "serial")]
pub mod serial;
pub mod traits;

pub use error::{Result, TransportError};
pub use mem::MemoryLink;
#[cfg(feature = "serial")]
pub use serial::{available_ports, PortInfo, SerialPortLink};
pub use traits::SerialLink;
