use std::collections::VecDeque;
use std::time::Instant;

use serlink_frame::{
    announce_key, announce_size, decode_frame, encode_frame, vector_key, DEVICE_ERROR, FRAME_SIZE,
    INFO, NAME, VECTOR_ANNOUNCE,
};
use serlink_transport::SerialLink;
use tracing::{debug, info, trace};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::event::SessionEvent;
use crate::registry::{BuiltinCommand, CommandRegistry, Dispatch};
use crate::vector::VectorStore;

/// Lifecycle state of a device session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Link open, nothing exchanged yet.
    Connected,
    /// Info and name requests sent, waiting for the device to answer.
    AwaitingHandshake,
    /// Name resolved; the session is usable.
    Ready,
    /// Terminal. Entered on any protocol violation or device-reported error.
    Faulted,
}

/// Outcome of one `poll` step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Fewer than 6 bytes were buffered; nothing was consumed.
    Idle,
    /// One frame (and any out-of-band payload it announced) was processed.
    Processed,
}

/// A host-side session with one device over a serial link.
///
/// The session owns the command registry and vector store exclusively and is
/// driven by a single caller repeatedly invoking [`Session::poll`]. It is not
/// reentrant; if it must cross threads, wrap the whole session in a mutex.
/// Every protocol error is fatal: the session faults and stays faulted.
pub struct Session<L> {
    link: L,
    config: SessionConfig,
    state: SessionState,
    registry: CommandRegistry,
    vectors: VectorStore,
    events: VecDeque<SessionEvent>,
    device_id: u8,
    device_version: u8,
    device_library_version: u8,
    device_name: Option<String>,
}

impl<L: SerialLink> Session<L> {
    /// Create a session over an open link with default configuration.
    pub fn new(link: L) -> Self {
        Self::with_config(link, SessionConfig::default())
    }

    /// Create a session with explicit configuration.
    ///
    /// The built-in handlers (info, name, log) are installed immediately so
    /// user registrations can never shadow them.
    pub fn with_config(link: L, config: SessionConfig) -> Self {
        Self {
            link,
            config,
            state: SessionState::Connected,
            registry: CommandRegistry::with_builtins(),
            vectors: VectorStore::new(),
            events: VecDeque::new(),
            device_id: 0,
            device_version: 0,
            device_library_version: 0,
            device_name: None,
        }
    }

    /// Start the handshake: request the device's info and name.
    pub fn begin(&mut self) -> Result<()> {
        self.write_command(INFO, 0, 0, 0)?;
        self.write_command(NAME, 0, 0, 0)?;
        self.state = SessionState::AwaitingHandshake;
        debug!("handshake requests sent");
        Ok(())
    }

    /// Register a user handler for an instruction byte.
    pub fn register<F>(&mut self, instruction: u8, handler: F) -> Result<()>
    where
        F: FnMut(u8, u8, u8) + Send + 'static,
    {
        self.registry.register(instruction, handler)
    }

    /// Encode and write a command frame.
    ///
    /// No state validation happens here: callers may write before the
    /// handshake completes, exactly as the wire contract allows.
    pub fn write_command(&mut self, instruction: u8, a0: u8, a1: u8, a2: u8) -> Result<()> {
        let wire = encode_frame(instruction, a0, a1, a2);
        self.link.write_all(&wire)?;
        self.link.flush()?;
        trace!(
            instruction = format_args!("0x{instruction:02X}"),
            "command written"
        );
        Ok(())
    }

    /// Process at most one step of the protocol.
    ///
    /// Returns `Step::Idle` without consuming anything when fewer than 6
    /// bytes are buffered. Any error faults the session permanently.
    pub fn poll(&mut self) -> Result<Step> {
        if self.state == SessionState::Faulted {
            return Err(SessionError::Faulted);
        }
        match self.poll_inner() {
            Ok(step) => Ok(step),
            Err(err) => {
                self.state = SessionState::Faulted;
                Err(err)
            }
        }
    }

    fn poll_inner(&mut self) -> Result<Step> {
        if self.link.bytes_available()? < FRAME_SIZE {
            return Ok(Step::Idle);
        }

        let mut raw = [0u8; FRAME_SIZE];
        self.link.read_exact(&mut raw)?;
        let frame = decode_frame(&raw)?;

        match frame.instruction {
            DEVICE_ERROR => {
                // The device appends free-form text on the rest of the line.
                let line = self.link.read_line()?;
                let mut text = line.trim_end_matches(['\r', '\n']).to_string();
                text.push_str(&String::from_utf8_lossy(&raw));
                Err(SessionError::DeviceReported(text))
            }
            VECTOR_ANNOUNCE => {
                let size = announce_size(&raw);
                let key = announce_key(&raw);
                self.receive_vector(key, size)?;
                Ok(Step::Processed)
            }
            instruction => {
                match self
                    .registry
                    .dispatch(instruction, frame.a0, frame.a1, frame.a2)?
                {
                    Dispatch::Handled => {}
                    Dispatch::Builtin(builtin) => {
                        self.run_builtin(builtin, frame.a0, frame.a1, frame.a2)?;
                    }
                }
                Ok(Step::Processed)
            }
        }
    }

    /// Consume the announced out-of-band payload before frame parsing
    /// resumes. The wait is deadline-bounded; a stalled link surfaces as
    /// `VectorTransferTimeout` instead of spinning forever.
    fn receive_vector(&mut self, key: u16, size: u16) -> Result<()> {
        trace!(key, size, "vector transfer announced");

        let deadline = Instant::now() + self.config.vector_transfer_timeout;
        while self.link.bytes_available()? < usize::from(size) {
            if Instant::now() >= deadline {
                return Err(SessionError::VectorTransferTimeout {
                    key,
                    size,
                    timeout: self.config.vector_transfer_timeout,
                });
            }
            std::thread::sleep(self.config.vector_poll_interval);
        }

        let mut payload = vec![0u8; usize::from(size)];
        self.link.read_exact(&mut payload)?;
        self.vectors.insert(key, payload);
        Ok(())
    }

    fn run_builtin(&mut self, builtin: BuiltinCommand, a0: u8, a1: u8, a2: u8) -> Result<()> {
        match builtin {
            BuiltinCommand::Info => {
                self.device_id = a0;
                self.device_library_version = a1;
                self.device_version = a2;
                debug!(
                    device_id = a0,
                    library_version = a1,
                    firmware_version = a2,
                    "device info received"
                );
            }
            BuiltinCommand::Name => {
                let key = vector_key(a0, a1);
                let name = self.vectors.read_string(key)?;
                self.vectors.release(key);
                info!(name = %name, "device ready");
                self.device_name = Some(name);
                self.state = SessionState::Ready;
                self.events.push_back(SessionEvent::Open);
                self.write_command(0x04, 0, 0, 0)?;
            }
            BuiltinCommand::Log => {
                let key = vector_key(a1, a2);
                let message = self.vectors.read_string(key)?;
                self.vectors.release(key);
                self.events.push_back(SessionEvent::Log {
                    severity: a0,
                    message,
                });
            }
        }
        Ok(())
    }

    /// Pop the next pending session event, if any.
    pub fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.pop_front()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Device id reported during handshake (0 until info arrives).
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    /// Device firmware version reported during handshake.
    pub fn device_version(&self) -> u8 {
        self.device_version
    }

    /// Protocol library version running on the device.
    pub fn device_library_version(&self) -> u8 {
        self.device_library_version
    }

    /// Device name, once the handshake resolved it.
    pub fn device_name(&self) -> Option<&str> {
        self.device_name.as_deref()
    }

    /// Read a stored vector directly (for user handlers).
    pub fn read_vector(&self, key: u16) -> Result<bytes::Bytes> {
        self.vectors.read(key)
    }

    /// Release a vector after a user handler consumed it.
    pub fn release_vector(&mut self, key: u16) {
        self.vectors.release(key)
    }

    /// Borrow the underlying link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutably borrow the underlying link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Consume the session and return the link.
    pub fn into_link(self) -> L {
        self.link
    }
}

impl<L> std::fmt::Debug for Session<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("device_id", &self.device_id)
            .field("device_name", &self.device_name)
            .field("pending_events", &self.events.len())
            .finish()
    }
}
