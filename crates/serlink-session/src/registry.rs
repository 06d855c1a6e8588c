use std::collections::HashMap;

use serlink_frame::{instruction_name, is_reserved, INFO, LOG, NAME};
use tracing::trace;

use crate::error::{Result, SessionError};

/// Built-in commands the session implements itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinCommand {
    /// 0x01 — device identity from the frame payload.
    Info,
    /// 0x02 — device name from a vector.
    Name,
    /// 0x04 — device log line from a vector.
    Log,
}

/// A user-registered instruction handler.
pub type UserHandler = Box<dyn FnMut(u8, u8, u8) + Send>;

enum Handler {
    Builtin(BuiltinCommand),
    User(UserHandler),
}

/// Outcome of dispatching an instruction.
///
/// Built-ins need access to session state (vector store, identity fields,
/// the outbound writer), so the registry reports which one fired and the
/// session runs it; user handlers are invoked in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A user handler ran.
    Handled,
    /// A built-in matched; the session must execute it.
    Builtin(BuiltinCommand),
}

/// Maps instruction bytes to handlers.
///
/// Keys are unique: registering twice is an explicit error rather than
/// last-wins. The reserved instructions 0x03 and 0x07 never appear here;
/// the session intercepts them before dispatch.
pub struct CommandRegistry {
    handlers: HashMap<u8, Handler>,
}

impl CommandRegistry {
    /// An empty registry, no built-ins.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// A registry with the session built-ins (info, name, log) installed.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .handlers
            .insert(INFO, Handler::Builtin(BuiltinCommand::Info));
        registry
            .handlers
            .insert(NAME, Handler::Builtin(BuiltinCommand::Name));
        registry
            .handlers
            .insert(LOG, Handler::Builtin(BuiltinCommand::Log));
        registry
    }

    /// Register a user handler for `instruction`.
    ///
    /// Fails with `DuplicateInstruction` when the byte is already taken by a
    /// built-in or an earlier registration, or names a reserved instruction.
    pub fn register<F>(&mut self, instruction: u8, handler: F) -> Result<()>
    where
        F: FnMut(u8, u8, u8) + Send + 'static,
    {
        if is_reserved(instruction) || self.handlers.contains_key(&instruction) {
            return Err(SessionError::DuplicateInstruction(instruction));
        }
        self.handlers
            .insert(instruction, Handler::User(Box::new(handler)));
        Ok(())
    }

    /// Look up and invoke the handler for `instruction`.
    pub fn dispatch(&mut self, instruction: u8, a0: u8, a1: u8, a2: u8) -> Result<Dispatch> {
        match self.handlers.get_mut(&instruction) {
            Some(Handler::Builtin(builtin)) => Ok(Dispatch::Builtin(*builtin)),
            Some(Handler::User(handler)) => {
                trace!(
                    instruction = format_args!("0x{instruction:02X}"),
                    name = instruction_name(instruction),
                    "dispatching user handler"
                );
                handler(a0, a1, a2);
                Ok(Dispatch::Handled)
            }
            None => Err(SessionError::UnknownInstruction(instruction)),
        }
    }

    /// Whether any handler is registered for `instruction`.
    pub fn contains(&self, instruction: u8) -> bool {
        self.handlers.contains_key(&instruction)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut instructions: Vec<u8> = self.handlers.keys().copied().collect();
        instructions.sort_unstable();
        f.debug_struct("CommandRegistry")
            .field("instructions", &instructions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serlink_frame::{DEVICE_ERROR, VECTOR_ANNOUNCE};

    use super::*;

    #[test]
    fn user_handler_receives_payload() {
        let seen = Arc::new(std::sync::Mutex::new(None));
        let seen_clone = Arc::clone(&seen);

        let mut registry = CommandRegistry::new();
        registry
            .register(0x10, move |a0, a1, a2| {
                *seen_clone.lock().unwrap() = Some((a0, a1, a2));
            })
            .unwrap();

        assert_eq!(registry.dispatch(0x10, 1, 2, 3).unwrap(), Dispatch::Handled);
        assert_eq!(*seen.lock().unwrap(), Some((1, 2, 3)));
    }

    #[test]
    fn unknown_instruction_invokes_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let mut registry = CommandRegistry::with_builtins();
        registry
            .register(0x10, move |_, _, _| {
                calls_clone.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let err = registry.dispatch(0x99, 0, 0, 0).unwrap_err();
        assert!(matches!(err, SessionError::UnknownInstruction(0x99)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn duplicate_registration_rejected() {
        let mut registry = CommandRegistry::new();
        registry.register(0x20, |_, _, _| {}).unwrap();

        let err = registry.register(0x20, |_, _, _| {}).unwrap_err();
        assert!(matches!(err, SessionError::DuplicateInstruction(0x20)));
    }

    #[test]
    fn builtin_bytes_cannot_be_taken() {
        let mut registry = CommandRegistry::with_builtins();
        for byte in [INFO, NAME, LOG] {
            let err = registry.register(byte, |_, _, _| {}).unwrap_err();
            assert!(matches!(err, SessionError::DuplicateInstruction(b) if b == byte));
        }
    }

    #[test]
    fn reserved_bytes_cannot_be_taken() {
        let mut registry = CommandRegistry::new();
        for byte in [VECTOR_ANNOUNCE, DEVICE_ERROR] {
            let err = registry.register(byte, |_, _, _| {}).unwrap_err();
            assert!(matches!(err, SessionError::DuplicateInstruction(b) if b == byte));
        }
    }

    #[test]
    fn builtins_are_reported_not_invoked() {
        let mut registry = CommandRegistry::with_builtins();
        assert_eq!(
            registry.dispatch(INFO, 7, 2, 5).unwrap(),
            Dispatch::Builtin(BuiltinCommand::Info)
        );
        assert_eq!(
            registry.dispatch(NAME, 9, 0, 0).unwrap(),
            Dispatch::Builtin(BuiltinCommand::Name)
        );
        assert_eq!(
            registry.dispatch(LOG, 1, 9, 0).unwrap(),
            Dispatch::Builtin(BuiltinCommand::Log)
        );
    }
}
