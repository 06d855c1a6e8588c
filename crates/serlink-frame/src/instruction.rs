//! Built-in instruction bytes.
//!
//! 0x01, 0x02 and 0x04 are built-in commands dispatched through the
//! registry. 0x03 and 0x07 are reserved: the session intercepts them before
//! dispatch because they change how the stream itself is read.

/// Device identity report (id, library version, firmware version).
pub const INFO: u8 = 0x01;

/// Device name report; payload carries the key of a name vector.
pub const NAME: u8 = 0x02;

/// Vector announce; followed by raw out-of-band payload bytes.
pub const VECTOR_ANNOUNCE: u8 = 0x03;

/// Device log line; payload carries severity and a message vector key.
pub const LOG: u8 = 0x04;

/// Device-reported fatal error; remainder of the line is error text.
pub const DEVICE_ERROR: u8 = 0x07;

/// Returns a human-readable name for an instruction byte.
pub fn instruction_name(instruction: u8) -> &'static str {
    match instruction {
        INFO => "INFO",
        NAME => "NAME",
        VECTOR_ANNOUNCE => "VECTOR_ANNOUNCE",
        LOG => "LOG",
        DEVICE_ERROR => "DEVICE_ERROR",
        _ => "USER",
    }
}

/// Returns true for instructions the session intercepts before dispatch.
pub fn is_reserved(instruction: u8) -> bool {
    matches!(instruction, VECTOR_ANNOUNCE | DEVICE_ERROR)
}

/// Returns true for instructions handled by a built-in registry entry.
pub fn is_builtin(instruction: u8) -> bool {
    matches!(instruction, INFO | NAME | LOG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_and_builtin_are_disjoint() {
        for byte in 0u8..=255 {
            assert!(!(is_reserved(byte) && is_builtin(byte)));
        }
    }

    #[test]
    fn names_cover_known_instructions() {
        assert_eq!(instruction_name(INFO), "INFO");
        assert_eq!(instruction_name(NAME), "NAME");
        assert_eq!(instruction_name(VECTOR_ANNOUNCE), "VECTOR_ANNOUNCE");
        assert_eq!(instruction_name(LOG), "LOG");
        assert_eq!(instruction_name(DEVICE_ERROR), "DEVICE_ERROR");
        assert_eq!(instruction_name(0x99), "USER");
    }
}
