use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::error::{Result, SessionError};

/// Store for out-of-band byte blobs ("vectors") keyed by a device-assigned
/// 16-bit identifier.
///
/// A vector comes into being when the device announces it (key + size) and
/// its payload bytes follow on the stream. Handlers read it once and release
/// it. A vector that is announced but never consumed stays until the device
/// reuses its key; a re-announce plainly overwrites the old contents.
#[derive(Debug, Default)]
pub struct VectorStore {
    entries: HashMap<u16, Bytes>,
}

impl VectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a received payload, replacing any blob already under `key`.
    pub fn insert(&mut self, key: u16, payload: impl Into<Bytes>) {
        let payload = payload.into();
        debug!(key, len = payload.len(), "vector stored");
        self.entries.insert(key, payload);
    }

    /// Read a stored vector. Cheap to clone; the blob itself is shared.
    pub fn read(&self, key: u16) -> Result<Bytes> {
        self.entries
            .get(&key)
            .cloned()
            .ok_or(SessionError::UnknownKey(key))
    }

    /// Read a stored vector as text (lossy; device strings are ASCII).
    pub fn read_string(&self, key: u16) -> Result<String> {
        let bytes = self.read(key)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Release a vector after consumption. No-op when already absent.
    pub fn release(&mut self, key: u16) {
        if self.entries.remove(&key).is_some() {
            trace!(key, "vector released");
        }
    }

    /// Number of vectors currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_read_release() {
        let mut store = VectorStore::new();
        store.insert(9, &b"hello"[..]);
        assert_eq!(store.read(9).unwrap().as_ref(), b"hello");
        assert_eq!(store.read_string(9).unwrap(), "hello");

        store.release(9);
        assert!(matches!(store.read(9), Err(SessionError::UnknownKey(9))));
    }

    #[test]
    fn release_is_idempotent() {
        let mut store = VectorStore::new();
        store.release(42);
        store.insert(42, &b"x"[..]);
        store.release(42);
        store.release(42);
        assert!(store.is_empty());
    }

    #[test]
    fn reinserted_key_overwrites() {
        let mut store = VectorStore::new();
        store.insert(7, &b"old"[..]);
        store.insert(7, &b"new"[..]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.read(7).unwrap().as_ref(), b"new");
    }

    #[test]
    fn unknown_key_carries_the_key() {
        let store = VectorStore::new();
        match store.read(0x1234) {
            Err(SessionError::UnknownKey(key)) => assert_eq!(key, 0x1234),
            other => panic!("expected UnknownKey, got {other:?}"),
        }
    }
}
