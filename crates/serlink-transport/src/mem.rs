use std::collections::VecDeque;

use crate::error::{Result, TransportError};
use crate::traits::SerialLink;

/// In-memory serial link for tests and demos.
///
/// Inbound bytes are scripted with [`MemoryLink::feed`]; everything the
/// engine writes is captured and can be inspected with
/// [`MemoryLink::written`] or drained with [`MemoryLink::take_written`].
/// `read_exact` never blocks: asking for more bytes than were fed is an
/// error, which is what makes transfer-timeout paths testable.
#[derive(Debug, Default)]
pub struct MemoryLink {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    flushes: usize,
}

impl MemoryLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the engine to read.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    /// Everything written to the link so far.
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Drain and return the captured output.
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }

    /// Number of `flush` calls observed.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl SerialLink for MemoryLink {
    fn bytes_available(&mut self) -> Result<usize> {
        Ok(self.rx.len())
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.rx.len() < buf.len() {
            return Err(TransportError::Timeout);
        }
        for slot in buf.iter_mut() {
            *slot = self.rx.pop_front().ok_or(TransportError::Timeout)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = Vec::new();
        loop {
            match self.rx.pop_front() {
                Some(b'\n') => {
                    line.push(b'\n');
                    break;
                }
                Some(byte) => line.push(byte),
                None => break,
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.tx.extend_from_slice(buf);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}
