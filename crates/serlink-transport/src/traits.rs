use crate::error::Result;

/// A connected byte-oriented serial link.
///
/// This is the surface the protocol engine polls: how many bytes are
/// buffered, exact reads, a line read for device-reported error text, and
/// flushed writes. Implementations are free to buffer internally as long as
/// `bytes_available` reflects what `read_exact` can return without blocking.
pub trait SerialLink {
    /// Number of bytes that can be read without blocking.
    fn bytes_available(&mut self) -> Result<usize>;

    /// Read exactly `buf.len()` bytes, blocking until they arrive or the
    /// link's own timeout elapses.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read up to and including the next `\n`, returning the bytes as text.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; the device side of
    /// this protocol only ever sends ASCII here.
    fn read_line(&mut self) -> Result<String>;

    /// Write the entire buffer.
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;

    /// Flush any buffered output to the device.
    fn flush(&mut self) -> Result<()>;
}

/// Blanket impl so `&mut L` can be handed to code that takes `impl SerialLink`.
impl<L: SerialLink + ?Sized> SerialLink for &mut L {
    fn bytes_available(&mut self) -> Result<usize> {
        (**self).bytes_available()
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_exact(buf)
    }

    fn read_line(&mut self) -> Result<String> {
        (**self).read_line()
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        (**self).write_all(buf)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
