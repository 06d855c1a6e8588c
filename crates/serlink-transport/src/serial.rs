use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

use tracing::debug;

use crate::error::{Result, TransportError};
use crate::traits::SerialLink;

/// Default per-read timeout applied to the opened port.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// A [`SerialLink`] backed by a real serial port.
pub struct SerialPortLink {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialPortLink {
    /// Open `port` at `baud_rate` with the default read timeout.
    pub fn open(port: &str, baud_rate: u32) -> Result<Self> {
        Self::open_with_timeout(port, baud_rate, DEFAULT_READ_TIMEOUT)
    }

    /// Open `port` at `baud_rate` with an explicit read timeout.
    pub fn open_with_timeout(port: &str, baud_rate: u32, timeout: Duration) -> Result<Self> {
        let opened = serialport::new(port, baud_rate)
            .timeout(timeout)
            .open()
            .map_err(|err| TransportError::Open {
                port: port.to_string(),
                source: std::io::Error::from(err),
            })?;
        debug!(port, baud_rate, "opened serial port");
        Ok(Self { port: opened })
    }

    /// Name of the underlying port, if the platform reports one.
    pub fn port_name(&self) -> Option<String> {
        self.port.name()
    }
}

impl SerialLink for SerialPortLink {
    fn bytes_available(&mut self) -> Result<usize> {
        let available = self
            .port
            .bytes_to_read()
            .map_err(|err| TransportError::Io(std::io::Error::from(err)))?;
        Ok(available as usize)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.port.read_exact(buf).map_err(map_io)
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.port.read_exact(&mut byte) {
                Ok(()) => {
                    line.push(byte[0]);
                    if byte[0] == b'\n' {
                        break;
                    }
                }
                // A timeout mid-line terminates the read with what we have,
                // matching how the device emits a single newline-ended line.
                Err(err) if err.kind() == ErrorKind::TimedOut => break,
                Err(err) => return Err(map_io(err)),
            }
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.port.write_all(buf).map_err(map_io)
    }

    fn flush(&mut self) -> Result<()> {
        self.port.flush().map_err(map_io)
    }
}

/// A serial port visible on this machine.
#[derive(Debug, Clone)]
pub struct PortInfo {
    /// Platform port name (e.g. `/dev/ttyUSB0`, `COM3`).
    pub name: String,
    /// Port kind: "usb", "pci", "bluetooth" or "unknown".
    pub kind: &'static str,
    /// USB product string, when the platform reports one.
    pub product: Option<String>,
}

/// Enumerate the serial ports visible on this machine.
pub fn available_ports() -> Result<Vec<PortInfo>> {
    let ports = serialport::available_ports()
        .map_err(|err| TransportError::Io(std::io::Error::from(err)))?;
    Ok(ports
        .into_iter()
        .map(|port| {
            let (kind, product) = match port.port_type {
                serialport::SerialPortType::UsbPort(usb) => ("usb", usb.product),
                serialport::SerialPortType::PciPort => ("pci", None),
                serialport::SerialPortType::BluetoothPort => ("bluetooth", None),
                serialport::SerialPortType::Unknown => ("unknown", None),
            };
            PortInfo {
                name: port.port_name,
                kind,
                product,
            }
        })
        .collect())
}

fn map_io(err: std::io::Error) -> TransportError {
    match err.kind() {
        ErrorKind::TimedOut | ErrorKind::WouldBlock => TransportError::Timeout,
        ErrorKind::BrokenPipe | ErrorKind::UnexpectedEof => TransportError::Disconnected,
        _ => TransportError::Io(err),
    }
}

impl std::fmt::Debug for SerialPortLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialPortLink")
            .field("port", &self.port.name())
            .finish()
    }
}
