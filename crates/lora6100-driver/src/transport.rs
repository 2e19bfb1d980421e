//! Byte-stream transport abstraction and its serial port implementation.
//!
//! The driver and the relay engine only need blocking byte I/O plus two
//! out-of-band controls: the RTS line (wired to the module's SET pin) and the
//! baud rate. Everything else about the OS serial port stays behind this
//! trait, which also keeps the driver testable without hardware.

use std::io::{self, Read, Write};
use std::time::Duration;

use lora6100_protocol::DEFAULT_BAUD_RATE;
use serialport::{ClearBuffer, SerialPort};

/// Poll interval used to emulate indefinitely blocking reads on top of the
/// serial port's timeout mechanism.
const READ_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A blocking byte-stream device with RTS and baud-rate control.
///
/// All operations may block the calling thread; none of them time out. A
/// silent device blocks a read forever, which is the hardware's behavioral
/// contract and is deliberately not mitigated here. Callers own cancellation.
pub trait Transport: Send {
    /// Open the device. Must be called before any other operation.
    fn open(&mut self) -> io::Result<()>;

    /// Release the device.
    fn close(&mut self);

    /// Read exactly `buf.len()` bytes, blocking until they arrive.
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()>;

    /// Write all of `buf`, blocking until it is accepted.
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()>;

    /// Assert or deassert the RTS control line.
    fn set_rts(&mut self, asserted: bool) -> io::Result<()>;

    /// Reconfigure the local baud rate.
    fn set_baud(&mut self, baud: u32) -> io::Result<()>;

    /// Discard any pending input and output.
    fn clear_buffers(&mut self) -> io::Result<()>;

    /// Clone the handle, so one clone can read while the other writes.
    fn try_clone(&self) -> io::Result<Box<dyn Transport>>;
}

/// [`Transport`] implementation over an OS serial port.
pub struct SerialTransport {
    path: String,
    baud: u32,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    /// Create a transport for the given port path at the module's default
    /// baud rate. The port is not opened until [`Transport::open`].
    pub fn new(path: impl Into<String>) -> SerialTransport {
        SerialTransport {
            path: path.into(),
            baud: DEFAULT_BAUD_RATE,
            port: None,
        }
    }

    fn port_mut(&mut self) -> io::Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port not open"))
    }
}

impl Transport for SerialTransport {
    fn open(&mut self) -> io::Result<()> {
        let port = serialport::new(&self.path, self.baud)
            .timeout(READ_POLL_INTERVAL)
            .open()?;
        self.port = Some(port);
        Ok(())
    }

    fn close(&mut self) {
        // Dropping the handle releases the port.
        self.port = None;
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        let port = self.port_mut()?;
        let mut filled = 0;
        while filled < buf.len() {
            match port.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "serial port closed",
                    ))
                }
                Ok(n) => filled += n,
                // The port-level timeout only exists so this loop can keep
                // polling; the Transport contract is to block indefinitely.
                Err(e) if e.kind() == io::ErrorKind::TimedOut => continue,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        let port = self.port_mut()?;
        port.write_all(buf)?;
        port.flush()
    }

    fn set_rts(&mut self, asserted: bool) -> io::Result<()> {
        self.port_mut()?
            .write_request_to_send(asserted)
            .map_err(io::Error::from)
    }

    fn set_baud(&mut self, baud: u32) -> io::Result<()> {
        self.baud = baud;
        self.port_mut()?.set_baud_rate(baud).map_err(io::Error::from)
    }

    fn clear_buffers(&mut self) -> io::Result<()> {
        self.port_mut()?
            .clear(ClearBuffer::All)
            .map_err(io::Error::from)
    }

    fn try_clone(&self) -> io::Result<Box<dyn Transport>> {
        let port = self
            .port
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port not open"))?
            .try_clone()?;
        Ok(Box::new(SerialTransport {
            path: self.path.clone(),
            baud: self.baud,
            port: Some(port),
        }))
    }
}
