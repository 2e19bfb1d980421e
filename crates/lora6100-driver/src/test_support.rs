//! Test doubles shared by the driver unit tests.

use std::io::{self, Read};
use std::sync::{Arc, Mutex};

use crate::transport::Transport;

/// Observable side effects of a [`MockTransport`].
///
/// Held behind an `Arc` so tests can inspect it after the driver has taken
/// ownership of the transport.
#[derive(Debug, Default)]
pub(crate) struct MockState {
    /// Everything written through the transport, in order.
    pub written: Vec<u8>,
    /// RTS states in the order they were applied.
    pub rts_calls: Vec<bool>,
    /// Baud rates in the order they were applied.
    pub baud_changes: Vec<u32>,
    /// Number of times the buffers were cleared.
    pub clears: usize,
}

/// In-memory [`Transport`] that replays scripted input and records writes,
/// RTS transitions, and baud changes into a shared [`MockState`].
pub(crate) struct MockTransport {
    rx: io::Cursor<Vec<u8>>,
    state: Arc<Mutex<MockState>>,
    opened: bool,
}

impl MockTransport {
    pub fn with_input(input: &[u8]) -> MockTransport {
        MockTransport {
            rx: io::Cursor::new(input.to_vec()),
            state: Arc::new(Mutex::new(MockState::default())),
            opened: false,
        }
    }

    /// Handle to the recorded side effects.
    pub fn state(&self) -> Arc<Mutex<MockState>> {
        Arc::clone(&self.state)
    }
}

impl Transport for MockTransport {
    fn open(&mut self) -> io::Result<()> {
        self.opened = true;
        Ok(())
    }

    fn close(&mut self) {
        self.opened = false;
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.rx.read_exact(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.state.lock().unwrap().written.extend_from_slice(buf);
        Ok(())
    }

    fn set_rts(&mut self, asserted: bool) -> io::Result<()> {
        self.state.lock().unwrap().rts_calls.push(asserted);
        Ok(())
    }

    fn set_baud(&mut self, baud: u32) -> io::Result<()> {
        self.state.lock().unwrap().baud_changes.push(baud);
        Ok(())
    }

    fn clear_buffers(&mut self) -> io::Result<()> {
        self.state.lock().unwrap().clears += 1;
        Ok(())
    }

    fn try_clone(&self) -> io::Result<Box<dyn Transport>> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "mock transport cannot be cloned",
        ))
    }
}
