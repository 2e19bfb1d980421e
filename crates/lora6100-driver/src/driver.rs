//! The settings-mode state machine and typed command exchanges.

use std::thread;
use std::time::Duration;

use log::{debug, info, trace};
use lora6100_protocol::{Command, Parameters, RetStatus, SerialBaudRate, LINE_ENDING};

use crate::error::DriverError;
use crate::line_reader::read_line;
use crate::transport::{SerialTransport, Transport};

/// Default settle delay after entering settings mode.
// Empirical; the true minimum is unverified (seems to be around 6 ms).
pub const SETTINGS_ENTER_DELAY: Duration = Duration::from_millis(20);

/// Default settle delay after leaving settings mode, before the module is
/// ready to relay data again.
pub const SETTINGS_EXIT_DELAY: Duration = Duration::from_millis(100);

/// Settle delays applied around settings-mode transitions.
///
/// These model the hardware's line-to-ready latency. The defaults are
/// empirically chosen and not provably sufficient on all hardware revisions,
/// so they are kept configurable rather than hard-coded.
#[derive(Debug, Clone, Copy)]
pub struct SettleDelays {
    /// Wait after asserting the SET line before the first command byte.
    pub settings_enter: Duration,
    /// Wait after deasserting the SET line before relay traffic.
    pub settings_exit: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        SettleDelays {
            settings_enter: SETTINGS_ENTER_DELAY,
            settings_exit: SETTINGS_EXIT_DELAY,
        }
    }
}

impl SettleDelays {
    /// Zero delays, for tests and simulated transports.
    pub fn none() -> Self {
        SettleDelays {
            settings_enter: Duration::ZERO,
            settings_exit: Duration::ZERO,
        }
    }
}

/// Which mode the module is currently in.
///
/// Owned exclusively by the driver; nothing else observes or mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DriverState {
    /// Transparent data relay.
    Normal,
    /// Accepting configuration commands.
    Settings,
}

/// Driver for the LoRa6100 module.
///
/// Every configuration exchange follows the same skeleton: enter settings
/// mode, write `prefix + opcode (+ payload) + \r\n`, read one response line,
/// leave settings mode, decode. Errors propagate to the caller unrecovered;
/// configuration is a one-shot startup sequence where failure aborts startup.
pub struct Lora6100 {
    transport: Box<dyn Transport>,
    state: DriverState,
    is_open: bool,
    delays: SettleDelays,
}

impl Lora6100 {
    /// Create a driver over a serial port at the module's default baud rate.
    pub fn new(port_path: impl Into<String>) -> Lora6100 {
        Lora6100::with_transport(Box::new(SerialTransport::new(port_path)))
    }

    /// Create a driver over an arbitrary transport.
    pub fn with_transport(transport: Box<dyn Transport>) -> Lora6100 {
        Lora6100 {
            transport,
            state: DriverState::Normal,
            is_open: false,
            delays: SettleDelays::default(),
        }
    }

    /// Override the settle delays.
    pub fn set_settle_delays(&mut self, delays: SettleDelays) {
        self.delays = delays;
    }

    /// Whether the device has been opened.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Open the device and force it into normal mode.
    ///
    /// Residual bytes in the OS buffers are discarded, then
    /// [`disable_settings`](Lora6100::disable_settings) runs once
    /// unconditionally: the physical SET line state after process start is
    /// unknown, so the driver assumes the worst and forces a transition.
    pub fn open(&mut self) -> Result<(), DriverError> {
        self.transport.open()?;
        self.is_open = true;

        self.transport.clear_buffers()?;

        self.state = DriverState::Settings;
        self.disable_settings()?;

        info!("lora6100 opened and forced into normal mode");
        Ok(())
    }

    /// Release the device. No mode transition is attempted.
    pub fn close(&mut self) {
        self.is_open = false;
        self.transport.close();
    }

    /// Enter settings mode. Idempotent: a no-op when already there.
    pub fn enable_settings(&mut self) -> Result<(), DriverError> {
        if self.state == DriverState::Settings {
            return Ok(());
        }

        self.transport.set_rts(true)?;
        self.state = DriverState::Settings;
        thread::sleep(self.delays.settings_enter);
        Ok(())
    }

    /// Leave settings mode. Idempotent: a no-op when already in normal mode.
    pub fn disable_settings(&mut self) -> Result<(), DriverError> {
        if self.state == DriverState::Normal {
            return Ok(());
        }

        thread::sleep(self.delays.settings_enter);
        self.transport.set_rts(false)?;
        self.state = DriverState::Normal;
        thread::sleep(self.delays.settings_exit);
        Ok(())
    }

    /// Run one command exchange and return the raw response line.
    fn exchange(&mut self, command: Command, payload: Option<&[u8]>) -> Result<Vec<u8>, DriverError> {
        if !self.is_open {
            return Err(DriverError::NotOpen);
        }

        self.enable_settings()?;

        self.transport.write_all(&command.encode())?;
        if let Some(payload) = payload {
            self.transport.write_all(payload)?;
        }
        self.transport.write_all(LINE_ENDING)?;

        let line = read_line(self.transport.as_mut())?;
        trace!("{:?} response: {:02X?}", command, line);

        self.disable_settings()?;
        Ok(line)
    }

    /// Read the firmware version string.
    pub fn get_version(&mut self) -> Result<String, DriverError> {
        let line = self.exchange(Command::ReadVersion, None)?;
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    /// Read the current parameter block.
    pub fn get_parameters(&mut self) -> Result<Parameters, DriverError> {
        let line = self.exchange(Command::ReadParameters, None)?;
        let params = Parameters::decode(&line)?;
        debug!("read parameters: {:?}", params);
        Ok(params)
    }

    /// Write a new parameter block and return the device's verdict.
    pub fn set_parameters(&mut self, params: &Parameters) -> Result<RetStatus, DriverError> {
        let payload = params.encode();
        let line = self.exchange(Command::SetParameters, Some(&payload))?;
        Ok(RetStatus::parse(&line)?)
    }

    /// Reset all parameters to factory defaults.
    pub fn reset_parameters(&mut self) -> Result<RetStatus, DriverError> {
        let line = self.exchange(Command::ResetDefault, None)?;
        Ok(RetStatus::parse(&line)?)
    }

    /// Reconfigure the local serial baud rate.
    ///
    /// This is transport-side only, used after a set-parameters exchange has
    /// persisted a new baud code on the device, to keep both ends in sync.
    /// The driver does not infer the new rate; sequencing is the caller's
    /// responsibility.
    pub fn change_baud(&mut self, baud: SerialBaudRate) -> Result<(), DriverError> {
        if !self.is_open {
            return Err(DriverError::NotOpen);
        }
        let speed = baud.speed().ok_or(DriverError::UnknownBaudRate)?;
        debug!("changing local baud rate to {}", speed);
        Ok(self.transport.set_baud(speed)?)
    }

    /// Consume the configured driver and split the transport into independent
    /// reader and writer handles for the relay engine.
    ///
    /// The device is forced into normal mode first. Consuming the driver is
    /// what guarantees no settings exchange can run concurrently with relay
    /// traffic.
    pub fn split(mut self) -> Result<(Box<dyn Transport>, Box<dyn Transport>), DriverError> {
        if !self.is_open {
            return Err(DriverError::NotOpen);
        }
        self.disable_settings()?;
        let reader = self.transport.try_clone()?;
        Ok((reader, self.transport))
    }
}
