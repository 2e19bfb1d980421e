//! LoRa6100 Device Driver
//!
//! This crate drives a Nice-RF LoRa6100 AES module over a serial link. It
//! owns the settings-mode state machine, frames the vendor commands defined in
//! `lora6100-protocol`, and parses the line-terminated responses.
//!
//! The module has two mutually exclusive modes:
//!
//! - **Normal**: transparent data relay; bytes written to the serial port go
//!   over the air.
//! - **Settings**: configuration commands are accepted. Entered by asserting
//!   the RTS control line, exited by deasserting it. Both transitions need a
//!   settle delay before the device is usable again.
//!
//! The driver keeps the mode as an owned state value and exposes only typed
//! request/response exchanges; no other component sees the control line.
//!
//! Configuration is a one-shot startup sequence: every error is surfaced to
//! the caller without retries, and the driver is consumed by
//! [`Lora6100::split`] before steady-state relay traffic starts.

mod driver;
mod error;
mod line_reader;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use driver::*;
pub use error::*;
pub use line_reader::*;
pub use transport::*;
