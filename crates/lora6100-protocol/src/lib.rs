//! LoRa6100 Settings Protocol
//!
//! This crate provides types and codecs for the vendor command protocol spoken
//! by the Nice-RF LoRa6100 AES module over its serial settings interface.
//!
//! # Protocol Overview
//!
//! While the module's SET line is asserted, it accepts configuration commands
//! of the form:
//!
//! ```text
//! 0xAA 0xFA <opcode> [payload] \r\n
//! ```
//!
//! Responses are `\r\n`-terminated lines. For most commands the line is ASCII
//! (a version string, or an `OK`/`ERROR` status); for the read-parameters
//! command the line's raw bytes are the 31-byte binary [`Parameters`] block.
//!
//! This crate is pure codec: it never touches the serial port. Framing bytes
//! are produced and consumed by the driver crate.

mod commands;
mod constants;
mod error;
mod types;

pub use commands::*;
pub use constants::*;
pub use error::*;
pub use types::*;
