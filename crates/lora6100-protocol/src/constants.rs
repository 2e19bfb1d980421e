//! Protocol constants.

/// Two-byte prefix that precedes every configuration command.
pub const CMD_PREFIX: [u8; 2] = [0xAA, 0xFA];

/// Line terminator for commands and responses.
pub const LINE_ENDING: &[u8] = b"\r\n";

/// Encoded size of the module's parameter block in bytes.
pub const PARAMETERS_SIZE: usize = 31;

/// Opcode: read the firmware version string.
pub const CMD_READ_VERSION: u8 = 0xAA;

/// Opcode: read the parameter block.
pub const CMD_READ_PARAMETERS: u8 = 0x01;

/// Opcode: reset the parameter block to factory defaults.
pub const CMD_RESET_DEFAULT: u8 = 0x02;

/// Opcode: write a new parameter block.
pub const CMD_SET_PARAMETERS: u8 = 0x03;

/// Factory default baud rate of the serial interface.
pub const DEFAULT_BAUD_RATE: u32 = 9600;
