//! Commands that can be sent to the module's settings interface.

use crate::constants::*;

/// Commands understood by the LoRa6100 settings interface.
///
/// Each command maps to a single opcode byte and is written to the wire as
/// `CMD_PREFIX + opcode`. The set-parameters payload and the `\r\n` terminator
/// are appended by the driver, after the bytes produced by [`Command::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Read the firmware version string.
    ReadVersion,
    /// Read the current parameter block.
    ReadParameters,
    /// Reset all parameters to factory defaults.
    ResetDefault,
    /// Write a new parameter block (followed by a 31-byte payload).
    SetParameters,
}

impl Command {
    /// The opcode byte for this command.
    pub fn opcode(&self) -> u8 {
        match self {
            Command::ReadVersion => CMD_READ_VERSION,
            Command::ReadParameters => CMD_READ_PARAMETERS,
            Command::ResetDefault => CMD_RESET_DEFAULT,
            Command::SetParameters => CMD_SET_PARAMETERS,
        }
    }

    /// Encode the command header: prefix plus opcode.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(CMD_PREFIX.len() + 1);
        buf.extend_from_slice(&CMD_PREFIX);
        buf.push(self.opcode());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_encoding() {
        assert_eq!(Command::ReadVersion.encode(), vec![0xAA, 0xFA, 0xAA]);
        assert_eq!(Command::ReadParameters.encode(), vec![0xAA, 0xFA, 0x01]);
        assert_eq!(Command::ResetDefault.encode(), vec![0xAA, 0xFA, 0x02]);
        assert_eq!(Command::SetParameters.encode(), vec![0xAA, 0xFA, 0x03]);
    }
}
