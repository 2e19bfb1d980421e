//! Data types shared between commands and responses.

use bytes::BufMut;

use crate::constants::PARAMETERS_SIZE;
use crate::error::ProtocolError;

// ============================================================================
// Serial line settings
// ============================================================================

/// Baud rates supported by the module's serial interface.
///
/// The wire code is the enumeration index (0 = 1200 baud, 9 = 115200 baud).
/// Codes outside that range decode to [`SerialBaudRate::Unknown`] rather than
/// failing, matching the module's own tolerance for out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerialBaudRate {
    /// 1200 baud.
    Baud1200,
    /// 2400 baud.
    Baud2400,
    /// 4800 baud.
    Baud4800,
    /// 9600 baud (factory default).
    #[default]
    Baud9600,
    /// 14400 baud.
    Baud14400,
    /// 19200 baud.
    Baud19200,
    /// 38400 baud.
    Baud38400,
    /// 57600 baud.
    Baud57600,
    /// 76800 baud.
    Baud76800,
    /// 115200 baud.
    Baud115200,
    /// A code the module reported that we do not recognize.
    Unknown,
}

impl SerialBaudRate {
    const TABLE: [(SerialBaudRate, u32); 10] = [
        (SerialBaudRate::Baud1200, 1200),
        (SerialBaudRate::Baud2400, 2400),
        (SerialBaudRate::Baud4800, 4800),
        (SerialBaudRate::Baud9600, 9600),
        (SerialBaudRate::Baud14400, 14400),
        (SerialBaudRate::Baud19200, 19200),
        (SerialBaudRate::Baud38400, 38400),
        (SerialBaudRate::Baud57600, 57600),
        (SerialBaudRate::Baud76800, 76800),
        (SerialBaudRate::Baud115200, 115200),
    ];

    /// The wire code for this baud rate.
    pub fn code(&self) -> u8 {
        match self {
            SerialBaudRate::Unknown => 0xFF,
            _ => {
                Self::TABLE
                    .iter()
                    .position(|(rate, _)| rate == self)
                    .unwrap_or(Self::TABLE.len()) as u8
            }
        }
    }

    /// Decode a wire code.
    pub fn from_code(code: u8) -> SerialBaudRate {
        Self::TABLE
            .get(code as usize)
            .map(|(rate, _)| *rate)
            .unwrap_or(SerialBaudRate::Unknown)
    }

    /// The baud rate in bits per second, or `None` for [`SerialBaudRate::Unknown`].
    pub fn speed(&self) -> Option<u32> {
        Self::TABLE
            .iter()
            .find(|(rate, _)| rate == self)
            .map(|(_, speed)| *speed)
    }

    /// Map a speed in bits per second to its wire enumeration.
    pub fn from_speed(speed: u32) -> SerialBaudRate {
        Self::TABLE
            .iter()
            .find(|(_, s)| *s == speed)
            .map(|(rate, _)| *rate)
            .unwrap_or(SerialBaudRate::Unknown)
    }
}

/// Number of data bits on the module's serial interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SerialDataBits {
    /// 7 data bits.
    Seven = 0,
    /// 8 data bits (factory default).
    #[default]
    Eight = 1,
}

impl SerialDataBits {
    /// Decode a wire code; anything other than 0 is treated as 8 bits.
    pub fn from_code(code: u8) -> SerialDataBits {
        match code {
            0 => SerialDataBits::Seven,
            _ => SerialDataBits::Eight,
        }
    }
}

// ============================================================================
// Parameter block
// ============================================================================

/// The module's parameter block.
///
/// Encodes to exactly [`PARAMETERS_SIZE`] (31) bytes in big-endian field
/// order:
///
/// | Field            | Size | Description                                  |
/// |------------------|------|----------------------------------------------|
/// | rf_channel       | 1    | RF channel number.                           |
/// | rf_freq          | 1    | RF frequency offset.                         |
/// | rf_data_rate     | 1    | Air data rate, 0-9.                          |
/// | tx_power         | 1    | Transmit power, 0-7.                         |
/// | serial_baud      | 1    | [`SerialBaudRate`] wire code.                |
/// | serial_data_bits | 1    | [`SerialDataBits`] wire code.                |
/// | serial_stop_bits | 1    | 1 or 2 stop bits.                            |
/// | serial_parity    | 1    | 1 (none), 2 (odd), 3 (even).                 |
/// | net_id           | 4    | Network ID.                                  |
/// | node_id          | 2    | Node ID.                                     |
/// | aes_key_setting  | 1    | 0 (built-in key) or 1 (user-defined key).    |
/// | aes_key          | 16   | AES-128 key.                                 |
///
/// The block is read from the device on demand and only changed through an
/// explicit set-and-confirm round trip; it is never cached by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    /// RF channel number.
    pub rf_channel: u8,
    /// RF frequency offset.
    pub rf_freq: u8,
    /// Air data rate, 0-9.
    pub rf_data_rate: u8,
    /// Transmit power, 0-7.
    pub tx_power: u8,
    /// Serial baud rate.
    pub serial_baud: SerialBaudRate,
    /// Serial data bits.
    pub serial_data_bits: SerialDataBits,
    /// Serial stop bits: 1 or 2.
    pub serial_stop_bits: u8,
    /// Serial parity: 1 (none), 2 (odd), 3 (even).
    pub serial_parity: u8,
    /// Network ID.
    pub net_id: u32,
    /// Node ID.
    pub node_id: u16,
    /// 0 to use the built-in key, 1 to use `aes_key`.
    pub aes_key_setting: u8,
    /// AES-128 key.
    pub aes_key: [u8; 16],
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            rf_channel: 0,
            rf_freq: 0,
            rf_data_rate: 0,
            tx_power: 0,
            serial_baud: SerialBaudRate::Baud9600,
            serial_data_bits: SerialDataBits::Eight,
            serial_stop_bits: 1,
            serial_parity: 1,
            net_id: 0,
            node_id: 0,
            aes_key_setting: 0,
            aes_key: [0; 16],
        }
    }
}

impl Parameters {
    /// Encode the parameter block to its 31-byte wire form.
    pub fn encode(&self) -> [u8; PARAMETERS_SIZE] {
        let mut buf = Vec::with_capacity(PARAMETERS_SIZE);
        buf.put_u8(self.rf_channel);
        buf.put_u8(self.rf_freq);
        buf.put_u8(self.rf_data_rate);
        buf.put_u8(self.tx_power);
        buf.put_u8(self.serial_baud.code());
        buf.put_u8(self.serial_data_bits as u8);
        buf.put_u8(self.serial_stop_bits);
        buf.put_u8(self.serial_parity);
        buf.put_u32(self.net_id);
        buf.put_u16(self.node_id);
        buf.put_u8(self.aes_key_setting);
        buf.put_slice(&self.aes_key);

        let mut out = [0u8; PARAMETERS_SIZE];
        out.copy_from_slice(&buf);
        out
    }

    /// Decode a parameter block from its wire form.
    ///
    /// The input must be exactly 31 bytes; any other length is a framing
    /// error.
    pub fn decode(data: &[u8]) -> Result<Parameters, ProtocolError> {
        if data.len() != PARAMETERS_SIZE {
            return Err(ProtocolError::FrameSizeMismatch {
                expected: PARAMETERS_SIZE,
                actual: data.len(),
            });
        }

        let mut aes_key = [0u8; 16];
        aes_key.copy_from_slice(&data[15..31]);

        Ok(Parameters {
            rf_channel: data[0],
            rf_freq: data[1],
            rf_data_rate: data[2],
            tx_power: data[3],
            serial_baud: SerialBaudRate::from_code(data[4]),
            serial_data_bits: SerialDataBits::from_code(data[5]),
            serial_stop_bits: data[6],
            serial_parity: data[7],
            net_id: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
            node_id: u16::from_be_bytes([data[12], data[13]]),
            aes_key_setting: data[14],
            aes_key,
        })
    }
}

// ============================================================================
// Return status
// ============================================================================

/// Status token returned by commands that do not carry data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetStatus {
    /// The command was accepted.
    Ok,
    /// The device rejected the command.
    Error,
}

impl RetStatus {
    /// Parse a response line into a status.
    ///
    /// Anything other than `OK` or `ERROR` fails with
    /// [`ProtocolError::BadReturnStatus`]; callers should treat such a
    /// response as an error while still being able to tell it apart from a
    /// device-reported `ERROR`.
    pub fn parse(line: &[u8]) -> Result<RetStatus, ProtocolError> {
        match line {
            b"OK" => Ok(RetStatus::Ok),
            b"ERROR" => Ok(RetStatus::Error),
            other => Err(ProtocolError::BadReturnStatus(
                String::from_utf8_lossy(other).into_owned(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parameters() -> Parameters {
        Parameters {
            rf_channel: 7,
            rf_freq: 2,
            rf_data_rate: 3,
            tx_power: 5,
            serial_baud: SerialBaudRate::Baud57600,
            serial_data_bits: SerialDataBits::Eight,
            serial_stop_bits: 2,
            serial_parity: 3,
            net_id: 0xDEADBEEF,
            node_id: 0x1234,
            aes_key_setting: 1,
            aes_key: *b"0123456789ABCDEF",
        }
    }

    #[test]
    fn test_parameters_encoded_size() {
        assert_eq!(Parameters::default().encode().len(), PARAMETERS_SIZE);
        assert_eq!(sample_parameters().encode().len(), PARAMETERS_SIZE);
    }

    #[test]
    fn test_parameters_round_trip() {
        let p = sample_parameters();
        let decoded = Parameters::decode(&p.encode()).expect("should decode");
        assert_eq!(decoded, p);
    }

    #[test]
    fn test_parameters_big_endian_fields() {
        let encoded = sample_parameters().encode();
        assert_eq!(&encoded[8..12], &[0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(&encoded[12..14], &[0x12, 0x34]);
    }

    #[test]
    fn test_parameters_decode_rejects_wrong_size() {
        let err = Parameters::decode(&[0u8; 30]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::FrameSizeMismatch {
                expected: 31,
                actual: 30
            }
        );

        assert!(Parameters::decode(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_baud_rate_codes() {
        assert_eq!(SerialBaudRate::Baud1200.code(), 0);
        assert_eq!(SerialBaudRate::Baud9600.code(), 3);
        assert_eq!(SerialBaudRate::Baud115200.code(), 9);
        assert_eq!(SerialBaudRate::from_code(3), SerialBaudRate::Baud9600);
        assert_eq!(SerialBaudRate::from_code(10), SerialBaudRate::Unknown);
        assert_eq!(SerialBaudRate::from_code(0xFF), SerialBaudRate::Unknown);
    }

    #[test]
    fn test_baud_rate_speeds() {
        assert_eq!(SerialBaudRate::Baud9600.speed(), Some(9600));
        assert_eq!(SerialBaudRate::Unknown.speed(), None);
        assert_eq!(SerialBaudRate::from_speed(115200), SerialBaudRate::Baud115200);
        assert_eq!(SerialBaudRate::from_speed(31337), SerialBaudRate::Unknown);
    }

    #[test]
    fn test_ret_status_parse() {
        assert_eq!(RetStatus::parse(b"OK"), Ok(RetStatus::Ok));
        assert_eq!(RetStatus::parse(b"ERROR"), Ok(RetStatus::Error));
        assert_eq!(
            RetStatus::parse(b"GARBAGE"),
            Err(ProtocolError::BadReturnStatus("GARBAGE".to_string()))
        );
    }
}
