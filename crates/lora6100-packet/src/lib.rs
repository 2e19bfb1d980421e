//! Flood Relay Packet
//!
//! This crate provides the fixed-format packet used by the flood relay, and
//! its encoding and decoding.
//!
//! ## Packet Format
//!
//! | Field   | Size (bytes) | Description                                    |
//! |---------|--------------|------------------------------------------------|
//! | id      | 1            | Message instance ID, randomly assigned.        |
//! | ttl     | 1            | Remaining hop budget.                          |
//! | payload | 40           | Message bytes, zero-padded, not NUL-terminated.|
//!
//! The wire size is always exactly [`PACKET_SIZE`] (42) bytes, big-endian
//! field order. There is no variable-length framing: readers must request
//! exactly 42 bytes per packet and writers must write exactly 42 bytes.
//!
//! IDs are single-byte and random with no collision avoidance, and there is
//! no duplicate suppression. The flood is bounded only by the TTL.

mod error;

pub use error::PacketError;

use rand::Rng;

/// Wire size of a flood packet.
pub const PACKET_SIZE: usize = 42;

/// Size of the payload field.
pub const PAYLOAD_SIZE: usize = 40;

/// A single flood relay packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodPacket {
    /// Message instance ID. Not globally unique; collisions are tolerated.
    pub id: u8,
    /// Remaining hop budget. A packet with TTL 0 is terminal.
    pub ttl: u8,
    /// Message payload, zero-padded.
    pub payload: [u8; PAYLOAD_SIZE],
}

impl FloodPacket {
    /// Build a locally originated packet with a fresh random ID.
    ///
    /// The message is copied into the payload field and zero-padded; messages
    /// longer than [`PAYLOAD_SIZE`] bytes are rejected.
    pub fn local(text: &[u8], ttl: u8) -> Result<FloodPacket, PacketError> {
        if text.len() > PAYLOAD_SIZE {
            return Err(PacketError::PayloadTooLong {
                len: text.len(),
                max: PAYLOAD_SIZE,
            });
        }

        let mut payload = [0u8; PAYLOAD_SIZE];
        payload[..text.len()].copy_from_slice(text);

        Ok(FloodPacket {
            id: rand::thread_rng().gen(),
            ttl,
            payload,
        })
    }

    /// The packet to rebroadcast for this one, or `None` if it is terminal.
    ///
    /// TTL is monotonically non-increasing across retransmissions: the
    /// returned copy carries `ttl - 1`, and a TTL of 0 never yields a copy.
    pub fn relayed(&self) -> Option<FloodPacket> {
        if self.ttl == 0 {
            return None;
        }
        Some(FloodPacket {
            ttl: self.ttl - 1,
            ..*self
        })
    }

    /// Encode the packet to its 42-byte wire form.
    pub fn encode(&self) -> [u8; PACKET_SIZE] {
        let mut buf = [0u8; PACKET_SIZE];
        buf[0] = self.id;
        buf[1] = self.ttl;
        buf[2..].copy_from_slice(&self.payload);
        buf
    }

    /// Decode a packet from its wire form.
    ///
    /// The input must be exactly [`PACKET_SIZE`] bytes.
    pub fn decode(data: &[u8]) -> Result<FloodPacket, PacketError> {
        if data.len() != PACKET_SIZE {
            return Err(PacketError::SizeMismatch {
                expected: PACKET_SIZE,
                actual: data.len(),
            });
        }

        let mut payload = [0u8; PAYLOAD_SIZE];
        payload.copy_from_slice(&data[2..]);

        Ok(FloodPacket {
            id: data[0],
            ttl: data[1],
            payload,
        })
    }

    /// The payload as text, up to the first NUL byte.
    ///
    /// The payload is not guaranteed to be text; undecodable bytes are
    /// replaced lossily.
    pub fn payload_text(&self) -> String {
        let end = self
            .payload
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(PAYLOAD_SIZE);
        String::from_utf8_lossy(&self.payload[..end]).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_round_trip() {
        let mut payload = [0u8; PAYLOAD_SIZE];
        payload[..5].copy_from_slice(b"hello");
        let pkt = FloodPacket {
            id: 45,
            ttl: 10,
            payload,
        };

        let encoded = pkt.encode();
        assert_eq!(encoded.len(), PACKET_SIZE);
        assert_eq!(encoded[0], 45);
        assert_eq!(encoded[1], 10);

        let decoded = FloodPacket::decode(&encoded).expect("should decode");
        assert_eq!(decoded, pkt);
    }

    #[test]
    fn test_decode_rejects_wrong_size() {
        let err = FloodPacket::decode(&[0u8; 41]).unwrap_err();
        assert_eq!(
            err,
            PacketError::SizeMismatch {
                expected: PACKET_SIZE,
                actual: 41
            }
        );

        assert!(FloodPacket::decode(&[0u8; 43]).is_err());
    }

    #[test]
    fn test_relayed_decrements_ttl() {
        let pkt = FloodPacket::local(b"msg", 3).unwrap();
        let hop = pkt.relayed().expect("ttl > 0 should relay");
        assert_eq!(hop.ttl, 2);
        assert_eq!(hop.id, pkt.id);
        assert_eq!(hop.payload, pkt.payload);
    }

    #[test]
    fn test_terminal_packet_is_not_relayed() {
        let pkt = FloodPacket::local(b"msg", 0).unwrap();
        assert!(pkt.relayed().is_none());
    }

    #[test]
    fn test_local_packet_pads_payload() {
        let pkt = FloodPacket::local(b"ping", 10).unwrap();
        assert_eq!(&pkt.payload[..4], b"ping");
        assert!(pkt.payload[4..].iter().all(|&b| b == 0));
        assert_eq!(pkt.payload_text(), "ping");
    }

    #[test]
    fn test_local_packet_rejects_long_message() {
        let err = FloodPacket::local(&[b'x'; 41], 10).unwrap_err();
        assert_eq!(err, PacketError::PayloadTooLong { len: 41, max: 40 });

        // Exactly 40 bytes is fine, and has no NUL terminator.
        let pkt = FloodPacket::local(&[b'x'; 40], 10).unwrap();
        assert_eq!(pkt.payload_text().len(), 40);
    }
}
