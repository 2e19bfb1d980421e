//! Error types for lora6100-packet.

use thiserror::Error;

/// Errors that can occur during packet operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// A packet frame did not have the exact wire size.
    #[error("packet size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Expected wire size.
        expected: usize,
        /// Actual number of bytes received.
        actual: usize,
    },

    /// A locally originated message does not fit in the payload field.
    #[error("payload too long: {len} bytes (max {max})")]
    PayloadTooLong {
        /// Length of the rejected message.
        len: usize,
        /// Maximum payload length.
        max: usize,
    },
}
