//! Relay engine error types.

use lora6100_packet::PacketError;
use thiserror::Error;

/// Fatal errors raised by the relay engine's steady-state tasks.
///
/// There is no degraded mode for a half-open relay: the first error on the
/// receive or send path terminates the whole engine, and the process exits
/// with the error surfaced to the operator.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The transport failed while reading or writing a frame.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    /// A received frame failed to decode.
    #[error(transparent)]
    Packet(#[from] PacketError),

    /// An engine queue closed unexpectedly.
    #[error("relay queue closed")]
    ChannelClosed,
}
