//! Driver error types.

use lora6100_protocol::ProtocolError;
use thiserror::Error;

/// Errors that can occur when talking to the module.
#[derive(Error, Debug)]
pub enum DriverError {
    /// An operation was attempted before the device was opened.
    #[error("the device has not been opened for communication")]
    NotOpen,

    /// The underlying transport failed. Fatal; never retried.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),

    /// A response line violated the CR/LF framing.
    ///
    /// The partial buffer, including the offending byte, is kept for
    /// diagnostics.
    #[error("malformed response line ({} bytes buffered)", .partial.len())]
    MalformedLine {
        /// Everything read before the framing violation.
        partial: Vec<u8>,
    },

    /// A response decoded but violated the wire protocol.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A baud change was requested for a rate the module cannot report.
    #[error("cannot apply an unknown baud rate to the transport")]
    UnknownBaudRate,
}
