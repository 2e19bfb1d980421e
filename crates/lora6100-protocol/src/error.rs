//! Protocol error types.

use thiserror::Error;

/// Errors that can occur when decoding responses from the module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A binary payload did not have the exact expected length.
    #[error("frame size mismatch: expected {expected} bytes, got {actual}")]
    FrameSizeMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length received.
        actual: usize,
    },

    /// A status line did not parse to a recognized token.
    ///
    /// The caller should treat the status as [`crate::RetStatus::Error`], but
    /// this variant lets it distinguish a device-reported failure from a
    /// protocol desync.
    #[error("unrecognized return status: {0:?}")]
    BadReturnStatus(String),
}
