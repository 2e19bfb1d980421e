//! CR/LF line extraction from the raw transport stream.

use crate::error::DriverError;
use crate::transport::Transport;

/// Read one `\r\n`-terminated line, returning it without the terminator.
///
/// Bytes are read one at a time and accumulated until a carriage return
/// followed immediately by a line feed is seen. The framing is asymmetric:
///
/// - a line feed without an immediately preceding carriage return is corrupt;
///   the offending byte is appended to the buffer and the call fails,
/// - any byte other than a line feed after a carriage return is also corrupt.
///
/// On failure the partial buffer, including the offending byte, is carried in
/// [`DriverError::MalformedLine`] for diagnostics.
///
/// There is no timeout; a silent device blocks the caller indefinitely.
pub fn read_line(transport: &mut dyn Transport) -> Result<Vec<u8>, DriverError> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    let mut cr_seen = false;

    loop {
        transport.read_exact(&mut byte)?;

        match byte[0] {
            b'\r' => {
                // A stray '\n' can never have been seen before this point.
                cr_seen = true;
            }
            b'\n' => {
                if !cr_seen {
                    buf.push(byte[0]);
                    return Err(DriverError::MalformedLine { partial: buf });
                }
                return Ok(buf);
            }
            other => {
                buf.push(other);
                if cr_seen {
                    return Err(DriverError::MalformedLine { partial: buf });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockTransport;

    #[test]
    fn test_reads_terminated_line() {
        let mut transport = MockTransport::with_input(b"OK\r\n");
        let line = read_line(&mut transport).expect("should read line");
        assert_eq!(line, b"OK");
    }

    #[test]
    fn test_empty_line() {
        let mut transport = MockTransport::with_input(b"\r\n");
        let line = read_line(&mut transport).expect("should read line");
        assert!(line.is_empty());
    }

    #[test]
    fn test_stray_line_feed_is_malformed() {
        let mut transport = MockTransport::with_input(b"OK\nXX\r\n");
        match read_line(&mut transport) {
            Err(DriverError::MalformedLine { partial }) => {
                // Buffer keeps everything up to and including the stray '\n'.
                assert_eq!(partial, b"OK\n");
            }
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_after_carriage_return_is_malformed() {
        let mut transport = MockTransport::with_input(b"OK\rX\n");
        match read_line(&mut transport) {
            Err(DriverError::MalformedLine { partial }) => {
                assert_eq!(partial, b"OKX");
            }
            other => panic!("expected MalformedLine, got {:?}", other),
        }
    }

    #[test]
    fn test_leaves_following_bytes_unread() {
        let mut transport = MockTransport::with_input(b"first\r\nsecond\r\n");
        assert_eq!(read_line(&mut transport).unwrap(), b"first");
        assert_eq!(read_line(&mut transport).unwrap(), b"second");
    }
}
