//! Error types for bitstream decoding.

use thiserror::Error;

/// Errors reported by the codec.
///
/// Only recoverable conditions live here: bad construction arguments and
/// corrupt or truncated input. Caller bugs (encoding a value outside its
/// range, pulling from an exhausted cursor) panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressionError {
    /// Invalid argument supplied when setting up a reader or writer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The bitstream ended while more bits were required.
    #[error("unexpected end of bitstream at byte {offset}")]
    UnexpectedEof {
        /// Offset of the byte that was needed but missing.
        offset: usize,
    },

    /// A decoded value fell outside `[0, outof)`.
    #[error("decoded value {value} out of range [0, {outof})")]
    ValueOutOfRange {
        /// Value as read from the stream.
        value: u32,
        /// Exclusive upper bound the value had to respect.
        outof: u32,
    },

    /// Unread data remains after the caller expected the stream to be done.
    #[error("{bytes} unread bytes and {bits} buffered bits left in bitstream")]
    TrailingData {
        /// Whole bytes never pulled from the input.
        bytes: usize,
        /// Bits pulled into the accumulator but not consumed.
        bits: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CompressionError::UnexpectedEof { offset: 3 };
        assert_eq!(err.to_string(), "unexpected end of bitstream at byte 3");

        let err = CompressionError::ValueOutOfRange { value: 9, outof: 7 };
        assert_eq!(err.to_string(), "decoded value 9 out of range [0, 7)");
    }
}
