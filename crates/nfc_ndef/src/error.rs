//! NDEF codec errors

use thiserror::Error;

/// Errors that can occur while parsing or building NDEF data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NdefError {
    /// Message contains no records
    #[error("NDEF message is empty")]
    Empty,

    /// Input ended before the record was complete
    #[error("Truncated record: needed {needed} bytes, {available} available")]
    Truncated {
        /// Bytes required by the header
        needed: usize,
        /// Bytes left in the input
        available: usize,
    },

    /// Chunked records are not reassembled
    #[error("Chunked records are not supported")]
    ChunkedUnsupported,

    /// Record flags contradict the message layout
    #[error("Malformed message: {0}")]
    Malformed(String),

    /// No well-known text record in the message
    #[error("No text record found")]
    NoTextRecord,

    /// Language code is not ASCII or longer than 63 bytes
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// Text bytes do not decode in the declared encoding
    #[error("Invalid text encoding: {0}")]
    InvalidText(String),

    /// Record payload exceeds the 32-bit length field
    #[error("Payload too large: {0} bytes")]
    PayloadTooLarge(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncated_error_message() {
        let err = NdefError::Truncated {
            needed: 12,
            available: 4,
        };
        assert_eq!(
            err.to_string(),
            "Truncated record: needed 12 bytes, 4 available"
        );
    }

    #[test]
    fn no_text_record_error_message() {
        assert_eq!(NdefError::NoTextRecord.to_string(), "No text record found");
    }

    #[test]
    fn invalid_language_error_message() {
        let err = NdefError::InvalidLanguage("ü".to_string());
        assert_eq!(err.to_string(), "Invalid language code: ü");
    }
}
