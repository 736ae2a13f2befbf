//! NDEF message - an ordered list of records

use crate::error::NdefError;
use crate::record::NdefRecord;

/// A complete NDEF message as stored on a tag
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NdefMessage {
    /// Records in tag order
    pub records: Vec<NdefRecord>,
}

impl NdefMessage {
    /// Create a message from records
    pub const fn new(records: Vec<NdefRecord>) -> Self {
        Self { records }
    }

    /// Parse a message
    ///
    /// Parsing stops at the record flagged message-end; anything after it
    /// (terminator TLVs, zero padding) is ignored. A message whose bytes end
    /// without a message-end flag is accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns `NdefError` for empty input, truncated or chunked records, or
    /// a first record without the message-begin flag.
    pub fn parse(bytes: &[u8]) -> Result<Self, NdefError> {
        if bytes.is_empty() {
            return Err(NdefError::Empty);
        }

        let mut buf = bytes;
        let mut records = Vec::new();
        while !buf.is_empty() {
            let (record, flags) = NdefRecord::read_from(&mut buf)?;
            if records.is_empty() && !flags.message_begin {
                return Err(NdefError::Malformed(
                    "first record lacks the message-begin flag".into(),
                ));
            }
            records.push(record);
            if flags.message_end {
                break;
            }
        }
        Ok(Self { records })
    }

    /// Serialize the message, setting begin/end flags on the outer records
    ///
    /// # Errors
    ///
    /// Returns `NdefError::Empty` for a message without records, or an error
    /// if a record field exceeds its length field.
    pub fn to_bytes(&self) -> Result<Vec<u8>, NdefError> {
        if self.records.is_empty() {
            return Err(NdefError::Empty);
        }
        let last = self.records.len() - 1;
        let mut out = Vec::new();
        for (index, record) in self.records.iter().enumerate() {
            record.write_to(&mut out, index == 0, index == last)?;
        }
        Ok(out)
    }

    /// First well-known record of the given type
    #[must_use]
    pub fn find_well_known(&self, record_type: &[u8]) -> Option<&NdefRecord> {
        self.records.iter().find(|r| r.is_well_known(record_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Tnf;

    fn uri_record() -> NdefRecord {
        NdefRecord::well_known(b"U", b"\x04example.com".to_vec())
    }

    #[test]
    fn multi_record_flags() {
        let message = NdefMessage::new(vec![
            uri_record(),
            NdefRecord::well_known(b"T", b"\x02enHi".to_vec()),
        ]);
        let bytes = message.to_bytes().unwrap();
        // first: MB|SR|TNF=1, second: ME|SR|TNF=1
        assert_eq!(bytes[0], 0x91);
        let second = 3 + 1 + 12;
        assert_eq!(bytes[second], 0x51);
        assert_eq!(NdefMessage::parse(&bytes).unwrap(), message);
    }

    #[test]
    fn trailing_bytes_after_end_are_ignored() {
        let mut bytes = NdefMessage::new(vec![uri_record()]).to_bytes().unwrap();
        bytes.extend_from_slice(&[0xFE, 0x00, 0x00]);
        let parsed = NdefMessage::parse(&bytes).unwrap();
        assert_eq!(parsed.records.len(), 1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(NdefMessage::parse(&[]), Err(NdefError::Empty));
        assert_eq!(NdefMessage::default().to_bytes(), Err(NdefError::Empty));
    }

    #[test]
    fn missing_message_begin_is_rejected() {
        let bytes = [0x51, 0x01, 0x00, b'T'];
        assert!(matches!(
            NdefMessage::parse(&bytes),
            Err(NdefError::Malformed(_))
        ));
    }

    #[test]
    fn find_well_known_skips_other_types() {
        let mut media = NdefRecord::well_known(b"text/plain", b"x".to_vec());
        media.tnf = Tnf::MediaType;
        let message = NdefMessage::new(vec![
            media,
            uri_record(),
            NdefRecord::well_known(b"T", b"\x02enHi".to_vec()),
        ]);
        let found = message.find_well_known(b"T").unwrap();
        assert_eq!(found.payload, b"\x02enHi".to_vec());
        assert!(message.find_well_known(b"Sp").is_none());
    }
}
