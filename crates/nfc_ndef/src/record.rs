//! Single NDEF record layout
//!
//! ```text
//! | MB | ME | CF | SR | IL | TNF (3) |
//! | type length                      |
//! | payload length (1 or 4 bytes)    |
//! | id length (if IL)                |
//! | type | id | payload              |
//! ```

use bytes::{Buf, BufMut};

use crate::error::NdefError;

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// Type Name Format of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tnf {
    Empty = 0x00,
    WellKnown = 0x01,
    MediaType = 0x02,
    AbsoluteUri = 0x03,
    External = 0x04,
    Unknown = 0x05,
    Unchanged = 0x06,
    Reserved = 0x07,
}

impl Tnf {
    const fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0x00 => Self::Empty,
            0x01 => Self::WellKnown,
            0x02 => Self::MediaType,
            0x03 => Self::AbsoluteUri,
            0x04 => Self::External,
            0x05 => Self::Unknown,
            0x06 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }
}

/// One record of an NDEF message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    /// Type Name Format
    pub tnf: Tnf,
    /// Record type (e.g. `b"T"` for text)
    pub record_type: Vec<u8>,
    /// Optional record id, empty when absent
    pub id: Vec<u8>,
    /// Record payload
    pub payload: Vec<u8>,
}

/// Header flags that matter at message level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordFlags {
    pub message_begin: bool,
    pub message_end: bool,
}

impl NdefRecord {
    /// Create a well-known record (TNF 0x01)
    pub fn well_known(record_type: &[u8], payload: Vec<u8>) -> Self {
        Self {
            tnf: Tnf::WellKnown,
            record_type: record_type.to_vec(),
            id: Vec::new(),
            payload,
        }
    }

    /// Whether this is a well-known record of the given type
    #[must_use]
    pub fn is_well_known(&self, record_type: &[u8]) -> bool {
        self.tnf == Tnf::WellKnown && self.record_type == record_type
    }

    /// Append the encoded record to `out`
    pub(crate) fn write_to(
        &self,
        out: &mut Vec<u8>,
        message_begin: bool,
        message_end: bool,
    ) -> Result<(), NdefError> {
        let type_len = u8::try_from(self.record_type.len())
            .map_err(|_| NdefError::Malformed("record type longer than 255 bytes".into()))?;
        let id_len = u8::try_from(self.id.len())
            .map_err(|_| NdefError::Malformed("record id longer than 255 bytes".into()))?;
        let short = self.payload.len() <= usize::from(u8::MAX);

        let mut header = self.tnf as u8;
        if message_begin {
            header |= FLAG_MB;
        }
        if message_end {
            header |= FLAG_ME;
        }
        if short {
            header |= FLAG_SR;
        }
        if !self.id.is_empty() {
            header |= FLAG_IL;
        }

        out.put_u8(header);
        out.put_u8(type_len);
        if short {
            // short records carry a single length byte
            out.put_u8(self.payload.len() as u8);
        } else {
            let len = u32::try_from(self.payload.len())
                .map_err(|_| NdefError::PayloadTooLarge(self.payload.len()))?;
            out.put_u32(len);
        }
        if !self.id.is_empty() {
            out.put_u8(id_len);
        }
        out.put_slice(&self.record_type);
        out.put_slice(&self.id);
        out.put_slice(&self.payload);
        Ok(())
    }

    /// Parse one record from the front of `buf`, advancing it
    pub(crate) fn read_from(buf: &mut &[u8]) -> Result<(Self, RecordFlags), NdefError> {
        ensure(buf, 2)?;
        let header = buf.get_u8();
        if header & FLAG_CF != 0 {
            return Err(NdefError::ChunkedUnsupported);
        }
        let type_len = usize::from(buf.get_u8());

        let payload_len = if header & FLAG_SR != 0 {
            ensure(buf, 1)?;
            usize::from(buf.get_u8())
        } else {
            ensure(buf, 4)?;
            buf.get_u32() as usize
        };

        let id_len = if header & FLAG_IL != 0 {
            ensure(buf, 1)?;
            usize::from(buf.get_u8())
        } else {
            0
        };

        ensure(buf, type_len + id_len + payload_len)?;
        let record_type = take(buf, type_len);
        let id = take(buf, id_len);
        let payload = take(buf, payload_len);

        let record = Self {
            tnf: Tnf::from_bits(header),
            record_type,
            id,
            payload,
        };
        let flags = RecordFlags {
            message_begin: header & FLAG_MB != 0,
            message_end: header & FLAG_ME != 0,
        };
        Ok((record, flags))
    }
}

fn ensure(buf: &&[u8], needed: usize) -> Result<(), NdefError> {
    if buf.remaining() < needed {
        return Err(NdefError::Truncated {
            needed,
            available: buf.remaining(),
        });
    }
    Ok(())
}

fn take(buf: &mut &[u8], len: usize) -> Vec<u8> {
    let out = buf[..len].to_vec();
    buf.advance(len);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_record_layout() {
        let record = NdefRecord::well_known(b"T", vec![0x02, b'e', b'n', b'H', b'i']);
        let mut out = Vec::new();
        record.write_to(&mut out, true, true).unwrap();
        assert_eq!(out, vec![0xD1, 0x01, 0x05, b'T', 0x02, b'e', b'n', b'H', b'i']);
    }

    #[test]
    fn long_record_uses_four_byte_length() {
        let record = NdefRecord::well_known(b"T", vec![0u8; 300]);
        let mut out = Vec::new();
        record.write_to(&mut out, true, true).unwrap();
        assert_eq!(&out[..6], &[0xC1, 0x01, 0x00, 0x00, 0x01, 0x2C]);
        assert_eq!(out.len(), 6 + 1 + 300);
    }

    #[test]
    fn id_field_is_written_and_read() {
        let mut record = NdefRecord::well_known(b"U", vec![0x04]);
        record.id = b"42".to_vec();
        let mut out = Vec::new();
        record.write_to(&mut out, true, true).unwrap();
        assert_eq!(out[0] & FLAG_IL, FLAG_IL);

        let mut slice = out.as_slice();
        let (parsed, flags) = NdefRecord::read_from(&mut slice).unwrap();
        assert_eq!(parsed, record);
        assert!(flags.message_begin && flags.message_end);
        assert!(slice.is_empty());
    }

    #[test]
    fn truncated_payload_is_rejected() {
        let bytes = [0xD1, 0x01, 0x09, b'T', 0x02];
        let mut slice = &bytes[..];
        assert!(matches!(
            NdefRecord::read_from(&mut slice),
            Err(NdefError::Truncated { .. })
        ));
    }

    #[test]
    fn chunked_record_is_rejected() {
        let bytes = [0xB1, 0x01, 0x00, b'T'];
        let mut slice = &bytes[..];
        assert_eq!(
            NdefRecord::read_from(&mut slice),
            Err(NdefError::ChunkedUnsupported)
        );
    }
}
