//! NFC Forum text record (RTD Text, well-known type "T")
//!
//! Payload layout:
//!
//! ```text
//! | status: UTF-16 flag (bit 7), language length (bits 0-5) |
//! | language code (ASCII)                                   |
//! | text (UTF-8 or UTF-16)                                  |
//! ```

use crate::error::NdefError;
use crate::message::NdefMessage;
use crate::record::NdefRecord;

/// Record type of text records
pub const TEXT_RECORD_TYPE: &[u8] = b"T";

/// Language written when none is requested
pub const DEFAULT_LANGUAGE: &str = "en";

const UTF16_FLAG: u8 = 0x80;
const LANGUAGE_LEN_MASK: u8 = 0x3F;

/// Character encoding of the text body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Utf16,
}

/// Decoded text record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    /// IANA language code (e.g. "en", "es-CL")
    pub language: String,
    /// Text body
    pub text: String,
    /// Encoding the body was stored in
    pub encoding: TextEncoding,
}

impl TextRecord {
    /// Create a UTF-8 text record
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
            encoding: TextEncoding::Utf8,
        }
    }

    /// Build the record payload
    ///
    /// # Errors
    ///
    /// Returns `NdefError::InvalidLanguage` if the language code is not
    /// ASCII or longer than 63 bytes.
    pub fn to_payload(&self) -> Result<Vec<u8>, NdefError> {
        if !self.language.is_ascii() || self.language.len() > usize::from(LANGUAGE_LEN_MASK) {
            return Err(NdefError::InvalidLanguage(self.language.clone()));
        }
        // length checked above, fits in six bits
        let mut status = self.language.len() as u8;

        let body = match self.encoding {
            TextEncoding::Utf8 => self.text.as_bytes().to_vec(),
            TextEncoding::Utf16 => {
                status |= UTF16_FLAG;
                let mut out = vec![0xFE, 0xFF];
                for unit in self.text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            },
        };

        let mut payload = Vec::with_capacity(1 + self.language.len() + body.len());
        payload.push(status);
        payload.extend_from_slice(self.language.as_bytes());
        payload.extend_from_slice(&body);
        Ok(payload)
    }

    /// Decode a text record payload
    ///
    /// # Errors
    ///
    /// Returns `NdefError` when the payload is shorter than its declared
    /// language code or the body does not decode in its declared encoding.
    pub fn from_payload(payload: &[u8]) -> Result<Self, NdefError> {
        let (&status, rest) = payload.split_first().ok_or(NdefError::Truncated {
            needed: 1,
            available: 0,
        })?;
        let language_len = usize::from(status & LANGUAGE_LEN_MASK);
        if rest.len() < language_len {
            return Err(NdefError::Truncated {
                needed: language_len,
                available: rest.len(),
            });
        }
        let (language, body) = rest.split_at(language_len);
        let language = std::str::from_utf8(language)
            .ok()
            .filter(|l| l.is_ascii())
            .ok_or_else(|| NdefError::InvalidLanguage(String::from_utf8_lossy(language).into()))?
            .to_string();

        if status & UTF16_FLAG != 0 {
            Ok(Self {
                language,
                text: decode_utf16(body)?,
                encoding: TextEncoding::Utf16,
            })
        } else {
            let text = String::from_utf8(body.to_vec())
                .map_err(|e| NdefError::InvalidText(e.to_string()))?;
            Ok(Self {
                language,
                text,
                encoding: TextEncoding::Utf8,
            })
        }
    }

    /// Wrap the payload in a well-known record
    ///
    /// # Errors
    ///
    /// See [`TextRecord::to_payload`].
    pub fn to_record(&self) -> Result<NdefRecord, NdefError> {
        Ok(NdefRecord::well_known(TEXT_RECORD_TYPE, self.to_payload()?))
    }
}

/// UTF-16 body, big-endian unless a byte order mark says otherwise
fn decode_utf16(body: &[u8]) -> Result<String, NdefError> {
    if body.len() % 2 != 0 {
        return Err(NdefError::InvalidText("odd UTF-16 byte count".into()));
    }
    let (little_endian, body) = match body {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, body),
    };
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            let bytes = [pair[0], pair[1]];
            if little_endian {
                u16::from_le_bytes(bytes)
            } else {
                u16::from_be_bytes(bytes)
            }
        })
        .collect();
    String::from_utf16(&units).map_err(|e| NdefError::InvalidText(e.to_string()))
}

/// Encode `text` as a message holding a single UTF-8 text record
///
/// # Errors
///
/// Returns `NdefError::InvalidLanguage` for an unusable language code.
pub fn encode_text_message(text: &str, language: &str) -> Result<Vec<u8>, NdefError> {
    let record = TextRecord::new(text, language).to_record()?;
    NdefMessage::new(vec![record]).to_bytes()
}

/// Text of the first text record in a raw message
///
/// # Errors
///
/// Returns `NdefError::NoTextRecord` when the message has no text record,
/// or the parse/decode error of the message or record.
pub fn decode_first_text(message: &[u8]) -> Result<String, NdefError> {
    let message = NdefMessage::parse(message)?;
    let record = message
        .find_well_known(TEXT_RECORD_TYPE)
        .ok_or(NdefError::NoTextRecord)?;
    Ok(TextRecord::from_payload(&record.payload)?.text)
}
