//! Result of reading an NFC tag

use serde::{Deserialize, Serialize};

/// Raw NDEF message from a tag plus the text extracted from it
///
/// Created transiently when a tag is discovered; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagReadResult {
    /// NDEF message bytes as delivered by the tag service
    pub raw_record: Vec<u8>,
    /// Text of the first text record, absent when none could be decoded
    pub decoded_text: Option<String>,
}

impl TagReadResult {
    /// Create a read result
    pub const fn new(raw_record: Vec<u8>, decoded_text: Option<String>) -> Self {
        Self {
            raw_record,
            decoded_text,
        }
    }

    /// Decoded text, if it holds anything besides whitespace
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.decoded_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_exposed() {
        let result = TagReadResult::new(vec![1, 2], Some("Hola".to_string()));
        assert_eq!(result.text(), Some("Hola"));
    }

    #[test]
    fn blank_text_counts_as_absent() {
        assert_eq!(TagReadResult::new(vec![], Some("  ".to_string())).text(), None);
        assert_eq!(TagReadResult::new(vec![], None).text(), None);
    }
}
