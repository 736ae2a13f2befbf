//! Property-based tests for the NDEF text codec

use nfc_ndef::{NdefMessage, TextEncoding, TextRecord, decode_first_text, encode_text_message};
use proptest::prelude::*;

proptest! {
    #[test]
    fn any_text_survives_a_tag_write(text in ".{0,400}", language in "[a-z]{2}(-[A-Z]{2})?") {
        let bytes = encode_text_message(&text, &language).unwrap();
        prop_assert_eq!(decode_first_text(&bytes).unwrap(), text);
    }

    #[test]
    fn utf16_bodies_decode_to_the_same_text(text in "\\PC{0,64}") {
        let mut record = TextRecord::new(text.clone(), "en");
        record.encoding = TextEncoding::Utf16;
        let payload = record.to_payload().unwrap();
        prop_assert_eq!(TextRecord::from_payload(&payload).unwrap().text, text);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let _ = NdefMessage::parse(&bytes);
        let _ = decode_first_text(&bytes);
        let _ = TextRecord::from_payload(&bytes);
    }
}
