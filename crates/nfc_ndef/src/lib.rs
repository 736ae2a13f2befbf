//! NFC NDEF - message parsing and text record codec
//!
//! Provides the pieces TagSpeak needs to talk to NFC tags:
//! - `NdefMessage` / `NdefRecord` - parse and serialize NDEF messages
//! - `TextRecord` - the NFC Forum "T" well-known record (RTD Text)
//!
//! # Example
//!
//! ```
//! use nfc_ndef::{decode_first_text, encode_text_message};
//!
//! let bytes = encode_text_message("Hola mundo", "es").expect("encodes");
//! assert_eq!(decode_first_text(&bytes).expect("decodes"), "Hola mundo");
//! ```

pub mod error;
pub mod message;
pub mod record;
pub mod text;

pub use error::NdefError;
pub use message::NdefMessage;
pub use record::{NdefRecord, Tnf};
pub use text::{TextEncoding, TextRecord, decode_first_text, encode_text_message};
