//! Two-letter language prefix used to match voices against the device locale

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// Lower-cased two-character language prefix (e.g. "es" from "es_CL")
///
/// # Examples
///
/// ```
/// use domain::value_objects::LanguageCode;
///
/// let code = LanguageCode::from_locale("es_CL").expect("valid locale");
/// assert_eq!(code.as_str(), "es");
/// assert!(code.matches_tag("ES-cl"));
/// assert!(!code.matches_tag("en-US"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Build a language code from a locale identifier or language tag
    ///
    /// Only the first two characters are kept, lower-cased.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLanguage` when the identifier has fewer
    /// than two characters.
    pub fn from_locale(identifier: &str) -> Result<Self, DomainError> {
        let prefix = prefix_of(identifier);
        if prefix.chars().count() < 2 {
            return Err(DomainError::InvalidLanguage(identifier.to_string()));
        }
        Ok(Self(prefix))
    }

    /// Check whether a voice language tag starts with this language
    #[must_use]
    pub fn matches_tag(&self, language_tag: &str) -> bool {
        prefix_of(language_tag) == self.0
    }

    /// The prefix as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn prefix_of(value: &str) -> String {
    value.chars().take(2).collect::<String>().to_lowercase()
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_locale(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
