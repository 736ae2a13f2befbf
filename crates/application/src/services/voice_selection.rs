//! Voice selection - pick the catalog voices matching the device language

use domain::{DomainError, LanguageCode, VoiceDescriptor};

use crate::ports::{CatalogVoice, LocalePort};

/// Resolve the device language from the platform locale
///
/// Falls back to `fallback_locale` when the platform reports nothing usable.
/// Evaluated on every call, never cached.
///
/// # Errors
///
/// Returns `DomainError::InvalidLanguage` only when the fallback itself has
/// fewer than two characters.
pub fn device_language(
    locale: &dyn LocalePort,
    fallback_locale: &str,
) -> Result<LanguageCode, DomainError> {
    locale
        .locale_identifier()
        .and_then(|identifier| LanguageCode::from_locale(&identifier).ok())
        .map_or_else(|| LanguageCode::from_locale(fallback_locale), Ok)
}

/// Drop voices that need a network connection or are not installed
pub fn offline_voices(catalog: Vec<CatalogVoice>) -> Vec<CatalogVoice> {
    catalog
        .into_iter()
        .filter(CatalogVoice::is_offline_ready)
        .collect()
}

/// Voices whose language tag starts with `language`, in catalog order
///
/// An empty result means "no voice selected"; it is not an error.
pub fn select_voices(catalog: &[CatalogVoice], language: &LanguageCode) -> Vec<VoiceDescriptor> {
    catalog
        .iter()
        .filter(|voice| language.matches_tag(&voice.language))
        .map(CatalogVoice::to_descriptor)
        .collect()
}
