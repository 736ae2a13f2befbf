//! Command implementations
//!
//! Each command returns the text to print so it can be tested without a
//! terminal.

use std::{fmt::Write as _, sync::Arc};

use anyhow::{Context, bail};
use application::{
    CatalogVoice, LocalePort, PlatformCapabilities, ReaderEvent, ReaderPorts, ReaderService,
    SettingsStorePort, device_language, keys, offline_voices, select_voices,
};
use domain::{SpeechPitch, SpeechRate};
use infrastructure::AppConfig;

use crate::console::{ConsoleSpeech, ReplayTags};

fn parse_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    let cleaned: String = input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    hex::decode(&cleaned).context("input is not hex")
}

fn parse_catalog(catalog_json: &str) -> anyhow::Result<Vec<CatalogVoice>> {
    serde_json::from_str(catalog_json).context("catalog must be a JSON array of voices")
}

/// Encode `text` as an NDEF message and render it as hex
pub fn encode(text: &str, language: &str) -> anyhow::Result<String> {
    let message = nfc_ndef::encode_text_message(text, language)?;
    Ok(hex::encode_upper(message))
}

/// Decode a hex NDEF message and return its first text record
///
/// Spaces and colons between bytes are ignored.
pub fn decode(input: &str) -> anyhow::Result<String> {
    let bytes = parse_hex(input)?;
    Ok(nfc_ndef::decode_first_text(&bytes)?)
}

/// Voices from a JSON catalog that a device with `locale` would offer
pub fn voices(
    catalog_json: &str,
    locale: &dyn LocalePort,
    fallback_locale: &str,
) -> anyhow::Result<String> {
    let catalog = parse_catalog(catalog_json)?;
    let language = device_language(locale, fallback_locale)?;
    let selected = select_voices(&offline_voices(catalog), &language);

    let mut out = format!("Device language: {language}\n");
    if selected.is_empty() {
        out.push_str("No voices available\n");
    }
    for voice in selected {
        let _ = writeln!(out, "{}  [{}]", voice.label(), voice.id);
    }
    Ok(out)
}

/// Current contents of the settings store
pub async fn show_settings(store: &dyn SettingsStorePort) -> anyhow::Result<String> {
    let mut out = String::new();
    for key in [keys::SPEECH_RATE, keys::SPEECH_PITCH, keys::VOICE] {
        let value = store.get(key).await?;
        let _ = writeln!(out, "{key} = {}", value.as_deref().unwrap_or("(unset)"));
    }
    Ok(out)
}

/// Validate and persist the given settings as one batch
pub async fn set_settings(
    store: &dyn SettingsStorePort,
    rate: Option<f32>,
    pitch: Option<f32>,
    voice: Option<String>,
) -> anyhow::Result<usize> {
    let mut entries = Vec::new();
    if let Some(rate) = rate {
        entries.push((keys::SPEECH_RATE.to_string(), SpeechRate::new(rate)?.to_string()));
    }
    if let Some(pitch) = pitch {
        entries.push((keys::SPEECH_PITCH.to_string(), SpeechPitch::new(pitch)?.to_string()));
    }
    if let Some(voice) = voice {
        if voice.trim().is_empty() {
            bail!("voice id must not be empty");
        }
        entries.push((keys::VOICE.to_string(), voice));
    }
    if entries.is_empty() {
        bail!("nothing to set; pass --rate, --pitch or --voice");
    }
    store.set_many(&entries).await?;
    Ok(entries.len())
}

/// Effective configuration as TOML
pub fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

/// What a simulated launch should do
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    /// JSON voice catalog reported by the console engine
    pub catalog_json: String,
    /// Hex NDEF message delivered as the launching tag
    pub launch_tag: Option<String>,
    /// Write the resulting text back to the tag
    pub write_back: bool,
}

/// Run the reader startup against console adapters and report the outcome
pub async fn simulate(
    config: &AppConfig,
    store: Arc<dyn SettingsStorePort>,
    locale: Arc<dyn LocalePort>,
    simulation: &Simulation,
) -> anyhow::Result<String> {
    let catalog = parse_catalog(&simulation.catalog_json)?;
    let launch_tag = simulation.launch_tag.as_deref().map(parse_hex).transpose()?;

    let speech = Arc::new(ConsoleSpeech::new(catalog));
    let tags = Arc::new(ReplayTags::new(launch_tag));
    let mut reader_config = config.reader_config();
    reader_config.capabilities = PlatformCapabilities::launch_tag_hook();

    let service = ReaderService::new(
        ReaderPorts {
            speech: speech.clone(),
            tags: tags.clone(),
            store,
            locale,
        },
        reader_config,
    );
    let mut events = service.subscribe_events();

    service.start().await;
    if simulation.write_back {
        service.write_current_text().await?;
    }
    let snapshot = service.snapshot();
    service.shutdown().await;

    let mut out = String::new();
    for text in speech.spoken() {
        let _ = writeln!(out, "spoke: {text}");
    }
    for message in tags.written() {
        let _ = writeln!(out, "wrote: {}", hex::encode_upper(message));
    }
    while let Ok(event) = events.try_recv() {
        if let ReaderEvent::StepFailed { step, message, .. } = event {
            let _ = writeln!(out, "skipped {step}: {message}");
        }
    }
    out.push_str(&serde_json::to_string_pretty(&snapshot)?);
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use infrastructure::{InMemorySettingsStore, StaticLocaleProvider};

    use super::*;

    const CATALOG: &str = r#"[
        {"id": "v1", "name": "Lucia", "language": "es-CL"},
        {"id": "v2", "name": "Sam", "language": "en-US"},
        {"id": "v3", "name": "Nube", "language": "es-ES", "network_connection_required": true}
    ]"#;

    #[test]
    fn encode_matches_wire_layout() {
        assert_eq!(encode("Hola", "en").unwrap(), "D101075402656E486F6C61");
    }

    #[test]
    fn decode_accepts_separators() {
        assert_eq!(decode("D1:01:07:54:02:65:6E:48:6F:6C:61").unwrap(), "Hola");
        assert_eq!(decode("d1 01 07 54 02 65 6e 48 6f 6c 61").unwrap(), "Hola");
    }

    #[test]
    fn decode_rejects_non_hex() {
        assert!(decode("zz").is_err());
    }

    #[test]
    fn voices_filters_by_locale_and_offline() {
        let locale = StaticLocaleProvider::new(Some("es_CL".into()));
        let out = voices(CATALOG, &locale, "en").unwrap();
        assert!(out.starts_with("Device language: es\n"));
        assert!(out.contains("[v1]"));
        assert!(!out.contains("[v2]"));
        assert!(!out.contains("[v3]"));
    }

    #[test]
    fn voices_uses_fallback_locale() {
        let out = voices(CATALOG, &StaticLocaleProvider::default(), "en_GB").unwrap();
        assert!(out.contains("[v2]"));
    }

    #[tokio::test]
    async fn set_then_show_settings() {
        let store = InMemorySettingsStore::new();
        let written = set_settings(&store, Some(0.42), None, Some("v1".into()))
            .await
            .unwrap();
        assert_eq!(written, 2);

        let shown = show_settings(&store).await.unwrap();
        assert!(shown.contains("AUDIO_Speed = 0.42"));
        assert!(shown.contains("AUDIO_Pitch = (unset)"));
        assert!(shown.contains("AUDIO_Voice = v1"));
    }

    #[tokio::test]
    async fn set_settings_validates_before_writing() {
        let store = InMemorySettingsStore::new();
        assert!(set_settings(&store, Some(1.5), None, None).await.is_err());
        assert!(set_settings(&store, None, None, None).await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn simulate_speaks_the_launch_tag() {
        let store = Arc::new(InMemorySettingsStore::with_entries([(keys::SPEECH_RATE, "0.42")]));
        let locale = Arc::new(StaticLocaleProvider::new(Some("es_CL".into())));
        let simulation = Simulation {
            catalog_json: CATALOG.to_string(),
            launch_tag: Some("D101075402656E486F6C61".into()),
            write_back: true,
        };

        let out = simulate(&AppConfig::default(), store, locale, &simulation)
            .await
            .unwrap();
        assert!(out.contains("spoke: Hola\n"));
        assert!(out.contains("wrote: D101075402656E486F6C61\n"));
        assert!(out.contains("\"selected_voice_id\": \"v1\""));
        assert!(out.contains("\"rate\": 0.42"));
    }

    #[tokio::test]
    async fn simulate_without_tag_speaks_nothing() {
        let simulation = Simulation {
            catalog_json: "[]".into(),
            ..Simulation::default()
        };
        let out = simulate(
            &AppConfig::default(),
            Arc::new(InMemorySettingsStore::new()),
            Arc::new(StaticLocaleProvider::default()),
            &simulation,
        )
        .await
        .unwrap();
        assert!(!out.contains("spoke:"));
        assert!(out.contains("\"phase\": \"configured\""));
    }

    #[test]
    fn config_renders_as_toml() {
        let rendered = render_config(&AppConfig::default()).unwrap();
        assert!(rendered.contains("[reader]"));
        assert!(rendered.contains("fallback_locale = \"es\""));
    }
}
