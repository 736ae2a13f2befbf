//! TagSpeak CLI
//!
//! Command-line interface for inspecting tags, voices and stored settings,
//! and for running the reader startup without device hardware.

#![allow(clippy::print_stdout)]

mod commands;
mod console;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, init_telemetry, locale_provider, settings_store};

/// TagSpeak CLI
#[derive(Debug, Parser)]
#[command(name = "tagspeak")]
#[command(author, version, about = "Read NFC text tags aloud", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode text as an NDEF text-record message (hex)
    Encode {
        /// Text to store on the tag
        text: String,

        /// Record language code
        #[arg(short, long, default_value = nfc_ndef::text::DEFAULT_LANGUAGE)]
        language: String,
    },

    /// Decode a hex NDEF message and print its first text record
    Decode {
        /// Message bytes as hex; spaces and colons are ignored
        hex: String,
    },

    /// List the voices offered for the device language
    Voices {
        /// JSON file holding the engine's voice catalog
        catalog: PathBuf,

        /// Locale to use instead of the environment's
        #[arg(long)]
        locale: Option<String>,
    },

    /// Inspect or change the persisted audio settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Print the effective configuration
    Config,

    /// Run the reader startup with console speech and a replayed tag
    Simulate {
        /// JSON file holding the engine's voice catalog
        catalog: PathBuf,

        /// Launching tag as hex
        #[arg(long)]
        tag: Option<String>,

        /// Write the resulting text back to the tag
        #[arg(long)]
        write_back: bool,
    },
}

#[derive(Debug, Subcommand)]
enum SettingsCommand {
    /// Show the stored values
    Show,

    /// Store new values
    Set {
        /// Speech rate (0.01-0.99)
        #[arg(long)]
        rate: Option<f32>,

        /// Speech pitch (0.5-2.0)
        #[arg(long)]
        pitch: Option<f32>,

        /// Voice id
        #[arg(long)]
        voice: Option<String>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

async fn read_catalog(path: &Path) -> anyhow::Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load().context("loading configuration")?;
    config.reader.validate()?;

    let mut telemetry = config.effective_telemetry();
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        telemetry.log_filter = filter.to_string();
    }
    init_telemetry(&telemetry)?;

    match cli.command {
        Commands::Encode { text, language } => {
            println!("{}", commands::encode(&text, &language)?);
        },

        Commands::Decode { hex } => {
            println!("{}", commands::decode(&hex)?);
        },

        Commands::Voices { catalog, locale } => {
            if locale.is_some() {
                config.reader.locale = locale;
            }
            let catalog = read_catalog(&catalog).await?;
            let provider = locale_provider(&config.reader);
            print!(
                "{}",
                commands::voices(&catalog, provider.as_ref(), &config.reader.fallback_locale)?
            );
        },

        Commands::Settings(SettingsCommand::Show) => {
            let store = settings_store(&config.storage);
            print!("{}", commands::show_settings(store.as_ref()).await?);
        },

        Commands::Settings(SettingsCommand::Set { rate, pitch, voice }) => {
            let store = settings_store(&config.storage);
            let written = commands::set_settings(store.as_ref(), rate, pitch, voice).await?;
            println!("Stored {written} setting(s)");
        },

        Commands::Config => {
            print!("{}", commands::render_config(&config)?);
        },

        Commands::Simulate {
            catalog,
            tag,
            write_back,
        } => {
            let simulation = commands::Simulation {
                catalog_json: read_catalog(&catalog).await?,
                launch_tag: tag,
                write_back,
            };
            let out = commands::simulate(
                &config,
                settings_store(&config.storage),
                locale_provider(&config.reader),
                &simulation,
            )
            .await?;
            print!("{out}");
        },
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn log_filter_verbosity() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(7), Some("trace"));
    }

    #[test]
    fn encode_defaults_to_english() {
        let cli = parse(&["tagspeak", "encode", "Hola"]).unwrap();
        match cli.command {
            Commands::Encode { text, language } => {
                assert_eq!(text, "Hola");
                assert_eq!(language, "en");
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn settings_set_parses_values() {
        let cli = parse(&["tagspeak", "-vv", "settings", "set", "--rate", "0.42"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Settings(SettingsCommand::Set {
                rate: Some(_),
                pitch: None,
                voice: None
            })
        ));
    }

    #[test]
    fn simulate_flags() {
        let cli = parse(&[
            "tagspeak",
            "simulate",
            "voices.json",
            "--tag",
            "D1010754",
            "--write-back",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate {
                catalog,
                tag,
                write_back,
            } => {
                assert_eq!(catalog, PathBuf::from("voices.json"));
                assert_eq!(tag.as_deref(), Some("D1010754"));
                assert!(write_back);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(parse(&["tagspeak"]).is_err());
    }
}
