//! Locale providers
//!
//! POSIX systems report the locale through `LC_ALL`, `LC_MESSAGES` and
//! `LANG`, in that order of precedence. Values such as `C` or `POSIX` carry
//! no language and are treated as absent.

use std::{fmt, sync::Arc};

use application::LocalePort;
use tracing::debug;

/// Variables consulted, highest precedence first
pub const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

type Lookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Locale provider reading the process environment
#[derive(Clone)]
pub struct EnvLocaleProvider {
    lookup: Lookup,
}

impl fmt::Debug for EnvLocaleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLocaleProvider")
            .field("variables", &LOCALE_VARIABLES)
            .finish_non_exhaustive()
    }
}

impl Default for EnvLocaleProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvLocaleProvider {
    /// Provider backed by `std::env`
    pub fn new() -> Self {
        Self::with_lookup(|name| std::env::var(name).ok())
    }

    /// Provider backed by an arbitrary variable lookup
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            lookup: Arc::new(lookup),
        }
    }
}

fn carries_language(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "C" && value != "POSIX" && !value.starts_with("C.")
}

impl LocalePort for EnvLocaleProvider {
    fn locale_identifier(&self) -> Option<String> {
        let found = LOCALE_VARIABLES.into_iter().find_map(|name| {
            (self.lookup)(name)
                .filter(|value| carries_language(value))
                .map(|value| (name, value.trim().to_string()))
        });
        match found {
            Some((variable, locale)) => {
                debug!(variable, locale = %locale, "Locale from environment");
                Some(locale)
            },
            None => {
                debug!("No locale in environment");
                None
            },
        }
    }
}

/// Locale provider returning a fixed identifier
#[derive(Debug, Clone, Default)]
pub struct StaticLocaleProvider {
    locale: Option<String>,
}

impl StaticLocaleProvider {
    /// Provider answering `locale` (or nothing)
    pub const fn new(locale: Option<String>) -> Self {
        Self { locale }
    }
}

impl LocalePort for StaticLocaleProvider {
    fn locale_identifier(&self) -> Option<String> {
        self.locale.clone()
    }
}
