//! Locale registry: country names and UI strings from embedded TOML.
//!
//! Each `.toml` file in `packages/locale/locales/` is baked into the binary
//! at compile time via [`include_str!`]. Adding a language is as simple as
//! creating a new TOML file and adding it to the list below.
//!
//! Registration happens once, in [`LocaleRegistry::init`], before any
//! options are built.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::{DEFAULT_LOCALE, LocaleError, Localizer, normalize_locale};

/// Locale tables embedded at compile time.
const LOCALE_TOMLS: &[(&str, &str)] = &[
    ("en", include_str!("../locales/en.toml")),
    ("de", include_str!("../locales/de.toml")),
    ("es", include_str!("../locales/es.toml")),
    ("fr", include_str!("../locales/fr.toml")),
];

/// Language whose UI strings are used when a locale lacks a key.
const FALLBACK_LANGUAGE: &str = "en";

/// One language's country names and UI strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocaleData {
    /// ISO 3166-1 alpha-3 code → official country name.
    #[serde(default)]
    pub countries: BTreeMap<String, String>,
    /// Dotted UI string key → translated text.
    #[serde(default)]
    pub strings: BTreeMap<String, String>,
}

/// Parses a single locale table.
///
/// # Errors
///
/// Returns [`LocaleError::Toml`] if the document is not a valid table.
pub fn parse_locale_toml(locale: &str, toml_str: &str) -> Result<LocaleData, LocaleError> {
    toml::from_str(toml_str).map_err(|source| LocaleError::Toml {
        locale: locale.to_string(),
        source,
    })
}

/// Registered locales, keyed by normalized tag.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    locales: HashMap<String, LocaleData>,
}

impl LocaleRegistry {
    /// Registers every bundled locale.
    ///
    /// # Panics
    ///
    /// Panics if any embedded table is malformed (this is a compile-time
    /// guarantee since the tables are embedded).
    #[must_use]
    pub fn init() -> Self {
        let registry = Self::from_tomls(LOCALE_TOMLS.iter().copied())
            .unwrap_or_else(|e| panic!("Failed to load bundled locales: {e}"));
        log::debug!("Registered locales: {:?}", registry.locales());
        registry
    }

    /// The process-wide registry, initialised on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::init)
    }

    /// Builds a registry from `(locale, toml)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] if any table fails to parse.
    pub fn from_tomls<'a>(
        tables: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, LocaleError> {
        let mut registry = Self::default();
        for (locale, toml_str) in tables {
            registry.register(locale, parse_locale_toml(locale, toml_str)?);
        }
        Ok(registry)
    }

    /// Adds or replaces a locale.
    pub fn register(&mut self, locale: &str, data: LocaleData) {
        self.locales.insert(normalize_locale(locale), data);
    }

    /// Registered locale tags, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Finds the table for `locale`: the exact tag first, then its
    /// primary language (`de-CH` → `de`).
    #[must_use]
    pub fn lookup(&self, locale: &str) -> Option<&LocaleData> {
        let tag = normalize_locale(locale);
        self.locales.get(&tag).or_else(|| {
            let language = tag.split('-').next().unwrap_or_default();
            self.locales.get(language)
        })
    }
}

impl Localizer for LocaleRegistry {
    fn official_country_name(&self, iso3: &str, locale: &str) -> Option<String> {
        self.lookup(locale)?
            .countries
            .get(&iso3.to_ascii_uppercase())
            .cloned()
    }

    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        self.lookup(locale)
            .and_then(|data| data.strings.get(key))
            .or_else(|| {
                self.lookup(FALLBACK_LANGUAGE)
                    .and_then(|data| data.strings.get(key))
            })
            .cloned()
    }
}

impl LocaleRegistry {
    /// Whether `locale` resolves to a registered table.
    #[must_use]
    pub fn supports(&self, locale: &str) -> bool {
        self.lookup(locale).is_some()
    }

    /// `locale` if supported, otherwise [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn supported_or_default(&self, locale: &str) -> String {
        if self.supports(locale) {
            normalize_locale(locale)
        } else {
            log::debug!("Unsupported locale {locale:?}, using {DEFAULT_LOCALE}");
            DEFAULT_LOCALE.to_string()
        }
    }
}
