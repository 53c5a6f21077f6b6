#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country names, UI strings and collation for the prevalence controls.
//!
//! The controls need three things from a localization service: the
//! official name of a country in the active language, translated UI
//! strings, and a locale-aware ordering for option labels. [`Localizer`]
//! is the seam; [`LocaleRegistry`] is the bundled implementation, built
//! once at startup from locale tables embedded in the binary.

pub mod collate;
pub mod registry;

use thiserror::Error;

pub use collate::{fold_key, locale_compare};
pub use registry::{LocaleData, LocaleRegistry};

/// Locale used when none is requested.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Errors that can occur while building a locale registry.
#[derive(Debug, Error)]
pub enum LocaleError {
    /// A locale table is not valid TOML or has the wrong shape.
    #[error("Invalid locale table {locale}: {source}")]
    Toml {
        /// Locale tag of the offending table.
        locale: String,
        /// Underlying parse error.
        source: toml::de::Error,
    },
}

/// Localization service used to label locations and UI controls.
pub trait Localizer {
    /// Official country name for an ISO 3166-1 alpha-3 code, or `None`
    /// when the locale has no name for it.
    fn official_country_name(&self, iso3: &str, locale: &str) -> Option<String>;

    /// Translation of a dotted UI string key, or `None` if unknown.
    fn translate(&self, key: &str, locale: &str) -> Option<String>;

    /// Translation of `key`, or the key itself when no translation exists.
    fn translate_or_key(&self, key: &str, locale: &str) -> String {
        self.translate(key, locale).unwrap_or_else(|| key.to_string())
    }
}

impl<T: Localizer + ?Sized> Localizer for std::sync::Arc<T> {
    fn official_country_name(&self, iso3: &str, locale: &str) -> Option<String> {
        (**self).official_country_name(iso3, locale)
    }

    fn translate(&self, key: &str, locale: &str) -> Option<String> {
        (**self).translate(key, locale)
    }
}

/// Normalizes a locale tag: `_` becomes `-`, language lowercase, region
/// uppercase (`en_us` → `en-US`).
#[must_use]
pub fn normalize_locale(locale: &str) -> String {
    let mut parts = locale.trim().split(['-', '_']);
    let language = parts.next().unwrap_or_default().to_ascii_lowercase();
    let rest: Vec<String> = parts
        .map(|p| {
            if p.len() == 2 {
                p.to_ascii_uppercase()
            } else {
                p.to_string()
            }
        })
        .collect();
    if rest.is_empty() {
        language
    } else {
        format!("{language}-{}", rest.join("-"))
    }
}

/// Whether `locale` is US English, the one locale whose top-level option
/// list keeps dataset order.
#[must_use]
pub fn is_us_english(locale: &str) -> bool {
    normalize_locale(locale) == DEFAULT_LOCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_tags() {
        assert_eq!(normalize_locale("en_us"), "en-US");
        assert_eq!(normalize_locale("DE"), "de");
        assert_eq!(normalize_locale("zh-Hant-tw"), "zh-Hant-TW");
    }

    #[test]
    fn detects_us_english() {
        assert!(is_us_english("en-US"));
        assert!(is_us_english("en_us"));
        assert!(!is_us_english("en"));
        assert!(!is_us_english("en-GB"));
        assert!(!is_us_english("fr"));
    }
}
