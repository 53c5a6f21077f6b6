//! Top-level location options.

use std::collections::HashMap;

use risk_prevalence_locale::{Localizer, is_us_english, locale_compare};
use risk_prevalence_location::location_groups;
use risk_prevalence_location_models::{
    GEORGIA_COUNTRY_ISO3, GEORGIA_US_STATE_KEY, LocationOption, LocationRecord, LocationTable,
};

const CLARIFY_COUNTRY: &str = "calculator.select_location_label_clarifications.country";
const CLARIFY_US_STATE: &str = "calculator.select_location_label_clarifications.US_state";

fn display_label<L: Localizer + ?Sized>(
    key: &str,
    record: &LocationRecord,
    localizer: &L,
    locale: &str,
) -> String {
    let name = record
        .iso3
        .as_deref()
        .and_then(|iso3| localizer.official_country_name(iso3, locale))
        .unwrap_or_else(|| record.label.clone());

    // Georgia is both a country and a US state; say which.
    if record.iso3.as_deref() == Some(GEORGIA_COUNTRY_ISO3) {
        format!("{name} ({})", localizer.translate_or_key(CLARIFY_COUNTRY, locale))
    } else if key == GEORGIA_US_STATE_KEY {
        format!("{name} ({})", localizer.translate_or_key(CLARIFY_US_STATE, locale))
    } else {
        name
    }
}

/// Builds the top-level picker's options.
///
/// Entries follow [`location_groups`] order. Countries are labelled with
/// their official name in `locale` when the localizer knows one, falling
/// back to the dataset label. For every locale except `en-US` the list is
/// then sorted by label; `en-US` keeps dataset order so the US states stay
/// first.
#[must_use]
pub fn top_location_options<L: Localizer + ?Sized>(
    table: &LocationTable,
    localizer: &L,
    locale: &str,
) -> Vec<LocationOption> {
    let mut options: Vec<LocationOption> = location_groups(table)
        .into_iter()
        .flat_map(|(_, members)| members)
        .filter_map(|key| {
            let record = table.get(&key)?;
            Some(LocationOption {
                label: display_label(&key, record, localizer, locale),
                value: key,
            })
        })
        .collect();

    if !is_us_english(locale) {
        options.sort_by(|a, b| locale_compare(&a.label, &b.label));
    }

    options
}

/// Memoised [`top_location_options`] keyed on dataset version and locale.
///
/// Changing the dataset version drops every cached list; each locale is
/// built at most once per version.
#[derive(Debug, Default)]
pub struct OptionsCache {
    version: Option<u64>,
    by_locale: HashMap<String, Vec<LocationOption>>,
}

impl OptionsCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the options for `(version, locale)`, building them if the
    /// pair has not been seen since the last version change.
    pub fn get_or_build<L: Localizer + ?Sized>(
        &mut self,
        version: u64,
        table: &LocationTable,
        localizer: &L,
        locale: &str,
    ) -> &[LocationOption] {
        if self.version != Some(version) {
            self.by_locale.clear();
            self.version = Some(version);
        }
        self.by_locale
            .entry(locale.to_string())
            .or_insert_with(|| {
                log::debug!("Building top location options for {locale} (dataset v{version})");
                top_location_options(table, localizer, locale)
            })
    }

    /// Whether a list for `(version, locale)` is cached.
    #[must_use]
    pub fn is_cached(&self, version: u64, locale: &str) -> bool {
        self.version == Some(version) && self.by_locale.contains_key(locale)
    }

    pub fn clear(&mut self) {
        self.version = None;
        self.by_locale.clear();
    }
}

#[cfg(test)]
mod tests {
    use risk_prevalence_locale::LocaleRegistry;

    use super::*;

    fn record(label: &str, iso3: Option<&str>, group: Option<&str>) -> LocationRecord {
        LocationRecord {
            label: label.into(),
            iso3: iso3.map(String::from),
            population: "1".into(),
            cases_past_week: 0,
            cases_increasing_percentage: 0.0,
            positive_case_percentage: None,
            top_level_group: group.map(String::from),
            subdivisions: Vec::new(),
            incomplete_vaccinations: None,
            complete_vaccinations: None,
            unvaccinated_prevalence_ratio: None,
            average_fully_vaccinated_multiplier: None,
            updated_at: String::new(),
        }
    }

    fn table() -> LocationTable {
        [
            ("US_06", record("California", None, Some("US states"))),
            ("US_13", record("Georgia", None, Some("US states"))),
            ("US_06_001", record("Alameda", None, None)),
            ("US", record("United States", Some("USA"), Some("Countries"))),
            ("Germany", record("Germany", Some("DEU"), Some("Countries"))),
            ("Georgia", record("Georgia", Some("GEO"), Some("Countries"))),
            ("Atlantis", record("Atlantis", Some("ATL"), Some("Countries"))),
        ]
        .into_iter()
        .map(|(k, r)| (k.to_string(), r))
        .collect()
    }

    fn labels(options: &[LocationOption]) -> Vec<&str> {
        options.iter().map(|o| o.label.as_str()).collect()
    }

    #[test]
    fn us_english_keeps_dataset_order() {
        let registry = LocaleRegistry::init();
        let options = top_location_options(&table(), &registry, "en-US");
        assert_eq!(
            labels(&options),
            vec![
                "California",
                "Georgia (US state)",
                "United States of America",
                "Germany",
                "Georgia (country)",
                "Atlantis",
            ]
        );
        assert_eq!(options[1].value, "US_13");
        assert_eq!(options[4].value, "Georgia");
    }

    #[test]
    fn other_locales_sort_by_label() {
        let registry = LocaleRegistry::init();

        let english = top_location_options(&table(), &registry, "en-GB");
        assert_eq!(
            labels(&english),
            vec![
                "Atlantis",
                "California",
                "Georgia (country)",
                "Georgia (US state)",
                "Germany",
                "United States of America",
            ]
        );

        let french = top_location_options(&table(), &registry, "fr");
        assert_eq!(
            labels(&french),
            vec![
                "Allemagne",
                "Atlantis",
                "California",
                "États-Unis d'Amérique",
                "Georgia (État américain)",
                "Géorgie (pays)",
            ]
        );
    }

    #[test]
    fn unknown_country_keeps_dataset_label() {
        let registry = LocaleRegistry::init();
        let options = top_location_options(&table(), &registry, "de");
        assert!(options.iter().any(|o| o.label == "Atlantis"));
        assert!(options.iter().any(|o| o.label == "Georgien (Land)"));
        assert!(!options.iter().any(|o| o.value == "US_06_001"));
    }

    #[test]
    fn georgia_state_tagged_usa_takes_country_name() {
        let registry = LocaleRegistry::init();
        let table: LocationTable = [
            ("US_13", record("Georgia", Some("USA"), Some("US states"))),
            ("GEO", record("Georgia", Some("GEO"), None)),
        ]
        .into_iter()
        .map(|(k, r)| (k.to_string(), r))
        .collect();

        let options = top_location_options(&table, &registry, "en-US");
        assert_eq!(labels(&options), vec!["United States of America (US state)"]);
        assert_eq!(options[0].value, "US_13");
    }

    #[test]
    fn cache_rebuilds_on_version_or_locale_change() {
        let registry = LocaleRegistry::init();
        let table = table();
        let mut cache = OptionsCache::new();

        assert_eq!(cache.get_or_build(1, &table, &registry, "en-US").len(), 6);
        assert!(cache.is_cached(1, "en-US"));
        assert!(!cache.is_cached(1, "fr"));

        cache.get_or_build(1, &table, &registry, "fr");
        assert!(cache.is_cached(1, "en-US"));
        assert!(cache.is_cached(1, "fr"));

        cache.get_or_build(2, &table, &registry, "fr");
        assert!(!cache.is_cached(1, "fr"));
        assert!(!cache.is_cached(2, "en-US"));
        assert!(cache.is_cached(2, "fr"));
    }
}
