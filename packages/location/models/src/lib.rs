#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location dataset and prevalence form types.
//!
//! These types describe the static location dataset (one record per
//! country, state, province or sub-region) and the prevalence section of
//! the calculator form that selecting a location fills in. This crate has
//! no I/O; loading and derivation live in `risk_prevalence_location`.

mod table;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use table::LocationTable;

/// ISO 3166-1 alpha-3 code of Georgia the country.
pub const GEORGIA_COUNTRY_ISO3: &str = "GEO";

/// Dataset key of Georgia the US state (FIPS 13).
pub const GEORGIA_US_STATE_KEY: &str = "US_13";

/// Key prefix shared by all US state records.
pub const US_STATE_KEY_PREFIX: &str = "US_";

/// A location record as published in the static dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    /// Display name used when no localized name is available.
    pub label: String,
    /// ISO 3166-1 alpha-3 country code; absent for non-country entries.
    #[serde(default)]
    pub iso3: Option<String>,
    /// Population as a formatted string (e.g. `"39,512,223"`).
    pub population: String,
    /// Reported cases over the past seven days.
    pub cases_past_week: i64,
    /// Week-over-week change in reported cases, in percent.
    pub cases_increasing_percentage: f64,
    /// Share of tests that came back positive, in percent.
    #[serde(default)]
    pub positive_case_percentage: Option<f64>,
    /// Group this entry is listed under in the top-level picker. `None`
    /// means the entry is only reachable as a subdivision.
    #[serde(default)]
    pub top_level_group: Option<String>,
    /// Child location keys, in display order.
    #[serde(default)]
    pub subdivisions: Vec<String>,
    /// People with at least one but not all vaccine doses.
    #[serde(default)]
    pub incomplete_vaccinations: Option<i64>,
    /// People fully vaccinated.
    #[serde(default)]
    pub complete_vaccinations: Option<i64>,
    #[serde(default)]
    pub unvaccinated_prevalence_ratio: Option<f64>,
    #[serde(default)]
    pub average_fully_vaccinated_multiplier: Option<f64>,
    /// When the upstream figures were last refreshed (ISO 8601).
    pub updated_at: String,
}

impl LocationRecord {
    /// Whether the picker offers a choice one level below this location.
    ///
    /// A single subdivision is not a choice: the picker stays hidden and
    /// the location itself stays selected.
    #[must_use]
    pub fn has_selectable_subdivisions(&self) -> bool {
        self.subdivisions.len() > 1
    }
}

/// Prevalence figures derived from a single location record.
///
/// Missing fields deserialize to the absent-record values, so a form that
/// has not resolved a location yet is still accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrevalenceData {
    /// Population string exactly as published.
    pub population: String,
    pub cases_past_week: i64,
    /// Rounded to one decimal place.
    pub cases_increasing_percentage: f64,
    /// Rounded to one decimal place.
    pub positive_case_percentage: Option<f64>,
    /// When the figures were published.
    #[serde(rename = "prevalenceDataDate", alias = "prevalanceDataDate")]
    pub prevalence_data_date: DateTime<Utc>,
    /// Whole percent of the population that is fully vaccinated.
    pub percent_fully_vaccinated: Option<i64>,
    pub unvaccinated_prevalence_ratio: Option<f64>,
    pub average_fully_vaccinated_multiplier: Option<f64>,
}

impl PrevalenceData {
    /// The record used when no location is selected or the selected key
    /// is missing from the dataset.
    ///
    /// `positive_case_percentage` is `Some(0.0)` rather than `None` here,
    /// unlike every other "unknown" field.
    #[must_use]
    pub const fn absent(now: DateTime<Utc>) -> Self {
        Self {
            population: String::new(),
            cases_past_week: 0,
            cases_increasing_percentage: 0.0,
            positive_case_percentage: Some(0.0),
            prevalence_data_date: now,
            percent_fully_vaccinated: None,
            unvaccinated_prevalence_ratio: None,
            average_fully_vaccinated_multiplier: None,
        }
    }
}

impl Default for PrevalenceData {
    fn default() -> Self {
        Self::absent(Utc::now())
    }
}

/// The prevalence section of the calculator form.
///
/// Owned by the enclosing form. Components never patch it in place; every
/// change produces a full replacement value. Fields belonging to other
/// sections of the form are kept in [`PrevalenceForm::rest`] so that a
/// replacement never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrevalenceForm {
    #[serde(default)]
    pub top_location: String,
    #[serde(default)]
    pub sub_location: String,
    #[serde(default)]
    pub sub_sub_location: String,
    /// Accepts `true`/`false` or the legacy `1`/`0` encoding.
    #[serde(default, deserialize_with = "bool_or_flag")]
    pub use_manual_entry: bool,
    #[serde(flatten)]
    pub prevalence: PrevalenceData,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl PrevalenceForm {
    /// A form with nothing selected and the given prevalence figures.
    #[must_use]
    pub fn new(prevalence: PrevalenceData) -> Self {
        Self {
            top_location: String::new(),
            sub_location: String::new(),
            sub_sub_location: String::new(),
            use_manual_entry: false,
            prevalence,
            rest: serde_json::Map::new(),
        }
    }

    /// The most specific non-empty location key, or `""`.
    #[must_use]
    pub fn effective_key(&self) -> &str {
        [&self.sub_sub_location, &self.sub_location, &self.top_location]
            .into_iter()
            .find(|k| !k.is_empty())
            .map_or("", String::as_str)
    }
}

fn bool_or_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(n) => n != 0,
    })
}

/// How far down the location cascade a form has been filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionLevel {
    NoneSelected,
    TopSelected,
    SubSelected,
    SubSubSelected,
}

impl SelectionLevel {
    /// Classifies a form by its most specific non-empty location field.
    #[must_use]
    pub fn of(form: &PrevalenceForm) -> Self {
        if !form.sub_sub_location.is_empty() {
            Self::SubSubSelected
        } else if !form.sub_location.is_empty() {
            Self::SubSelected
        } else if !form.top_location.is_empty() {
            Self::TopSelected
        } else {
            Self::NoneSelected
        }
    }
}

/// Which picker in the cascade an event or request targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum CascadeLevel {
    Top,
    Sub,
    SubSub,
}

/// One entry of a location picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationOption {
    /// Text shown to the user.
    pub label: String,
    /// Dataset key of the location.
    pub value: String,
}

/// Wording family used for the sub-location pickers' labels and
/// placeholders.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SubPromptType {
    /// Generic "country or region" wording.
    #[default]
    #[serde(rename = "country_or_regions")]
    #[strum(serialize = "country_or_regions")]
    CountryOrRegions,
    /// US states: counties.
    #[serde(rename = "US")]
    #[strum(serialize = "US")]
    Us,
    /// Louisiana: parishes.
    #[serde(rename = "US-LA")]
    #[strum(serialize = "US-LA")]
    UsLouisiana,
    /// Alaska: boroughs.
    #[serde(rename = "US-AK")]
    #[strum(serialize = "US-AK")]
    UsAlaska,
    /// Canada: provinces.
    #[serde(rename = "CA")]
    #[strum(serialize = "CA")]
    Canada,
}
