//! Derivation of prevalence figures from a location record.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use risk_prevalence_location_models::{LocationRecord, PrevalenceData};

/// Rounds to one decimal place, halves away from zero.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parses the numeric part of a formatted population string.
///
/// Every character other than digits, `.` and `e` is dropped first, so
/// `"39,512,223"` becomes `39512223.0`. Returns `None` when nothing
/// parseable remains.
#[must_use]
pub fn numeric_population(population: &str) -> Option<f64> {
    let digits: String = population
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == 'e')
        .collect();
    digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a dataset timestamp as UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS[.f]` and
/// bare `YYYY-MM-DD`. Timestamps without an offset are taken as UTC.
#[must_use]
pub fn parse_updated_at(updated_at: &str) -> Option<DateTime<Utc>> {
    let s = updated_at.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn percent_fully_vaccinated(record: &LocationRecord) -> Option<i64> {
    let complete = record.complete_vaccinations.filter(|&n| n != 0)?;
    let population = numeric_population(&record.population).filter(|&p| p != 0.0)?;
    Some((complete as f64 / population * 100.0).round() as i64)
}

/// Derives the prevalence figures for a location.
///
/// `None` (nothing selected, or a key missing from the dataset) yields
/// [`PrevalenceData::absent`] stamped with `now`. A record whose
/// `updatedAt` cannot be parsed is also stamped with `now`.
#[must_use]
pub fn data_for_location(record: Option<&LocationRecord>, now: DateTime<Utc>) -> PrevalenceData {
    let Some(record) = record else {
        return PrevalenceData::absent(now);
    };

    let prevalence_data_date = parse_updated_at(&record.updated_at).unwrap_or_else(|| {
        log::warn!(
            "Unparseable updatedAt {:?} for {}, using current time",
            record.updated_at,
            record.label
        );
        now
    });

    PrevalenceData {
        population: record.population.clone(),
        cases_past_week: record.cases_past_week,
        cases_increasing_percentage: round_to_tenth(record.cases_increasing_percentage),
        positive_case_percentage: record.positive_case_percentage.map(round_to_tenth),
        prevalence_data_date,
        percent_fully_vaccinated: percent_fully_vaccinated(record),
        unvaccinated_prevalence_ratio: record.unvaccinated_prevalence_ratio,
        average_fully_vaccinated_multiplier: record.average_fully_vaccinated_multiplier,
    }
}

/// [`data_for_location`] stamped with the system clock.
#[must_use]
pub fn data_for_location_now(record: Option<&LocationRecord>) -> PrevalenceData {
    data_for_location(record, Utc::now())
}
