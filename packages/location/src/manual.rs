//! Switching between location lookup and manual entry.

use chrono::{DateTime, Utc};
use risk_prevalence_location_models::{LocationTable, PrevalenceForm};

use crate::selection::resolve;

/// Turns manual entry on or off.
///
/// Turning it on keeps the last figures and the stored selection so the
/// manual fields start from the selected location's numbers. Turning it
/// off re-derives the figures from the stored selection, discarding any
/// hand-entered values.
#[must_use]
pub fn set_manual_entry(
    form: &PrevalenceForm,
    table: &LocationTable,
    manual: bool,
    now: DateTime<Utc>,
) -> PrevalenceForm {
    if manual {
        return PrevalenceForm {
            use_manual_entry: true,
            ..form.clone()
        };
    }

    let mut next = resolve(
        form,
        table,
        &form.top_location,
        &form.sub_location,
        &form.sub_sub_location,
        now,
    );
    next.use_manual_entry = false;
    next
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use risk_prevalence_location_models::{LocationRecord, PrevalenceData};

    use super::*;
    use crate::selection::select_top;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 15, 12, 0, 0).unwrap()
    }

    fn table() -> LocationTable {
        let france = LocationRecord {
            label: "France".into(),
            iso3: Some("FRA".into()),
            population: "67,081,000".into(),
            cases_past_week: 52_000,
            cases_increasing_percentage: -4.56,
            positive_case_percentage: Some(2.14),
            top_level_group: Some("Countries".into()),
            subdivisions: Vec::new(),
            incomplete_vaccinations: None,
            complete_vaccinations: Some(20_124_300),
            unvaccinated_prevalence_ratio: Some(1.2),
            average_fully_vaccinated_multiplier: Some(0.6),
            updated_at: "2021-06-01".into(),
        };
        std::iter::once(("France".to_string(), france)).collect()
    }

    #[test]
    fn manual_round_trip_restores_dataset_values() {
        let table = table();
        let start = PrevalenceForm::new(PrevalenceData::absent(now()));
        let selected = select_top(&start, &table, Some("France"), now());

        let mut manual = set_manual_entry(&selected, &table, true, now());
        assert!(manual.use_manual_entry);
        assert_eq!(manual.top_location, "France");
        assert_eq!(manual.prevalence, selected.prevalence);

        manual.prevalence.cases_past_week = 7;
        manual.prevalence.population = "12".into();
        manual.prevalence.positive_case_percentage = Some(50.0);

        let back = set_manual_entry(&manual, &table, false, now());
        assert!(!back.use_manual_entry);
        assert_eq!(back.top_location, "France");
        assert_eq!(back.prevalence.cases_past_week, 52_000);
        assert_eq!(back.prevalence.population, "67,081,000");
        assert_eq!(back.prevalence.positive_case_percentage, Some(2.1));
        assert!((back.prevalence.cases_increasing_percentage - -4.6).abs() < 1e-9);
        assert_eq!(back.prevalence.percent_fully_vaccinated, Some(30));
        assert_eq!(back.prevalence, selected.prevalence);
    }

    #[test]
    fn leaving_manual_without_selection_gives_default() {
        let table = table();
        let mut form = PrevalenceForm::new(PrevalenceData::absent(now()));
        form.use_manual_entry = true;
        form.prevalence.cases_past_week = 400;

        let back = set_manual_entry(&form, &table, false, now());
        assert_eq!(back.prevalence, PrevalenceData::absent(now()));
    }
}
