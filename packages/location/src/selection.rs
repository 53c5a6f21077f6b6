//! Cascading location selection.
//!
//! A form selects up to three nested locations: a top location (country or
//! US state), a sub-location (state, province, county) and a
//! sub-sub-location. Each level narrows the choices to the previous
//! level's `subdivisions`. Prevalence is always derived from the most
//! specific non-empty key.
//!
//! Transitions never mutate the caller's form. They return a complete
//! replacement that keeps the manual-entry flag and every unrelated form
//! field.

use chrono::{DateTime, Utc};
use risk_prevalence_locale::locale_compare;
use risk_prevalence_location_models::{
    LocationOption, LocationRecord, LocationTable, PrevalenceForm,
};

use crate::SelectionError;
use crate::derive::data_for_location;

/// The key prevalence is derived from: `sub_sub` if set, else `sub` if
/// set, else `top`.
#[must_use]
pub fn effective_key<'a>(top: &'a str, sub: &'a str, sub_sub: &'a str) -> &'a str {
    if !sub_sub.is_empty() {
        sub_sub
    } else if !sub.is_empty() {
        sub
    } else {
        top
    }
}

/// Builds the replacement form for the given three keys.
///
/// Prevalence is re-derived from [`effective_key`]; a key that is empty
/// or missing from `table` yields the absent-record default.
#[must_use]
pub fn resolve(
    form: &PrevalenceForm,
    table: &LocationTable,
    top: &str,
    sub: &str,
    sub_sub: &str,
    now: DateTime<Utc>,
) -> PrevalenceForm {
    let key = effective_key(top, sub, sub_sub);
    let record = if key.is_empty() { None } else { table.get(key) };

    log::debug!("Resolving prevalence for {key:?} (found: {})", record.is_some());

    PrevalenceForm {
        top_location: top.to_string(),
        sub_location: sub.to_string(),
        sub_sub_location: sub_sub.to_string(),
        use_manual_entry: form.use_manual_entry,
        prevalence: data_for_location(record, now),
        rest: form.rest.clone(),
    }
}

/// Picks (`Some`) or clears (`None`) the top location.
///
/// Either way the sub and sub-sub levels are cleared.
#[must_use]
pub fn select_top(
    form: &PrevalenceForm,
    table: &LocationTable,
    key: Option<&str>,
    now: DateTime<Utc>,
) -> PrevalenceForm {
    resolve(form, table, key.unwrap_or(""), "", "", now)
}

/// Picks (`Some`) or clears (`None`) the sub-location, clearing the
/// sub-sub level.
///
/// # Errors
///
/// Returns [`SelectionError::MissingParent`] when picking a key while no
/// top location is set.
pub fn select_sub(
    form: &PrevalenceForm,
    table: &LocationTable,
    key: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PrevalenceForm, SelectionError> {
    if key.is_some() && form.top_location.is_empty() {
        return Err(SelectionError::MissingParent {
            level: "sub",
            parent: "top",
        });
    }
    Ok(resolve(
        form,
        table,
        &form.top_location,
        key.unwrap_or(""),
        "",
        now,
    ))
}

/// Picks (`Some`) or clears (`None`) the sub-sub-location.
///
/// # Errors
///
/// Returns [`SelectionError::MissingParent`] when picking a key while no
/// sub-location is set.
pub fn select_sub_sub(
    form: &PrevalenceForm,
    table: &LocationTable,
    key: Option<&str>,
    now: DateTime<Utc>,
) -> Result<PrevalenceForm, SelectionError> {
    if key.is_some() && form.sub_location.is_empty() {
        return Err(SelectionError::MissingParent {
            level: "sub-sub",
            parent: "sub",
        });
    }
    Ok(resolve(
        form,
        table,
        &form.top_location,
        &form.sub_location,
        key.unwrap_or(""),
        now,
    ))
}

fn selectable<'a>(table: &'a LocationTable, key: &str) -> Option<&'a LocationRecord> {
    if key.is_empty() {
        return None;
    }
    table
        .get(key)
        .filter(|record| record.has_selectable_subdivisions())
}

/// Whether the sub-location picker is shown.
///
/// Only when the top location exists and has more than one subdivision. A
/// single subdivision is never offered and never filled in automatically.
#[must_use]
pub fn show_sub_location(form: &PrevalenceForm, table: &LocationTable) -> bool {
    selectable(table, &form.top_location).is_some()
}

/// Whether the sub-sub-location picker is shown. Same rule as
/// [`show_sub_location`], one level down.
#[must_use]
pub fn show_sub_sub_location(form: &PrevalenceForm, table: &LocationTable) -> bool {
    selectable(table, &form.sub_location).is_some()
}

fn child_options(table: &LocationTable, record: &LocationRecord) -> Vec<LocationOption> {
    let mut options: Vec<LocationOption> = record
        .subdivisions
        .iter()
        .filter_map(|child| {
            let Some(child_record) = table.get(child) else {
                log::warn!("{} lists unknown subdivision {child}", record.label);
                return None;
            };
            Some(LocationOption {
                label: child_record.label.clone(),
                value: child.clone(),
            })
        })
        .collect();
    options.sort_by(|a, b| locale_compare(&a.label, &b.label));
    options
}

/// Options for every subdivision of `key`, sorted by label.
///
/// Unlike the picker options this does not hide single-child lists.
/// `None` when `key` is not in the table.
#[must_use]
pub fn subdivision_options(table: &LocationTable, key: &str) -> Option<Vec<LocationOption>> {
    table.get(key).map(|record| child_options(table, record))
}

/// Options for the sub-location picker, sorted by label. Empty when the
/// picker is hidden.
///
/// Sub-location names are shown as published; they are not localized.
#[must_use]
pub fn sub_location_options(form: &PrevalenceForm, table: &LocationTable) -> Vec<LocationOption> {
    selectable(table, &form.top_location)
        .map(|record| child_options(table, record))
        .unwrap_or_default()
}

/// Options for the sub-sub-location picker, sorted by label. Empty when
/// the picker is hidden.
#[must_use]
pub fn sub_sub_location_options(
    form: &PrevalenceForm,
    table: &LocationTable,
) -> Vec<LocationOption> {
    selectable(table, &form.sub_location)
        .map(|record| child_options(table, record))
        .unwrap_or_default()
}

/// Whether the form shows figures for a looked-up location.
#[must_use]
pub fn location_set(form: &PrevalenceForm, table: &LocationTable) -> bool {
    !form.use_manual_entry && table.contains(&form.top_location)
}

/// Refreshes a stored selection against a freshly loaded dataset.
///
/// Returns `None` when the form is in manual mode or holds no usable
/// selection; otherwise the re-resolved form, so that figures saved from
/// an earlier session are replaced by the latest values.
#[must_use]
pub fn restore_on_mount(
    form: &PrevalenceForm,
    table: &LocationTable,
    now: DateTime<Utc>,
) -> Option<PrevalenceForm> {
    let has_selection = !form.sub_sub_location.is_empty()
        || !form.sub_location.is_empty()
        || table.contains(&form.top_location);

    if form.use_manual_entry || !has_selection {
        return None;
    }

    Some(resolve(
        form,
        table,
        &form.top_location,
        &form.sub_location,
        &form.sub_sub_location,
        now,
    ))
}
