//! Interactive location picker.
//!
//! Drives [`PrevalenceControls`] from `dialoguer` prompts: pick a top
//! location, then a sub-location and sub-sub-location when the dataset
//! offers them, optionally switch to manual entry, and print the
//! resulting form.

use chrono::Utc;
use dialoguer::{Confirm, Input, Select};
use risk_prevalence_controls::{PickerView, PrevalenceControls};
use risk_prevalence_locale::LocaleRegistry;
use risk_prevalence_location_models::{LocationOption, PrevalenceData, PrevalenceForm};
use risk_prevalence_server::ServerConfig;

/// Label of the entry that leaves an optional picker empty.
const SKIP: &str = "(skip)";

/// Prompts for one picker. Optional pickers get a leading skip entry,
/// which yields an empty selection.
fn pick(picker: &PickerView, optional: bool) -> Result<Vec<LocationOption>, dialoguer::Error> {
    let mut labels: Vec<&str> = Vec::with_capacity(picker.options.len() + 1);
    if optional {
        labels.push(SKIP);
    }
    labels.extend(picker.options.iter().map(|o| o.label.as_str()));

    let idx = Select::new()
        .with_prompt(format!("{} ({})", picker.label, picker.placeholder))
        .items(&labels)
        .default(0)
        .interact()?;

    let idx = if optional {
        match idx.checked_sub(1) {
            Some(i) => i,
            None => return Ok(Vec::new()),
        }
    } else {
        idx
    };

    Ok(picker.options.get(idx).cloned().into_iter().collect())
}

fn edit_figures(form: &PrevalenceForm) -> Result<PrevalenceForm, dialoguer::Error> {
    let population: String = Input::new()
        .with_prompt("Population")
        .default(form.prevalence.population.clone())
        .allow_empty(true)
        .interact_text()?;
    let cases_past_week: i64 = Input::new()
        .with_prompt("Reported cases in the past week")
        .default(form.prevalence.cases_past_week)
        .interact_text()?;
    let cases_increasing_percentage: f64 = Input::new()
        .with_prompt("Week-over-week change in cases (%)")
        .default(form.prevalence.cases_increasing_percentage)
        .interact_text()?;

    let mut next = form.clone();
    next.prevalence.population = population;
    next.prevalence.cases_past_week = cases_past_week;
    next.prevalence.cases_increasing_percentage = cases_increasing_percentage;
    Ok(next)
}

/// Runs the interactive picker.
///
/// # Errors
///
/// Returns an error if a prompt fails or the form cannot be printed.
pub async fn run(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Risk Prevalence Location Picker");
    println!();

    let locale: String = Input::new()
        .with_prompt("Locale")
        .default(config.default_locale.clone())
        .interact_text()?;

    let form = PrevalenceForm::new(PrevalenceData::absent(Utc::now()));
    let mut controls = PrevalenceControls::new(LocaleRegistry::init(), locale, form, |form| {
        log::debug!("Form updated: {:?}", form.effective_key());
    });
    controls.mount(&config.dataset_source()).await;

    let view = controls.view();
    println!("{}", view.header);
    if view.top.options.is_empty() {
        println!("No locations available from {}.", config.dataset);
        return Ok(());
    }

    let selection = pick(&view.top, false)?;
    controls.on_top_location_change(&selection);

    let view = controls.view();
    if view.sub.visible {
        let selection = pick(&view.sub, true)?;
        controls.on_sub_location_change(&selection)?;
    }

    let view = controls.view();
    if view.sub_sub.visible {
        let selection = pick(&view.sub_sub, true)?;
        controls.on_sub_sub_location_change(&selection)?;
    }

    let view = controls.view();
    if Confirm::new()
        .with_prompt(view.manual_toggle_label)
        .default(false)
        .interact()?
    {
        controls.on_manual_entry_toggle(true);
        let edited = edit_figures(controls.form())?;
        controls.set_form(edited);
    }

    println!();
    println!("{}", controls.view().details_header);
    println!("{}", serde_json::to_string_pretty(controls.form())?);

    Ok(())
}
