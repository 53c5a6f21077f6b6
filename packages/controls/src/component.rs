//! The prevalence controls component.
//!
//! Holds the loaded dataset and the caller's form, turns picker and toggle
//! events into full form replacements, and produces a [`ControlsView`] for
//! the current state. The component never edits the form in place: every
//! change goes through the setter as a complete record and is mirrored
//! into the component's own copy.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use risk_prevalence_locale::Localizer;
use risk_prevalence_location::prompt::keys;
use risk_prevalence_location::{
    DatasetSource, SelectionError, load_locations, location_set, restore_on_mount,
    select_sub, select_sub_sub, select_top, set_manual_entry, show_sub_location,
    show_sub_sub_location, sub_location_options, sub_prompt_type, sub_sub_location_options,
};
use risk_prevalence_location_models::{LocationOption, LocationTable, PrevalenceForm};

use crate::options::OptionsCache;
use crate::view::{ControlsView, PickerView};

/// Picker selection as delivered by a typeahead: anything other than
/// exactly one option means the picker was cleared.
fn single(selection: &[LocationOption]) -> Option<&str> {
    match selection {
        [only] => Some(only.value.as_str()),
        _ => None,
    }
}

fn find_selected(options: &[LocationOption], key: &str) -> Option<LocationOption> {
    options.iter().find(|o| o.value == key).cloned()
}

/// Location picker, manual-entry toggle and details panel state for the
/// prevalence section of the calculator form.
pub struct PrevalenceControls<L, S>
where
    L: Localizer,
    S: FnMut(PrevalenceForm),
{
    table: Arc<LocationTable>,
    version: u64,
    localizer: L,
    locale: String,
    form: PrevalenceForm,
    setter: S,
    is_manual_entry_currently: bool,
    details_open: bool,
    cache: OptionsCache,
    clock: fn() -> DateTime<Utc>,
}

impl<L, S> PrevalenceControls<L, S>
where
    L: Localizer,
    S: FnMut(PrevalenceForm),
{
    /// Creates the component over an empty dataset.
    ///
    /// The manual-entry flag starts from the form, and the details panel
    /// starts open when manual entry is on.
    pub fn new(localizer: L, locale: impl Into<String>, form: PrevalenceForm, setter: S) -> Self {
        let manual = form.use_manual_entry;
        Self {
            table: Arc::new(LocationTable::new()),
            version: 0,
            localizer,
            locale: locale.into(),
            form,
            setter,
            is_manual_entry_currently: manual,
            details_open: manual,
            cache: OptionsCache::new(),
            clock: Utc::now,
        }
    }

    /// Replaces the clock used to stamp records with no usable date.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Loads the dataset once, then refreshes a stored selection with the
    /// latest figures.
    ///
    /// Nothing is applied until the load finishes; dropping the future
    /// before then leaves the component untouched.
    #[allow(clippy::future_not_send)]
    pub async fn mount(&mut self, source: &DatasetSource) {
        let table = load_locations(source).await;
        self.set_locations(table);

        let now = (self.clock)();
        if let Some(next) = restore_on_mount(&self.form, &self.table, now) {
            log::debug!("Restoring stored location {:?}", next.effective_key());
            self.update(next);
        }
    }

    /// Swaps in a new dataset and bumps the dataset version.
    pub fn set_locations(&mut self, table: impl Into<Arc<LocationTable>>) {
        self.table = table.into();
        self.version += 1;
        log::debug!(
            "Location dataset v{} loaded ({} entries)",
            self.version,
            self.table.len()
        );
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Takes a new form from the caller without notifying the setter.
    pub fn set_form(&mut self, form: PrevalenceForm) {
        self.form = form;
    }

    #[must_use]
    pub const fn form(&self) -> &PrevalenceForm {
        &self.form
    }

    #[must_use]
    pub fn table(&self) -> &LocationTable {
        &self.table
    }

    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub const fn is_manual_entry_currently(&self) -> bool {
        self.is_manual_entry_currently
    }

    #[must_use]
    pub const fn details_open(&self) -> bool {
        self.details_open
    }

    fn update(&mut self, next: PrevalenceForm) {
        self.form = next.clone();
        (self.setter)(next);
    }

    /// The top-level picker changed.
    pub fn on_top_location_change(&mut self, selection: &[LocationOption]) {
        let next = select_top(&self.form, &self.table, single(selection), (self.clock)());
        self.update(next);
    }

    /// The sub-location picker changed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingParent`] if an option is picked
    /// while no top location is set. The form is left unchanged.
    pub fn on_sub_location_change(
        &mut self,
        selection: &[LocationOption],
    ) -> Result<(), SelectionError> {
        let next = select_sub(&self.form, &self.table, single(selection), (self.clock)())?;
        self.update(next);
        Ok(())
    }

    /// The sub-sub-location picker changed.
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError::MissingParent`] if an option is picked
    /// while no sub-location is set. The form is left unchanged.
    pub fn on_sub_sub_location_change(
        &mut self,
        selection: &[LocationOption],
    ) -> Result<(), SelectionError> {
        let next = select_sub_sub(&self.form, &self.table, single(selection), (self.clock)())?;
        self.update(next);
        Ok(())
    }

    /// The manual-entry toggle changed.
    pub fn on_manual_entry_toggle(&mut self, manual: bool) {
        self.is_manual_entry_currently = manual;
        let next = set_manual_entry(&self.form, &self.table, manual, (self.clock)());
        self.update(next);
    }

    /// The details panel was opened or closed.
    pub const fn on_details_toggle(&mut self, open: bool) {
        self.details_open = open;
    }

    /// Builds the render model for the current state.
    pub fn view(&mut self) -> ControlsView {
        let locale = self.locale.as_str();
        let t = |key: &str| self.localizer.translate_or_key(key, locale);
        let prompt = sub_prompt_type(&self.form, &self.table);

        let top_options = self
            .cache
            .get_or_build(self.version, &self.table, &self.localizer, locale)
            .to_vec();
        let top = PickerView {
            label: t("calculator.select_location_label"),
            placeholder: t("calculator.select_location_placeholder"),
            selected: find_selected(&top_options, &self.form.top_location),
            options: top_options,
            visible: true,
        };

        let sub_options = sub_location_options(&self.form, &self.table);
        let sub = PickerView {
            label: t(&keys::sub_label(prompt)),
            placeholder: t(&keys::sub_prompt(prompt)),
            selected: find_selected(&sub_options, &self.form.sub_location),
            options: sub_options,
            visible: show_sub_location(&self.form, &self.table),
        };

        let sub_sub_options = sub_sub_location_options(&self.form, &self.table);
        let sub_sub = PickerView {
            label: t(&keys::sub_sub_label(prompt)),
            placeholder: t(&keys::sub_sub_prompt(prompt)),
            selected: find_selected(&sub_sub_options, &self.form.sub_sub_location),
            options: sub_sub_options,
            visible: show_sub_sub_location(&self.form, &self.table),
        };

        ControlsView {
            header: t("calculator.location_selector_header"),
            top,
            sub,
            sub_sub,
            disabled: self.is_manual_entry_currently,
            manual_toggle_label: t("calculator.switch_button.enter_data_manually"),
            manual_toggle_name: t("calculator.switch_button.select_location"),
            manual_entry: self.is_manual_entry_currently,
            location_set: location_set(&self.form, &self.table),
            details_header: t("calculator.prevalence.details_header"),
            details_open: self.details_open,
            sub_prompt_type: prompt,
        }
    }
}
