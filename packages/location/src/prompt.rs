//! Wording selection for the sub-location pickers.

use risk_prevalence_location_models::{
    LocationTable, PrevalenceForm, SubPromptType, US_STATE_KEY_PREFIX,
};

/// Picks the label/placeholder family for the sub-pickers based on the
/// selected top location.
#[must_use]
pub fn sub_prompt_type(form: &PrevalenceForm, table: &LocationTable) -> SubPromptType {
    let top = form.top_location.as_str();
    let Some(record) = table.get(top).filter(|_| !top.is_empty()) else {
        return SubPromptType::CountryOrRegions;
    };

    if top.starts_with(US_STATE_KEY_PREFIX) {
        match record.label.as_str() {
            "Louisiana" => SubPromptType::UsLouisiana,
            "Alaska" => SubPromptType::UsAlaska,
            _ => SubPromptType::Us,
        }
    } else if top == "Canada" {
        SubPromptType::Canada
    } else {
        SubPromptType::CountryOrRegions
    }
}

/// Translation keys for the sub-picker wording.
pub mod keys {
    use risk_prevalence_location_models::SubPromptType;

    /// Label above the sub-location picker.
    #[must_use]
    pub fn sub_label(t: SubPromptType) -> String {
        format!("calculator.location_sublabel.{t}")
    }

    /// Placeholder inside the sub-location picker.
    #[must_use]
    pub fn sub_prompt(t: SubPromptType) -> String {
        format!("calculator.location_subprompt.{t}")
    }

    /// Label above the sub-sub-location picker.
    #[must_use]
    pub fn sub_sub_label(t: SubPromptType) -> String {
        format!("calculator.location_subsublabel.{t}")
    }

    /// Placeholder inside the sub-sub-location picker.
    #[must_use]
    pub fn sub_sub_prompt(t: SubPromptType) -> String {
        format!("calculator.location_subsubprompt.{t}")
    }
}
