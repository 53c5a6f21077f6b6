//! Render model for the prevalence controls.

use risk_prevalence_location_models::{LocationOption, SubPromptType};
use serde::{Deserialize, Serialize};

/// One location picker as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickerView {
    /// Label above the picker.
    pub label: String,
    pub placeholder: String,
    pub options: Vec<LocationOption>,
    /// The option matching the form's key at this level, if any.
    pub selected: Option<LocationOption>,
    /// Whether the picker is drawn at all.
    pub visible: bool,
}

/// Everything needed to draw the location section of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlsView {
    pub header: String,
    pub top: PickerView,
    pub sub: PickerView,
    pub sub_sub: PickerView,
    /// Pickers are disabled while manual entry is on.
    pub disabled: bool,
    /// Text of the manual-entry toggle.
    pub manual_toggle_label: String,
    /// Accessible name of the manual-entry toggle.
    pub manual_toggle_name: String,
    pub manual_entry: bool,
    pub location_set: bool,
    pub details_header: String,
    pub details_open: bool,
    pub sub_prompt_type: SubPromptType,
}
