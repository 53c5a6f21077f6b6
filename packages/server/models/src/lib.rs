#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the risk prevalence server.
//!
//! Forms travel in the same camelCase shape the calculator stores them in,
//! so a client can post its whole form and replace it with the one that
//! comes back.

use risk_prevalence_location_models::{CascadeLevel, PrevalenceForm, SubPromptType};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
    /// Number of records in the loaded dataset.
    pub location_count: usize,
}

/// Query parameters for the options endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsQueryParams {
    /// Locale tag; the server default when omitted.
    pub locale: Option<String>,
}

/// `POST /api/prevalence/select` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    pub form: PrevalenceForm,
    /// Picker that changed.
    pub level: CascadeLevel,
    /// Picked key; absent or `null` clears the picker.
    #[serde(default)]
    pub value: Option<String>,
}

/// `POST /api/prevalence/manual` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualRequest {
    pub form: PrevalenceForm,
    /// New state of the manual-entry toggle.
    pub manual: bool,
}

/// `POST /api/prevalence/restore` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreRequest {
    pub form: PrevalenceForm,
}

/// Replacement form plus the picker state derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrevalenceResponse {
    pub form: PrevalenceForm,
    pub show_sub_location: bool,
    pub show_sub_sub_location: bool,
    pub location_set: bool,
    pub sub_prompt_type: SubPromptType,
}
