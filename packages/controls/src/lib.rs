#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location picker and prevalence controls for the risk calculator.
//!
//! [`PrevalenceControls`] is the location section of the calculator form:
//! three cascading pickers, a manual-entry toggle and a details panel. It
//! is UI-toolkit agnostic. Front ends feed it picker and toggle events and
//! draw whatever [`ControlsView`] it returns.

pub mod component;
pub mod options;
pub mod view;

pub use component::PrevalenceControls;
pub use options::{OptionsCache, top_location_options};
pub use view::{ControlsView, PickerView};
