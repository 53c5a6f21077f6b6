#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location dataset loading, cascading selection and prevalence derivation.
//!
//! The dataset is fetched once ([`loader`]), bucketed into top-level
//! groups ([`groups`]), and queried through a three-level cascade
//! (top location, sub-location, sub-sub-location) in [`selection`]. Every
//! selection change re-derives the prevalence figures ([`derive`]) from the
//! most specific selected key. [`manual`] switches the form between
//! location lookup and hand-entered figures.

pub mod derive;
pub mod groups;
pub mod loader;
pub mod manual;
pub mod prompt;
pub mod selection;

use thiserror::Error;

pub use derive::{data_for_location, data_for_location_now};
pub use groups::location_groups;
pub use loader::{DatasetSource, fetch_locations, load_locations};
pub use manual::set_manual_entry;
pub use prompt::sub_prompt_type;
pub use selection::{
    effective_key, location_set, resolve, restore_on_mount, select_sub, select_sub_sub,
    select_top, show_sub_location, show_sub_sub_location, sub_location_options,
    sub_sub_location_options, subdivision_options,
};

/// Errors that can occur while loading the location dataset.
#[derive(Debug, Error)]
pub enum LocationError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local dataset file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The dataset is not a valid location mapping.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by cascade transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// A finer level was picked while the level above it is empty.
    #[error("cannot select {level} location before a {parent} location is selected")]
    MissingParent {
        /// Level that was picked.
        level: &'static str,
        /// Level that must be filled first.
        parent: &'static str,
    },
}
