#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the risk prevalence controls.
//!
//! Loads the location dataset once at startup and serves the location
//! options and cascade transitions as a small JSON API, so that thin
//! clients can drive the same picker logic the calculator uses. The
//! dataset file itself is served at `/location.json`.

pub mod config;
mod handlers;
pub mod interactive;

use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use risk_prevalence_controls::OptionsCache;
use risk_prevalence_locale::{LocaleRegistry, normalize_locale};
use risk_prevalence_location::{DatasetSource, load_locations};
use risk_prevalence_location_models::LocationTable;

pub use config::{ConfigError, ServerConfig};

/// Shared application state.
pub struct AppState {
    /// The location dataset, loaded once at startup.
    pub table: Arc<LocationTable>,
    /// Country names and UI strings.
    pub locales: Arc<LocaleRegistry>,
    /// Top-level option lists, built once per locale.
    pub options: Mutex<OptionsCache>,
    /// Locale used when a request names none.
    pub default_locale: String,
    /// Where the dataset was read from.
    pub dataset: DatasetSource,
}

impl AppState {
    /// Dataset version reported to the options cache. The table never
    /// changes while the server runs.
    pub const DATASET_VERSION: u64 = 1;

    #[must_use]
    pub fn new(table: LocationTable, config: &ServerConfig) -> Self {
        Self {
            table: Arc::new(table),
            locales: Arc::new(LocaleRegistry::init()),
            options: Mutex::new(OptionsCache::new()),
            default_locale: normalize_locale(&config.default_locale),
            dataset: config.dataset_source(),
        }
    }

    /// Loads the dataset named by `config` and builds the state around it.
    pub async fn load(config: &ServerConfig) -> Self {
        let source = config.dataset_source();
        log::info!("Loading location dataset from {source}...");
        let table = load_locations(&source).await;
        Self::new(table, config)
    }
}

/// Registers the API routes and the dataset file route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/locations/options", web::get().to(handlers::location_options))
            .route(
                "/locations/{key}/subdivisions",
                web::get().to(handlers::subdivisions),
            )
            .route("/prevalence/select", web::post().to(handlers::select))
            .route("/prevalence/manual", web::post().to(handlers::manual))
            .route("/prevalence/restore", web::post().to(handlers::restore)),
    )
    .route("/location.json", web::get().to(handlers::dataset_file));
}

/// Starts the risk prevalence API server.
///
/// Loads the location dataset, then starts the Actix-Web HTTP server.
/// This is a regular async function; the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::load(&config).await);

    log::info!(
        "Starting server on {}:{} ({} locations)",
        config.bind_addr,
        config.port,
        state.table.len()
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
