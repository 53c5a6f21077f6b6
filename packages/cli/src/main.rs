#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line location picker for the risk calculator's prevalence
//! figures.
//!
//! With no subcommand it walks the user through the same cascading
//! location picker the calculator uses. The subcommands expose the option
//! list and selection resolution for scripting, and start the API server.

mod interactive;

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use risk_prevalence_controls::top_location_options;
use risk_prevalence_locale::LocaleRegistry;
use risk_prevalence_location::{fetch_locations, select_sub, select_sub_sub, select_top};
use risk_prevalence_location_models::{PrevalenceData, PrevalenceForm};
use risk_prevalence_server::{ServerConfig, run_server};

#[derive(Parser)]
#[command(
    name = "risk_prevalence",
    about = "Location picker for the risk calculator's prevalence figures"
)]
struct Cli {
    /// Location dataset path or URL (overrides the configuration)
    #[arg(long, global = true)]
    dataset: Option<String>,
    /// TOML configuration file (defaults to environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top-level location options as `key<TAB>label` lines
    Options {
        /// Locale for country names and ordering (e.g. "en-US", "fr")
        #[arg(long)]
        locale: Option<String>,
    },
    /// Resolve a selection and print the resulting form as JSON
    Resolve {
        /// Top-level location key (e.g. "`US_06`")
        #[arg(long)]
        top: String,
        /// Sub-location key
        #[arg(long)]
        sub: Option<String>,
        /// Sub-sub-location key (requires `--sub`)
        #[arg(long)]
        sub_sub: Option<String>,
    },
    /// Start the API server
    Serve {
        /// Prompt for bind address, port and dataset before starting
        #[arg(long)]
        interactive: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_toml_file(path)?,
        None => ServerConfig::from_env(),
    };
    if let Some(dataset) = cli.dataset {
        config.dataset = dataset;
    }

    let Some(command) = cli.command else {
        return interactive::run(&config).await;
    };

    match command {
        Commands::Options { locale } => {
            let locale = locale.unwrap_or_else(|| config.default_locale.clone());
            let table = fetch_locations(&config.dataset_source()).await?;
            let registry = LocaleRegistry::init();

            for option in top_location_options(&table, &registry, &locale) {
                println!("{}\t{}", option.value, option.label);
            }
        }
        Commands::Resolve { top, sub, sub_sub } => {
            let table = fetch_locations(&config.dataset_source()).await?;
            let now = Utc::now();

            let form = PrevalenceForm::new(PrevalenceData::absent(now));
            let mut form = select_top(&form, &table, Some(top.as_str()), now);
            if let Some(sub) = sub.as_deref() {
                form = select_sub(&form, &table, Some(sub), now)?;
            }
            if let Some(sub_sub) = sub_sub.as_deref() {
                form = select_sub_sub(&form, &table, Some(sub_sub), now)?;
            }

            if !table.contains(form.effective_key()) {
                log::warn!("{} is not in the dataset", form.effective_key());
            }
            println!("{}", serde_json::to_string_pretty(&form)?);
        }
        Commands::Serve { interactive } => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(move || {
                let system = actix_web::rt::System::new();
                if interactive {
                    system.block_on(risk_prevalence_server::interactive::run(config))
                } else {
                    system.block_on(run_server(config))
                }
            })
            .await??;
        }
    }

    Ok(())
}
