#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk prevalence API server binary.
//!
//! Reads its configuration from the TOML file named by `SERVER_CONFIG`,
//! or from the environment when that is unset.

use risk_prevalence_server::{ServerConfig, run_server};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = match std::env::var("SERVER_CONFIG") {
        Ok(path) => ServerConfig::from_toml_file(path.as_ref())?,
        Err(_) => ServerConfig::from_env(),
    };

    run_server(config).await?;
    Ok(())
}
