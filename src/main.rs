//! Swagger From Routes - Command-line tool for generating Swagger 1.1 API descriptions.
//!
//! This binary reads a web API's route table (YAML or JSON, exported by the host framework)
//! and either prints the resulting API description or serves it over HTTP the way a mounted
//! documentation endpoint would.
//!
//! # Usage
//!
//! ```bash
//! swagger-from-routes [OPTIONS] <COMMAND>
//! ```
//!
//! # Examples
//!
//! Print the index document:
//! ```bash
//! swagger-from-routes generate ./routes.yaml
//! ```
//!
//! Write the YAML description of one resource:
//! ```bash
//! swagger-from-routes generate ./routes -r users -f yaml -o users.yaml
//! ```
//!
//! Serve the documentation endpoints with verbose logging:
//! ```bash
//! swagger-from-routes -v serve ./routes --bind 0.0.0.0:9292 --markdown
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_from_routes::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Swagger From Routes starting...");

    cli::run(args)?;

    info!("Done");

    Ok(())
}
