//! Filedex CLI Binary
//!
//! Command-line front end for the file inventory system.

use clap::Parser;
use filedex::cli::{self, Cli};
use filedex::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    init_logging(&LoggingConfig::from_verbosity(cli.verbose));

    info!("Filedex starting");

    match cli::execute(&cli) {
        Ok(summary) => {
            info!("Run completed successfully");
            println!("{}", summary);
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
