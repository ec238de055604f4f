pub mod cli;
pub mod correlation;
pub mod export;
pub mod histogram;
pub mod infer;
pub mod io_utils;
pub mod preview;
pub mod profile;
pub mod record;
pub mod report;
pub mod stats;
pub mod table;
pub mod value;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_profiler", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Profile(args) => profile::execute(&args),
        Commands::Correlations(args) => correlation::execute(&args),
        Commands::Histogram(args) => histogram::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
        Commands::Report(args) => report::execute(&args),
        Commands::Export(args) => export::execute(&args),
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
