pub mod cache;
pub mod catalog;
pub mod cli;
pub mod distribution;
pub mod error;
pub mod hierarchy;
pub mod io_utils;
pub mod mapping;
pub mod normalize;
pub mod overrides;
pub mod raw;
pub mod report;
pub mod rules;
pub mod stats;
pub mod survey;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("encuesta_salarial", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    debug!("Command: {:?}", cli.command);
    match cli.command {
        Commands::Normalize(args) => normalize::execute(&args),
        Commands::Mapping(args) => mapping::execute(&args),
        Commands::Stats(args) => stats::execute(&args),
        Commands::Top(args) => stats::execute_top(&args),
        Commands::Summary(args) => stats::execute_summary(&args),
        Commands::Hierarchy(args) => hierarchy::execute(&args),
        Commands::Outlook(args) => distribution::execute_outlook(&args),
        Commands::Benefits(args) => distribution::execute_benefits(&args),
        Commands::Bonus(args) => distribution::execute_bonus(&args),
        Commands::Report(args) => report::execute(&args),
    }
}
