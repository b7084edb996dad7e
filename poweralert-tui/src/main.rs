mod app;
mod cli;
mod data;
mod notify;
mod pages;
mod surface;

use std::fs::File;

use clap::Parser;
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");
    info!("starting poweralert admin console");

    if let Err(e) = app::run(cli) {
        eprintln!("Error: {e}");
    }
}
