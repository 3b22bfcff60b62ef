mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod logbook;
mod output;
mod reader;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::init_tracing;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = Config::load();

    if let Err(e) = app::run(cli, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
