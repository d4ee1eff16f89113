mod cli;
mod commands;
mod output;
mod wait;

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use crate::cli::Cli;
use crate::output::Printer;

/// -v / -vv を log level に。RUST_LOG があればそちらが優先
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut printer = Printer::new(cli.format, std::io::stdout());
    match commands::run(cli, &mut printer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
