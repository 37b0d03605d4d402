use clap::Parser;
use std::process;
use taskboard_cli::cli::Cli;
use taskboard_cli::commands;
use taskboard_cli::exit_codes::{exit_code_for, EXIT_SUCCESS};
use taskboard_common::configure_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = match commands::run(cli.command).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    };
    process::exit(exit_code);
}
