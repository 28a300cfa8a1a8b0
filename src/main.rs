//! Cashbacc CLI

use std::{io, process::ExitCode};

use clap::Parser;
use tracing::error;

use crate::cli::{Cli, logging};

mod cli;

fn main() -> ExitCode {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(init_error) = logging::init(&cli.config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("failed to initialize logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    match cli.run(io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!("{run_error}");

            ExitCode::FAILURE
        }
    }
}
