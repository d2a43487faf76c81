//! CLI entry point for the photomosaic generator

use clap::Parser;
use photomosaic::io::cli::{Cli, MosaicRunner};
use photomosaic::io::logging::{default_directive, init_logging};
use std::process::ExitCode;

// Allow print for reporting the mosaic path and fatal errors to the user
#[allow(clippy::print_stdout, clippy::print_stderr)]
fn main() -> ExitCode {
    let runner = MosaicRunner::new(Cli::parse());
    let cli = runner.cli();

    let result = init_logging(
        default_directive(cli.quiet, cli.verbose),
        cli.log_file.as_deref(),
        runner.progress(),
    )
    .and_then(|()| runner.run());

    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
