use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use parquet_preview::{run, Cli};

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("{cli:?}");

    let result = run(&cli, &mut io::stdout().lock());
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // stdout may be the thing that failed
            let _ = writeln!(io::stdout(), "error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
