use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use parquet_preview::data::sample::write_access_logs;

/// Write a deterministic API access-log Parquet file to preview.
#[derive(Debug, Parser)]
#[command(name = "generate-sample", version, about)]
struct Args {
    /// Output file
    #[arg(default_value = "./data/sample_access_logs.parquet")]
    output: PathBuf,

    /// Number of log records
    #[arg(short = 'n', long, default_value_t = 20)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }
    write_access_logs(&args.output, args.rows, args.seed)?;

    println!("Wrote {} access log records to {}", args.rows, args.output.display());
    Ok(())
}
