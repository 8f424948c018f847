use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::data::loader;
use crate::display::{print_table, DisplayMode, DEFAULT_PREVIEW_ROWS};

/// File opened when no path is given.
pub const DEFAULT_PATH: &str = "./data/0198b15b-938b-7220-a91c-291b0bad0de9.parquet";

/// Load a columnar data file and print it between two divider lines.
#[derive(Debug, Parser)]
#[command(name = "parquet-preview", version, about)]
pub struct Cli {
    /// File to load (.parquet, .csv or .json)
    #[arg(env = "PARQUET_PREVIEW_PATH", default_value = DEFAULT_PATH)]
    pub path: PathBuf,

    /// Number of leading rows to show
    #[arg(short = 'n', long, env = "PARQUET_PREVIEW_ROWS", default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,

    /// Print every row instead of a preview
    #[arg(long)]
    pub full: bool,
}

impl Cli {
    pub fn mode(&self) -> DisplayMode {
        if self.full {
            DisplayMode::Full
        } else {
            DisplayMode::Head(self.rows)
        }
    }
}

/// Load the configured file and print it to `out`.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    let table = loader::load(&cli.path)
        .with_context(|| format!("failed to load {}", cli.path.display()))?;
    print_table(out, &table, cli.mode())
}
