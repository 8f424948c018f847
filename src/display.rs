use std::io::Write;

use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::Table;

/// Printed above and below every table.
pub const DIVIDER: &str = "------------------------------------";

/// Rows shown when no preview size is given.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Only the leading rows.
    Head(usize),
    Full,
}

/// Render the table as a bordered grid: one header line, then one line per
/// data row.
pub fn render(table: &Table, mode: DisplayMode) -> Result<String, ArrowError> {
    let shown = match mode {
        DisplayMode::Head(n) => table.head(n),
        DisplayMode::Full => table.clone(),
    };

    // With no batches the pretty printer drops the header as well.
    let batches = if shown.batches().is_empty() {
        vec![RecordBatch::new_empty(shown.schema().clone())]
    } else {
        shown.batches().to_vec()
    };

    Ok(pretty_format_batches(&batches)?.to_string())
}

/// Write the rendered table between two divider lines.
pub fn print_table<W: Write>(out: &mut W, table: &Table, mode: DisplayMode) -> anyhow::Result<()> {
    let rendered = render(table, mode)?;
    writeln!(out, "{DIVIDER}")?;
    writeln!(out, "{rendered}")?;
    writeln!(out, "\n{DIVIDER}")?;
    out.flush()?;
    Ok(())
}
