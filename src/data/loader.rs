use std::fs::File;
use std::path::Path;

use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{infer_column, CellValue, Table};
use crate::error::{LoadError, LoadResult};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// On-disk layouts the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Parquet,
    Csv,
    Json,
}

impl Format {
    /// Pick a format from the file extension. Anything that is not clearly
    /// CSV or JSON is handed to the Parquet decoder, which checks the magic
    /// bytes itself.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Format::Csv,
            "json" => Format::Json,
            _ => Format::Parquet,
        }
    }
}

/// Load a table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.parquet`, `.pq` or anything else – Parquet, decoded through Arrow
/// * `.csv`  – header row plus records, column types inferred
/// * `.json` – `[{ "col": value, ... }, ...]`, column types inferred
pub fn load(path: &Path) -> LoadResult<Table> {
    let format = Format::from_path(path);
    log::debug!("loading {} as {format:?}", path.display());

    let table = match format {
        Format::Parquet => load_parquet(path)?,
        Format::Csv => load_csv(path)?,
        Format::Json => load_json(path)?,
    };

    log::info!(
        "loaded {} rows x {} columns from {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Decode every row group of a Parquet file. The Arrow schema comes from the
/// footer, so a file without rows still yields its columns.
fn load_parquet(path: &Path) -> LoadResult<Table> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;

    let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;
    log::debug!("decoded {} record batches", batches.len());

    Ok(Table::new(schema, batches))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one record per line. Every
/// record must have as many fields as the header.
fn load_csv(path: &Path) -> LoadResult<Table> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];
    for result in reader.records() {
        let record = result?;
        for (column, field) in cells.iter_mut().zip(record.iter()) {
            column.push(CellValue::guess(field));
        }
    }

    let columns = headers
        .into_iter()
        .zip(cells.iter())
        .map(|(name, values)| (name, infer_column(values)))
        .collect();
    Ok(Table::from_columns(columns)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "status_code": 200, "path": "/v1/users", "latency_ms": 87 },
///   ...
/// ]
/// ```
///
/// Columns appear in the order their key is first seen. A record without a
/// key gets a null in that column.
fn load_json(path: &Path) -> LoadResult<Table> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut columns: Vec<(String, Vec<CellValue>)> = Vec::new();

    for (row, record) in records.iter().enumerate() {
        let obj = record
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("record {row} is not a JSON object")))?;

        for (key, value) in obj {
            let idx = match columns.iter().position(|(name, _)| name == key) {
                Some(idx) => idx,
                None => {
                    columns.push((key.clone(), vec![CellValue::Null; row]));
                    columns.len() - 1
                }
            };
            columns[idx].1.push(CellValue::from(value));
        }

        for (_, values) in &mut columns {
            if values.len() <= row {
                values.push(CellValue::Null);
            }
        }
    }

    let columns = columns
        .into_iter()
        .map(|(name, values)| (name, infer_column(&values)))
        .collect();
    Ok(Table::from_columns(columns)?)
}

impl From<&JsonValue> for CellValue {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::Null => CellValue::Null,
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Number(n) => n
                .as_i64()
                .map(CellValue::Integer)
                .or_else(|| n.as_f64().map(CellValue::Float))
                .unwrap_or_else(|| CellValue::String(n.to_string())),
            JsonValue::String(s) => CellValue::String(s.clone()),
            // arrays and objects keep their JSON text
            nested => CellValue::String(nested.to_string()),
        }
    }
}
