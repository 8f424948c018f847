use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Int32Array, Int64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef, TimeUnit};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use super::model::Table;

/// 2025-08-14T00:00:00Z
const BASE_TIMESTAMP_MS: i64 = 1_755_129_600_000;

const METHODS: &[&str] = &["GET", "GET", "GET", "POST", "PUT", "DELETE"];
const PATHS: &[&str] = &["/v1/users", "/v1/invoices", "/v1/usage", "/v1/accounts/me"];
const STATUS_CODES: &[i32] = &[200, 200, 200, 200, 201, 204, 400, 401, 404, 500];
const USER_AGENTS: &[&str] = &["curl/8.7.1", "Mozilla/5.0", "usage-client/0.1"];

/// SplitMix64. Only used to make fixtures repeatable.
struct FixtureRng(u64);

impl FixtureRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    /// Mostly fast requests with an occasional slow one.
    fn latency_ms(&mut self) -> i64 {
        let base = 20 + self.below(180) as i64;
        if self.below(20) == 0 {
            base + 800
        } else {
            base
        }
    }
}

/// Column layout of the API access logs the billing workers flush to storage.
pub fn access_log_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("account_id", DataType::Int64, false),
        Field::new("client_ip", DataType::Utf8, false),
        Field::new("method", DataType::Utf8, false),
        Field::new("path", DataType::Utf8, false),
        Field::new("status_code", DataType::Int32, false),
        Field::new("latency_ms", DataType::Int64, false),
        Field::new("user_agent", DataType::Utf8, false),
        Field::new(
            "timestamp",
            DataType::Timestamp(TimeUnit::Millisecond, None),
            false,
        ),
    ]))
}

/// Generate `rows` access-log records. The same seed always yields the same
/// table.
pub fn access_logs(rows: usize, seed: u64) -> Result<Table> {
    let mut rng = FixtureRng(seed);

    let mut account_id = Vec::with_capacity(rows);
    let mut client_ip = Vec::with_capacity(rows);
    let mut method = Vec::with_capacity(rows);
    let mut path = Vec::with_capacity(rows);
    let mut status_code = Vec::with_capacity(rows);
    let mut latency_ms = Vec::with_capacity(rows);
    let mut user_agent = Vec::with_capacity(rows);
    let mut timestamp = Vec::with_capacity(rows);

    for i in 0..rows {
        account_id.push(1 + rng.below(5) as i64);
        client_ip.push(format!("10.0.{}.{}", rng.below(4), 1 + rng.below(254)));
        method.push(*rng.pick(METHODS));
        path.push(*rng.pick(PATHS));
        status_code.push(*rng.pick(STATUS_CODES));
        latency_ms.push(rng.latency_ms());
        user_agent.push(*rng.pick(USER_AGENTS));
        timestamp.push(BASE_TIMESTAMP_MS + i as i64 * 1_500 + rng.below(1_000) as i64);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(account_id)),
        Arc::new(StringArray::from(client_ip)),
        Arc::new(StringArray::from(method)),
        Arc::new(StringArray::from(path)),
        Arc::new(Int32Array::from(status_code)),
        Arc::new(Int64Array::from(latency_ms)),
        Arc::new(StringArray::from(user_agent)),
        Arc::new(TimestampMillisecondArray::from(timestamp)),
    ];

    let schema = access_log_schema();
    let batch = RecordBatch::try_new(schema.clone(), columns)
        .context("building access log record batch")?;
    Ok(Table::new(schema, vec![batch]))
}

/// Write a table to `path` as snappy-compressed Parquet.
pub fn write_parquet(path: &Path, table: &Table) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, table.schema().clone(), Some(props))
        .context("creating parquet writer")?;
    for batch in table.batches() {
        writer.write(batch).context("writing record batch")?;
    }
    writer.close().context("closing parquet writer")?;

    log::debug!(
        "wrote {} rows x {} columns to {}",
        table.num_rows(),
        table.num_columns(),
        path.display()
    );
    Ok(())
}

/// Generate and write an access-log fixture in one go.
pub fn write_access_logs(path: &Path, rows: usize, seed: u64) -> Result<()> {
    let table = access_logs(rows, seed)?;
    write_parquet(path, &table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::AsArray;
    use arrow::datatypes::Int64Type;

    #[test]
    fn same_seed_same_rows() {
        let a = access_logs(8, 7).unwrap();
        let b = access_logs(8, 7).unwrap();
        assert_eq!(a.batches(), b.batches());
    }

    #[test]
    fn schema_matches_access_log_layout() {
        let table = access_logs(3, 1).unwrap();
        assert_eq!(
            table.column_names(),
            vec![
                "account_id",
                "client_ip",
                "method",
                "path",
                "status_code",
                "latency_ms",
                "user_agent",
                "timestamp",
            ]
        );
        assert_eq!(table.num_rows(), 3);
    }

    #[test]
    fn latencies_stay_in_range() {
        let table = access_logs(200, 42).unwrap();
        let latency = table.batches()[0]
            .column_by_name("latency_ms")
            .unwrap()
            .as_primitive::<Int64Type>();
        assert!(latency.values().iter().all(|&ms| (20..1_000).contains(&ms)));
    }

    #[test]
    fn zero_rows_still_writes_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.parquet");
        write_access_logs(&path, 0, 42).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
