use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Schema, SchemaRef};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

// ---------------------------------------------------------------------------
// CellValue – a single untyped cell from a text source
// ---------------------------------------------------------------------------

/// A dynamically-typed value read from CSV or JSON before its column type is
/// known. Parquet never goes through this; its schema is already typed.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl CellValue {
    /// Guess the narrowest value a text field can hold.
    pub fn guess(s: &str) -> Self {
        match s {
            "" => CellValue::Null,
            "true" => CellValue::Bool(true),
            "false" => CellValue::Bool(false),
            _ => s
                .parse()
                .map(CellValue::Integer)
                .or_else(|_| s.parse().map(CellValue::Float))
                .unwrap_or_else(|_| CellValue::String(s.to_string())),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

/// Column type reached so far while scanning cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Null,
    Bool,
    Integer,
    Float,
    Utf8,
}

impl ColumnKind {
    fn widen(self, value: &CellValue) -> Self {
        use ColumnKind::*;
        match (self, value) {
            (kind, CellValue::Null) => kind,
            (Null | Bool, CellValue::Bool(_)) => Bool,
            (Null | Integer, CellValue::Integer(_)) => Integer,
            (Null | Integer | Float, CellValue::Float(_)) | (Float, CellValue::Integer(_)) => {
                Float
            }
            _ => Utf8,
        }
    }
}

/// Build an Arrow column from loosely typed cells using the widest common
/// type. Mixed columns fall back to text; an all-null column is a null Utf8.
pub fn infer_column(values: &[CellValue]) -> ArrayRef {
    let kind = values
        .iter()
        .fold(ColumnKind::Null, |kind, v| kind.widen(v));

    match kind {
        ColumnKind::Integer => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Integer(i) => Some(*i),
                    _ => None,
                })
                .collect::<Int64Array>(),
        ),
        ColumnKind::Float => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Integer(i) => Some(*i as f64),
                    CellValue::Float(f) => Some(*f),
                    _ => None,
                })
                .collect::<Float64Array>(),
        ),
        ColumnKind::Bool => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect::<BooleanArray>(),
        ),
        ColumnKind::Utf8 | ColumnKind::Null => Arc::new(
            values
                .iter()
                .map(|v| match v {
                    CellValue::Null => None,
                    other => Some(other.to_string()),
                })
                .collect::<StringArray>(),
        ),
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Named, typed columns of equal length.
///
/// Stored the way the decoder hands it over: one schema and the record batches
/// that share it. A table with no batches still knows its columns.
#[derive(Debug, Clone)]
pub struct Table {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl Table {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Table { schema, batches }
    }

    /// Assemble a single-batch table from already built columns.
    pub fn from_columns(columns: Vec<(String, ArrayRef)>) -> Result<Self, ArrowError> {
        if columns.is_empty() {
            return Ok(Table::new(Arc::new(Schema::empty()), Vec::new()));
        }
        let batch = RecordBatch::try_from_iter(columns)?;
        Ok(Table::new(batch.schema(), vec![batch]))
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    /// Total rows across all batches.
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }

    pub fn num_columns(&self) -> usize {
        self.schema.fields().len()
    }

    /// Column names in schema order.
    pub fn column_names(&self) -> Vec<&str> {
        self.schema
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// The first `n` rows, sliced across batch boundaries. Slicing is
    /// zero-copy; the schema is kept even when nothing is taken.
    pub fn head(&self, n: usize) -> Table {
        let mut remaining = n;
        let mut batches = Vec::new();
        for batch in &self.batches {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(batch.num_rows());
            batches.push(batch.slice(0, take));
            remaining -= take;
        }
        Table::new(self.schema.clone(), batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, AsArray};
    use arrow::datatypes::{DataType, Float64Type, Int64Type};

    fn ints(name: &str, values: Vec<i64>) -> (String, ArrayRef) {
        (name.to_string(), Arc::new(Int64Array::from(values)) as ArrayRef)
    }

    fn two_batch_table() -> Table {
        let first = Table::from_columns(vec![ints("id", vec![1, 2, 3])]).unwrap();
        let second = Table::from_columns(vec![ints("id", vec![4, 5, 6, 7])]).unwrap();
        let mut batches = first.batches().to_vec();
        batches.extend_from_slice(second.batches());
        Table::new(first.schema().clone(), batches)
    }

    #[test]
    fn guess_picks_narrowest_type() {
        assert_eq!(CellValue::guess(""), CellValue::Null);
        assert_eq!(CellValue::guess("42"), CellValue::Integer(42));
        assert_eq!(CellValue::guess("-1.5"), CellValue::Float(-1.5));
        assert_eq!(CellValue::guess("true"), CellValue::Bool(true));
        assert_eq!(CellValue::guess("GET"), CellValue::String("GET".into()));
    }

    #[test]
    fn integers_widen_to_float() {
        let col = infer_column(&[
            CellValue::Integer(1),
            CellValue::Null,
            CellValue::Float(2.5),
        ]);
        assert_eq!(col.data_type(), &DataType::Float64);
        let floats = col.as_primitive::<Float64Type>();
        assert_eq!(floats.value(0), 1.0);
        assert!(floats.is_null(1));
        assert_eq!(floats.value(2), 2.5);
    }

    #[test]
    fn integer_column_keeps_nulls() {
        let col = infer_column(&[CellValue::Null, CellValue::Integer(7)]);
        assert_eq!(col.data_type(), &DataType::Int64);
        assert_eq!(col.null_count(), 1);
        assert_eq!(col.as_primitive::<Int64Type>().value(1), 7);
    }

    #[test]
    fn mixed_column_falls_back_to_text() {
        let col = infer_column(&[CellValue::Integer(200), CellValue::String("n/a".into())]);
        assert_eq!(col.data_type(), &DataType::Utf8);
        let text = col.as_string::<i32>();
        assert_eq!(text.value(0), "200");
        assert_eq!(text.value(1), "n/a");
    }

    #[test]
    fn all_null_column_is_null_text() {
        let col = infer_column(&[CellValue::Null, CellValue::Null]);
        assert_eq!(col.data_type(), &DataType::Utf8);
        assert_eq!(col.null_count(), 2);
    }

    #[test]
    fn head_slices_across_batches() {
        let table = two_batch_table();
        assert_eq!(table.num_rows(), 7);

        let head = table.head(5);
        assert_eq!(head.num_rows(), 5);
        assert_eq!(head.batches().len(), 2);
        assert_eq!(head.batches()[1].num_rows(), 2);
    }

    #[test]
    fn head_larger_than_table_returns_everything() {
        let table = two_batch_table();
        assert_eq!(table.head(100).num_rows(), 7);
    }

    #[test]
    fn head_zero_keeps_schema() {
        let head = two_batch_table().head(0);
        assert!(head.is_empty());
        assert_eq!(head.column_names(), vec!["id"]);
    }

    #[test]
    fn empty_column_list_is_empty_table() {
        let table = Table::from_columns(Vec::new()).unwrap();
        assert_eq!(table.num_columns(), 0);
        assert_eq!(table.num_rows(), 0);
    }
}
