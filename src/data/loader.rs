use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int32Type, Int64Type, UInt32Type, UInt64Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{MeasurementRow, ResultsTable};

pub const COL_TYPE: &str = "Type";
pub const COL_ALGORITHM: &str = "Algorithm";
pub const COL_SIZE: &str = "Size";
pub const COL_TIME: &str = "Time(ms)";
pub const COL_THRESHOLD: &str = "Threshold";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("cannot open {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required column is missing, a cell does not parse, or the file
    /// is not a readable table in the format its extension claims.
    #[error("malformed results table {}: {message}", path.display())]
    DataFormat { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a benchmark results table.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming the columns (default when there is no extension)
/// * `.json`    – `[{ "Type": ..., "Algorithm": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Columns are found by name, so their order in the file does not matter.
pub fn load(path: &Path) -> Result<ResultsTable, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "csv" => parse_csv(file),
        "json" => parse_json(file),
        "parquet" | "pq" => parse_parquet(file),
        other => Err(anyhow::anyhow!("unsupported file extension: .{other}")),
    };

    parsed.map_err(|e| LoadError::DataFormat {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })
}

// ---------------------------------------------------------------------------
// Cell parsing shared by all formats
// ---------------------------------------------------------------------------

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    array_type: usize,
    algorithm: usize,
    size: usize,
    time: usize,
    threshold: usize,
}

impl Columns {
    fn locate<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.as_ref().trim() == name)
                .with_context(|| format!("missing '{name}' column"))
        };
        Ok(Columns {
            array_type: find(COL_TYPE)?,
            algorithm: find(COL_ALGORITHM)?,
            size: find(COL_SIZE)?,
            time: find(COL_TIME)?,
            threshold: find(COL_THRESHOLD)?,
        })
    }
}

/// Build one row from its five textual cells.
fn parse_row(
    array_type: &str,
    algorithm: &str,
    size: &str,
    time: &str,
    threshold: &str,
) -> Result<MeasurementRow> {
    Ok(MeasurementRow {
        array_type: parse_label(array_type, COL_TYPE)?,
        algorithm: parse_label(algorithm, COL_ALGORITHM)?,
        size: parse_size(size)?,
        time_ms: parse_time(time)?,
        threshold: parse_integer(threshold, COL_THRESHOLD)?,
    })
}

fn parse_label(s: &str, col: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        bail!("'{col}' is empty");
    }
    Ok(s.to_string())
}

/// Integers may arrive written as integral floats (`500.0`).
fn parse_integer(s: &str, col: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => bail!("'{col}' value '{s}' is not an integer"),
    }
}

fn parse_size(s: &str) -> Result<u64> {
    let n = parse_integer(s, COL_SIZE)?;
    if n <= 0 {
        bail!("'{COL_SIZE}' must be positive, got {n}");
    }
    Ok(n as u64)
}

fn parse_time(s: &str) -> Result<f64> {
    let s = s.trim();
    let t = s
        .parse::<f64>()
        .with_context(|| format!("'{COL_TIME}' value '{s}' is not a number"))?;
    if !t.is_finite() || t < 0.0 {
        bail!("'{COL_TIME}' must be a finite non-negative number, got {s}");
    }
    Ok(t)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with at least `Type, Algorithm, Size, Time(ms), Threshold`
/// in any order, one measurement per line.
fn parse_csv<R: Read>(input: R) -> Result<ResultsTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let cols = Columns::locate(&headers)?;

    let mut rows = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = row_no + 2;
        let record = result.with_context(|| format!("CSV line {line}"))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let row = parse_row(
            cell(cols.array_type),
            cell(cols.algorithm),
            cell(cols.size),
            cell(cols.time),
            cell(cols.threshold),
        )
        .with_context(|| format!("CSV line {line}"))?;
        rows.push(row);
    }

    Ok(ResultsTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Type": "Random", "Size": 500, "Algorithm": "MergeSort", "Threshold": 0, "Time(ms)": 0.5 },
///   ...
/// ]
/// ```
fn parse_json<R: Read>(input: R) -> Result<ResultsTable> {
    let root: JsonValue = serde_json::from_reader(input).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("expected top-level JSON array")?;

    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("row {i} is not a JSON object"))?;

        let field = |name: &str| -> Result<String> {
            match obj.get(name) {
                Some(JsonValue::String(s)) => Ok(s.clone()),
                Some(JsonValue::Number(n)) => Ok(n.to_string()),
                Some(other) => bail!("row {i}: '{name}' has unexpected value {other}"),
                None => bail!("row {i}: missing '{name}' column"),
            }
        };

        let row = parse_row(
            &field(COL_TYPE)?,
            &field(COL_ALGORITHM)?,
            &field(COL_SIZE)?,
            &field(COL_TIME)?,
            &field(COL_THRESHOLD)?,
        )
        .with_context(|| format!("JSON row {i}"))?;
        rows.push(row);
    }

    Ok(ResultsTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Expected schema: flat columns named as in the CSV header.
/// - `Type`, `Algorithm`: Utf8 or LargeUtf8
/// - `Size`, `Threshold`: any integer type
/// - `Time(ms)`: Float64, Float32 or integer
///
/// Works with files written by **Pandas** (`df.to_parquet()`) and **Polars**.
fn parse_parquet(file: File) -> Result<ResultsTable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    // Checked against the file schema so a file without row groups is
    // still rejected when columns are missing.
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let cols = Columns::locate(&names)?;
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    let mut row_no = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row in 0..batch.num_rows() {
            let cell = |idx: usize| -> Result<String> {
                cell_text(batch.column(idx), row)
                    .with_context(|| format!("column '{}'", names[idx]))
            };

            let parsed = parse_row(
                &cell(cols.array_type)?,
                &cell(cols.algorithm)?,
                &cell(cols.size)?,
                &cell(cols.time)?,
                &cell(cols.threshold)?,
            )
            .with_context(|| format!("parquet row {row_no}"))?;
            rows.push(parsed);
            row_no += 1;
        }
    }

    Ok(ResultsTable::from_rows(rows))
}

/// Render a single Arrow cell as text so every format shares one parser.
fn cell_text(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value");
    }
    let text = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row).to_string(),
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row).to_string(),
        DataType::UInt32 => col.as_primitive::<UInt32Type>().value(row).to_string(),
        DataType::UInt64 => col.as_primitive::<UInt64Type>().value(row).to_string(),
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row).to_string(),
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row).to_string(),
        other => bail!("unsupported column type {other:?}"),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::tempdir;

    use super::*;
    use crate::data::model::{MERGE_HYBRID, MERGE_SORT};

    const HARNESS_CSV: &str = "\
Type,Size,Algorithm,Threshold,Time(ms)
Random,500,MergeSort,0,0.5
Random,500,MergeHybrid,5,0.25
Reverse,1000,MergeSort,0,1
AlmostSorted,1000,MergeHybrid,50,0.75
";

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_csv_loads_every_row_in_harness_column_order() {
        let table = parse_csv(HARNESS_CSV.as_bytes()).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(
            table.rows()[1],
            MeasurementRow {
                array_type: "Random".to_string(),
                algorithm: MERGE_HYBRID.to_string(),
                size: 500,
                time_ms: 0.25,
                threshold: 5,
            }
        );
        assert_eq!(table.rows()[2].time_ms, 1.0);
        assert_eq!(table.array_types(), ["Random", "Reverse", "AlmostSorted"]);
        assert_eq!(table.algorithms(), [MERGE_SORT, MERGE_HYBRID]);
    }

    #[test]
    fn test_csv_spec_column_order_and_padding() {
        let csv = "Type, Algorithm, Size, Time(ms), Threshold, Note\n\
                   Random, MergeSort, 100, 2.1, 0, first\n\
                   Random, MergeSort, 200.0, 4.5, 0, second\n";
        let table = parse_csv(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].array_type, "Random");
        assert_eq!(table.rows()[1].size, 200);
        assert_eq!(table.rows()[1].time_ms, 4.5);
    }

    #[test]
    fn test_csv_header_only_is_empty_table() {
        let table = parse_csv("Type,Algorithm,Size,Time(ms),Threshold\n".as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_csv_missing_column_is_rejected() {
        let err = parse_csv("Type,Algorithm,Size,Threshold\nRandom,MergeSort,1,0\n".as_bytes())
            .unwrap_err();
        assert!(format!("{err:#}").contains("missing 'Time(ms)' column"));
    }

    #[test]
    fn test_csv_bad_cells_are_rejected() {
        let header = "Type,Algorithm,Size,Time(ms),Threshold\n";
        for body in [
            "Random,MergeSort,abc,1.0,0\n",
            "Random,MergeSort,0,1.0,0\n",
            "Random,MergeSort,-5,1.0,0\n",
            "Random,MergeSort,100,fast,0\n",
            "Random,MergeSort,100,-1.0,0\n",
            "Random,MergeSort,100,1.0,2.5\n",
            ",MergeSort,100,1.0,0\n",
        ] {
            let input = format!("{header}{body}");
            assert!(parse_csv(input.as_bytes()).is_err(), "accepted {body:?}");
        }
    }

    #[test]
    fn test_load_missing_file_is_file_not_found() {
        let dir = tempdir().unwrap();
        let err = load(&dir.path().join("results.csv")).unwrap_err();
        assert!(matches!(err, LoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_malformed_file_is_data_format() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "results.csv", "Type,Size\nRandom,100\n");
        let err = load(&path).unwrap_err();
        match err {
            LoadError::DataFormat { message, .. } => assert!(message.contains("Algorithm")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_unknown_extension_is_data_format() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "results.xlsx", HARNESS_CSV);
        assert!(matches!(load(&path), Err(LoadError::DataFormat { .. })));
    }

    #[test]
    fn test_load_csv_without_extension() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "results", HARNESS_CSV);
        assert_eq!(load(&path).unwrap().len(), 4);
    }

    #[test]
    fn test_json_matches_csv() {
        let dir = tempdir().unwrap();
        let json = r#"[
            {"Type": "Random", "Size": 500, "Algorithm": "MergeSort", "Threshold": 0, "Time(ms)": 0.5},
            {"Type": "Random", "Size": 500, "Algorithm": "MergeHybrid", "Threshold": 5, "Time(ms)": 0.25},
            {"Type": "Reverse", "Size": 1000.0, "Algorithm": "MergeSort", "Threshold": 0, "Time(ms)": 1},
            {"Type": "AlmostSorted", "Size": "1000", "Algorithm": "MergeHybrid", "Threshold": 50, "Time(ms)": 0.75}
        ]"#;
        let path = write_file(dir.path(), "results.json", json);

        let from_json = load(&path).unwrap();
        let from_csv = parse_csv(HARNESS_CSV.as_bytes()).unwrap();
        assert_eq!(from_json.rows(), from_csv.rows());
    }

    #[test]
    fn test_json_missing_key_is_rejected() {
        let json = r#"[{"Type": "Random", "Size": 500, "Algorithm": "MergeSort", "Time(ms)": 0.5}]"#;
        let err = parse_json(json.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Threshold"));
    }

    #[test]
    fn test_parquet_matches_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_TYPE, DataType::Utf8, false),
            Field::new(COL_SIZE, DataType::Int64, false),
            Field::new(COL_ALGORITHM, DataType::Utf8, false),
            Field::new(COL_THRESHOLD, DataType::Int32, false),
            Field::new(COL_TIME, DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Random", "Random", "Reverse", "AlmostSorted"])),
                Arc::new(Int64Array::from(vec![500, 500, 1000, 1000])),
                Arc::new(StringArray::from(vec![
                    MERGE_SORT,
                    MERGE_HYBRID,
                    MERGE_SORT,
                    MERGE_HYBRID,
                ])),
                Arc::new(Int32Array::from(vec![0, 5, 0, 50])),
                Arc::new(Float64Array::from(vec![0.5, 0.25, 1.0, 0.75])),
            ],
        )
        .unwrap();

        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let from_parquet = load(&path).unwrap();
        let from_csv = parse_csv(HARNESS_CSV.as_bytes()).unwrap();
        assert_eq!(from_parquet.rows(), from_csv.rows());
    }

    fn write_empty_parquet(path: &Path, fields: Vec<Field>) {
        let schema = Arc::new(Schema::new(fields));
        let file = File::create(path).unwrap();
        let writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_parquet_without_rows_still_checks_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.parquet");
        write_empty_parquet(
            &path,
            vec![
                Field::new(COL_TYPE, DataType::Utf8, false),
                Field::new(COL_ALGORITHM, DataType::Utf8, false),
                Field::new(COL_SIZE, DataType::Int64, false),
            ],
        );

        match load(&path).unwrap_err() {
            LoadError::DataFormat { message, .. } => {
                assert!(message.contains("missing 'Time(ms)' column"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parquet_without_rows_is_empty_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("results.parquet");
        write_empty_parquet(
            &path,
            vec![
                Field::new(COL_TYPE, DataType::Utf8, false),
                Field::new(COL_ALGORITHM, DataType::Utf8, false),
                Field::new(COL_SIZE, DataType::Int64, false),
                Field::new(COL_TIME, DataType::Float64, false),
                Field::new(COL_THRESHOLD, DataType::Int64, false),
            ],
        );

        assert!(load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_csv_errors_report_file_line() {
        let csv = "Type,Algorithm,Size,Time(ms),Threshold\n\
                   Random,MergeSort,100,2.1,0\n\
                   Random,MergeSort,oops,4.5,0\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").starts_with("CSV line 3:"), "{err:#}");
    }
}
