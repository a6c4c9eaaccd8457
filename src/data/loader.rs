use std::io;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{ClassTable, EmbeddingDataset, LabeledPoint};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a labeled point table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `x`, `y`, `label` columns (canonical)
/// * `.json`    – `[{ "x": 1.0, "y": 2.0, "label": 3 }, ...]`
/// * `.parquet` – scalar float `x`/`y` columns and an integer `label` column
///
/// A single malformed row fails the whole load; nothing of a corrupted file
/// is kept.
pub fn load_file(path: &Path, classes: &ClassTable) -> Result<EmbeddingDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path, classes),
        "json" => load_json(path, classes),
        "parquet" | "pq" => load_parquet(path, classes),
        other => Err(Error::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Row validation (shared by all formats)
// ---------------------------------------------------------------------------

/// Turn one raw row into a point: coordinates must be finite and the label
/// must index the class table.
fn validate_point(
    x: f64,
    y: f64,
    label: i64,
    row: usize,
    classes: &ClassTable,
) -> Result<LabeledPoint> {
    if !x.is_finite() {
        return Err(Error::InvalidNumber {
            row,
            column: "x",
            value: x.to_string(),
        });
    }
    if !y.is_finite() {
        return Err(Error::InvalidNumber {
            row,
            column: "y",
            value: y.to_string(),
        });
    }
    if label < 0 || label as usize >= classes.len() {
        return Err(Error::LabelOutOfRange {
            row,
            label,
            n_classes: classes.len(),
        });
    }
    Ok(LabeledPoint {
        x,
        y,
        label: label as usize,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the columns; `x` and `y` hold real numbers,
/// `label` a 0-based class index.  Extra columns are ignored.
fn load_csv(path: &Path, classes: &ClassTable) -> Result<EmbeddingDataset> {
    let file = std::fs::File::open(path)?;
    read_csv(file, classes)
}

/// Parse the CSV encoding from any reader.
pub fn read_csv<R: io::Read>(reader: R, classes: &ClassTable) -> Result<EmbeddingDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let x_idx = headers
        .iter()
        .position(|h| h == "x")
        .ok_or(Error::MissingColumn("x"))?;
    let y_idx = headers
        .iter()
        .position(|h| h == "y")
        .ok_or(Error::MissingColumn("y"))?;
    let label_idx = headers
        .iter()
        .position(|h| h == "label")
        .ok_or(Error::MissingColumn("label"))?;

    let mut points = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let x = parse_coordinate(record.get(x_idx).unwrap_or(""), row, "x")?;
        let y = parse_coordinate(record.get(y_idx).unwrap_or(""), row, "y")?;
        let label = parse_label(record.get(label_idx).unwrap_or(""), row)?;

        points.push(validate_point(x, y, label, row, classes)?);
    }

    Ok(EmbeddingDataset::from_points(points))
}

/// Parse a coordinate field, rejecting anything that is not a finite number.
/// `"NaN"` and `"inf"` parse as floats but are rejected here so bad rows
/// cannot reach the plot as NaN-valued points.
fn parse_coordinate(raw: &str, row: usize, column: &'static str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            row,
            column,
            value: raw.to_string(),
        })
}

fn parse_label(raw: &str, row: usize) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| Error::InvalidNumber {
        row,
        column: "label",
        value: raw.to_string(),
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One record of the JSON encoding (`df.to_json(orient='records')` layout),
/// prior to validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    x: f64,
    y: f64,
    label: i64,
}

fn load_json(path: &Path, classes: &ClassTable) -> Result<EmbeddingDataset> {
    let file = std::fs::File::open(path)?;
    read_json(io::BufReader::new(file), classes)
}

/// Parse the JSON encoding from any reader.
pub fn read_json<R: io::Read>(reader: R, classes: &ClassTable) -> Result<EmbeddingDataset> {
    let records: Vec<RawRecord> = serde_json::from_reader(reader)?;

    let points = records
        .iter()
        .enumerate()
        .map(|(row, rec)| validate_point(rec.x, rec.y, rec.label, row, classes))
        .collect::<Result<Vec<_>>>()?;

    Ok(EmbeddingDataset::from_points(points))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with scalar columns:
/// - `x`, `y`: Float64 or Float32
/// - `label`: Int64 or Int32
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path, classes: &ClassTable) -> Result<EmbeddingDataset> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let reader = builder.build()?;

    let mut points = Vec::new();
    let mut row = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let x_idx = schema.index_of("x").map_err(|_| Error::MissingColumn("x"))?;
        let y_idx = schema.index_of("y").map_err(|_| Error::MissingColumn("y"))?;
        let label_idx = schema
            .index_of("label")
            .map_err(|_| Error::MissingColumn("label"))?;

        let xs = float_column(batch.column(x_idx), "x")?;
        let ys = float_column(batch.column(y_idx), "y")?;
        let labels = int_column(batch.column(label_idx), "label")?;

        for i in 0..batch.num_rows() {
            points.push(validate_point(xs[i], ys[i], labels[i], row, classes)?);
            row += 1;
        }
    }

    Ok(EmbeddingDataset::from_points(points))
}

// -- Parquet / Arrow helpers --

/// Read a scalar float column as `f64`, accepting Float64 or Float32.
fn float_column(col: &Arc<dyn Array>, name: &'static str) -> Result<Vec<f64>> {
    if col.null_count() > 0 {
        return Err(Error::Format(format!("column '{name}' contains nulls")));
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = downcast::<Float64Array>(col, name)?;
            Ok(arr.values().iter().copied().collect())
        }
        DataType::Float32 => {
            let arr = downcast::<Float32Array>(col, name)?;
            Ok(arr.values().iter().map(|&v| v as f64).collect())
        }
        other => Err(Error::Format(format!(
            "column '{name}' has type {other:?}, expected Float64 or Float32"
        ))),
    }
}

/// Read a scalar integer column as `i64`, accepting Int64 or Int32.
fn int_column(col: &Arc<dyn Array>, name: &'static str) -> Result<Vec<i64>> {
    if col.null_count() > 0 {
        return Err(Error::Format(format!("column '{name}' contains nulls")));
    }
    match col.data_type() {
        DataType::Int64 => {
            let arr = downcast::<Int64Array>(col, name)?;
            Ok(arr.values().iter().copied().collect())
        }
        DataType::Int32 => {
            let arr = downcast::<Int32Array>(col, name)?;
            Ok(arr.values().iter().map(|&v| v as i64).collect())
        }
        other => Err(Error::Format(format!(
            "column '{name}' has type {other:?}, expected Int64 or Int32"
        ))),
    }
}

fn downcast<'a, T: 'static>(col: &'a Arc<dyn Array>, name: &'static str) -> Result<&'a T> {
    col.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| Error::Format(format!("column '{name}' array type mismatch")))
}
