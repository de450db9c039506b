use std::io::Cursor;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use bytes::Bytes;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{CellValue, Column, Table};

/// Everything that can go wrong while decoding an uploaded file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file type '.{0}' (expected .csv, .xlsx, .xls, .ods, .json or .parquet)")]
    UnsupportedExtension(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("spreadsheet contains no worksheets")]
    NoSheets,
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("malformed Parquet data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("{0}")]
    Malformed(String),
    #[error("no columns to parse from file")]
    NoColumns,
}

// ---------------------------------------------------------------------------
// Upload – raw user input
// ---------------------------------------------------------------------------

/// A file handed to the dashboard: its name (for format detection) and bytes.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an upload from disk (file dialog, dropped file).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self { file_name, bytes })
    }

    /// Decode the upload into a [`Table`].
    pub fn load(&self) -> Result<Table, LoadError> {
        load_bytes(&self.bytes, &self.file_name)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Decode a tabular file.  Dispatch by the extension of `file_name`.
///
/// Supported formats:
/// * `.csv`                                   – header row + records
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – first worksheet, header row first
/// * `.json`                                  – `[{ "col": value, ... }, ...]`
/// * `.parquet` / `.pq`                       – flat scalar columns
pub fn load_bytes(bytes: &[u8], file_name: &str) -> Result<Table, LoadError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(bytes)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_spreadsheet(bytes)?,
        "json" => load_json(bytes)?,
        "parquet" | "pq" => load_parquet(bytes)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    if table.n_columns() == 0 {
        return Err(LoadError::NoColumns);
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every following record is a row.
/// Short records are padded with nulls; records longer than the header are
/// rejected.
fn load_csv(bytes: &[u8]) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(LoadError::Malformed(format!(
                "expected {} fields in line {line}, saw {}",
                headers.len(),
                record.len()
            )));
        }
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(Table::from_rows(headers, rows))
}

/// Tokens read as missing values, as Pandas does by default.
const NA_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "#N/A", "<NA>",
];

/// Type a CSV field. Surrounding whitespace is ignored when looking for
/// missing values, numbers and booleans; text keeps it.
fn guess_cell_type(s: &str) -> CellValue {
    let trimmed = s.trim();
    if NA_TOKENS.contains(&trimmed) {
        return CellValue::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::float(f);
    }
    match trimmed {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::String(s.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Spreadsheet loader
// ---------------------------------------------------------------------------

/// Read the first worksheet. Its first row is the header; empty header
/// cells are named `Unnamed: <idx>`.
fn load_spreadsheet(bytes: &[u8]) -> Result<Table, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook.worksheet_range_at(0).ok_or(LoadError::NoSheets)??;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(Table::default());
    };

    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| match cell {
            Data::Empty => format!("Unnamed: {idx}"),
            Data::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    let records: Vec<Vec<CellValue>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Table::from_rows(headers, records))
}

fn convert_cell(value: &Data) -> CellValue {
    match value {
        Data::Empty | Data::Error(_) => CellValue::Null,
        Data::Bool(v) => CellValue::Bool(*v),
        Data::Int(v) => CellValue::Integer(*v),
        Data::Float(v) => CellValue::float(*v),
        Data::String(v) => CellValue::String(v.clone()),
        Data::DateTime(_) => CellValue::Date(value.to_string()),
        Data::DateTimeIso(v) | Data::DurationIso(v) => CellValue::Date(v.clone()),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Loan_ID": "LP001002", "LoanAmount": 128, "Loan_Status": "Y" },
///   ...
/// ]
/// ```
///
/// Columns are the union of keys across records; missing keys are null.
fn load_json(bytes: &[u8]) -> Result<Table, LoadError> {
    let root: JsonValue = serde_json::from_slice(bytes)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(JsonValue::as_object)
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(headers, rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat (non-nested) columns.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(bytes: &[u8]) -> Result<Table, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(Bytes::copy_from_slice(bytes))?;
    let mut columns: Vec<Column> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| Column::new(f.name().clone(), Vec::new()))
        .collect();
    let reader = builder.build()?;

    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                column.values.push(extract_cell(array, row)?);
            }
        }
    }

    Table::new(columns).map_err(|e| LoadError::Malformed(e.to_string()))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> Result<CellValue, LoadError> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => CellValue::Integer(col.as_primitive::<Int8Type>().value(row).into()),
        DataType::Int16 => CellValue::Integer(col.as_primitive::<Int16Type>().value(row).into()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row).into()),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::UInt8 => CellValue::Integer(col.as_primitive::<UInt8Type>().value(row).into()),
        DataType::UInt16 => CellValue::Integer(col.as_primitive::<UInt16Type>().value(row).into()),
        DataType::UInt32 => CellValue::Integer(col.as_primitive::<UInt32Type>().value(row).into()),
        DataType::UInt64 => {
            let v = col.as_primitive::<UInt64Type>().value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }
        DataType::Float32 => CellValue::float(col.as_primitive::<Float32Type>().value(row).into()),
        DataType::Float64 => CellValue::float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Date32 | DataType::Date64 | DataType::Timestamp(_, _) => {
            CellValue::Date(array_value_to_string(col.as_ref(), row)?)
        }
        _ => CellValue::String(array_value_to_string(col.as_ref(), row)?),
    };
    Ok(value)
}
