use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{
    Array, Float32Array, Float64Array, Int32Array, Int64Array, LargeStringArray, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{ElectricRange, Record, RecordStore};

// On-disk column names, matched verbatim.
pub const MAKE_COLUMN: &str = "Make";
pub const MODEL_COLUMN: &str = "Model";
pub const TYPE_COLUMN: &str = "Electric Vehicle Type";
pub const RANGE_COLUMN: &str = "Electric Range";

const COLUMNS: [&str; 4] = [MAKE_COLUMN, MODEL_COLUMN, TYPE_COLUMN, RANGE_COLUMN];

/// Dataset compiled into the binary, used when no file is configured.
const BUNDLED_DATASET: &str = include_str!("../../assets/ev_data.json");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a vehicle dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "Make": ..., "Model": ..., "Electric Vehicle Type": ..., "Electric Range": ... }, ...]`
/// * `.csv`     – header row containing the same column names
/// * `.parquet` – string or numeric columns with the same names
pub fn load_file(path: &Path) -> Result<RecordStore> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let store = match ext.as_str() {
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            records_from_json(&text)?
        }
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            records_from_csv(file)?
        }
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} records ({} makes) from {}",
        store.len(),
        store.makes.len(),
        path.display()
    );
    Ok(store)
}

/// Parse the dataset shipped inside the binary.
pub fn load_bundled() -> Result<RecordStore> {
    let store = records_from_json(BUNDLED_DATASET).context("parsing bundled dataset")?;
    log::info!(
        "Loaded {} bundled records ({} makes)",
        store.len(),
        store.makes.len()
    );
    Ok(store)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON: a top-level array of objects. Values may be
/// strings, numbers, or null; unknown keys are ignored.
pub fn records_from_json(text: &str) -> Result<RecordStore> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let rows = root.as_array().ok_or(DatasetError::NotAnArray)?;

    let mut seen = [false; COLUMNS.len()];
    let mut records = Vec::with_capacity(rows.len());

    for (row, value) in rows.iter().enumerate() {
        let obj = value.as_object().ok_or(DatasetError::NotAnObject { row })?;
        for (flag, col) in seen.iter_mut().zip(COLUMNS) {
            *flag |= obj.contains_key(col);
        }
        records.push(Record::new(
            json_text(obj, MAKE_COLUMN),
            json_text(obj, MODEL_COLUMN),
            json_text(obj, TYPE_COLUMN),
            range_cell(json_text(obj, RANGE_COLUMN)),
        ));
    }

    if !records.is_empty() {
        warn_missing(COLUMNS.iter().zip(seen).filter(|(_, s)| !s).map(|(c, _)| *c));
    }
    Ok(RecordStore::from_records(records))
}

fn json_text(obj: &Map<String, JsonValue>, key: &str) -> Option<String> {
    match obj.get(key)? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. Only the four vehicle columns
/// are read; everything else is ignored.
pub fn records_from_csv<R: Read>(input: R) -> Result<RecordStore> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);
    let idx: Vec<Option<usize>> = COLUMNS.iter().map(|&c| position(c)).collect();
    warn_missing(COLUMNS.iter().zip(&idx).filter(|(_, i)| i.is_none()).map(|(c, _)| *c));

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |col: Option<usize>| col.and_then(|i| row.get(i)).map(str::to_string);
        records.push(Record::new(
            cell(idx[0]),
            cell(idx[1]),
            cell(idx[2]),
            range_cell(cell(idx[3])),
        ));
    }

    Ok(RecordStore::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with any of the four vehicle columns stored as
/// Utf8 / LargeUtf8 / Int32 / Int64 / Float32 / Float64.
fn load_parquet(path: &Path) -> Result<RecordStore> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut warned = false;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let cols: Vec<Option<&Arc<dyn Array>>> = COLUMNS
            .iter()
            .map(|c| schema.index_of(c).ok().map(|i| batch.column(i)))
            .collect();

        if !warned {
            warn_missing(COLUMNS.iter().zip(&cols).filter(|(_, c)| c.is_none()).map(|(c, _)| *c));
            warned = true;
        }

        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(COLUMNS.len());
            for (name, col) in COLUMNS.iter().zip(&cols) {
                let value = match col {
                    Some(col) => arrow_text(col, row, name)?,
                    None => None,
                };
                cells.push(value);
            }
            let mut cells = cells.into_iter();
            let mut next = || cells.next().flatten();
            records.push(Record::new(next(), next(), next(), range_cell(next())));
        }
    }

    Ok(RecordStore::from_records(records))
}

/// Read one cell as text; numeric columns are formatted.
fn arrow_text(col: &Arc<dyn Array>, row: usize, name: &str) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => col
            .as_any()
            .downcast_ref::<StringArray>()
            .context("expected StringArray")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => col
            .as_any()
            .downcast_ref::<LargeStringArray>()
            .context("expected LargeStringArray")?
            .value(row)
            .to_string(),
        DataType::Int32 => col
            .as_any()
            .downcast_ref::<Int32Array>()
            .context("expected Int32Array")?
            .value(row)
            .to_string(),
        DataType::Int64 => col
            .as_any()
            .downcast_ref::<Int64Array>()
            .context("expected Int64Array")?
            .value(row)
            .to_string(),
        DataType::Float32 => col
            .as_any()
            .downcast_ref::<Float32Array>()
            .context("expected Float32Array")?
            .value(row)
            .to_string(),
        DataType::Float64 => col
            .as_any()
            .downcast_ref::<Float64Array>()
            .context("expected Float64Array")?
            .value(row)
            .to_string(),
        other => {
            return Err(DatasetError::UnsupportedColumnType {
                column: name.to_string(),
                data_type: format!("{other:?}"),
            }
            .into())
        }
    };
    Ok(Some(text))
}

// -- helpers --

fn range_cell(raw: Option<String>) -> ElectricRange {
    match raw {
        Some(raw) => ElectricRange::parse(&raw),
        None => ElectricRange::absent(),
    }
}

fn warn_missing<'a>(columns: impl Iterator<Item = &'a str>) {
    for col in columns {
        log::warn!("dataset has no '{col}' column; treating it as absent");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RangeReading;
    use arrow::array::{ArrayRef, BooleanArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use std::path::PathBuf;

    /// Write `columns` as a one-batch parquet file under the temp dir.
    fn write_parquet(name: &str, columns: Vec<(&str, ArrayRef)>) -> PathBuf {
        let path = std::env::temp_dir()
            .join(format!("ev-dashboard-{}-{name}.parquet", std::process::id()));
        let fields: Vec<Field> = columns
            .iter()
            .map(|(n, a)| Field::new(*n, a.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let arrays = columns.into_iter().map(|(_, a)| a).collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn json_uses_verbatim_column_names() {
        let text = r#"[
            {"Make": "TESLA", "Model": "MODEL 3", "Electric Vehicle Type": "Battery Electric Vehicle (BEV)", "Electric Range": "215"},
            {"Make": "NISSAN", "Model": "LEAF", "Electric Vehicle Type": "Battery Electric Vehicle (BEV)", "Electric Range": 84},
            {"Make": null, "Model": "X", "Electric Range": "n/a", "VIN": "123"}
        ]"#;
        let store = records_from_json(text).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.records[0].make.as_deref(), Some("TESLA"));
        assert_eq!(store.records[0].electric_range.valid(), Some(215));
        assert_eq!(store.records[1].electric_range.raw, "84");
        assert_eq!(store.records[1].electric_range.valid(), Some(84));
        assert_eq!(store.records[2].make, None);
        assert_eq!(store.records[2].vehicle_type, None);
        assert_eq!(store.records[2].electric_range.reading, RangeReading::Invalid);
        assert_eq!(store.makes, vec!["TESLA".to_string(), "NISSAN".to_string()]);
    }

    #[test]
    fn json_shape_errors() {
        let err = records_from_json(r#"{"Make": "Tesla"}"#).unwrap_err();
        assert!(matches!(err.downcast_ref::<DatasetError>(), Some(DatasetError::NotAnArray)));

        let err = records_from_json(r#"[{"Make": "Tesla"}, 3]"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::NotAnObject { row: 1 })
        ));

        assert!(records_from_json("not json").is_err());
    }

    #[test]
    fn csv_picks_named_columns() {
        let text = "VIN,Make,Model,Model Year,Electric Vehicle Type,Electric Range\n\
                    1,KIA,NIRO,2021,Battery Electric Vehicle (BEV),239\n\
                    2,,PRIUS PRIME,2020,Plug-in Hybrid Electric Vehicle (PHEV),\n";
        let store = records_from_csv(text.as_bytes()).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records[0].model.as_deref(), Some("NIRO"));
        assert_eq!(store.records[0].electric_range.valid(), Some(239));
        assert_eq!(store.records[1].make, None);
        assert_eq!(store.records[1].electric_range.valid(), None);
        assert_eq!(store.makes, vec!["KIA".to_string()]);
    }

    #[test]
    fn csv_without_range_column() {
        let store = records_from_csv("Make,Model\nBMW,i3\n".as_bytes()).unwrap();
        assert_eq!(store.records[0].electric_range.plotted(), 0);
        assert_eq!(store.records[0].vehicle_type, None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("vehicles.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn bundled_dataset_parses() {
        let store = load_bundled().unwrap();
        assert!(!store.is_empty());
        assert!(store.makes.len() > 1);
    }

    #[test]
    fn parquet_string_and_integer_columns() {
        let path = write_parquet(
            "strings",
            vec![
                (MAKE_COLUMN, Arc::new(StringArray::from(vec![Some("TESLA"), None])) as ArrayRef),
                (
                    MODEL_COLUMN,
                    Arc::new(LargeStringArray::from(vec![Some("MODEL Y"), Some("IONIQ 5")])) as ArrayRef,
                ),
                (TYPE_COLUMN, Arc::new(StringArray::from(vec![Some("BEV"), None])) as ArrayRef),
                (RANGE_COLUMN, Arc::new(Int64Array::from(vec![Some(300), None])) as ArrayRef),
            ],
        );
        let store = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(store.len(), 2);
        assert_eq!(store.records[0].make.as_deref(), Some("TESLA"));
        assert_eq!(store.records[0].model.as_deref(), Some("MODEL Y"));
        assert_eq!(store.records[0].electric_range.valid(), Some(300));
        assert_eq!(store.records[1].make, None);
        assert_eq!(store.records[1].model.as_deref(), Some("IONIQ 5"));
        assert_eq!(store.records[1].vehicle_type, None);
        assert_eq!(store.records[1].electric_range.reading, RangeReading::Invalid);
        assert_eq!(store.makes, vec!["TESLA".to_string()]);
    }

    #[test]
    fn parquet_numeric_ranges_become_text() {
        let path = write_parquet(
            "numeric",
            vec![
                (MAKE_COLUMN, Arc::new(StringArray::from(vec!["KIA", "BMW"])) as ArrayRef),
                (RANGE_COLUMN, Arc::new(Float64Array::from(vec![215.0, 153.5])) as ArrayRef),
                ("Model Year", Arc::new(Int32Array::from(vec![2021, 2019])) as ArrayRef),
            ],
        );
        let store = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(store.records[0].electric_range.raw, "215");
        assert_eq!(store.records[0].electric_range.valid(), Some(215));
        assert_eq!(store.records[1].electric_range.raw, "153.5");
        assert_eq!(store.records[1].electric_range.valid(), Some(153));
        assert_eq!(store.records[0].model, None);
    }

    #[test]
    fn parquet_int32_and_float32_columns() {
        let path = write_parquet(
            "narrow",
            vec![
                (MODEL_COLUMN, Arc::new(Int32Array::from(vec![Some(3), None])) as ArrayRef),
                (RANGE_COLUMN, Arc::new(Float32Array::from(vec![Some(84.0), None])) as ArrayRef),
            ],
        );
        let store = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(store.records[0].model.as_deref(), Some("3"));
        assert_eq!(store.records[0].electric_range.valid(), Some(84));
        assert_eq!(store.records[1].model, None);
        assert_eq!(store.records[1].electric_range.valid(), None);
    }

    #[test]
    fn parquet_boolean_column_is_rejected() {
        let path = write_parquet(
            "boolean",
            vec![(MAKE_COLUMN, Arc::new(BooleanArray::from(vec![true])) as ArrayRef)],
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedColumnType { column, .. }) if column == MAKE_COLUMN
        ));
    }
}
