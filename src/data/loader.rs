use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CATEGORY: &str = "Booster Version Category";
pub const COL_CLASS: &str = "class";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the four launch columns
/// * `.json`    – `[{ "Launch Site": ..., "class": 1, ... }, ...]`
/// * `.parquet` – the same four columns, strings and numbers
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            load_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json(&text)
        }
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} sites ({})",
        dataset.len(),
        dataset.sites().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Extra columns (`Flight Number`, `Mission Outcome`, an unnamed pandas
/// index, ...) are ignored.
pub fn load_csv<R: Read>(source: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(source);
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_SITE, COL_PAYLOAD, COL_CATEGORY, COL_CLASS] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    // Line numbers count the header as line 1.
    for (row_no, result) in reader.deserialize::<LaunchRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV line {}", row_no + 2))?;
        records.push(record);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the shape `df.to_dict('records')` produces:
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Payload Mass (kg)": 0.0,
///     "Booster Version Category": "v1.0", "class": 0 },
///   ...
/// ]
/// ```
pub fn load_json(text: &str) -> Result<LaunchDataset> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(text).context("parsing JSON")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value::<LaunchRecord>(row)
                .with_context(|| format!("Row {i} is not a launch record"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding the launch table.
///
/// String columns may be Utf8 or LargeUtf8; numeric columns any of
/// Int32/Int64/Float32/Float64.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        append_batch(&batch, records.len(), &mut records)?;
    }

    Ok(LaunchDataset::from_records(records)?)
}

fn append_batch(batch: &RecordBatch, first_row: usize, out: &mut Vec<LaunchRecord>) -> Result<()> {
    let site = column(batch, COL_SITE)?;
    let payload = column(batch, COL_PAYLOAD)?;
    let category = column(batch, COL_CATEGORY)?;
    let class = column(batch, COL_CLASS)?;

    for row in 0..batch.num_rows() {
        let row_no = first_row + row;
        let class_value = extract_f64(class, row)
            .with_context(|| format!("Row {row_no}: failed to read '{COL_CLASS}'"))?;
        if class_value.fract() != 0.0 {
            bail!("Row {row_no}: class {class_value} is not an integer");
        }

        out.push(LaunchRecord {
            site: extract_string(site, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_SITE}'"))?,
            payload_mass_kg: extract_f64(payload, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_PAYLOAD}'"))?,
            booster_category: extract_string(category, row)
                .with_context(|| format!("Row {row_no}: failed to read '{COL_CATEGORY}'"))?,
            outcome: Outcome::try_from(class_value as i64)
                .with_context(|| format!("Row {row_no}"))?,
        });
    }
    Ok(())
}

// -- Arrow helpers --

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => Ok(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        other => bail!("Expected Utf8 column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        other => bail!("Expected numeric column, got {other:?}"),
    };
    value.context("column array does not match its declared type")
}
