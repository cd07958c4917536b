use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{PassengerClass, PassengerRecord, PassengerTable, Sex};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a passenger table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – the usual manifest export with a header row
/// * `.json`    – `[{ "PassengerId": 1, "Survived": 0, ... }, ...]`
/// * `.parquet` – same columns, as written by `df.to_parquet()`
///
/// Required columns are `PassengerId`, `Survived`, `Pclass`, `Sex` and `Age`
/// (empty / null = unknown). Any other column is ignored.
pub fn load_file(path: &Path) -> Result<PassengerTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let table = build_table(records)?;
    log::info!("Loaded {} passengers from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Row validation
// ---------------------------------------------------------------------------

/// One raw manifest row, before validation.
#[derive(Debug, Deserialize)]
struct PassengerRow {
    #[serde(rename = "PassengerId")]
    passenger_id: u32,
    #[serde(rename = "Survived")]
    survived: u8,
    #[serde(rename = "Pclass")]
    pclass: u8,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "Age")]
    age: Option<f64>,
}

impl PassengerRow {
    fn into_record(self) -> Result<PassengerRecord> {
        let survived = match self.survived {
            0 => false,
            1 => true,
            other => bail!("Survived must be 0 or 1, got {other}"),
        };
        let class = PassengerClass::try_from(self.pclass).map_err(|e| anyhow!(e))?;
        let sex = Sex::parse(&self.sex)
            .with_context(|| format!("Sex must be 'male' or 'female', got '{}'", self.sex))?;
        if let Some(age) = self.age {
            if !age.is_finite() || age < 0.0 {
                bail!("Age must be a non-negative number, got {age}");
            }
        }
        Ok(PassengerRecord {
            id: self.passenger_id,
            survived,
            class,
            sex,
            age: self.age,
        })
    }
}

fn build_table(records: Vec<PassengerRecord>) -> Result<PassengerTable> {
    let mut seen = BTreeSet::new();
    for r in &records {
        if !seen.insert(r.id) {
            bail!("Duplicate PassengerId {}", r.id);
        }
    }
    let missing_ages = records.iter().filter(|r| r.age.is_none()).count();
    if missing_ages > 0 {
        log::debug!("{missing_ages} of {} passengers have no age", records.len());
    }
    Ok(PassengerTable::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<PassengerRecord>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    reader
        .deserialize::<PassengerRow>()
        .enumerate()
        .map(|(i, result)| {
            result
                .map_err(anyhow::Error::from)
                .and_then(PassengerRow::into_record)
                .with_context(|| format!("CSV row {}", i + 1))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "PassengerId": 1, "Survived": 0, "Pclass": 3, "Sex": "male", "Age": 22.0 },
///   { "PassengerId": 6, "Survived": 0, "Pclass": 3, "Sex": "male", "Age": null }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<PassengerRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<PassengerRow> = serde_json::from_str(&text).context("parsing JSON")?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| row.into_record().with_context(|| format!("Row {}", i + 1)))
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file. Integer columns may be Int32 or Int64, `Survived`
/// may also be Boolean, `Age` Float32 or Float64 with nulls for unknown
/// ages.
fn load_parquet(path: &Path) -> Result<Vec<PassengerRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let columns = ManifestColumns::of(&batch)?;

        for row in 0..batch.num_rows() {
            // Numbered across the whole file, not within the batch.
            let file_row = records.len() + 1;
            let record = columns
                .row(row)
                .and_then(PassengerRow::into_record)
                .with_context(|| format!("Row {file_row}"))?;
            records.push(record);
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// The manifest columns of one record batch.
struct ManifestColumns<'b> {
    id: &'b Arc<dyn Array>,
    survived: &'b Arc<dyn Array>,
    pclass: &'b Arc<dyn Array>,
    sex: &'b Arc<dyn Array>,
    age: &'b Arc<dyn Array>,
}

impl<'b> ManifestColumns<'b> {
    fn of(batch: &'b RecordBatch) -> Result<Self> {
        Ok(ManifestColumns {
            id: column(batch, "PassengerId")?,
            survived: column(batch, "Survived")?,
            pclass: column(batch, "Pclass")?,
            sex: column(batch, "Sex")?,
            age: column(batch, "Age")?,
        })
    }

    /// Raw values at `row` (an index within this batch).
    fn row(&self, row: usize) -> Result<PassengerRow> {
        let id = extract_int(self.id, row).context("PassengerId")?;
        let pclass = extract_int(self.pclass, row).context("Pclass")?;
        Ok(PassengerRow {
            passenger_id: u32::try_from(id).context("PassengerId out of range")?,
            survived: extract_flag(self.survived, row).context("Survived")?,
            pclass: u8::try_from(pclass).context("Pclass out of range")?,
            sex: extract_string(self.sex, row).context("Sex")?,
            age: extract_float(self.age, row).context("Age")?,
        })
    }
}

fn column<'b>(batch: &'b RecordBatch, name: &str) -> Result<&'b Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

fn extract_int(col: &Arc<dyn Array>, row: usize) -> Result<i64> {
    if col.is_null(row) {
        bail!("null in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(i64::from(arr.value(row)))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row))
        }
        other => bail!("expected Int32 or Int64 column, got {other:?}"),
    }
}

fn extract_flag(col: &Arc<dyn Array>, row: usize) -> Result<u8> {
    if let DataType::Boolean = col.data_type() {
        if col.is_null(row) {
            bail!("null in boolean column");
        }
        let arr = col
            .as_any()
            .downcast_ref::<BooleanArray>()
            .context("expected BooleanArray")?;
        return Ok(u8::from(arr.value(row)));
    }
    u8::try_from(extract_int(col, row)?).context("Survived out of range")
}

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null in string column");
    }
    if let Some(s) = col.as_string_opt::<i32>() {
        Ok(s.value(row).to_string())
    } else if let Some(s) = col.as_string_opt::<i64>() {
        Ok(s.value(row).to_string())
    } else {
        bail!("Expected Utf8 column, got {:?}", col.data_type())
    }
}

/// Integer ages are accepted too; pandas writes them when no age is missing.
#[allow(clippy::cast_precision_loss)]
fn extract_float(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        let v = arr.value(row);
        return Ok((!v.is_nan()).then_some(v));
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        let v = f64::from(arr.value(row));
        return Ok((!v.is_nan()).then_some(v));
    }
    extract_int(col, row).map(|v| Some(v as f64))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("titanic-explorer-{}-{name}", std::process::id()))
    }

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = temp_path(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    const MANIFEST_CSV: &str = "\
PassengerId,Survived,Pclass,Name,Sex,Age,Fare
1,0,3,\"Braund, Mr. Owen Harris\",male,22,7.25
2,1,1,\"Cumings, Mrs. John Bradley\",female,38,71.2833
6,0,3,\"Moran, Mr. James\",male,,8.4583
";

    #[test]
    fn csv_with_extra_columns_and_missing_age() {
        let path = write_temp("manifest.csv", MANIFEST_CSV);
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 3);
        let r = &table.records()[1];
        assert_eq!(r.id, 2);
        assert!(r.survived);
        assert_eq!(r.class, PassengerClass::First);
        assert_eq!(r.sex, Sex::Female);
        assert_eq!(r.age, Some(38.0));
        assert_eq!(table.records()[2].age, None);
    }

    #[test]
    fn csv_rejects_unknown_class() {
        let path = write_temp(
            "bad-class.csv",
            "PassengerId,Survived,Pclass,Sex,Age\n1,0,4,male,22\n",
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 1"), "{msg}");
        assert!(msg.contains("passenger class"), "{msg}");
    }

    #[test]
    fn csv_rejects_duplicate_ids() {
        let path = write_temp(
            "dup.csv",
            "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,22\n1,1,1,female,30\n",
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("Duplicate PassengerId 1"));
    }

    #[test]
    fn json_records_with_null_age() {
        let path = write_temp(
            "manifest.json",
            r#"[
                {"PassengerId": 1, "Survived": 0, "Pclass": 3, "Sex": "male", "Age": 22.0, "Name": "x"},
                {"PassengerId": 2, "Survived": 1, "Pclass": 2, "Sex": "Female", "Age": null}
            ]"#,
        );
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].sex, Sex::Female);
        assert_eq!(table.records()[1].age, None);
    }

    #[test]
    fn json_rejects_non_binary_survival() {
        let path = write_temp(
            "bad-survived.json",
            r#"[{"PassengerId": 1, "Survived": 2, "Pclass": 3, "Sex": "male", "Age": 1.0}]"#,
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(format!("{err:#}").contains("Survived must be 0 or 1"));
    }

    #[test]
    fn parquet_round_trip_of_manifest_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("PassengerId", DataType::Int64, false),
            Field::new("Survived", DataType::Int64, false),
            Field::new("Pclass", DataType::Int64, false),
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Age", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![1, 2])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(Int64Array::from(vec![2, 3])),
                Arc::new(StringArray::from(vec!["female", "male"])),
                Arc::new(Float64Array::from(vec![Some(4.0), None])),
            ],
        )
        .unwrap();

        let path = temp_path("manifest.parquet");
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].class, PassengerClass::Second);
        assert!(table.records()[0].survived);
        assert_eq!(table.records()[0].age, Some(4.0));
        assert_eq!(table.records()[1].age, None);
    }

    #[test]
    fn csv_rejects_unknown_sex() {
        let path = write_temp(
            "bad-sex.csv",
            "PassengerId,Survived,Pclass,Sex,Age\n1,0,3,male,22\n2,1,1,unknown,30\n",
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        let msg = format!("{err:#}");
        assert!(msg.contains("CSV row 2"), "{msg}");
        assert!(msg.contains("Sex must be"), "{msg}");
    }

    #[test]
    fn json_rejects_negative_age() {
        let path = write_temp(
            "negative-age.json",
            r#"[{"PassengerId": 1, "Survived": 1, "Pclass": 2, "Sex": "female", "Age": -1.0}]"#,
        );
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 1"), "{msg}");
        assert!(msg.contains("Age must be a non-negative"), "{msg}");
    }

    fn write_parquet(name: &str, batch: &RecordBatch) -> PathBuf {
        let path = temp_path(name);
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn parquet_with_boolean_flag_int32_columns_and_float32_age() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("PassengerId", DataType::Int32, false),
            Field::new("Survived", DataType::Boolean, false),
            Field::new("Pclass", DataType::Int32, false),
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Age", DataType::Float32, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![10, 11, 12])),
                Arc::new(BooleanArray::from(vec![true, false, true])),
                Arc::new(Int32Array::from(vec![1, 3, 2])),
                Arc::new(StringArray::from(vec!["female", "male", "male"])),
                Arc::new(Float32Array::from(vec![Some(4.5), Some(f32::NAN), None])),
            ],
        )
        .unwrap();
        let path = write_parquet("typed.parquet", &batch);
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let records = table.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, 10);
        assert!(records[0].survived);
        assert!(!records[1].survived);
        assert_eq!(records[0].class, PassengerClass::First);
        assert_eq!(records[1].class, PassengerClass::Third);
        assert_eq!(records[2].class, PassengerClass::Second);
        assert_eq!(records[0].age, Some(4.5));
        assert_eq!(records[1].age, None);
        assert_eq!(records[2].age, None);
    }

    #[test]
    fn parquet_errors_name_file_row_and_column() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("PassengerId", DataType::Int64, true),
            Field::new("Survived", DataType::Int64, false),
            Field::new("Pclass", DataType::Int64, false),
            Field::new("Sex", DataType::Utf8, false),
            Field::new("Age", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![Some(1), None])),
                Arc::new(Int64Array::from(vec![0, 1])),
                Arc::new(Int64Array::from(vec![3, 1])),
                Arc::new(StringArray::from(vec!["male", "female"])),
                Arc::new(Float64Array::from(vec![Some(30.0), Some(2.0)])),
            ],
        )
        .unwrap();
        let path = write_parquet("null-id.parquet", &batch);
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        let msg = format!("{err:#}");
        assert!(msg.contains("Row 2"), "{msg}");
        assert!(msg.contains("PassengerId"), "{msg}");
        assert!(msg.contains("null in integer column"), "{msg}");
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = load_file(Path::new("passengers.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }
}
