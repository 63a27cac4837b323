use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use crate::error::{DataError, Result};

use super::model::{FeatureTable, MetadataValue, Process, Settings, TestSet, TrainSet};

// ---------------------------------------------------------------------------
// Fixed input layout
// ---------------------------------------------------------------------------

// Every path below is required; there is no discovery or fallback.
//
//   <input_dir>/train/data/data.parquet
//   <input_dir>/train/labels/data.labels
//   <input_dir>/train/settings/data.json
//   <input_dir>/train/weights/data.weights
//   <input_dir>/train/detailed_labels/data.detailed_labels
//   <input_dir>/test/settings/data.json
//   <input_dir>/test/data/<process>_data.parquet

pub fn train_data_file(input_dir: &Path) -> PathBuf {
    input_dir.join("train").join("data").join("data.parquet")
}

pub fn train_labels_file(input_dir: &Path) -> PathBuf {
    input_dir.join("train").join("labels").join("data.labels")
}

pub fn train_settings_file(input_dir: &Path) -> PathBuf {
    input_dir.join("train").join("settings").join("data.json")
}

pub fn train_weights_file(input_dir: &Path) -> PathBuf {
    input_dir.join("train").join("weights").join("data.weights")
}

pub fn train_detailed_labels_file(input_dir: &Path) -> PathBuf {
    input_dir
        .join("train")
        .join("detailed_labels")
        .join("data.detailed_labels")
}

pub fn test_settings_file(input_dir: &Path) -> PathBuf {
    input_dir.join("test").join("settings").join("data.json")
}

pub fn test_data_file(input_dir: &Path, process: Process) -> PathBuf {
    input_dir
        .join("test")
        .join("data")
        .join(process.data_file_name())
}

/// Key in `test/settings/data.json` holding the true mixture coefficients.
pub const GROUND_TRUTH_MUS_KEY: &str = "ground_truth_mus";

// ---------------------------------------------------------------------------
// Partition loaders
// ---------------------------------------------------------------------------

/// Read the five train-side files and assemble the train partition.
///
/// Nothing is returned unless all five reads succeed, so a caller installing
/// the result replaces its previous partition atomically.
pub fn load_train(input_dir: &Path) -> Result<TrainSet> {
    let labels = read_float_lines(&train_labels_file(input_dir))?;
    let settings = read_settings(&train_settings_file(input_dir))?;
    let weights = read_float_lines(&train_weights_file(input_dir))?;
    let detailed_labels = read_string_lines(&train_detailed_labels_file(input_dir))?;
    let data = read_feature_table(&train_data_file(input_dir))?;

    Ok(TrainSet {
        data,
        labels,
        weights,
        detailed_labels,
        settings,
    })
}

/// Read the four per-category test tables.  All four must be present;
/// iteration order is irrelevant to the result.
pub fn load_test(input_dir: &Path) -> Result<TestSet> {
    let mut test_set = TestSet::new();
    for process in Process::ALL {
        let table = read_feature_table(&test_data_file(input_dir, process))?;
        test_set.insert(process, table);
    }
    Ok(test_set)
}

/// Extract the ground-truth mixture coefficients from the test settings file.
pub fn load_ground_truth_mus(input_dir: &Path) -> Result<Vec<f64>> {
    let path = test_settings_file(input_dir);
    let settings = read_settings(&path)?;
    match settings.get(GROUND_TRUTH_MUS_KEY) {
        Some(value) => value.as_f64_list().ok_or_else(|| {
            DataError::malformed(
                &path,
                format!("'{GROUND_TRUTH_MUS_KEY}' is not a number or list of numbers"),
            )
        }),
        None => Err(DataError::malformed(
            &path,
            format!("missing '{GROUND_TRUTH_MUS_KEY}' field"),
        )),
    }
}

// ---------------------------------------------------------------------------
// Line-oriented readers
// ---------------------------------------------------------------------------

fn read_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataError::missing(path));
    }
    std::fs::read_to_string(path).map_err(|e| DataError::malformed(path, e.to_string()))
}

/// Parse a newline-separated float file (labels, weights).
fn read_float_lines(path: &Path) -> Result<Vec<f64>> {
    let text = read_text(path)?;
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            line.trim().parse::<f64>().map_err(|_| {
                DataError::malformed(path, format!("line {i}: '{line}' is not a number"))
            })
        })
        .collect()
}

/// Read a newline-separated string file (detailed labels).
fn read_string_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_text(path)?.lines().map(str::to_string).collect())
}

// ---------------------------------------------------------------------------
// Settings (JSON) reader
// ---------------------------------------------------------------------------

fn read_settings(path: &Path) -> Result<Settings> {
    let text = read_text(path)?;
    let root: JsonValue = serde_json::from_str(&text)
        .map_err(|e| DataError::malformed(path, format!("invalid JSON: {e}")))?;
    let obj = root
        .as_object()
        .ok_or_else(|| DataError::malformed(path, "expected a top-level JSON object"))?;
    Ok(obj
        .iter()
        .map(|(key, val)| (key.clone(), json_to_metadata(val)))
        .collect())
}

fn json_to_metadata(val: &JsonValue) -> MetadataValue {
    match val {
        JsonValue::String(s) => MetadataValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                MetadataValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                MetadataValue::Float(f)
            } else {
                MetadataValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => MetadataValue::Bool(*b),
        JsonValue::Array(items) => {
            MetadataValue::List(items.iter().map(json_to_metadata).collect())
        }
        JsonValue::Null => MetadataValue::Null,
        other => MetadataValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a parquet file of flat numeric columns into a [`FeatureTable`].
///
/// Accepts Float64, Float32, Int64 and Int32 columns; everything is widened
/// to `f64`.  Works with files written by both Pandas and Polars.
pub fn read_feature_table(path: &Path) -> Result<FeatureTable> {
    if !path.exists() {
        return Err(DataError::missing(path));
    }
    let file = std::fs::File::open(path).map_err(|e| DataError::malformed(path, e.to_string()))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| DataError::malformed(path, format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| DataError::malformed(path, format!("building parquet reader: {e}")))?;

    let mut names: Vec<String> = Vec::new();
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| DataError::malformed(path, format!("reading record batch: {e}")))?;
        if names.is_empty() {
            names = batch
                .schema()
                .fields()
                .iter()
                .map(|f| f.name().clone())
                .collect();
            columns = vec![Vec::new(); names.len()];
        }
        for (idx, col) in batch.columns().iter().enumerate() {
            append_f64_column(col, &mut columns[idx]).map_err(|reason| {
                DataError::malformed(path, format!("column '{}': {reason}", names[idx]))
            })?;
        }
    }

    log::debug!(
        "read {}: {} rows x {} columns",
        path.display(),
        columns.first().map_or(0, Vec::len),
        names.len()
    );

    Ok(FeatureTable { names, columns })
}

/// Append an Arrow column to an `f64` vector, widening as needed.
fn append_f64_column(
    col: &Arc<dyn Array>,
    out: &mut Vec<f64>,
) -> std::result::Result<(), String> {
    match col.data_type() {
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>().unwrap();
            out.extend(arr.iter().map(|v| v.unwrap_or(f64::NAN)));
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>().unwrap();
            out.extend(arr.iter().map(|v| v.unwrap_or(f32::NAN) as f64));
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>().unwrap();
            out.extend(arr.iter().map(|v| v.map_or(f64::NAN, |i| i as f64)));
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>().unwrap();
            out.extend(arr.iter().map(|v| v.map_or(f64::NAN, |i| i as f64)));
        }
        other => {
            return Err(format!(
                "unsupported feature type {other:?}, expected a numeric column"
            ))
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use tempfile::TempDir;

    #[test]
    fn load_train_reads_all_five_files() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());

        let train = load_train(dir.path()).unwrap();
        assert_eq!(train.data.num_rows(), 4);
        assert_eq!(train.labels.len(), train.data.num_rows());
        assert_eq!(train.weights.len(), train.data.num_rows());
        assert_eq!(train.detailed_labels.len(), train.data.num_rows());
        assert_eq!(
            train.settings.get("lumi"),
            Some(&MetadataValue::Float(140.0))
        );
    }

    #[test]
    fn load_train_fails_on_missing_labels() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());
        std::fs::remove_file(train_labels_file(dir.path())).unwrap();

        match load_train(dir.path()) {
            Err(DataError::MissingFile { path }) => {
                assert_eq!(path, train_labels_file(dir.path()));
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn malformed_label_line_is_rejected() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());
        fixtures::write_lines(&train_labels_file(dir.path()), &["0", "not-a-float", "1"]);

        match load_train(dir.path()) {
            Err(DataError::MalformedData { reason, .. }) => {
                assert!(reason.contains("line 1"), "unexpected reason: {reason}");
            }
            other => panic!("expected MalformedData, got {other:?}"),
        }
    }

    #[test]
    fn invalid_settings_json_is_rejected() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());
        fixtures::write_lines(&train_settings_file(dir.path()), &["{not json"]);

        assert!(matches!(
            load_train(dir.path()),
            Err(DataError::MalformedData { .. })
        ));
    }

    #[test]
    fn load_test_reads_all_four_categories() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());

        let test_set = load_test(dir.path()).unwrap();
        assert_eq!(test_set.len(), 4);
        for process in Process::ALL {
            assert!(!test_set[&process].is_empty(), "{process} table empty");
        }
    }

    #[test]
    fn load_test_fails_on_missing_category() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());
        std::fs::remove_file(test_data_file(dir.path(), Process::Diboson)).unwrap();

        match load_test(dir.path()) {
            Err(DataError::MissingFile { path }) => {
                assert_eq!(path, test_data_file(dir.path(), Process::Diboson));
            }
            other => panic!("expected MissingFile, got {other:?}"),
        }
    }

    #[test]
    fn ground_truth_mus_match_settings_file() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());

        let mus = load_ground_truth_mus(dir.path()).unwrap();
        assert_eq!(mus, fixtures::GROUND_TRUTH_MUS.to_vec());
    }

    #[test]
    fn ground_truth_mus_missing_field_is_malformed() {
        let dir = TempDir::new().unwrap();
        fixtures::write_input_tree(dir.path());
        fixtures::write_lines(&test_settings_file(dir.path()), &["{\"other\": 1}"]);

        assert!(matches!(
            load_ground_truth_mus(dir.path()),
            Err(DataError::MalformedData { .. })
        ));
    }

    #[test]
    fn feature_table_widens_integer_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.parquet");
        fixtures::write_mixed_type_parquet(&path);

        let table = read_feature_table(&path).unwrap();
        assert_eq!(table.column("n_jets"), Some(&[0.0, 2.0, 1.0][..]));
        assert_eq!(table.column("pt"), Some(&[10.0, 20.0, 30.0][..]));
    }
}
