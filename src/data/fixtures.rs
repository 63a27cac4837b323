//! Test fixtures: write a complete synthetic input tree to disk so loader and
//! manager tests can exercise the real file formats.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float32Array, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

use super::loader;
use super::model::Process;

pub(crate) const GROUND_TRUTH_MUS: [f64; 3] = [1.0, 2.33, 0.52];

/// Write a full input tree (all train files, both settings files, and the
/// four test category files) rooted at `root`.
pub(crate) fn write_input_tree(root: &Path) {
    write_feature_parquet(
        &loader::train_data_file(root),
        &["pri_lep_pt", "pri_met"],
        &[
            vec![38.2, 51.7, 24.9, 77.3],
            vec![12.4, 33.0, 8.6, 41.1],
        ],
    );
    write_lines(
        &loader::train_labels_file(root),
        &["0", "1", "0", "1"],
    );
    write_lines(
        &loader::train_weights_file(root),
        &["0.5", "1.5", "1.0", "2.0"],
    );
    write_lines(
        &loader::train_detailed_labels_file(root),
        &["ztautau", "htautau", "ttbar", "htautau"],
    );
    write_json(
        &loader::train_settings_file(root),
        &json!({ "lumi": 140.0, "systematics": true }),
    );
    write_json(
        &loader::test_settings_file(root),
        &json!({ "ground_truth_mus": GROUND_TRUTH_MUS.to_vec() }),
    );

    for (i, process) in Process::ALL.into_iter().enumerate() {
        let base = 10.0 * (i + 1) as f64;
        write_feature_parquet(
            &loader::test_data_file(root, process),
            &["pri_lep_pt", "pri_met"],
            &[
                vec![base + 1.0, base + 2.0, base + 3.0],
                vec![base + 0.1, base + 0.2, base + 0.3],
            ],
        );
    }
}

/// Write a parquet file of flat Float64 columns.
pub(crate) fn write_feature_parquet(path: &Path, names: &[&str], columns: &[Vec<f64>]) {
    let fields: Vec<Field> = names
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, false))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|col| Arc::new(Float64Array::from(col.clone())) as ArrayRef)
        .collect();
    write_parquet(path, fields, arrays);
}

/// Write a parquet file mixing Float64, Int64 and Float32 columns, for the
/// widening path.
pub(crate) fn write_mixed_type_parquet(path: &Path) {
    let fields = vec![
        Field::new("pt", DataType::Float64, false),
        Field::new("n_jets", DataType::Int64, false),
        Field::new("frac", DataType::Float32, false),
    ];
    let arrays: Vec<ArrayRef> = vec![
        Arc::new(Float64Array::from(vec![10.0, 20.0, 30.0])),
        Arc::new(Int64Array::from(vec![0, 2, 1])),
        Arc::new(Float32Array::from(vec![0.25f32, 0.5, 0.75])),
    ];
    write_parquet(path, fields, arrays);
}

fn write_parquet(path: &Path, fields: Vec<Field>, arrays: Vec<ArrayRef>) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
    let file = fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

/// Write a newline-separated text file, creating parent directories.
pub(crate) fn write_lines(path: &Path, lines: &[&str]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, lines.join("\n")).unwrap();
}

fn write_json(path: &Path, value: &serde_json::Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}
