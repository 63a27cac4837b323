use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::json;

use higgs_datasets::data::loader;
use higgs_datasets::{DatasetManager, Process};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const FEATURES: [&str; 4] = ["pri_lep_pt", "pri_lep_eta", "pri_met", "der_mass_vis"];

/// Per-process event counts and feature means: (process, events, pt, met, mass).
const PROCESSES: [(Process, usize, f64, f64, f64); 4] = [
    (Process::Ztautau, 600, 38.0, 14.0, 68.0),
    (Process::Diboson, 80, 45.0, 22.0, 82.0),
    (Process::Ttbar, 140, 55.0, 30.0, 95.0),
    (Process::Htautau, 180, 42.0, 26.0, 110.0),
];

/// Append `n` events drawn around the process means, column-major.
fn generate_events(
    rng: &mut SimpleRng,
    n: usize,
    pt_mean: f64,
    met_mean: f64,
    mass_mean: f64,
    columns: &mut [Vec<f64>; 4],
) {
    for _ in 0..n {
        columns[0].push(rng.gauss(pt_mean, 0.25 * pt_mean).abs());
        columns[1].push(rng.gauss(0.0, 1.4));
        columns[2].push(rng.gauss(met_mean, 0.3 * met_mean).abs());
        columns[3].push(rng.gauss(mass_mean, 0.15 * mass_mean).abs());
    }
}

fn write_feature_parquet(path: &Path, columns: &[Vec<f64>; 4]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let fields: Vec<Field> = FEATURES
        .iter()
        .map(|name| Field::new(*name, DataType::Float64, false))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|col| Arc::new(Float64Array::from(col.clone())) as ArrayRef)
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("creating record batch")?;

    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(path, lines.join("\n")).with_context(|| format!("writing {}", path.display()))
}

fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(value).context("serializing settings")?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let root = Path::new("sample_input");

    // ---- Train partition: a shuffled-looking mix of all four processes ----
    let mut columns: [Vec<f64>; 4] = Default::default();
    let mut labels: Vec<String> = Vec::new();
    let mut weights: Vec<String> = Vec::new();
    let mut detailed_labels: Vec<String> = Vec::new();

    for (process, events, pt, met, mass) in PROCESSES {
        generate_events(&mut rng, events, pt, met, mass, &mut columns);
        let label = if process == Process::Htautau { "1" } else { "0" };
        for _ in 0..events {
            labels.push(label.to_string());
            weights.push(format!("{:.6}", 0.5 + rng.next_f64()));
            detailed_labels.push(process.name().to_string());
        }
    }
    let train_events = labels.len();

    write_feature_parquet(&loader::train_data_file(root), &columns)?;
    write_lines(&loader::train_labels_file(root), &labels)?;
    write_lines(&loader::train_weights_file(root), &weights)?;
    write_lines(&loader::train_detailed_labels_file(root), &detailed_labels)?;
    write_json(
        &loader::train_settings_file(root),
        &json!({ "lumi": 140.0, "ground_truth_mu": 1.0 }),
    )?;

    // ---- Test partition: one free-standing table per process ----
    let mut test_events = 0;
    for (process, events, pt, met, mass) in PROCESSES {
        let mut columns: [Vec<f64>; 4] = Default::default();
        generate_events(&mut rng, events / 2, pt, met, mass, &mut columns);
        test_events += events / 2;
        write_feature_parquet(&loader::test_data_file(root, process), &columns)?;
    }
    write_json(
        &loader::test_settings_file(root),
        &json!({ "ground_truth_mus": [1.0, 0.94, 1.12] }),
    )?;

    // ---- Smoke check: round-trip the tree through the manager ----
    let mut manager = DatasetManager::new(root);
    manager.load_train().context("reloading generated train partition")?;
    manager.load_test().context("reloading generated test partition")?;

    println!(
        "Wrote {train_events} train events and {test_events} test events to {}",
        root.display()
    );
    Ok(())
}
