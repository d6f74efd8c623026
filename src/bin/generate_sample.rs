//! Writes a synthetic `results.csv` / `results.parquet` on the benchmark grid
//! so the viewer can be tried without running the sorting benchmarks.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const MIN_SIZE: u64 = 500;
const MAX_SIZE: u64 = 20_000;
const STEP: u64 = 500;
const THRESHOLDS: [i64; 5] = [5, 10, 20, 30, 50];

/// Column order matches what the benchmark harness writes.
#[derive(Debug, Serialize)]
struct Record {
    #[serde(rename = "Type")]
    array_type: &'static str,
    #[serde(rename = "Size")]
    size: u64,
    #[serde(rename = "Algorithm")]
    algorithm: &'static str,
    #[serde(rename = "Threshold")]
    threshold: i64,
    #[serde(rename = "Time(ms)")]
    time_ms: f64,
}

/// Relative cost of each input distribution.
fn type_factor(array_type: &str) -> f64 {
    match array_type {
        "Reverse" => 0.8,
        "AlmostSorted" => 0.6,
        _ => 1.0,
    }
}

/// Insertion sort at the leaves pays off up to a point, then costs again.
fn threshold_factor(threshold: i64) -> f64 {
    let t = threshold as f64;
    0.85 + 0.0002 * (t - 20.0).powi(2)
}

/// Model time in ms for sorting `n` elements: c·n·log2(n) with noise.
fn model_time(n: u64, factor: f64, rng: &mut SimpleRng) -> f64 {
    let n = n as f64;
    let base = 2.5e-5 * n * n.log2() * factor;
    let noisy = base * (1.0 + rng.gauss(0.0, 0.05));
    (noisy.max(0.0) * 1000.0).round() / 1000.0
}

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

fn generate(rng: &mut SimpleRng) -> Vec<Record> {
    let mut records = Vec::new();
    for array_type in ["Random", "Reverse", "AlmostSorted"] {
        let tf = type_factor(array_type);
        for size in (MIN_SIZE..=MAX_SIZE).step_by(STEP as usize) {
            records.push(Record {
                array_type,
                size,
                algorithm: "MergeSort",
                threshold: 0,
                time_ms: model_time(size, tf, rng),
            });
            for threshold in THRESHOLDS {
                records.push(Record {
                    array_type,
                    size,
                    algorithm: "MergeHybrid",
                    threshold,
                    time_ms: model_time(size, tf * threshold_factor(threshold), rng),
                });
            }
        }
    }
    records
}

fn write_csv(path: &str, records: &[Record]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for record in records {
        writer.serialize(record).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, records: &[Record]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Type", DataType::Utf8, false),
        Field::new("Size", DataType::Int64, false),
        Field::new("Algorithm", DataType::Utf8, false),
        Field::new("Threshold", DataType::Int64, false),
        Field::new("Time(ms)", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.array_type))),
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.size as i64))),
            Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.algorithm))),
            Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.threshold))),
            Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.time_ms))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    write_csv("results.csv", &records)?;
    write_parquet("results.parquet", &records)?;

    log::info!("generated {} measurements", records.len());
    println!(
        "Wrote {} measurements to results.csv and results.parquet",
        records.len()
    );
    Ok(())
}
