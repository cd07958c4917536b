use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One manifest row in the column layout the loader expects.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "PassengerId")]
    passenger_id: i64,
    #[serde(rename = "Survived")]
    survived: i64,
    #[serde(rename = "Pclass")]
    pclass: i64,
    #[serde(rename = "Sex")]
    sex: &'static str,
    #[serde(rename = "Age")]
    age: Option<f64>,
}

// (class, share of passengers, mean age, survival p for female, for male)
const CLASSES: [(i64, f64, f64, f64, f64); 3] = [
    (1, 0.24, 38.0, 0.96, 0.37),
    (2, 0.21, 30.0, 0.92, 0.16),
    (3, 0.55, 25.0, 0.50, 0.14),
];
const PASSENGERS: i64 = 891;
const FEMALE_SHARE: f64 = 0.35;
const MISSING_AGE: f64 = 0.2;

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (1..=PASSENGERS)
        .map(|passenger_id| {
            let pick = rng.next_f64();
            let mut acc = 0.0;
            let &(pclass, _, mean_age, p_female, p_male) = CLASSES
                .iter()
                .find(|c| {
                    acc += c.1;
                    pick < acc
                })
                .unwrap_or(&CLASSES[2]);

            let female = rng.chance(FEMALE_SHARE);
            let survived = rng.chance(if female { p_female } else { p_male });
            let age = if rng.chance(MISSING_AGE) {
                None
            } else {
                let a = rng.gauss(mean_age, 13.0).clamp(0.42, 80.0);
                Some((a * 2.0).round() / 2.0)
            };

            Row {
                passenger_id,
                survived: i64::from(survived),
                pclass,
                sex: if female { "female" } else { "male" },
                age,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
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
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.passenger_id))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.survived))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.pclass))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.sex))),
            Arc::new(rows.iter().map(|r| r.age).collect::<Float64Array>()),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(1912);
    let rows = generate(&mut rng);

    write_csv(&rows, "sample_passengers.csv")?;
    write_parquet(&rows, "sample_passengers.parquet")?;

    let survivors = rows.iter().filter(|r| r.survived == 1).count();
    println!(
        "Wrote {} passengers ({survivors} survivors) to sample_passengers.csv and sample_passengers.parquet",
        rows.len()
    );
    Ok(())
}
