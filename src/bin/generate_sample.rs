use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster families in flight order, with a per-family success probability
/// and a typical payload ceiling.
const FAMILIES: [(&str, f64, f64); 5] = [
    ("v1.0", 0.20, 700.0),
    ("v1.1", 0.35, 4500.0),
    ("FT", 0.70, 9600.0),
    ("B4", 0.60, 6000.0),
    ("B5", 0.95, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const FLIGHTS: usize = 56;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut all_flight: Vec<i64> = Vec::with_capacity(FLIGHTS);
    let mut all_site: Vec<&str> = Vec::with_capacity(FLIGHTS);
    let mut all_payload: Vec<f64> = Vec::with_capacity(FLIGHTS);
    let mut all_category: Vec<&str> = Vec::with_capacity(FLIGHTS);
    let mut all_class: Vec<i64> = Vec::with_capacity(FLIGHTS);

    for flight in 0..FLIGHTS {
        // Later flights fly later booster families.
        let family = (flight * FAMILIES.len() / FLIGHTS).min(FAMILIES.len() - 1);
        let (category, p_success, ceiling) = FAMILIES[family];

        let payload = (rng.next_f64() * ceiling / 10.0).round() * 10.0;
        let success = rng.next_f64() < p_success;

        all_flight.push(flight as i64 + 1);
        all_site.push(*rng.pick(&SITES));
        all_payload.push(payload);
        all_category.push(category);
        all_class.push(i64::from(success));
    }

    write_parquet(
        "spacex_launch_dash.parquet",
        &all_flight,
        &all_site,
        &all_payload,
        &all_category,
        &all_class,
    )?;

    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV")?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for i in 0..FLIGHTS {
        writer.write_record([
            all_flight[i].to_string(),
            all_site[i].to_string(),
            all_class[i].to_string(),
            format!("{:.1}", all_payload[i]),
            all_category[i].to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {FLIGHTS} launches to spacex_launch_dash.parquet and {csv_path}");
    Ok(())
}

fn write_parquet(
    path: &str,
    flight: &[i64],
    site: &[&str],
    payload: &[f64],
    category: &[&str],
    class: &[i64],
) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(flight.to_vec())),
            Arc::new(StringArray::from(site.to_vec())),
            Arc::new(Int64Array::from(class.to_vec())),
            Arc::new(Float64Array::from(payload.to_vec())),
            Arc::new(StringArray::from(category.to_vec())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picked_sites_come_from_the_site_list() {
        let mut rng = SimpleRng::new(7);
        let picked: Vec<&str> = (0..32).map(|_| *rng.pick(&SITES)).collect();
        assert!(picked.iter().all(|s| SITES.contains(s)));
    }
}
