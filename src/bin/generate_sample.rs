use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "VAFB SLC-4E", "KSC LC-39A"];

/// Booster generations in flight order, with the success probability of each.
const BOOSTERS: [(&str, f64); 5] = [("v1.0", 0.1), ("v1.1", 0.3), ("FT", 0.7), ("B4", 0.6), ("B5", 0.95)];

const MAX_PAYLOAD_KG: f64 = 9600.0;
const N_LAUNCHES: usize = 56;

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

struct Launch {
    site: &'static str,
    class: i64,
    payload: f64,
    booster: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (0..N_LAUNCHES)
        .map(|i| {
            // Later flights fly newer boosters and heavier payloads.
            let era = i * BOOSTERS.len() / N_LAUNCHES;
            let (booster, p_success) = BOOSTERS[era];
            let site = *rng.pick(&SITES);
            let weight = (era as f64 + rng.next_f64()) / BOOSTERS.len() as f64;
            let payload = (weight * MAX_PAYLOAD_KG).round();
            let class = i64::from(rng.next_f64() < p_success);
            Launch {
                site,
                class,
                payload,
                booster,
            }
        })
        .collect()
}

fn write_parquet(launches: &[Launch], path: &str) {
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
            Arc::new(Int64Array::from_iter_values(1..=launches.len() as i64)),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster))),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn write_csv(launches: &[Launch], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .expect("Failed to write header");
    for (i, l) in launches.iter().enumerate() {
        writer
            .write_record([
                (i + 1).to_string(),
                l.site.to_string(),
                l.class.to_string(),
                format!("{:.1}", l.payload),
                l.booster.to_string(),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    write_parquet(&launches, "sample_launches.parquet");
    write_csv(&launches, "sample_launches.csv");

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to sample_launches.parquet and sample_launches.csv",
        launches.len()
    );
}
