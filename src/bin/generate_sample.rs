use std::sync::Arc;

use arrow::array::StringArray;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One output row, serialized with the dataset's on-disk column names.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Make")]
    make: Option<String>,
    #[serde(rename = "Model")]
    model: String,
    #[serde(rename = "Electric Vehicle Type")]
    vehicle_type: String,
    #[serde(rename = "Electric Range")]
    electric_range: String,
}

const BEV: &str = "Battery Electric Vehicle (BEV)";
const PHEV: &str = "Plug-in Hybrid Electric Vehicle (PHEV)";

/// (make, model, type, typical range)
const CATALOG: &[(&str, &str, &str, i64)] = &[
    ("TESLA", "MODEL 3", BEV, 272),
    ("TESLA", "MODEL Y", BEV, 291),
    ("TESLA", "MODEL S", BEV, 337),
    ("NISSAN", "LEAF", BEV, 150),
    ("CHEVROLET", "BOLT EV", BEV, 259),
    ("CHEVROLET", "VOLT", PHEV, 53),
    ("KIA", "NIRO", BEV, 239),
    ("TOYOTA", "PRIUS PRIME", PHEV, 25),
    ("TOYOTA", "RAV4 PRIME", PHEV, 42),
    ("FORD", "MUSTANG MACH-E", BEV, 230),
    ("BMW", "I3", BEV, 153),
    ("BMW", "X5", PHEV, 30),
    ("HYUNDAI", "IONIQ 5", BEV, 220),
    ("RIVIAN", "R1T", BEV, 314),
    ("VOLVO", "XC90", PHEV, 18),
];

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }
}

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<SampleRow> {
    (0..n)
        .map(|_| {
            let (make, model, vtype, typical) = CATALOG[rng.below(CATALOG.len() as u64) as usize];
            // Roughly 1 in 12 ranges is unreported and 1 in 40 makes is missing,
            // as in the public registration data.
            let electric_range = match rng.below(12) {
                0 => ["0", "", "N/A"][rng.below(3) as usize].to_string(),
                _ => (typical + rng.below(21) as i64 - 10).max(1).to_string(),
            };
            let make = (rng.below(40) != 0).then(|| make.to_string());
            SampleRow {
                make,
                model: model.to_string(),
                vehicle_type: vtype.to_string(),
                electric_range,
            }
        })
        .collect()
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(500, &mut rng);

    // Build Arrow arrays
    let make_array = StringArray::from(rows.iter().map(|r| r.make.as_deref()).collect::<Vec<_>>());
    let model_array = StringArray::from(rows.iter().map(|r| r.model.as_str()).collect::<Vec<_>>());
    let type_array =
        StringArray::from(rows.iter().map(|r| r.vehicle_type.as_str()).collect::<Vec<_>>());
    let range_array =
        StringArray::from(rows.iter().map(|r| r.electric_range.as_str()).collect::<Vec<_>>());

    let schema = Arc::new(Schema::new(vec![
        Field::new("Make", DataType::Utf8, true),
        Field::new("Model", DataType::Utf8, false),
        Field::new("Electric Vehicle Type", DataType::Utf8, false),
        Field::new("Electric Range", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(make_array),
            Arc::new(model_array),
            Arc::new(type_array),
            Arc::new(range_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "ev_sample.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    // Write JSON
    let json_path = "ev_sample.json";
    let json = serde_json::to_string_pretty(&rows).expect("Failed to serialize rows");
    std::fs::write(json_path, json).expect("Failed to write JSON");

    let preview = pretty_format_batches(&[batch.slice(0, 5)]).expect("Failed to format preview");
    println!("{preview}");
    println!("Wrote {} vehicles to {parquet_path} and {json_path}", rows.len());
}
