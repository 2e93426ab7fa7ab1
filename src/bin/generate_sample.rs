use std::path::Path;

use anyhow::Result;
use rusty_census::data::export::export_csv;
use rusty_census::data::model::{Cell, Dataset, Record};

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

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const SURNAMES: [&str; 8] = [
    "Braund", "Cumings", "Heikkinen", "Futrelle", "Allen", "Moran", "McCarthy", "Palsson",
];
const EMBARKED: [&str; 3] = ["S", "C", "Q"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_passengers = 891;

    let columns: Vec<String> = [
        "PassengerId", "Survived", "Pclass", "Name", "Sex", "Age", "Fare", "Embarked",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    let mut records = Vec::with_capacity(n_passengers);
    for id in 1..=n_passengers {
        let pclass = 1 + (rng.next_u64() % 3) as i64;
        let female = rng.chance(0.35);

        // Survival odds depend on sex and class.
        let odds = (if female { 0.75 } else { 0.2 }) + 0.1 * (2 - pclass) as f64;
        let survived = rng.chance(odds.clamp(0.05, 0.95));

        let age = rng.gauss(30.0, 14.0).clamp(0.42, 80.0);
        let fare = match pclass {
            1 => rng.gauss(84.0, 40.0),
            2 => rng.gauss(21.0, 8.0),
            _ => rng.gauss(13.0, 6.0),
        }
        .max(0.0);

        let title = if female { "Mrs." } else { "Mr." };
        let name = format!("{}, {title} Passenger {id}", rng.pick(&SURNAMES));

        let mut rec = Record::new();
        rec.insert("PassengerId", Cell::Integer(id as i64));
        rec.insert("Survived", Cell::Integer(survived as i64));
        rec.insert("Pclass", Cell::Integer(pclass));
        rec.insert("Name", Cell::String(name));
        rec.insert(
            "Sex",
            Cell::String(if female { "female" } else { "male" }.to_string()),
        );
        // About a fifth of ages and a few ports are unknown.
        rec.insert(
            "Age",
            if rng.chance(0.2) {
                Cell::Null
            } else {
                Cell::Float((age * 10.0).round() / 10.0)
            },
        );
        rec.insert("Fare", Cell::Float((fare * 10000.0).round() / 10000.0));
        rec.insert(
            "Embarked",
            if rng.chance(0.005) {
                Cell::Null
            } else {
                Cell::String(rng.pick(&EMBARKED).to_string())
            },
        );
        records.push(rec);
    }

    let dataset = Dataset::new(columns, records);
    let output_path = Path::new("sample_passengers.csv");
    export_csv(&dataset, output_path)?;

    println!(
        "Wrote {} passengers ({} columns) to {}",
        dataset.len(),
        dataset.columns.len(),
        output_path.display()
    );
    Ok(())
}
