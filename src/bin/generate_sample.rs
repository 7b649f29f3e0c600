//! Writes `sample_dataset.csv`: a synthetic linguistic + biomarker table with
//! the same shape as the research export (id, transcript, diagnosis labels,
//! `(participant)` feature columns, some gaps and a few non-numeric columns).

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

/// `(column, base, per-severity shift, noise, missing rate)`.
/// Severity is 0 for Normal, 1 for MCI, 2 for Prob AD.
const FEATURES: [(&str, f64, f64, f64, f64); 12] = [
    ("tokens(participant)", 180.0, -35.0, 25.0, 0.0),
    ("uniquetokens(participant)", 95.0, -18.0, 12.0, 0.0),
    ("TTR(participant)", 0.55, -0.04, 0.05, 0.02),
    ("MATTR(participant)", 0.72, -0.05, 0.04, 0.02),
    ("AUX(participant)", 0.08, 0.012, 0.015, 0.05),
    ("VERB(participant)", 0.16, -0.015, 0.02, 0.05),
    ("CCONJ(participant)", 0.05, 0.006, 0.012, 0.05),
    ("NUM(participant)", 0.01, -0.002, 0.006, 0.1),
    ("PROPN(participant)", 0.03, -0.008, 0.01, 0.1),
    ("tTau_AB42Ratio", 0.25, 0.35, 0.12, 0.15),
    ("AB42_AB40Ratio", 0.09, -0.015, 0.01, 0.15),
    ("P_TAU_LUMI", 2.1, 0.9, 0.5, 0.2),
];

const GROUPS: [&str; 3] = ["Normal", "MCI", "Prob AD"];

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_rows = 150;

    let output_path = "sample_dataset.csv";
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut header = vec!["File_ID", "Transcript", "DX1", "DX2", "gender"];
    header.extend(FEATURES.iter().map(|f| f.0));
    // Mostly empty: falls below the numeric coverage threshold.
    header.push("MMSE_followup");
    writer.write_record(&header)?;

    for row in 0..n_rows {
        let severity = row % GROUPS.len();
        // Shared latent factor so features correlate with each other, not only with the label.
        let latent = severity as f64 + rng.gauss(0.0, 0.6);

        let mut record = vec![
            format!("S{row:04}"),
            "the boy is taking a cookie from the jar".to_string(),
            GROUPS[severity].to_string(),
            if severity == 0 { String::new() } else { "amnestic".to_string() },
            if rng.next_f64() < 0.5 { "F" } else { "M" }.to_string(),
        ];

        for &(_, base, shift, noise, missing) in &FEATURES {
            if rng.next_f64() < missing {
                record.push(String::new());
            } else {
                let v = base + shift * latent + rng.gauss(0.0, noise);
                record.push(format!("{v:.5}"));
            }
        }

        record.push(if rng.next_f64() < 0.3 {
            format!("{:.0}", 28.0 - 3.0 * latent + rng.gauss(0.0, 1.5))
        } else {
            String::new()
        });

        writer.write_record(&record)?;
    }
    writer.flush()?;

    println!(
        "Wrote {n_rows} rows ({} feature columns) to {output_path}",
        FEATURES.len()
    );
    Ok(())
}
