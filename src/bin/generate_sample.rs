use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One synthetic loan application.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LoanRecord {
    #[serde(rename = "Loan_ID")]
    loan_id: String,
    gender: &'static str,
    applicant_income: i64,
    #[serde(rename = "LoanAmount")]
    loan_amount: Option<f64>,
    #[serde(rename = "Loan_Amount_Term")]
    loan_amount_term: i64,
    #[serde(rename = "Credit_History")]
    credit_history: Option<f64>,
    #[serde(rename = "Property_Area")]
    property_area: &'static str,
    #[serde(rename = "Loan_Status")]
    loan_status: &'static str,
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

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn generate_loans(n: usize, rng: &mut SimpleRng) -> Vec<LoanRecord> {
    let areas = ["Urban", "Semiurban", "Rural"];
    let terms = [120, 180, 240, 360];

    (0..n)
        .map(|i| {
            let income = rng.gauss(5400.0, 2500.0).max(150.0).round() as i64;
            // Amounts are in thousands and loosely follow income; ~3% are missing.
            let loan_amount = (!rng.chance(0.03))
                .then(|| (income as f64 / 40.0 + rng.gauss(0.0, 30.0)).clamp(9.0, 700.0).round());
            let credit_history = (!rng.chance(0.08)).then(|| if rng.chance(0.85) { 1.0 } else { 0.0 });
            let property_area = rng.pick(&areas);

            let mut approve_p = match credit_history {
                Some(h) if h == 0.0 => 0.1,
                _ => 0.75,
            };
            if property_area == "Semiurban" {
                approve_p += 0.08;
            }

            LoanRecord {
                loan_id: format!("LP{:06}", 1000 + i),
                gender: rng.pick(&["Male", "Male", "Male", "Female"]),
                applicant_income: income,
                loan_amount,
                loan_amount_term: rng.pick(&terms),
                credit_history,
                property_area,
                loan_status: if rng.chance(approve_p) { "Y" } else { "N" },
            }
        })
        .collect()
}

fn write_csv(path: &str, loans: &[LoanRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for loan in loans {
        writer.serialize(loan).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, loans: &[LoanRecord]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Loan_ID", DataType::Utf8, false),
        Field::new("Gender", DataType::Utf8, false),
        Field::new("ApplicantIncome", DataType::Int64, false),
        Field::new("LoanAmount", DataType::Float64, true),
        Field::new("Loan_Amount_Term", DataType::Int64, false),
        Field::new("Credit_History", DataType::Float64, true),
        Field::new("Property_Area", DataType::Utf8, false),
        Field::new("Loan_Status", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.loan_id.as_str()))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.gender))),
            Arc::new(Int64Array::from_iter_values(loans.iter().map(|l| l.applicant_income))),
            Arc::new(Float64Array::from_iter(loans.iter().map(|l| l.loan_amount))),
            Arc::new(Int64Array::from_iter_values(loans.iter().map(|l| l.loan_amount_term))),
            Arc::new(Float64Array::from_iter(loans.iter().map(|l| l.credit_history))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.property_area))),
            Arc::new(StringArray::from_iter_values(loans.iter().map(|l| l.loan_status))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let loans = generate_loans(614, &mut rng);

    write_csv("sample_loans.csv", &loans)?;
    write_parquet("sample_loans.parquet", &loans)?;

    println!(
        "Wrote {} loans to sample_loans.csv and sample_loans.parquet",
        loans.len()
    );
    Ok(())
}
