use super::model::Table;

// ---------------------------------------------------------------------------
// Descriptive statistics (Pandas `describe()`)
// ---------------------------------------------------------------------------

/// Statistics for one numeric column. Everything but `count` is undefined
/// for a column without values.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; undefined below two values.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnStats {
    /// Row labels in display order, paired with [`ColumnStats::values`].
    pub const LABELS: [&'static str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    pub fn values(&self) -> [Option<f64>; 8] {
        [
            Some(self.count as f64),
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Statistics for every numeric column, in table order.
pub type Summary = Vec<ColumnStats>;

/// Describe all numeric columns of `table`; other columns are skipped.
///
/// A column holding only nulls counts as numeric with a count of 0, as
/// long as the table has rows. A table without rows describes nothing.
pub fn describe(table: &Table) -> Summary {
    if table.is_empty() {
        return Summary::new();
    }
    table
        .columns()
        .iter()
        .filter(|c| c.is_numeric() || c.is_all_null())
        .map(|c| column_stats(&c.name, c.numeric_values()))
        .collect()
}

fn column_stats(name: &str, mut values: Vec<f64>) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats {
            column: name.to_string(),
            count: 0,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }
    values.sort_by(f64::total_cmp);

    let n = values.len();
    let mean = values.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });

    ColumnStats {
        column: name.to_string(),
        count: n,
        mean: Some(mean),
        std,
        min: Some(values[0]),
        q25: Some(quantile(&values, 0.25)),
        median: Some(quantile(&values, 0.5)),
        q75: Some(quantile(&values, 0.75)),
        max: Some(values[n - 1]),
    }
}

/// Linear-interpolated quantile of sorted, non-empty `sorted`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{CellValue, Column};

    fn loans() -> Table {
        Table::new(vec![
            Column::new(
                "Loan_Status",
                ["Y", "N", "Y"].iter().map(|s| CellValue::String(s.to_string())).collect(),
            ),
            Column::new(
                "LoanAmount",
                vec![CellValue::Integer(100), CellValue::Integer(150), CellValue::Integer(200)],
            ),
            Column::new(
                "Credit_History",
                vec![CellValue::Float(1.0), CellValue::Null, CellValue::Float(0.0)],
            ),
            Column::new(
                "Self_Employed",
                vec![CellValue::Bool(true), CellValue::Bool(false), CellValue::Null],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn one_entry_per_numeric_column() {
        let summary = describe(&loans());
        let names: Vec<&str> = summary.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, vec!["LoanAmount", "Credit_History"]);
    }

    #[test]
    fn loan_amount_statistics() {
        let summary = describe(&loans());
        assert_eq!(
            summary[0],
            ColumnStats {
                column: "LoanAmount".into(),
                count: 3,
                mean: Some(150.0),
                std: Some(50.0),
                min: Some(100.0),
                q25: Some(125.0),
                median: Some(150.0),
                q75: Some(175.0),
                max: Some(200.0),
            }
        );
    }

    #[test]
    fn nulls_are_not_counted() {
        let summary = describe(&loans());
        assert_eq!(summary[1].count, 2);
        assert_eq!(summary[1].mean, Some(0.5));
    }

    #[test]
    fn single_value_has_no_std() {
        let table = Table::new(vec![Column::new("x", vec![CellValue::Float(4.0)])]).unwrap();
        let summary = describe(&table);
        assert_eq!(summary[0].std, None);
        assert_eq!(summary[0].median, Some(4.0));
    }

    #[test]
    fn all_null_column_is_described_with_zero_count() {
        let table = Table::from_rows(
            vec!["LoanAmount".into(), "Dependents".into()],
            vec![
                vec![CellValue::Integer(100), CellValue::Null],
                vec![CellValue::Integer(150), CellValue::Null],
            ],
        );
        let summary = describe(&table);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[1].column, "Dependents");
        assert_eq!(summary[1].count, 0);
        assert_eq!(summary[1].values()[1..], [None::<f64>; 7]);
    }

    #[test]
    fn empty_table_gives_empty_summary() {
        assert!(describe(&Table::default()).is_empty());

        let header_only = Table::from_rows(vec!["LoanAmount".into()], Vec::new());
        assert!(describe(&header_only).is_empty());
    }
}
