use super::model::Table;

// ---------------------------------------------------------------------------
// Numeric range predicate
// ---------------------------------------------------------------------------

/// Inclusive numeric range with `low <= high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericRange {
    low: f64,
    high: f64,
}

impl NumericRange {
    /// Build a range from two bounds in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Narrow this range so it lies within `outer`.
    pub fn clamp_to(&self, outer: &NumericRange) -> Self {
        let clamp = |v: f64| v.max(outer.low).min(outer.high);
        Self::new(clamp(self.low), clamp(self.high))
    }
}

/// Slider bounds for a column: observed min/max truncated to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: i64,
    pub max: i64,
}

impl RangeBounds {
    pub fn as_range(&self) -> NumericRange {
        NumericRange::new(self.min as f64, self.max as f64)
    }
}

/// Observed bounds of `column`, or `None` when the column is absent or
/// holds no numbers.
pub fn range_bounds(table: &Table, column: &str) -> Option<RangeBounds> {
    let values = table.column(column)?.numeric_values();
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;
    Some(RangeBounds {
        min: min.trunc() as i64,
        max: max.trunc() as i64,
    })
}

/// Return the rows whose `column` value is a number inside `range`.
///
/// Nulls and non-numeric cells never match. `None` when the column is absent,
/// in which case callers show the table unfiltered.
pub fn range_filter(table: &Table, column: &str, range: NumericRange) -> Option<Table> {
    let col = table.column(column)?;
    let indices: Vec<usize> = col
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.as_f64().is_some_and(|x| range.contains(x)))
        .map(|(i, _)| i)
        .collect();
    Some(table.select_rows(&indices))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::{CellValue, Column};

    fn amounts(values: Vec<CellValue>) -> Table {
        let n = values.len();
        Table::new(vec![
            Column::new("LoanAmount", values),
            Column::new("Row", (0..n as i64).map(CellValue::Integer).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn range_constructor_orders_bounds() {
        let r = NumericRange::new(5.0, 1.0);
        assert_eq!((r.low(), r.high()), (1.0, 5.0));
    }

    #[test]
    fn full_range_keeps_every_row() {
        let table = amounts(vec![
            CellValue::Float(100.5),
            CellValue::Integer(150),
            CellValue::Float(200.25),
        ]);
        let filtered = range_filter(&table, "LoanAmount", NumericRange::new(100.5, 200.25)).unwrap();
        assert_eq!(filtered, table);
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = amounts(vec![
            CellValue::Integer(100),
            CellValue::Integer(150),
            CellValue::Integer(200),
        ]);
        let filtered = range_filter(&table, "LoanAmount", NumericRange::new(100.0, 150.0)).unwrap();
        assert_eq!(filtered.len(), 2);
        assert_eq!(
            filtered.column("Row").unwrap().values,
            vec![CellValue::Integer(0), CellValue::Integer(1)]
        );
    }

    #[test]
    fn range_outside_values_is_empty() {
        let table = amounts(vec![CellValue::Integer(100), CellValue::Integer(200)]);
        let filtered = range_filter(&table, "LoanAmount", NumericRange::new(500.0, 900.0)).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.column_names(), table.column_names());
    }

    #[test]
    fn nulls_never_match() {
        let table = amounts(vec![CellValue::Null, CellValue::Integer(10)]);
        let filtered = range_filter(&table, "LoanAmount", NumericRange::new(f64::MIN, f64::MAX)).unwrap();
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn missing_column_skips_filter() {
        let table = amounts(vec![CellValue::Integer(1)]);
        assert!(range_filter(&table, "Income", NumericRange::new(0.0, 1.0)).is_none());
        assert!(range_bounds(&table, "Income").is_none());
    }

    #[test]
    fn bounds_truncate_toward_zero() {
        let table = amounts(vec![
            CellValue::Float(-3.7),
            CellValue::Null,
            CellValue::Float(99.9),
        ]);
        assert_eq!(
            range_bounds(&table, "LoanAmount"),
            Some(RangeBounds { min: -3, max: 99 })
        );
    }

    #[test]
    fn clamp_keeps_selection_inside_bounds() {
        let outer = NumericRange::new(0.0, 10.0);
        let r = NumericRange::new(-5.0, 4.0).clamp_to(&outer);
        assert_eq!((r.low(), r.high()), (0.0, 4.0));
    }
}
