use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Spreadsheet date cell kept as text for simplicity.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeMap keys --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{d}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`; only integers and floats qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// A float cell; NaN is a missing value.
    pub fn float(v: f64) -> Self {
        if v.is_nan() {
            CellValue::Null
        } else {
            CellValue::Float(v)
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column is numeric when it holds at least one non-null value and
    /// every non-null value is an integer or a float.
    pub fn is_numeric(&self) -> bool {
        let mut seen = false;
        for v in &self.values {
            match v {
                CellValue::Null => {}
                CellValue::Integer(_) | CellValue::Float(_) => seen = true,
                _ => return false,
            }
        }
        seen
    }

    /// Whether every cell is null.
    pub fn is_all_null(&self) -> bool {
        self.values.iter().all(CellValue::is_null)
    }

    /// Turn integers into floats when the column also holds floats, so that
    /// `1` and `1.0` are the same value.
    fn promote_mixed_numeric(&mut self) {
        let has_float = self.values.iter().any(|v| matches!(v, CellValue::Float(_)));
        let has_int = self.values.iter().any(|v| matches!(v, CellValue::Integer(_)));
        if !(has_float && has_int) {
            return;
        }
        for v in &mut self.values {
            if let CellValue::Integer(i) = *v {
                *v = CellValue::Float(i as f64);
            }
        }
    }

    /// Non-null numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TableError {
    #[error("column '{name}' has {actual} values, expected {expected}")]
    RaggedColumn {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// An ordered set of equally long, uniquely named columns.
///
/// Tables are never mutated once built; [`Table::head`] and
/// [`Table::select_rows`] derive new tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns, de-duplicating repeated names
    /// (`a`, `a` → `a`, `a.1`) and checking that all lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map(|c| c.values.len()).unwrap_or(0);
        if let Some(bad) = columns.iter().find(|c| c.values.len() != n_rows) {
            return Err(TableError::RaggedColumn {
                name: bad.name.clone(),
                expected: n_rows,
                actual: bad.values.len(),
            });
        }

        let mut seen: BTreeMap<String, usize> = BTreeMap::new();
        let columns = columns
            .into_iter()
            .map(|mut col| {
                let mut name = col.name.clone();
                while let Some(n) = seen.get_mut(&name) {
                    *n += 1;
                    name = format!("{}.{}", col.name, n);
                }
                seen.insert(name.clone(), 0);
                col.name = name;
                col
            })
            .collect();

        Ok(Table { columns, n_rows })
    }

    /// Build a table from a header and row-major records. Short rows are
    /// padded with nulls, long rows are truncated to the header width.
    /// Columns mixing integers and floats become float columns.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::with_capacity(rows.len())))
            .collect();
        for row in rows {
            let mut cells = row.into_iter();
            for col in &mut columns {
                col.values.push(cells.next().unwrap_or(CellValue::Null));
            }
        }
        for col in &mut columns {
            col.promote_mixed_numeric();
        }
        // Equal lengths hold by construction.
        Table::new(columns).unwrap_or_default()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name; absence is a normal outcome.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.columns.get(col)?.values.get(row)
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        let n = n.min(self.n_rows);
        self.select_rows(&(0..n).collect::<Vec<_>>())
    }

    /// Copy the given rows (in the given order) into a new table.
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = indices
                    .iter()
                    .filter_map(|&i| c.values.get(i).cloned())
                    .collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        Table {
            columns,
            n_rows: indices.iter().filter(|&&i| i < self.n_rows).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> CellValue {
        CellValue::String(v.to_string())
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = Table::new(vec![
            Column::new("a", vec![CellValue::Integer(1), CellValue::Integer(2)]),
            Column::new("b", vec![CellValue::Integer(1)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedColumn {
                name: "b".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn deduplicates_column_names() {
        let table = Table::new(vec![
            Column::new("a", vec![]),
            Column::new("a", vec![]),
            Column::new("a", vec![]),
        ])
        .unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "a.2"]);
    }

    #[test]
    fn from_rows_pads_short_records() {
        let table = Table::from_rows(
            vec!["x".into(), "y".into()],
            vec![vec![s("1")], vec![s("2"), s("3"), s("extra")]],
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 1), Some(&CellValue::Null));
        assert_eq!(table.cell(1, 1), Some(&s("3")));
    }

    #[test]
    fn head_and_select_rows_copy() {
        let table = Table::from_rows(
            vec!["n".into()],
            (0..10).map(|i| vec![CellValue::Integer(i)]).collect(),
        );
        let head = table.head(5);
        assert_eq!(head.len(), 5);
        assert_eq!(table.len(), 10);
        assert_eq!(table.head(50).len(), 10);

        let picked = table.select_rows(&[7, 2]);
        assert_eq!(picked.cell(0, 0), Some(&CellValue::Integer(7)));
        assert_eq!(picked.cell(1, 0), Some(&CellValue::Integer(2)));
    }

    #[test]
    fn mixed_integer_and_float_columns_become_floats() {
        let table = Table::from_rows(
            vec!["term".into(), "id".into()],
            vec![
                vec![CellValue::Integer(1), CellValue::Integer(7)],
                vec![CellValue::Float(1.0), CellValue::Integer(8)],
                vec![CellValue::Null, s("x")],
            ],
        );
        assert_eq!(
            table.column("term").unwrap().values,
            vec![CellValue::Float(1.0), CellValue::Float(1.0), CellValue::Null]
        );
        assert_eq!(table.cell(0, 1), Some(&CellValue::Integer(7)));
    }

    #[test]
    fn nan_floats_are_missing() {
        assert_eq!(CellValue::float(f64::NAN), CellValue::Null);
        assert_eq!(CellValue::float(2.5), CellValue::Float(2.5));
    }

    #[test]
    fn numeric_columns_need_a_number() {
        assert!(Column::new("a", vec![CellValue::Null, CellValue::Float(1.5)]).is_numeric());
        assert!(!Column::new("a", vec![CellValue::Null]).is_numeric());
        assert!(!Column::new("a", vec![CellValue::Integer(1), s("x")]).is_numeric());
        assert!(!Column::new("a", vec![CellValue::Bool(true)]).is_numeric());
    }
}
