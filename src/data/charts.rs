use std::collections::{BTreeMap, BTreeSet};

use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Section outcome
// ---------------------------------------------------------------------------

/// Outcome of one chart section: the chart data, or why it was left out.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartSection<T> {
    Rendered(T),
    Skipped(String),
}

impl<T> ChartSection<T> {
    pub fn rendered(&self) -> Option<&T> {
        match self {
            ChartSection::Rendered(chart) => Some(chart),
            ChartSection::Skipped(_) => None,
        }
    }

    pub fn warning(&self) -> Option<&str> {
        match self {
            ChartSection::Rendered(_) => None,
            ChartSection::Skipped(reason) => Some(reason),
        }
    }
}

fn missing_column(name: &str) -> String {
    format!("Column '{name}' not found in dataset.")
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// Row count per distinct value of a categorical column, ordered by value.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCounts {
    pub column: String,
    pub counts: Vec<(CellValue, usize)>,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Count rows per non-null value of `column`.
pub fn category_counts(table: &Table, column: &str) -> ChartSection<CategoryCounts> {
    let Some(col) = table.column(column) else {
        return ChartSection::Skipped(missing_column(column));
    };

    let mut counts: BTreeMap<CellValue, usize> = BTreeMap::new();
    for v in col.values.iter().filter(|v| !v.is_null()) {
        *counts.entry(v.clone()).or_default() += 1;
    }

    ChartSection::Rendered(CategoryCounts {
        column: column.to_string(),
        counts: counts.into_iter().collect(),
    })
}

// ---------------------------------------------------------------------------
// Histogram with density overlay
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram plus a Gaussian KDE scaled to bin counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
    /// `[x, y]` points of the smoothed density; empty when undefined.
    pub density: Vec<[f64; 2]>,
}

/// Histogram of the non-null values of `column`.
pub fn amount_distribution(
    table: &Table,
    column: &str,
    n_bins: usize,
    kde_points: usize,
) -> ChartSection<Histogram> {
    let Some(col) = table.column(column) else {
        return ChartSection::Skipped(missing_column(column));
    };
    if col.values.iter().any(|v| !v.is_null() && v.as_f64().is_none()) {
        return ChartSection::Skipped(format!("Column '{column}' is not numeric."));
    }

    let values = col.numeric_values();
    let bins = histogram_bins(&values, n_bins);
    let bin_width = bins.first().map(HistogramBin::width).unwrap_or(0.0);
    let density = gaussian_kde(&values, kde_points)
        .into_iter()
        .map(|[x, d]| [x, d * values.len() as f64 * bin_width])
        .collect();

    ChartSection::Rendered(Histogram {
        column: column.to_string(),
        bins,
        density,
    })
}

/// Bucket `values` into `n_bins` equal-width bins over `[min, max]`.
/// The last bin is closed on the right. A single distinct value spans
/// `[v - 0.5, v + 0.5]`.
fn histogram_bins(values: &[f64], n_bins: usize) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };
    if n_bins == 0 {
        return Vec::new();
    }
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / n_bins as f64;

    let mut bins: Vec<HistogramBin> = (0..n_bins)
        .map(|i| HistogramBin {
            start: lo + width * i as f64,
            end: if i + 1 == n_bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

/// Gaussian kernel density estimate with Scott's bandwidth, evaluated on
/// `points` evenly spaced positions across the data range.
fn gaussian_kde(values: &[f64], points: usize) -> Vec<[f64; 2]> {
    let n = values.len();
    if n < 2 || points < 2 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    if var <= 0.0 {
        return Vec::new();
    }

    let bandwidth = (n as f64).powf(-0.2) * var.sqrt();
    let norm = 1.0 / (n as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (max - min) / (points - 1) as f64;

    (0..points)
        .map(|i| {
            let x = min + step * i as f64;
            let sum: f64 = values
                .iter()
                .map(|&xi| (-0.5 * ((x - xi) / bandwidth).powi(2)).exp())
                .sum();
            [x, sum * norm]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped comparison
// ---------------------------------------------------------------------------

/// Counts of `status` values within each `group` value.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub group_column: String,
    pub hue_column: String,
    pub groups: Vec<CellValue>,
    pub hues: Vec<CellValue>,
    /// `counts[g][h]` rows with `groups[g]` and `hues[h]`.
    pub counts: Vec<Vec<usize>>,
}

/// Cross-tabulate `status_col` against `area_col`; rows with a null in
/// either column are left out. Both columns must exist.
pub fn status_by_area(table: &Table, status_col: &str, area_col: &str) -> ChartSection<CrossTab> {
    let (Some(status), Some(area)) = (table.column(status_col), table.column(area_col)) else {
        return ChartSection::Skipped(format!(
            "Columns '{area_col}' or '{status_col}' not found in dataset."
        ));
    };

    let pairs: Vec<(&CellValue, &CellValue)> = area
        .values
        .iter()
        .zip(status.values.iter())
        .filter(|(a, s)| !a.is_null() && !s.is_null())
        .collect();

    let groups: Vec<CellValue> = pairs
        .iter()
        .map(|(a, _)| (*a).clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let hues: Vec<CellValue> = pairs
        .iter()
        .map(|(_, s)| (*s).clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut counts = vec![vec![0usize; hues.len()]; groups.len()];
    for &(a, s) in &pairs {
        if let (Ok(g), Ok(h)) = (groups.binary_search(a), hues.binary_search(s)) {
            counts[g][h] += 1;
        }
    }

    ChartSection::Rendered(CrossTab {
        group_column: area_col.to_string(),
        hue_column: status_col.to_string(),
        groups,
        hues,
        counts,
    })
}
