use std::time::Instant;

use crate::config::DashboardConfig;
use crate::data::charts::{
    amount_distribution, category_counts, status_by_area, CategoryCounts, ChartSection, CrossTab,
    Histogram,
};
use crate::data::filter::{range_bounds, range_filter, NumericRange, RangeBounds};
use crate::data::loader::{LoadError, Upload};
use crate::data::model::Table;
use crate::data::summary::{describe, Summary};

// ---------------------------------------------------------------------------
// Report – everything the dashboard shows for one upload
// ---------------------------------------------------------------------------

/// Range control seeded from the amount column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeControl {
    pub bounds: RangeBounds,
    pub selected: NumericRange,
}

/// The full display bundle, rebuilt from scratch on every interaction.
#[derive(Debug, Clone)]
pub struct Report {
    pub file_name: String,
    pub table: Table,
    pub preview: Table,
    pub summary: Summary,
    pub status_chart: ChartSection<CategoryCounts>,
    pub amount_chart: ChartSection<Histogram>,
    pub area_chart: ChartSection<CrossTab>,
    /// `None` when the amount column is absent or has no numbers.
    pub range: Option<RangeControl>,
    /// Rows inside the selected range, or the whole table without a range.
    pub filtered: Table,
}

impl Report {
    /// Run the whole pipeline: decode, preview, describe, chart, filter.
    ///
    /// `selection` is the user's current range; it is clamped into the
    /// column's bounds, and the bounds themselves are used when it is `None`.
    pub fn build(
        upload: &Upload,
        selection: Option<NumericRange>,
        config: &DashboardConfig,
    ) -> Result<Report, LoadError> {
        let started = Instant::now();
        let table = upload.load()?;

        let preview = table.head(config.preview_rows);
        let summary = describe(&table);

        let status_chart = category_counts(&table, &config.status_column);
        let amount_chart = amount_distribution(
            &table,
            &config.amount_column,
            config.histogram_bins,
            config.kde_points,
        );
        let area_chart = status_by_area(&table, &config.status_column, &config.area_column);
        for warning in [status_chart.warning(), amount_chart.warning(), area_chart.warning()]
            .into_iter()
            .flatten()
        {
            log::warn!("{}: {warning}", upload.file_name);
        }

        let range = range_bounds(&table, &config.amount_column).map(|bounds| {
            let outer = bounds.as_range();
            let selected = selection.map_or(outer, |r| r.clamp_to(&outer));
            RangeControl { bounds, selected }
        });
        let filtered = range
            .and_then(|r| range_filter(&table, &config.amount_column, r.selected))
            .unwrap_or_else(|| table.clone());

        log::debug!(
            "rebuilt report for {} ({} rows, {} after filter) in {:?}",
            upload.file_name,
            table.len(),
            filtered.len(),
            started.elapsed()
        );

        Ok(Report {
            file_name: upload.file_name.clone(),
            table,
            preview,
            summary,
            status_chart,
            amount_chart,
            area_chart,
            range,
            filtered,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::CellValue;

    const THREE_LOANS: &str = "\
Loan_Status,LoanAmount,Property_Area
Y,100,Urban
N,150,Rural
Y,200,Urban
";

    fn build(csv: &str, selection: Option<NumericRange>) -> Report {
        let upload = Upload::new("loans.csv", csv.as_bytes().to_vec());
        Report::build(&upload, selection, &DashboardConfig::default()).unwrap()
    }

    #[test]
    fn three_loan_scenario() {
        let report = build(THREE_LOANS, Some(NumericRange::new(100.0, 150.0)));

        let amount = report
            .summary
            .iter()
            .find(|s| s.column == "LoanAmount")
            .unwrap();
        assert_eq!(amount.count, 3);

        let status = report.status_chart.rendered().unwrap();
        assert_eq!(status.counts.len(), 2);
        assert!(report.area_chart.rendered().is_some());
        assert!(report.amount_chart.rendered().is_some());

        assert_eq!(report.filtered.len(), 2);
        assert_eq!(
            report.filtered.column("LoanAmount").unwrap().values,
            vec![CellValue::Integer(100), CellValue::Integer(150)]
        );
    }

    #[test]
    fn default_selection_is_full_bounds() {
        let report = build(THREE_LOANS, None);
        let range = report.range.unwrap();
        assert_eq!(range.bounds, RangeBounds { min: 100, max: 200 });
        assert_eq!(range.selected, NumericRange::new(100.0, 200.0));
        assert_eq!(report.filtered, report.table);
    }

    #[test]
    fn selection_is_clamped_to_bounds() {
        let report = build(THREE_LOANS, Some(NumericRange::new(0.0, 170.0)));
        assert_eq!(report.range.unwrap().selected, NumericRange::new(100.0, 170.0));
        assert_eq!(report.filtered.len(), 2);
    }

    #[test]
    fn missing_status_does_not_stop_other_sections() {
        let report = build("LoanAmount,Property_Area\n100,Urban\n250,Rural\n", None);
        assert_eq!(
            report.status_chart.warning(),
            Some("Column 'Loan_Status' not found in dataset.")
        );
        assert_eq!(
            report.area_chart.warning(),
            Some("Columns 'Property_Area' or 'Loan_Status' not found in dataset.")
        );
        assert!(report.amount_chart.rendered().is_some());
        assert!(report.range.is_some());
    }

    #[test]
    fn missing_amount_shows_full_table_without_range() {
        let report = build("Loan_Status,Property_Area\nY,Urban\nN,Rural\n", None);
        assert!(report.range.is_none());
        assert!(report.amount_chart.warning().is_some());
        assert_eq!(report.filtered.len(), 2);
    }

    #[test]
    fn empty_dataset_degrades() {
        let report = build("Loan_Status,LoanAmount,Property_Area\n", None);
        assert!(report.preview.is_empty());
        assert!(report.summary.is_empty());
        assert_eq!(report.status_chart.rendered().unwrap().counts.len(), 0);
        assert!(report.amount_chart.rendered().unwrap().bins.is_empty());
        assert!(report.area_chart.rendered().unwrap().groups.is_empty());
        assert!(report.range.is_none());
        assert!(report.filtered.is_empty());
    }

    #[test]
    fn preview_is_first_rows() {
        let csv: String = std::iter::once("LoanAmount\n".to_string())
            .chain((0..12).map(|i| format!("{i}\n")))
            .collect();
        let report = build(&csv, None);
        assert_eq!(report.preview.len(), 5);
        assert_eq!(report.table.len(), 12);
    }

    #[test]
    fn decode_failure_is_an_error() {
        let upload = Upload::new("loans.csv", b"a,b\n1,2,3\n".to_vec());
        assert!(Report::build(&upload, None, &DashboardConfig::default()).is_err());
    }
}
