/// Which columns the dashboard looks for and how it lays out results.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Categorical column with the loan decision.
    pub status_column: String,
    /// Numeric column charted as a distribution and used by the range filter.
    pub amount_column: String,
    /// Categorical column the decisions are grouped by.
    pub area_column: String,
    pub histogram_bins: usize,
    /// Points at which the density curve is evaluated.
    pub kde_points: usize,
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            status_column: "Loan_Status".to_string(),
            amount_column: "LoanAmount".to_string(),
            area_column: "Property_Area".to_string(),
            histogram_bins: 30,
            kde_points: 200,
            preview_rows: 5,
        }
    }
}
