use std::path::Path;

use crate::config::DashboardConfig;
use crate::data::filter::NumericRange;
use crate::data::loader::Upload;
use crate::report::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Only the user's inputs live here; the [`Report`] is rebuilt from them
/// after every change.
#[derive(Default)]
pub struct AppState {
    pub config: DashboardConfig,

    /// The current upload (None until the user opens a file).
    pub upload: Option<Upload>,

    /// Range picked with the sliders; None means "whole column".
    pub selection: Option<NumericRange>,

    /// Latest pipeline output.
    pub report: Option<Report>,

    /// Blocking error message shown instead of the report.
    pub status_message: Option<String>,
}

impl AppState {
    /// Replace the upload, reset the range and rebuild.
    pub fn set_upload(&mut self, upload: Upload) {
        self.upload = Some(upload);
        self.selection = None;
        self.rebuild();
        if let Some(report) = &self.report {
            log::info!(
                "Loaded {} rows with columns {:?}",
                report.table.len(),
                report.table.column_names()
            );
        }
    }

    /// Read a file from disk and use it as the new upload.
    pub fn open_path(&mut self, path: &Path) {
        match Upload::from_path(path) {
            Ok(upload) => self.set_upload(upload),
            Err(e) => {
                log::error!("Failed to read {}: {e}", path.display());
                self.report = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Store a new slider selection and rebuild.
    pub fn set_selection(&mut self, range: NumericRange) {
        self.selection = Some(range);
        self.rebuild();
    }

    /// Re-run the whole pipeline from the current inputs.
    pub fn rebuild(&mut self) {
        let Some(upload) = &self.upload else {
            return;
        };
        match Report::build(upload, self.selection, &self.config) {
            Ok(report) => {
                log::debug!("Rebuilt report, {} rows shown", report.filtered.len());
                self.report = Some(report);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", upload.file_name);
                self.report = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOANS: &[u8] = b"Loan_Status,LoanAmount\nY,100\nN,150\nY,200\n";

    #[test]
    fn slider_change_refilters() {
        let mut state = AppState::default();
        state.set_upload(Upload::new("loans.csv", LOANS.to_vec()));
        assert_eq!(state.report.as_ref().unwrap().filtered.len(), 3);

        state.set_selection(NumericRange::new(140.0, 200.0));
        assert_eq!(state.report.as_ref().unwrap().filtered.len(), 2);
    }

    #[test]
    fn slider_change_keeps_upload() {
        let mut state = AppState::default();
        state.set_upload(Upload::new("loans.csv", LOANS.to_vec()));
        state.set_selection(NumericRange::new(100.0, 100.0));
        state.set_selection(NumericRange::new(100.0, 150.0));

        let report = state.report.as_ref().unwrap();
        assert_eq!(report.table.len(), 3);
        assert_eq!(report.filtered.len(), 2);
        assert_eq!(state.upload.as_ref().unwrap().file_name, "loans.csv");
        assert!(state.status_message.is_none());
    }

    #[test]
    fn new_upload_resets_selection() {
        let mut state = AppState::default();
        state.set_upload(Upload::new("loans.csv", LOANS.to_vec()));
        state.set_selection(NumericRange::new(140.0, 150.0));
        state.set_upload(Upload::new("loans.csv", LOANS.to_vec()));
        assert!(state.selection.is_none());
        assert_eq!(state.report.as_ref().unwrap().filtered.len(), 3);
    }

    #[test]
    fn bad_upload_replaces_report_with_message() {
        let mut state = AppState::default();
        state.set_upload(Upload::new("loans.csv", LOANS.to_vec()));
        state.set_upload(Upload::new("loans.txt", LOANS.to_vec()));
        assert!(state.report.is_none());
        assert!(state
            .status_message
            .as_deref()
            .is_some_and(|m| m.starts_with("Error: unsupported file type")));
    }

    #[test]
    fn unreadable_path_reports_error() {
        let mut state = AppState::default();
        state.open_path(Path::new("/definitely/not/here.csv"));
        assert!(state.status_message.is_some());
    }
}
