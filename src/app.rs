use eframe::egui;

use crate::data::loader::Upload;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct LoanDashboardApp {
    pub state: AppState,
}

impl LoanDashboardApp {
    /// Treat a file dropped onto the window as an upload.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
        let Some(file) = dropped else {
            return;
        };

        if let Some(bytes) = file.bytes {
            self.state.set_upload(Upload::new(file.name, bytes.to_vec()));
        } else if let Some(path) = file.path {
            self.state.open_path(&path);
        }
    }
}

impl eframe::App for LoanDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::report_view(ui, &mut self.state);
        });
    }
}
