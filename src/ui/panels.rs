use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::ColorMap;
use crate::data::filter::NumericRange;
use crate::report::{RangeControl, Report};
use crate::state::AppState;
use crate::ui::{plot, table};

const PREVIEW_HEIGHT: f32 = 160.0;
const FILTERED_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Central panel – the report, top to bottom
// ---------------------------------------------------------------------------

/// Render the dashboard for the current upload.
pub fn report_view(ui: &mut Ui, state: &mut AppState) {
    if let Some(msg) = &state.status_message {
        let color = ui.visuals().error_fg_color;
        ui.colored_label(color, msg);
        return;
    }

    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV or Excel file to analyze loan data  (File → Open… or drop it here)");
        });
        return;
    };

    let mut new_selection = None;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.colored_label(Color32::from_rgb(80, 200, 120), "File uploaded successfully!");
            ui.separator();

            ui.heading("📋 Data Preview");
            table::data_table(ui, "preview", &report.preview, PREVIEW_HEIGHT);
            ui.separator();

            ui.heading("📈 Summary Statistics");
            table::summary_table(ui, &report.summary);
            ui.separator();

            charts(ui, report);

            ui.heading("🔍 Filter Data");
            if let Some(range) = report.range {
                new_selection = range_sliders(ui, &state.config.amount_column, range);
            }
            ui.label(format!(
                "{} of {} rows",
                report.filtered.len(),
                report.table.len()
            ));
            table::data_table(ui, "filtered", &report.filtered, FILTERED_HEIGHT);
            ui.separator();

            ui.colored_label(Color32::from_rgb(80, 200, 120), "Analysis complete!");
        });

    if let Some(range) = new_selection {
        state.set_selection(range);
    }
}

fn charts(ui: &mut Ui, report: &Report) {
    // One colour per status, shared by both charts that show statuses.
    let statuses = match (report.status_chart.rendered(), report.area_chart.rendered()) {
        (Some(counts), _) => counts.counts.iter().map(|(v, _)| v).collect::<Vec<_>>(),
        (None, Some(tab)) => tab.hues.iter().collect(),
        (None, None) => Vec::new(),
    };
    let colors = ColorMap::new(statuses);

    plot::chart_section(ui, "📊 Loan Status Distribution", &report.status_chart, |ui, chart| {
        plot::category_chart(ui, chart, &colors)
    });
    ui.separator();

    plot::chart_section(ui, "💰 Loan Amount Distribution", &report.amount_chart, |ui, chart| {
        plot::distribution_chart(ui, chart)
    });
    ui.separator();

    plot::chart_section(ui, "🏡 Loan Approval by Property Area", &report.area_chart, |ui, chart| {
        plot::grouped_chart(ui, chart, &colors)
    });
    ui.separator();
}

/// Two integer sliders over the column bounds; returns the new range when
/// either moved.
fn range_sliders(ui: &mut Ui, column: &str, range: RangeControl) -> Option<NumericRange> {
    let bounds = range.bounds.min as f64..=range.bounds.max as f64;
    let mut low = range.selected.low();
    let mut high = range.selected.high();

    ui.label(format!("Select {column} range"));
    let low_changed = ui
        .add(egui::Slider::new(&mut low, bounds.clone()).integer().text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, bounds).integer().text("to"))
        .changed();

    (low_changed || high_changed).then(|| NumericRange::new(low, high))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(report) = &state.report {
            ui.label(format!(
                "{}: {} rows × {} columns, {} shown",
                report.file_name,
                report.table.len(),
                report.table.n_columns(),
                report.filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload loan data")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "xlsb", "xls", "ods", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
