use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::{CellValue, Table};
use crate::data::summary::{ColumnStats, Summary};

const ROW_HEIGHT: f32 = 18.0;

// ---------------------------------------------------------------------------
// Row table (preview and filtered view)
// ---------------------------------------------------------------------------

/// Render `table` with a leading row-number column.
pub fn data_table(ui: &mut Ui, id: &str, table: &Table, max_height: f32) {
    egui::ScrollArea::horizontal()
        .id_salt(id)
        .show(ui, |ui: &mut Ui| {
            ui.push_id(id, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .max_scroll_height(max_height)
                    .column(TableColumn::auto())
                    .columns(TableColumn::auto().at_least(60.0), table.n_columns())
                    .header(ROW_HEIGHT + 2.0, |mut header| {
                        header.col(|ui| {
                            ui.strong("#");
                        });
                        for name in table.column_names() {
                            header.col(|ui| {
                                ui.strong(name);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, table.len(), |mut row| {
                            let idx = row.index();
                            row.col(|ui| {
                                ui.weak(idx.to_string());
                            });
                            for col in 0..table.n_columns() {
                                row.col(|ui| {
                                    ui.label(cell_text(table.cell(idx, col)));
                                });
                            }
                        });
                    });
            });
        });
}

fn cell_text(value: Option<&CellValue>) -> String {
    match value {
        Some(CellValue::Null) | None => "NaN".to_string(),
        Some(v) => v.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Summary statistics (statistic rows × numeric columns)
// ---------------------------------------------------------------------------

pub fn summary_table(ui: &mut Ui, summary: &Summary) {
    if summary.is_empty() {
        ui.label("No numeric columns to describe.");
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("summary_scroll")
        .show(ui, |ui: &mut Ui| {
            ui.push_id("summary_table", |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .column(TableColumn::auto())
                    .columns(TableColumn::auto().at_least(80.0), summary.len())
                    .header(ROW_HEIGHT + 2.0, |mut header| {
                        header.col(|_ui| {});
                        for stats in summary {
                            header.col(|ui| {
                                ui.strong(stats.column.as_str());
                            });
                        }
                    })
                    .body(|mut body| {
                        for (i, label) in ColumnStats::LABELS.iter().enumerate() {
                            body.row(ROW_HEIGHT, |mut row| {
                                row.col(|ui| {
                                    ui.strong(*label);
                                });
                                for stats in summary {
                                    row.col(|ui| {
                                        ui.label(format_stat(stats.values()[i]));
                                    });
                                }
                            });
                        }
                    });
            });
        });
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.6}"),
        None => "NaN".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nulls_display_like_pandas() {
        assert_eq!(cell_text(Some(&CellValue::Null)), "NaN");
        assert_eq!(cell_text(Some(&CellValue::Integer(3))), "3");
        assert_eq!(format_stat(None), "NaN");
        assert_eq!(format_stat(Some(1.5)), "1.500000");
    }
}
