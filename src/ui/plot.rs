use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::charts::{CategoryCounts, ChartSection, CrossTab, Histogram};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart sections (central panel)
// ---------------------------------------------------------------------------

/// Draw a chart section: the chart when rendered, a warning when skipped.
pub fn chart_section<T>(
    ui: &mut Ui,
    title: &str,
    section: &ChartSection<T>,
    draw: impl FnOnce(&mut Ui, &T),
) {
    match section {
        ChartSection::Rendered(chart) => {
            ui.heading(title);
            draw(ui, chart);
        }
        ChartSection::Skipped(reason) => {
            let color = ui.visuals().warn_fg_color;
            ui.colored_label(color, format!("⚠ {reason}"));
        }
    }
}

/// Bar per category, one colour per category.
pub fn category_chart(ui: &mut Ui, chart: &CategoryCounts, colors: &ColorMap) {
    let labels: Vec<String> = chart.counts.iter().map(|(v, _)| v.to_string()).collect();
    let bars: Vec<Bar> = chart
        .counts
        .iter()
        .enumerate()
        .map(|(i, (value, count))| {
            Bar::new(i as f64, *count as f64)
                .width(0.7)
                .name(value.to_string())
                .fill(colors.color_for(value))
        })
        .collect();

    Plot::new(format!("counts_{}", chart.column))
        .height(CHART_HEIGHT)
        .x_axis_label(chart.column.clone())
        .y_axis_label(format!("count (n = {})", chart.total()))
        .x_axis_formatter(category_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Histogram bars with the density curve on top.
pub fn distribution_chart(ui: &mut Ui, chart: &Histogram) {
    let bars: Vec<Bar> = chart
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(Color32::LIGHT_BLUE.gamma_multiply(0.6))
        })
        .collect();

    Plot::new(format!("distribution_{}", chart.column))
        .height(CHART_HEIGHT)
        .x_axis_label(chart.column.clone())
        .y_axis_label("count")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
            if !chart.density.is_empty() {
                let points: PlotPoints = chart.density.iter().copied().collect();
                plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(2.0));
            }
        });
}

/// One bar group per group value, one dodged bar per hue within it.
pub fn grouped_chart(ui: &mut Ui, chart: &CrossTab, colors: &ColorMap) {
    let labels: Vec<String> = chart.groups.iter().map(|g| g.to_string()).collect();
    let n_hues = chart.hues.len().max(1) as f64;
    let bar_width = 0.8 / n_hues;

    let series: Vec<BarChart> = chart
        .hues
        .iter()
        .enumerate()
        .map(|(h, hue)| {
            let offset = (h as f64 - (n_hues - 1.0) / 2.0) * bar_width;
            let bars = chart
                .counts
                .iter()
                .enumerate()
                .map(|(g, row)| Bar::new(g as f64 + offset, row[h] as f64).width(bar_width))
                .collect();
            BarChart::new(bars)
                .name(format!("{} = {hue}", chart.hue_column))
                .color(colors.color_for(hue))
        })
        .collect();

    Plot::new(format!("grouped_{}_{}", chart.group_column, chart.hue_column))
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.group_column.clone())
        .y_axis_label("count")
        .x_axis_formatter(category_formatter(labels))
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for bars in series {
                plot_ui.bar_chart(bars);
            }
        });
}

/// Label integer x positions with category names.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| category_label(&labels, mark.value)
}

fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_whole_positions_get_labels() {
        let labels = vec!["Rural".to_string(), "Urban".to_string()];
        assert_eq!(category_label(&labels, 1.0), "Urban");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 2.0), "");
    }
}
