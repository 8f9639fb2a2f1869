use std::f32::consts::{FRAC_PI_2, TAU};
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, Mesh, Pos2, Sense, Shape, Ui, Vec2};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, PlotUi};

use crate::series::ChartSeries;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

/// Pie chart drawn as triangle fans, with a legend to the right.
pub fn pie_chart(ui: &mut Ui, series: &ChartSeries) {
    let total: f64 = series.values.iter().sum();
    if total <= 0.0 {
        empty_chart(ui);
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        let size = CHART_HEIGHT;
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        let mut start = -FRAC_PI_2;
        for (i, &value) in series.values.iter().enumerate() {
            let sweep = (value / total) as f32 * TAU;
            painter.add(Shape::mesh(slice_mesh(center, radius, start, sweep, series.color(i))));
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (i, label) in series.labels.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, series.color(i));
                    ui.label(format!("{label} ({})", series.values[i]));
                });
            }
        });
    });
}

fn slice_mesh(center: Pos2, radius: f32, start: f32, sweep: f32, color: Color32) -> Mesh {
    let steps = ((sweep / TAU) * 96.0).ceil().max(1.0) as u32;
    let mut mesh = Mesh::default();
    mesh.colored_vertex(center, color);
    for k in 0..=steps {
        let angle = start + sweep * k as f32 / steps as f32;
        mesh.colored_vertex(center + radius * Vec2::angled(angle), color);
    }
    for k in 0..steps {
        mesh.add_triangle(0, k + 1, k + 2);
    }
    mesh
}

// ---------------------------------------------------------------------------
// Bar and line charts over record series
// ---------------------------------------------------------------------------

pub fn bar_chart(ui: &mut Ui, id: &str, series: &ChartSeries) {
    if series.is_empty() {
        empty_chart(ui);
        return;
    }
    let bars: Vec<Bar> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64, v)
                .name(&series.labels[i])
                .fill(series.color(i))
                .width(0.8)
        })
        .collect();
    let chart = BarChart::new(bars).name(&series.name).color(series.color(0));

    show_labelled(ui, id, &series.labels, "miles", |plot_ui| plot_ui.bar_chart(chart));
}

pub fn line_chart(ui: &mut Ui, id: &str, series: &ChartSeries) {
    if series.is_empty() {
        empty_chart(ui);
        return;
    }
    let points: PlotPoints = series
        .values
        .iter()
        .enumerate()
        .map(|(i, &v)| [i as f64, v])
        .collect();
    let line = Line::new(points)
        .name(&series.name)
        .color(series.color(0))
        .width(2.0);

    show_labelled(ui, id, &series.labels, "miles", |plot_ui| plot_ui.line(line));
}

/// Bars stacked in the order given.
pub fn stacked_bar_chart(ui: &mut Ui, id: &str, stacks: &[ChartSeries]) {
    let Some(first) = stacks.first() else {
        empty_chart(ui);
        return;
    };
    let mut charts: Vec<BarChart> = Vec::with_capacity(stacks.len());
    for series in stacks {
        let bars: Vec<Bar> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &v)| Bar::new(i as f64, v).name(&series.labels[i]).width(0.7))
            .collect();
        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(&series.name)
            .color(series.color(0))
            .stack_on(&below);
        charts.push(chart);
    }

    show_labelled(ui, id, &first.labels, "vehicles", |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

/// Show a plot whose x axis reads `labels[i]` at integer position `i`.
fn show_labelled(
    ui: &mut Ui,
    id: &str,
    labels: &[String],
    y_label: &str,
    build: impl FnOnce(&mut PlotUi),
) {
    let labels = labels.to_vec();
    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .allow_scroll(false)
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            let v = mark.value;
            if v.fract() != 0.0 || v < 0.0 {
                return String::new();
            }
            labels.get(v as usize).cloned().unwrap_or_default()
        })
        .show(ui, build);
}

fn empty_chart(ui: &mut Ui) {
    let width = ui.available_width();
    ui.add_sized(
        [width, 60.0],
        egui::Label::new(egui::RichText::new("No data").italics()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_mesh_is_a_fan() {
        let mesh = slice_mesh(Pos2::ZERO, 10.0, 0.0, TAU / 4.0, Color32::RED);
        let steps = 24;
        assert_eq!(mesh.vertices.len(), steps + 2);
        assert_eq!(mesh.indices.len(), steps * 3);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn tiny_slice_still_has_a_triangle() {
        let mesh = slice_mesh(Pos2::ZERO, 10.0, 0.0, 0.001, Color32::RED);
        assert_eq!(mesh.indices.len(), 3);
    }
}
