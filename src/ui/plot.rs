use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Pos2, Rect, Sense, Shape, Stroke, Ui, vec2};
use egui_plot::{Corner, Legend, Plot, PlotPoints, Points};

use crate::engine::{ChartSpec, LegendPlacement, Trace};

/// Arc segments per full turn when tessellating pie wedges.
const PIE_SEGMENTS: usize = 96;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render a pie spec: title, wedges, legend with counts and shares.
pub fn pie_chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&spec.layout.title);
    });

    let Some(Trace::Pie {
        labels,
        values,
        colors,
    }) = spec.traces.first()
    else {
        empty_message(ui, "Nothing to show");
        return;
    };

    let total: u64 = values.iter().sum();
    if total == 0 {
        empty_message(ui, "No launches match the selection");
        return;
    }

    let legend_width = match spec.layout.legend {
        LegendPlacement::Right => 170.0,
        LegendPlacement::Inside => 0.0,
    };
    let size = ui.available_size();
    let diameter = (size.x - legend_width).min(size.y).max(40.0);

    ui.horizontal(|ui: &mut Ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(diameter, diameter), Sense::hover());
        paint_wedges(ui, rect, values, colors, total);

        ui.vertical(|ui: &mut Ui| {
            for ((label, value), color) in labels.iter().zip(values).zip(colors) {
                let share = *value as f64 / total as f64 * 100.0;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, *color);
                    ui.label(format!("{label}  {value} ({share:.1}%)"));
                });
            }
        });
    });
}

fn paint_wedges(ui: &Ui, rect: Rect, values: &[u64], colors: &[Color32], total: u64) {
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - 2.0;
    let point_at = |angle: f32| -> Pos2 {
        // Start at twelve o'clock, go clockwise.
        center + radius * vec2((angle - TAU / 4.0).cos(), (angle - TAU / 4.0).sin())
    };

    let mut start = 0.0f32;
    for (value, color) in values.iter().zip(colors) {
        if *value == 0 {
            continue;
        }
        let sweep = *value as f32 / total as f32 * TAU;
        let steps = ((sweep / TAU) * PIE_SEGMENTS as f32).ceil().max(1.0) as usize;
        for i in 0..steps {
            let a0 = start + sweep * i as f32 / steps as f32;
            let a1 = start + sweep * (i + 1) as f32 / steps as f32;
            painter.add(Shape::convex_polygon(
                vec![center, point_at(a0), point_at(a1)],
                *color,
                Stroke::NONE,
            ));
        }
        if sweep < TAU {
            painter.line_segment(
                [center, point_at(start)],
                Stroke::new(1.5, ui.visuals().panel_fill),
            );
        }
        start += sweep;
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render a scatter spec: one marker series per trace.
pub fn scatter_chart(ui: &mut Ui, spec: &ChartSpec) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&spec.layout.title);
    });
    if let Some(title) = &spec.layout.legend_title {
        ui.label(egui::RichText::new(title).small().weak());
    }
    if spec.is_empty() {
        ui.weak("No launches match the selection");
    }

    let legend = match spec.layout.legend {
        LegendPlacement::Inside => Legend::default().position(Corner::RightTop),
        LegendPlacement::Right => Legend::default().position(Corner::RightBottom),
    };

    let mut plot = Plot::new("payload_scatter")
        .legend(legend)
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some(x) = &spec.layout.x_axis_title {
        plot = plot.x_axis_label(x.clone());
    }
    if let Some(y) = &spec.layout.y_axis_title {
        plot = plot.y_axis_label(y.clone());
    }

    plot.show(ui, |plot_ui| {
        for trace in &spec.traces {
            let Trace::Scatter { name, x, y, color } = trace else {
                continue;
            };
            let points: PlotPoints = x.iter().zip(y).map(|(&xi, &yi)| [xi, yi]).collect();
            plot_ui.points(
                Points::new(points)
                    .name(name)
                    .color(*color)
                    .filled(true)
                    .radius(4.0),
            );
        }
    });
}

fn empty_message(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.weak(text);
    });
}
