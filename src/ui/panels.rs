use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelection};
use crate::engine::ChartSpec;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload range sliders.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ui.strong("Launch site");
    let options = state.site_options();
    let current = state.site.get().clone();
    let mut picked: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options {
                if ui
                    .selectable_label(*opt == current, opt.to_string())
                    .clicked()
                {
                    picked = Some(opt.clone());
                }
            }
        });
    if let Some(site) = picked {
        state.select_site(site);
    }

    ui.add_space(12.0);
    ui.strong("Payload range (Kg):");

    // Only user edits snap to the step grid; the loaded extent stays exact.
    let range = *state.payload.get();
    let (mut lo, mut hi) = (range.lo(), range.hi());
    let bounds = PayloadRange::SLIDER_MIN..=PayloadRange::SLIDER_MAX;
    let lo_changed = ui
        .add(
            egui::Slider::new(&mut lo, bounds.clone())
                .step_by(PayloadRange::SLIDER_STEP)
                .clamping(egui::SliderClamping::Edits)
                .text("min"),
        )
        .changed();
    let hi_changed = ui
        .add(
            egui::Slider::new(&mut hi, bounds)
                .step_by(PayloadRange::SLIDER_STEP)
                .clamping(egui::SliderClamping::Edits)
                .text("max"),
        )
        .changed();

    if lo_changed || hi_changed {
        // Dragging one handle past the other pushes the other along.
        if lo_changed && lo > hi {
            hi = lo;
        } else if hi_changed && hi < lo {
            lo = hi;
        }
        state.set_payload_range(PayloadRange::new(lo, hi));
    }

    if let Some(ds) = state.dataset() {
        ui.add_space(12.0);
        ui.separator();
        ui.label(format!("{} launches", ds.len()));
        if let (Some(min), Some(max)) = (ds.payload_min(), ds.payload_max()) {
            ui.label(format!("payload {min:.0} to {max:.0} kg"));
        }
        ui.label(format!("boosters: {}", ds.booster_categories().join(", ")));
    }
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
            ui.separator();
            if ui.button("Export pie chart…").clicked() {
                let spec = state.pie_spec().clone();
                export_dialog(state, &spec, "success_pie.json");
                ui.close_menu();
            }
            if ui.button("Export scatter chart…").clicked() {
                let spec = state.scatter_spec().clone();
                export_dialog(state, &spec, "payload_scatter.json");
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = state.dataset() {
            let summary = format!("{} launches from {} sites", ds.len(), ds.sites().len());
            let diagnostics = format!(
                "pie computed {} times, scatter {} times",
                state.pie_recomputations(),
                state.scatter_recomputations()
            );
            ui.label(summary).on_hover_text(diagnostics);
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load `path` and install it, or surface the error in the status bar.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => state.set_dataset(dataset),
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_dialog(state: &mut AppState, spec: &ChartSpec, default_name: &str) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name(default_name)
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match write_spec(spec, &path) {
            Ok(()) => log::info!("Exported '{}' to {}", spec.layout.title, path.display()),
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

/// Write a chart spec as pretty-printed JSON.
pub fn write_spec(spec: &ChartSpec, path: &Path) -> Result<()> {
    let text = serde_json::to_string_pretty(spec).context("serializing chart")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};
    use crate::engine::Trace;

    #[test]
    fn idle_frames_keep_dataset_payload_extent() {
        let mut state = AppState::default();
        state.set_dataset(
            LaunchDataset::from_records(vec![
                LaunchRecord::new("CCAFS LC-40", 1300.0, "v1.1", Outcome::Success),
                LaunchRecord::new("KSC LC-39A", 9600.0, "FT", Outcome::Failure),
            ])
            .unwrap(),
        );
        let before = *state.payload.get();
        assert_eq!(before, PayloadRange::new(1300.0, 9600.0));

        let ctx = egui::Context::default();
        for _ in 0..3 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| control_panel(ui, &mut state));
            });
        }

        assert_eq!(*state.payload.get(), before);
        let points: usize = state
            .scatter_spec()
            .traces
            .iter()
            .map(|t| match t {
                Trace::Scatter { x, .. } => x.len(),
                Trace::Pie { .. } => 0,
            })
            .sum();
        assert_eq!(points, 2);
    }

    #[test]
    fn written_spec_reads_back_as_json() {
        let path = std::env::temp_dir().join(format!("spacex_dash_export_{}.json", std::process::id()));
        write_spec(&ChartSpec::no_data(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["layout"]["title"], "No Data Available");
        assert_eq!(value["traces"], serde_json::json!([]));
    }

    #[test]
    fn failed_load_sets_status() {
        let mut state = AppState::default();
        load_into(&mut state, Path::new("/nonexistent/launches.csv"));
        assert!(state.dataset().is_none());
        let msg = state.status_message.unwrap();
        assert!(msg.starts_with("Error:"));
    }
}
