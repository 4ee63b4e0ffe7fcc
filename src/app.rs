use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct DashApp {
    pub state: AppState,
}

impl eframe::App for DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site + payload controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::control_panel(ui, &mut self.state);
            });

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(
                    egui::RichText::new("SpaceX Launch Records Dashboard")
                        .size(28.0)
                        .strong(),
                );
            });
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                plot::pie_chart(&mut cols[0], self.state.pie_spec());
                plot::scatter_chart(&mut cols[1], self.state.scatter_spec());
            });
        });
    }
}
