use eframe::egui;

use crate::color;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalesDashboardApp {
    pub state: AppState,
}

impl SalesDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title + dropdowns ----
        egui::TopBottomPanel::top("top_bar")
            .frame(egui::Frame::default().fill(color::HEADER_BG).inner_margin(10.0))
            .show(ctx, |ui| {
                panels::top_bar(ui, &mut self.state);
            });

        // ---- Central panel: cards + charts ----
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(color::PAGE_BG).inner_margin(20.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        panels::indicator_cards(ui, &self.state);
                        ui.add_space(20.0);

                        ui.columns(2, |cols| {
                            plot::amount_histogram(&mut cols[0], &self.state);
                            plot::category_pie(&mut cols[1], &self.state);
                        });
                        ui.add_space(20.0);

                        plot::weekly_trend(ui, &self.state);
                    });
            });
    }
}
