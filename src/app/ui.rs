// src/app/ui.rs
pub(crate) mod dashboard;
pub(crate) mod detail;
pub(crate) mod grid;
pub(crate) mod import;
pub(crate) mod topbar;

use eframe::egui as eg;

use crate::app::types::View;

impl crate::app::MirrorApp {
    pub(crate) fn render(&mut self, ctx: &eg::Context) {
        eg::TopBottomPanel::top("topbar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.ui_render_topbar(ui);
            ui.add_space(4.0);
        });

        if !self.status.is_empty() {
            eg::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.label(eg::RichText::new(&self.status).weak());
            });
        }

        eg::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Films => self.ui_render_films(ui),
            View::Actresses => self.ui_render_actresses(ui),
            View::Import => self.ui_render_import(ui),
            View::Dashboard => self.ui_render_dashboard(ui),
        });

        self.ui_render_import_draft(ctx);
    }
}
