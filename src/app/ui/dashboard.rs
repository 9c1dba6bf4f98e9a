// src/app/ui/dashboard.rs
use eframe::egui as eg;

use crate::app::data::DiagnosticSnapshot;

impl crate::app::MirrorApp {
    // ---------- DASHBOARD ----------
    pub(crate) fn ui_render_dashboard(&mut self, ui: &mut eg::Ui) {
        let diag = self.diagnostics_snapshot();

        ui.heading("Dashboard");
        ui.separator();

        eg::Grid::new("dashboard_cards")
            .num_columns(3)
            .spacing([24.0, 24.0])
            .show(ui, |ui| {
                for (i, (title, value)) in dashboard_cards(&diag).into_iter().enumerate() {
                    card(ui, title, &value);
                    if (i + 1) % 3 == 0 {
                        ui.end_row();
                    }
                }
            });
    }
}

fn card(ui: &mut eg::Ui, title: &str, value: &str) {
    eg::Frame::group(ui.style())
        .inner_margin(eg::Margin::same(12.0))
        .show(ui, |ui| {
            ui.set_min_width(160.0);
            ui.vertical(|ui| {
                ui.label(eg::RichText::new(title).weak().small());
                ui.label(eg::RichText::new(value).heading());
            });
        });
}

// Units follow the backend report: cache in bytes, database size in MB,
// query time in seconds, disk figures in GB.
fn dashboard_cards(diag: &DiagnosticSnapshot) -> [(&'static str, String); 6] {
    [
        (
            "Cache Size",
            format!("{} MB", (diag.cache_size / 1_000_000.0).round() as i64),
        ),
        ("Database Size", format!("{:.0} MB", diag.database.size)),
        (
            "Database Query Time",
            format!("{} MS", (diag.database.query_time * 1000.0).round() as i64),
        ),
        ("Storage Total", format!("{:.0} GB", diag.disk.total)),
        ("Storage Used", format!("{:.0} GB", diag.disk.used)),
        ("Storage Free", format!("{:.0} GB", diag.disk.free)),
    ]
}
