// src/app/ui/topbar.rs
use eframe::egui as eg;

use crate::app::types::{SortMode, View};

impl crate::app::MirrorApp {
    // ---------- TOP BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui) {
        ui.horizontal(|ui| {
            // View switcher
            for view in View::ALL {
                if ui
                    .selectable_label(self.view == view, view.label())
                    .clicked()
                    && self.view != view
                {
                    if self.view == View::Actresses {
                        self.close_actress();
                    }
                    self.view = view;
                }
            }

            if self.view != View::Films {
                return;
            }

            ui.separator();

            // Sort mode; the active value is read back from the preference
            // store so the combo always reflects what the grid will use.
            let current = self.prefs.sort_mode();
            eg::ComboBox::from_id_source("sort_mode_combo")
                .selected_text(current.label())
                .show_ui(ui, |ui| {
                    for mode in SortMode::ALL {
                        if ui.selectable_label(current == mode, mode.label()).clicked() {
                            self.prefs.set_sort_mode(mode);
                        }
                    }
                });

            ui.separator();

            // Poster size
            ui.label("Poster:");
            let resp = ui.add(
                eg::Slider::new(&mut self.poster_width_ui, 120.0..=220.0).suffix(" px"),
            );
            if resp.drag_stopped() {
                self.prefs.set_poster_width(self.poster_width_ui);
            }
        });
    }
}
