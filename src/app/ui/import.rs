// src/app/ui/import.rs
use eframe::egui as eg;
use tracing::info;

use crate::app::data::ImportCandidate;
use crate::app::ImportDraft;

impl crate::app::MirrorApp {
    // ---------- IMPORT QUEUE ----------
    pub(crate) fn ui_render_import(&mut self, ui: &mut eg::Ui) {
        let imports = self.imports_snapshot();

        ui.horizontal(|ui| {
            ui.heading("Import");
            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                ui.label(eg::RichText::new(format!("{} candidates", imports.len())).weak());
            });
        });
        ui.separator();

        if imports.is_empty() {
            ui.label(eg::RichText::new("No files waiting for import.").weak());
            return;
        }

        let mut select: Option<ImportDraft> = None;
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                eg::Grid::new("import_table")
                    .num_columns(4)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(eg::RichText::new("Hash").strong());
                        ui.label(eg::RichText::new("Title").strong());
                        ui.label(eg::RichText::new("Status").strong());
                        ui.label("");
                        ui.end_row();

                        for item in imports.iter() {
                            ui.monospace(short_hash(&item.hash));
                            ui.label(&item.title);
                            ui.label(candidate_status(item));
                            ui.horizontal(|ui| {
                                if ui.button("Associate").clicked() {
                                    select = Some(ImportDraft {
                                        hash: item.hash.clone(),
                                        title: item.title.clone(),
                                        actresses: String::new(),
                                    });
                                }
                                if ui.button("Ignore").clicked() {
                                    info!("ignore requested for {}", item.hash);
                                }
                            });
                            ui.end_row();
                        }
                    });
            });
        if select.is_some() {
            self.import_draft = select;
        }
    }

    /// Modal-ish association editor; lives outside the central panel so it
    /// floats over whichever view is active.
    pub(crate) fn ui_render_import_draft(&mut self, ctx: &eg::Context) {
        let mut submit = false;
        let mut cancel = false;

        if let Some(draft) = self.import_draft.as_mut() {
            eg::Window::new("Associate metadata")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.monospace(&draft.hash);
                    ui.add_space(6.0);
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut draft.title);
                    ui.label("Actresses (comma separated):");
                    ui.text_edit_singleline(&mut draft.actresses);
                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        if ui.button("Submit").clicked() {
                            submit = true;
                        }
                        if ui.button("Cancel").clicked() {
                            cancel = true;
                        }
                    });
                });
        }

        if submit {
            if let Some(draft) = self.import_draft.take() {
                // Submission to the backend is out of scope for this client;
                // record the edit so the log shows what was entered.
                info!(
                    "association drafted for {}: title={:?} actresses={:?}",
                    draft.hash, draft.title, draft.actresses
                );
            }
        } else if cancel {
            self.import_draft = None;
        }
    }
}

fn short_hash(hash: &str) -> String {
    if hash.len() > 12 {
        format!("{}…", &hash[..12])
    } else {
        hash.to_string()
    }
}

fn candidate_status(item: &ImportCandidate) -> &'static str {
    if item.imported {
        "imported"
    } else if item.ignored {
        "ignored"
    } else {
        "new"
    }
}
