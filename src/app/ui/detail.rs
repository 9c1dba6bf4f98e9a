// src/app/ui/detail.rs
use eframe::egui as eg;

use crate::app::data::Film;
use crate::app::types::{ResolveState, ResolvedActress};
use crate::app::upload_rgba;

const PORTRAIT_WIDTH: f32 = 220.0;

impl crate::app::MirrorApp {
    // ---------- ACTRESSES ----------
    pub(crate) fn ui_render_actresses(&mut self, ui: &mut eg::Ui) {
        if self.selected_actress.is_some() {
            self.ui_render_actress_detail(ui);
            return;
        }

        let snapshot = self.actresses_snapshot();
        let mut names: Vec<String> = snapshot.as_slice().to_vec();
        names.sort();

        ui.horizontal(|ui| {
            ui.heading("Actresses");
            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                ui.label(eg::RichText::new(format!("{}", names.len())).weak());
            });
        });
        ui.separator();

        let mut clicked = None;
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for name in &names {
                    if ui.link(name).clicked() {
                        clicked = Some(name.clone());
                    }
                }
            });
        if let Some(name) = clicked {
            self.open_actress(name);
        }
    }

    fn ui_render_actress_detail(&mut self, ui: &mut eg::Ui) {
        let Some(name) = self.selected_actress.clone() else {
            return;
        };

        let mut go_back = false;
        ui.horizontal(|ui| {
            if ui.button("⬅ Actresses").clicked() {
                go_back = true;
            }
            ui.heading(&name);
        });
        ui.separator();
        if go_back {
            self.close_actress();
            return;
        }

        // Clone the state out: rendering Found may upload a texture, which
        // needs &mut self again.
        let state = self.resolver.state().clone();
        match state {
            ResolveState::Idle | ResolveState::NotFound => {
                ui.label(eg::RichText::new("No directory profile found.").weak());
            }
            ResolveState::Searching => pending(ui, "Searching the directory…"),
            ResolveState::Resolving => pending(ui, "Fetching the profile…"),
            ResolveState::SettlingImage => pending(ui, "Loading the portrait…"),
            ResolveState::Found(resolved) => self.profile_panel(ui, &resolved),
        }

        ui.add_space(12.0);
        self.actress_films(ui, &name);
    }

    fn profile_panel(&mut self, ui: &mut eg::Ui, resolved: &ResolvedActress) {
        if self.portrait_tex.is_none() {
            if let Some(img) = &resolved.portrait {
                self.portrait_tex = Some(upload_rgba(ui.ctx(), "actress_portrait", img));
            }
        }

        ui.horizontal_top(|ui| {
            match &self.portrait_tex {
                Some(tex) => {
                    let size = tex.size_vec2();
                    let scale = PORTRAIT_WIDTH / size.x.max(1.0);
                    ui.image((tex.id(), size * scale));
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(
                        eg::vec2(PORTRAIT_WIDTH, PORTRAIT_WIDTH * 1.4),
                        eg::Sense::hover(),
                    );
                    ui.painter()
                        .rect_filled(rect, 4.0, eg::Color32::from_gray(40));
                    ui.painter().text(
                        rect.center(),
                        eg::Align2::CENTER_CENTER,
                        "no portrait",
                        eg::FontId::proportional(12.0),
                        eg::Color32::GRAY,
                    );
                }
            }

            ui.add_space(12.0);
            ui.vertical(|ui| {
                let extras = &resolved.profile.extras;
                fact(ui, "Birthday", extras.birthday.as_deref());
                fact(ui, "Nationality", extras.nationality.as_deref());
                fact(ui, "Ethnicity", extras.ethnicity.as_deref());
                fact(ui, "Height", extras.height.as_deref());
                fact(ui, "Hair colour", extras.hair_colour.as_deref());

                ui.add_space(6.0);
                if resolved.aggregate_rating != 0.0 {
                    ui.label(format!("Average rating: {:.1}", resolved.aggregate_rating));
                } else {
                    ui.label(eg::RichText::new("Average rating: unrated").weak());
                }

                if let Some(bio) = &resolved.profile.bio {
                    ui.add_space(6.0);
                    ui.label(eg::RichText::new(bio).weak());
                }
            });
        });
    }

    fn actress_films(&mut self, ui: &mut eg::Ui, name: &str) {
        let snapshot = self.films_snapshot();
        let films: Vec<&Film> = snapshot
            .iter()
            .filter(|f| f.actresses.iter().any(|a| a == name))
            .collect();

        ui.label(eg::RichText::new(format!("Films ({})", films.len())).strong());
        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for film in films {
                    let mut line = format!(
                        "{} — {}",
                        film.title,
                        film.date_added.format("%Y-%m-%d")
                    );
                    if film.rating.average != 0.0 {
                        line.push_str(&format!(" · {:.1}", film.rating.average));
                    }
                    ui.label(line);
                }
            });
    }
}

fn pending(ui: &mut eg::Ui, stage: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(eg::RichText::new(stage).weak());
    });
}

fn fact(ui: &mut eg::Ui, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        ui.horizontal(|ui| {
            ui.label(eg::RichText::new(format!("{label}:")).weak());
            ui.label(value);
        });
    }
}
