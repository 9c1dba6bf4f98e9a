// src/app/ui/grid.rs
use eframe::egui as eg;

use crate::app::arrange::arrange;
use crate::app::data::{Film, FilmState};

const CARD_SPACING: f32 = 8.0;
const TEXT_BLOCK_H: f32 = 52.0;

impl crate::app::MirrorApp {
    // ---------- FILM GRID ----------
    pub(crate) fn ui_render_films(&mut self, ui: &mut eg::Ui) {
        // Sort mode comes off disk every frame; an edit from the topbar (or
        // another process touching the prefs file) shows up on the next pass.
        let snapshot = self.films_snapshot();
        let mode = self.prefs.sort_mode();
        let films = arrange(snapshot.as_slice(), mode);

        ui.horizontal(|ui| {
            ui.heading("Films");
            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                ui.label(
                    eg::RichText::new(format!("{} of {}", films.len(), snapshot.len())).weak(),
                );
            });
        });
        ui.separator();

        if films.is_empty() {
            ui.label(eg::RichText::new("Nothing to show for this view.").weak());
            return;
        }

        for film in &films {
            self.request_thumbnail(&film.uuid);
        }

        let card_w = self.poster_width_ui;
        let poster_h = card_w * 1.5;
        let card_h = poster_h + TEXT_BLOCK_H;
        let cols = ((ui.available_width() + CARD_SPACING) / (card_w + CARD_SPACING))
            .floor()
            .max(1.0) as usize;

        eg::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                eg::Grid::new("films_grid")
                    .num_columns(cols)
                    .spacing([CARD_SPACING, CARD_SPACING])
                    .show(ui, |ui| {
                        for (i, film) in films.iter().enumerate() {
                            self.film_card(ui, film, card_w, poster_h, card_h);
                            if (i + 1) % cols == 0 {
                                ui.end_row();
                            }
                        }
                    });
            });
    }

    fn film_card(
        &mut self,
        ui: &mut eg::Ui,
        film: &Film,
        card_w: f32,
        poster_h: f32,
        card_h: f32,
    ) {
        let (rect, _resp) =
            ui.allocate_exact_size(eg::vec2(card_w, card_h), eg::Sense::hover());
        if !ui.is_rect_visible(rect) {
            return;
        }
        let painter = ui.painter_at(rect);

        let poster_rect =
            eg::Rect::from_min_size(rect.min, eg::vec2(card_w, poster_h));
        match self.textures.get(&film.uuid) {
            Some(tex) => {
                painter.image(
                    tex.id(),
                    poster_rect,
                    eg::Rect::from_min_max(eg::pos2(0.0, 0.0), eg::pos2(1.0, 1.0)),
                    eg::Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(poster_rect, 4.0, eg::Color32::from_gray(40));
                let hint = if self.thumbs.is_failed(&film.uuid) {
                    "no artwork"
                } else {
                    "…"
                };
                painter.text(
                    poster_rect.center(),
                    eg::Align2::CENTER_CENTER,
                    hint,
                    eg::FontId::proportional(12.0),
                    eg::Color32::GRAY,
                );
            }
        }

        let mut cursor = eg::pos2(rect.min.x + 2.0, rect.min.y + poster_h + 6.0);
        painter.text(
            cursor,
            eg::Align2::LEFT_TOP,
            &film.title,
            eg::FontId::proportional(13.0),
            eg::Color32::WHITE,
        );
        cursor.y += 16.0;
        painter.text(
            cursor,
            eg::Align2::LEFT_TOP,
            film.date_added.format("%Y-%m-%d").to_string(),
            eg::FontId::proportional(11.0),
            eg::Color32::GRAY,
        );
        cursor.y += 14.0;
        painter.text(
            cursor,
            eg::Align2::LEFT_TOP,
            film_status_line(film),
            eg::FontId::proportional(11.0),
            eg::Color32::GRAY,
        );
    }
}

fn film_status_line(film: &Film) -> String {
    match film.state {
        FilmState::Queued => "queued".to_string(),
        FilmState::Downloading => {
            format!("downloading {}%", film.download_progress.min(100))
        }
        FilmState::Error => "download error".to_string(),
        FilmState::Complete => {
            let watched = if film.watched { "watched" } else { "unwatched" };
            if film.rating.average != 0.0 {
                format!("{watched} · {:.1}", film.rating.average)
            } else {
                watched.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Rating;
    use chrono::{TimeZone, Utc};

    fn film(state: FilmState, progress: u8, watched: bool, average: f32) -> Film {
        Film {
            uuid: "u".to_string(),
            title: "t".to_string(),
            actresses: Vec::new(),
            state,
            download_progress: progress,
            watched,
            rating: Rating { average },
            date_added: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn status_line_tracks_state() {
        assert_eq!(
            film_status_line(&film(FilmState::Downloading, 42, false, 0.0)),
            "downloading 42%"
        );
        assert_eq!(
            film_status_line(&film(FilmState::Complete, 100, true, 7.5)),
            "watched · 7.5"
        );
        assert_eq!(
            film_status_line(&film(FilmState::Complete, 100, false, 0.0)),
            "unwatched"
        );
    }

    #[test]
    fn progress_is_capped_at_100() {
        assert_eq!(
            film_status_line(&film(FilmState::Downloading, 130, false, 0.0)),
            "downloading 100%"
        );
    }
}
