// src/app/arrange.rs
use crate::app::data::{Film, FilmState};
use crate::app::types::SortMode;

/// Derive the display ordering for the film grid.
///
/// Pure: the input slice is never mutated; ties in date or rating keep the
/// input order (stable sort). Callers read `mode` from the PreferenceStore on
/// every render pass, so a preference change takes effect on the next frame
/// without a re-fetch.
pub fn arrange(films: &[Film], mode: SortMode) -> Vec<Film> {
    let mut out: Vec<Film> = match mode {
        SortMode::DateAddedNewest | SortMode::DateAddedOldest => films.to_vec(),
        SortMode::Unwatched => films
            .iter()
            .filter(|f| f.state == FilmState::Complete && !f.watched)
            .cloned()
            .collect(),
        SortMode::Watched => films
            .iter()
            .filter(|f| f.state == FilmState::Complete && f.watched)
            .cloned()
            .collect(),
        SortMode::RatingHighToLow | SortMode::RatingLowToHigh => films
            .iter()
            .filter(|f| f.state == FilmState::Complete)
            .cloned()
            .collect(),
    };

    match mode {
        SortMode::DateAddedOldest => out.sort_by(|a, b| a.date_added.cmp(&b.date_added)),
        SortMode::RatingHighToLow => {
            out.sort_by(|a, b| b.rating.average.total_cmp(&a.rating.average));
        }
        SortMode::RatingLowToHigh => {
            out.sort_by(|a, b| a.rating.average.total_cmp(&b.rating.average));
        }
        // Newest-first is also the order for the watched/unwatched filters.
        _ => out.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::Rating;
    use chrono::{TimeZone, Utc};

    fn film(uuid: &str, day: u32, state: FilmState, watched: bool, average: f32) -> Film {
        Film {
            uuid: uuid.to_string(),
            title: format!("Film {uuid}"),
            actresses: Vec::new(),
            state,
            download_progress: 0,
            watched,
            rating: Rating { average },
            date_added: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    fn uuids(films: &[Film]) -> Vec<&str> {
        films.iter().map(|f| f.uuid.as_str()).collect()
    }

    fn sample() -> Vec<Film> {
        vec![
            film("a", 1, FilmState::Complete, true, 8.0),
            film("b", 3, FilmState::Downloading, true, 9.0),
            film("c", 2, FilmState::Complete, false, 0.0),
            film("d", 4, FilmState::Complete, true, 5.5),
            film("e", 5, FilmState::Queued, false, 0.0),
        ]
    }

    #[test]
    fn newest_first_keeps_everything() {
        let films = sample();
        let out = arrange(&films, SortMode::DateAddedNewest);
        assert_eq!(uuids(&out), vec!["e", "d", "b", "c", "a"]);
    }

    #[test]
    fn oldest_first_is_the_reverse_order() {
        let films = sample();
        let out = arrange(&films, SortMode::DateAddedOldest);
        assert_eq!(uuids(&out), vec!["a", "c", "b", "d", "e"]);
    }

    #[test]
    fn watched_and_unwatched_require_complete_state() {
        let films = sample();
        // "b" is DOWNLOADING with watched=true; it must not leak into either.
        assert_eq!(uuids(&arrange(&films, SortMode::Watched)), vec!["d", "a"]);
        assert_eq!(uuids(&arrange(&films, SortMode::Unwatched)), vec!["c"]);
    }

    #[test]
    fn rating_modes_filter_to_complete_and_order_by_average() {
        let films = sample();
        assert_eq!(
            uuids(&arrange(&films, SortMode::RatingHighToLow)),
            vec!["a", "d", "c"]
        );
        assert_eq!(
            uuids(&arrange(&films, SortMode::RatingLowToHigh)),
            vec!["c", "d", "a"]
        );
    }

    #[test]
    fn is_pure_and_deterministic() {
        let films = sample();
        let before = uuids(&films).join(",");
        let first = arrange(&films, SortMode::RatingHighToLow);
        let second = arrange(&films, SortMode::RatingHighToLow);
        assert_eq!(uuids(&first), uuids(&second));
        assert_eq!(uuids(&films).join(","), before, "input must be unmodified");
    }

    #[test]
    fn equal_dates_keep_input_order() {
        let films = vec![
            film("x", 1, FilmState::Complete, false, 1.0),
            film("y", 1, FilmState::Complete, false, 2.0),
            film("z", 1, FilmState::Complete, false, 3.0),
        ];
        let out = arrange(&films, SortMode::DateAddedNewest);
        assert_eq!(uuids(&out), vec!["x", "y", "z"]);
    }

    #[test]
    fn unknown_persisted_key_falls_back_to_newest_first() {
        // Malformed prefs resolve at the parse layer; the default mode is the
        // newest-first ordering.
        let films = sample();
        let mode = SortMode::from_str("not-a-mode").unwrap_or_default();
        assert_eq!(
            uuids(&arrange(&films, mode)),
            uuids(&arrange(&films, SortMode::DateAddedNewest))
        );
    }
}
