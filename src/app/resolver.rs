// src/app/resolver.rs
//
// Two-stage lookup of an actress name against the performer directory:
// search, disambiguate, fetch profile, settle the portrait image, and fold in
// the aggregate rating from the local films snapshot. Every failure path
// lands in the NotFound terminal state; nothing propagates as a crash.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;

use tracing::{info, warn};

use crate::app::api::PerformerDirectory;
use crate::app::data::{Film, PerformerHit};
use crate::app::thumbs::decode_rgba;
use crate::app::types::{ResolveMsg, ResolveState, ResolvedActress};

/// Handle owned by the UI thread. One lookup at a time; starting a new lookup
/// or cancelling bumps the generation so reports from a superseded worker are
/// dropped in `poll()` and a stale profile never renders.
pub struct ActressResolver {
    generation: u64,
    rx: Option<Receiver<ResolveMsg>>,
    state: ResolveState,
}

impl Default for ActressResolver {
    fn default() -> Self {
        Self {
            generation: 0,
            rx: None,
            state: ResolveState::Idle,
        }
    }
}

impl ActressResolver {
    pub fn state(&self) -> &ResolveState {
        &self.state
    }

    /// Kick off a lookup on a worker thread. The films snapshot is captured
    /// at view-open time for the local rating aggregation.
    pub fn start<D>(&mut self, directory: Arc<D>, name: String, films: Arc<Vec<Film>>)
    where
        D: PerformerDirectory + Send + Sync + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        self.state = ResolveState::Searching;

        let (tx, rx) = mpsc::channel::<ResolveMsg>();
        self.rx = Some(rx);
        std::thread::spawn(move || run_lookup(&*directory, &name, &films, generation, &tx));
    }

    /// Forget the in-flight lookup (idempotent). A worker still running for
    /// the old generation reports into a dropped channel.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.rx = None;
        self.state = ResolveState::Idle;
    }

    /// Drain worker messages without blocking the UI thread. Returns true if
    /// the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            let msg = {
                let Some(rx) = self.rx.as_ref() else { break };
                match rx.try_recv() {
                    Ok(m) => m,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        self.rx = None;
                        break;
                    }
                }
            };
            if msg.generation != self.generation {
                continue;
            }
            self.state = msg.state;
            changed = true;
        }
        changed
    }
}

fn emit(tx: &Sender<ResolveMsg>, generation: u64, state: ResolveState) {
    let _ = tx.send(ResolveMsg { generation, state });
}

pub(crate) fn run_lookup<D>(
    directory: &D,
    name: &str,
    films: &[Film],
    generation: u64,
    tx: &Sender<ResolveMsg>,
) where
    D: PerformerDirectory + ?Sized,
{
    let hits = match directory.search(name) {
        Ok(hits) => hits,
        Err(err) => {
            warn!("directory search for {name} failed: {err}");
            emit(tx, generation, ResolveState::NotFound);
            return;
        }
    };
    let Some(hit) = select_candidate(&hits, name) else {
        emit(tx, generation, ResolveState::NotFound);
        return;
    };

    emit(tx, generation, ResolveState::Resolving);
    let profile = match directory.profile(&hit.id) {
        Ok(profile) => profile,
        Err(err) => {
            warn!("profile fetch for {} failed: {err}", hit.id);
            emit(tx, generation, ResolveState::NotFound);
            return;
        }
    };

    // The view waits for the portrait to settle (loaded or failed) before
    // showing the profile, so it never flashes missing artwork.
    emit(tx, generation, ResolveState::SettlingImage);
    let portrait = profile
        .face
        .as_deref()
        .and_then(|url| settle_portrait(directory, url));

    let aggregate_rating = aggregate_rating(films, name);
    info!(
        "resolved {name} -> {} (aggregate rating {aggregate_rating:.2})",
        profile.name
    );
    emit(
        tx,
        generation,
        ResolveState::Found(Box::new(ResolvedActress {
            profile,
            portrait,
            aggregate_rating,
        })),
    );
}

/// Exact (case-sensitive) name match wins; otherwise trust the directory's
/// own relevance ranking and take the first hit.
pub(crate) fn select_candidate<'a>(hits: &'a [PerformerHit], query: &str) -> Option<&'a PerformerHit> {
    hits.iter().find(|h| h.name == query).or_else(|| hits.first())
}

/// Fetch and decode the portrait. Success and a broken link both settle; the
/// latter degrades to a placeholder instead of leaving the view pending.
fn settle_portrait<D>(directory: &D, url: &str) -> Option<crate::app::types::DecodedImage>
where
    D: PerformerDirectory + ?Sized,
{
    let bytes = match directory.portrait(url) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("portrait fetch failed for {url}: {err}");
            return None;
        }
    };
    match decode_rgba(&bytes) {
        Ok(img) => Some(img),
        Err(err) => {
            warn!("portrait decode failed for {url}: {err}");
            None
        }
    }
}

/// Mean of `rating.average` over this actress's rated films. `average == 0`
/// marks an unrated film and is excluded; no rated films at all means 0.
pub(crate) fn aggregate_rating(films: &[Film], name: &str) -> f32 {
    let rated: Vec<f32> = films
        .iter()
        .filter(|f| f.actresses.iter().any(|a| a == name))
        .map(|f| f.rating.average)
        .filter(|avg| *avg != 0.0)
        .collect();
    if rated.is_empty() {
        return 0.0;
    }
    rated.iter().sum::<f32>() / rated.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::data::{FilmState, PerformerProfile, Rating};
    use chrono::{TimeZone, Utc};

    struct StubDirectory {
        hits: Result<Vec<PerformerHit>, String>,
        profile: Result<PerformerProfile, String>,
        portrait: Result<Vec<u8>, String>,
    }

    impl StubDirectory {
        fn found(hits: Vec<PerformerHit>) -> Self {
            Self {
                hits: Ok(hits),
                profile: Ok(PerformerProfile {
                    id: "1".to_string(),
                    name: "Jane Doe".to_string(),
                    face: Some("https://img.example/jane.jpg".to_string()),
                    bio: None,
                    extras: Default::default(),
                }),
                portrait: Err("no portrait in stub".to_string()),
            }
        }
    }

    impl PerformerDirectory for StubDirectory {
        fn search(&self, _name: &str) -> Result<Vec<PerformerHit>, String> {
            self.hits.clone()
        }
        fn profile(&self, _id: &str) -> Result<PerformerProfile, String> {
            self.profile.clone()
        }
        fn portrait(&self, _url: &str) -> Result<Vec<u8>, String> {
            self.portrait.clone()
        }
    }

    fn hit(id: &str, name: &str) -> PerformerHit {
        PerformerHit {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn film_with(actress: &str, average: f32) -> Film {
        Film {
            uuid: format!("f-{average}"),
            title: "t".to_string(),
            actresses: vec![actress.to_string()],
            state: FilmState::Complete,
            download_progress: 0,
            watched: false,
            rating: Rating { average },
            date_added: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn run_to_end(directory: &StubDirectory, name: &str, films: &[Film]) -> ResolveState {
        let (tx, rx) = mpsc::channel();
        run_lookup(directory, name, films, 1, &tx);
        let mut last = ResolveState::Idle;
        while let Ok(msg) = rx.try_recv() {
            last = msg.state;
        }
        last
    }

    #[test]
    fn exact_match_beats_first_hit() {
        let hits = vec![hit("2", "Jane D."), hit("1", "Jane Doe")];
        let chosen = select_candidate(&hits, "Jane Doe").expect("candidate");
        assert_eq!(chosen.id, "1");
    }

    #[test]
    fn falls_back_to_first_hit_without_exact_match() {
        let hits = vec![hit("2", "Jane D."), hit("1", "Jane Donner")];
        let chosen = select_candidate(&hits, "Jane Doe").expect("candidate");
        assert_eq!(chosen.id, "2");
    }

    #[test]
    fn match_is_case_sensitive() {
        let hits = vec![hit("2", "jane doe"), hit("1", "Jane Doe")];
        let chosen = select_candidate(&hits, "Jane Doe").expect("candidate");
        assert_eq!(chosen.id, "1");
    }

    #[test]
    fn empty_results_and_network_error_both_end_not_found() {
        let empty = StubDirectory::found(Vec::new());
        assert!(matches!(
            run_to_end(&empty, "Jane Doe", &[]),
            ResolveState::NotFound
        ));

        let failing = StubDirectory {
            hits: Err("connection refused".to_string()),
            profile: Err("unused".to_string()),
            portrait: Err("unused".to_string()),
        };
        assert!(matches!(
            run_to_end(&failing, "Jane Doe", &[]),
            ResolveState::NotFound
        ));
    }

    #[test]
    fn profile_failure_ends_not_found() {
        let mut dir = StubDirectory::found(vec![hit("1", "Jane Doe")]);
        dir.profile = Err("HTTP 500".to_string());
        assert!(matches!(
            run_to_end(&dir, "Jane Doe", &[]),
            ResolveState::NotFound
        ));
    }

    #[test]
    fn broken_portrait_still_settles_as_found() {
        let dir = StubDirectory::found(vec![hit("1", "Jane Doe")]);
        match run_to_end(&dir, "Jane Doe", &[]) {
            ResolveState::Found(resolved) => assert!(resolved.portrait.is_none()),
            _ => panic!("expected Found with placeholder portrait"),
        }
    }

    #[test]
    fn aggregate_excludes_zero_sentinel() {
        let films = vec![
            film_with("Jane Doe", 0.0),
            film_with("Jane Doe", 0.0),
            film_with("Jane Doe", 8.0),
            film_with("Someone Else", 2.0),
        ];
        assert_eq!(aggregate_rating(&films, "Jane Doe"), 8.0);
    }

    #[test]
    fn aggregate_is_zero_when_nothing_is_rated() {
        let films = vec![film_with("Jane Doe", 0.0)];
        assert_eq!(aggregate_rating(&films, "Jane Doe"), 0.0);
        assert_eq!(aggregate_rating(&[], "Jane Doe"), 0.0);
    }

    #[test]
    fn stale_generation_messages_are_dropped() {
        let mut resolver = ActressResolver::default();
        let (tx, rx) = mpsc::channel();
        resolver.rx = Some(rx);
        resolver.generation = 5;
        resolver.state = ResolveState::Searching;

        // A worker from a cancelled lookup reports with an old generation.
        emit(&tx, 4, ResolveState::NotFound);
        assert!(!resolver.poll());
        assert!(matches!(resolver.state(), ResolveState::Searching));

        // The current generation still gets through.
        emit(&tx, 5, ResolveState::NotFound);
        assert!(resolver.poll());
        assert!(matches!(resolver.state(), ResolveState::NotFound));
    }

    #[test]
    fn cancel_discards_the_channel() {
        let mut resolver = ActressResolver::default();
        let (tx, rx) = mpsc::channel();
        resolver.rx = Some(rx);
        resolver.generation = 1;
        resolver.state = ResolveState::Searching;

        resolver.cancel();
        emit(&tx, 1, ResolveState::NotFound);
        assert!(!resolver.poll());
        assert!(matches!(resolver.state(), ResolveState::Idle));
    }
}
