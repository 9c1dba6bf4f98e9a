// src/app/mod.rs
pub mod api;
pub mod arrange;
pub mod data;
pub mod prefs;
pub mod resolver;
pub mod sync;
pub mod thumbs;
pub mod types;
mod ui;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use eframe::egui as eg;
use tracing::{error, warn};

use self::api::{BackendClient, DirectoryClient};
use self::data::{DiagnosticSnapshot, Film, ImportCandidate};
use self::prefs::PreferenceStore;
use self::resolver::ActressResolver;
use self::sync::EntitySyncStore;
use self::thumbs::ThumbLoader;
use self::types::{DecodedImage, View};

pub(crate) const FILMS_POLL: Duration = Duration::from_secs(3);
pub(crate) const ACTRESSES_POLL: Duration = Duration::from_secs(10);
pub(crate) const IMPORTS_POLL: Duration = Duration::from_secs(10);
pub(crate) const DIAGNOSTICS_POLL: Duration = Duration::from_secs(10);

/// Uncommitted film-metadata association edited in the import view. Local
/// only; nothing is written back until the user submits on the backend side.
pub(crate) struct ImportDraft {
    pub hash: String,
    pub title: String,
    pub actresses: String,
}

pub struct MirrorApp {
    // synchronization layer: one independent store per backend entity kind
    films: Option<EntitySyncStore<Vec<Film>>>,
    actresses: Option<EntitySyncStore<Vec<String>>>,
    imports: Option<EntitySyncStore<Vec<ImportCandidate>>>,
    diagnostics: Option<EntitySyncStore<DiagnosticSnapshot>>,

    backend: Option<BackendClient>,
    directory: Option<Arc<DirectoryClient>>,

    pub(crate) prefs: PreferenceStore,
    pub(crate) resolver: ActressResolver,
    pub(crate) thumbs: ThumbLoader,

    // view state
    pub(crate) view: View,
    pub(crate) selected_actress: Option<String>,
    pub(crate) import_draft: Option<ImportDraft>,
    pub(crate) textures: HashMap<String, eg::TextureHandle>, // by film uuid
    pub(crate) portrait_tex: Option<eg::TextureHandle>,
    pub(crate) poster_width_ui: f32,
    pub(crate) status: String,

    did_init: bool,
}

impl Default for MirrorApp {
    fn default() -> Self {
        Self {
            films: None,
            actresses: None,
            imports: None,
            diagnostics: None,

            backend: None,
            directory: None,

            prefs: PreferenceStore::open_default(),
            resolver: ActressResolver::default(),
            thumbs: ThumbLoader::default(),

            view: View::Films,
            selected_actress: None,
            import_draft: None,
            textures: HashMap::new(),
            portrait_tex: None,
            poster_width_ui: 150.0,
            status: String::new(),

            did_init: false,
        }
    }
}

impl MirrorApp {
    fn init(&mut self) {
        let cfg = crate::config::load_config();

        match BackendClient::new(&cfg) {
            Ok(backend) => {
                let films_client = backend.clone();
                self.films = Some(EntitySyncStore::start(
                    "films",
                    FILMS_POLL,
                    Vec::new(),
                    move || films_client.fetch_films(),
                ));
                let actresses_client = backend.clone();
                self.actresses = Some(EntitySyncStore::start(
                    "actresses",
                    ACTRESSES_POLL,
                    Vec::new(),
                    move || actresses_client.fetch_actresses(),
                ));
                let imports_client = backend.clone();
                self.imports = Some(EntitySyncStore::start(
                    "imports",
                    IMPORTS_POLL,
                    Vec::new(),
                    move || imports_client.fetch_imports(),
                ));
                let diagnostics_client = backend.clone();
                self.diagnostics = Some(EntitySyncStore::start(
                    "diagnostics",
                    DIAGNOSTICS_POLL,
                    DiagnosticSnapshot::default(),
                    move || diagnostics_client.fetch_diagnostics(),
                ));
                self.backend = Some(backend);
            }
            Err(e) => {
                error!("backend client unavailable: {e}");
                self.status = format!("backend client: {e}");
            }
        }

        match DirectoryClient::new(&cfg) {
            Ok(directory) => self.directory = Some(Arc::new(directory)),
            Err(e) => {
                error!("directory client unavailable: {e}");
                self.status = format!("directory client: {e}");
            }
        }

        self.poster_width_ui = self
            .prefs
            .poster_width()
            .unwrap_or(150.0)
            .clamp(120.0, 220.0);
        self.thumbs.start();
    }

    // ---- snapshot accessors (always the latest completed poll) ----

    pub(crate) fn films_snapshot(&self) -> Arc<Vec<Film>> {
        self.films.as_ref().map(|s| s.subscribe()).unwrap_or_default()
    }

    pub(crate) fn actresses_snapshot(&self) -> Arc<Vec<String>> {
        self.actresses
            .as_ref()
            .map(|s| s.subscribe())
            .unwrap_or_default()
    }

    pub(crate) fn imports_snapshot(&self) -> Arc<Vec<ImportCandidate>> {
        self.imports
            .as_ref()
            .map(|s| s.subscribe())
            .unwrap_or_default()
    }

    pub(crate) fn diagnostics_snapshot(&self) -> Arc<DiagnosticSnapshot> {
        self.diagnostics
            .as_ref()
            .map(|s| s.subscribe())
            .unwrap_or_default()
    }

    // ---- actress detail lifecycle ----

    pub(crate) fn open_actress(&mut self, name: String) {
        self.portrait_tex = None;
        self.selected_actress = Some(name.clone());
        match &self.directory {
            Some(directory) => {
                self.resolver
                    .start(Arc::clone(directory), name, self.films_snapshot());
            }
            None => {
                // No client at all; render the same terminal fallback.
                self.resolver.cancel();
            }
        }
    }

    /// Leaving the detail view drops the profile and ignores any outstanding
    /// resolver fetch, so a stale profile never renders for the next actress.
    pub(crate) fn close_actress(&mut self) {
        self.selected_actress = None;
        self.portrait_tex = None;
        self.resolver.cancel();
    }

    // ---- thumbnail plumbing ----

    pub(crate) fn request_thumbnail(&mut self, uuid: &str) {
        if self.textures.contains_key(uuid) {
            return;
        }
        let Some(backend) = &self.backend else { return };
        let url = backend.thumbnail_url(uuid);
        self.thumbs.request(uuid, &url);
    }

    fn drain_thumbs(&mut self, ctx: &eg::Context) {
        for done in self.thumbs.drain() {
            match done.result {
                Ok(img) => {
                    let tex = upload_rgba(ctx, &done.uuid, &img);
                    self.textures.insert(done.uuid, tex);
                }
                Err(e) => {
                    warn!("thumbnail failed for {}: {e}", done.uuid);
                    self.thumbs.mark_failed(done.uuid);
                }
            }
        }
    }
}

pub(crate) fn upload_rgba(ctx: &eg::Context, name: &str, img: &DecodedImage) -> eg::TextureHandle {
    let color = eg::ColorImage::from_rgba_unmultiplied(
        [img.width as usize, img.height as usize],
        &img.rgba,
    );
    ctx.load_texture(name.to_string(), color, eg::TextureOptions::LINEAR)
}

impl eframe::App for MirrorApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        if !self.did_init {
            self.did_init = true;
            self.init();
        }

        self.resolver.poll();
        self.drain_thumbs(ctx);
        self.render(ctx);

        // Store snapshots change off-frame; keep the view current without a
        // busy repaint loop.
        ctx.request_repaint_after(Duration::from_millis(500));
    }
}
