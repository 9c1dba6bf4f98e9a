// src/app/thumbs.rs
//
// Small worker pool that fetches film thumbnails from the backend and decodes
// them to RGBA off the UI thread. Decoded images live in memory only; there
// is no on-disk cache and nothing survives the session.

use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::warn;

use crate::app::types::{DecodedImage, ThumbDone};

const THUMB_WORKERS: usize = 4;
const MAX_DONE_PER_FRAME: usize = 16;

pub struct ThumbLoader {
    work_tx: Option<Sender<(String, String)>>,
    done_rx: Option<Receiver<ThumbDone>>,
    requested: HashSet<String>,
    failed: HashSet<String>,
}

impl Default for ThumbLoader {
    fn default() -> Self {
        Self {
            work_tx: None,
            done_rx: None,
            requested: HashSet::new(),
            failed: HashSet::new(),
        }
    }
}

impl ThumbLoader {
    /// Spawn the worker pool. Safe to call once; later calls are no-ops.
    pub fn start(&mut self) {
        if self.work_tx.is_some() {
            return;
        }

        let (work_tx, work_rx) = mpsc::channel::<(String, String)>();
        let (done_tx, done_rx) = mpsc::channel::<ThumbDone>();
        self.work_tx = Some(work_tx);
        self.done_rx = Some(done_rx);

        let work_rx = Arc::new(Mutex::new(work_rx));

        // One shared HTTP client across the pool.
        let client = match reqwest::blocking::Client::builder()
            .user_agent("mirror/thumbs")
            .timeout(Duration::from_secs(20))
            .pool_max_idle_per_host(THUMB_WORKERS)
            .build()
        {
            Ok(c) => Arc::new(c),
            Err(e) => {
                warn!("thumb http client build failed: {e}");
                self.work_tx = None;
                self.done_rx = None;
                return;
            }
        };

        for _ in 0..THUMB_WORKERS {
            let work_rx = Arc::clone(&work_rx);
            let done_tx = done_tx.clone();
            let client = Arc::clone(&client);

            std::thread::spawn(move || loop {
                let job = {
                    let rx = work_rx.lock().unwrap();
                    rx.recv()
                };
                let (uuid, url) = match job {
                    Ok(j) => j,
                    Err(_) => break,
                };

                let result = client
                    .get(&url)
                    .send()
                    .and_then(|r| r.error_for_status())
                    .and_then(|r| r.bytes())
                    .map_err(|e| format!("GET {url}: {e}"))
                    .and_then(|bytes| decode_rgba(&bytes));

                let _ = done_tx.send(ThumbDone { uuid, result });
            });
        }
    }

    /// Queue a thumbnail fetch once per uuid per session. Failures are not
    /// retried until the next run.
    pub fn request(&mut self, uuid: &str, url: &str) {
        if self.failed.contains(uuid) || !self.requested.insert(uuid.to_string()) {
            return;
        }
        if let Some(tx) = &self.work_tx {
            let _ = tx.send((uuid.to_string(), url.to_string()));
        }
    }

    pub fn mark_failed(&mut self, uuid: String) {
        self.failed.insert(uuid);
    }

    pub fn is_failed(&self, uuid: &str) -> bool {
        self.failed.contains(uuid)
    }

    /// Drain a bounded batch of completions so one frame never stalls on a
    /// burst of downloads.
    pub fn drain(&mut self) -> Vec<ThumbDone> {
        let mut out = Vec::new();
        let Some(rx) = &self.done_rx else {
            return out;
        };
        while out.len() < MAX_DONE_PER_FRAME {
            match rx.try_recv() {
                Ok(done) => out.push(done),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

/// Decode arbitrary image bytes to straight RGBA.
pub(crate) fn decode_rgba(bytes: &[u8]) -> Result<DecodedImage, String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("decode image: {e}"))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
