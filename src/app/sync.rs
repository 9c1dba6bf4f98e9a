// src/app/sync.rs
//
// Generic polling store: one background thread per entity kind keeps a
// wholesale-replaced snapshot of a backend collection. Consumers read the
// latest completed snapshot; a failed poll keeps the previous one and the
// loop retries on the next tick.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

/// State shared between the owning handle and its poll thread.
struct Inner<T> {
    snapshot: Mutex<Arc<T>>,
    last_applied: AtomicU64,
    next_seq: AtomicU64,
    stopped: AtomicBool,
    busy: AtomicBool,
}

pub struct EntitySyncStore<T> {
    label: &'static str,
    inner: Arc<Inner<T>>,
    stop_tx: Option<Sender<()>>,
}

impl<T: Send + Sync + 'static> EntitySyncStore<T> {
    /// Begin polling. One fetch runs immediately, then one per `interval`
    /// tick until `stop()`.
    pub fn start<F>(label: &'static str, interval: Duration, initial: T, fetcher: F) -> Self
    where
        F: Fn() -> Result<T, String> + Send + 'static,
    {
        let inner = Arc::new(Inner {
            snapshot: Mutex::new(Arc::new(initial)),
            last_applied: AtomicU64::new(0),
            next_seq: AtomicU64::new(0),
            stopped: AtomicBool::new(false),
            busy: AtomicBool::new(false),
        });

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let thread_inner = Arc::clone(&inner);
        std::thread::spawn(move || poll_loop(label, &thread_inner, interval, &fetcher, &stop_rx));
        info!("{label}: polling every {}ms", interval.as_millis());

        Self {
            label,
            inner,
            stop_tx: Some(stop_tx),
        }
    }

    /// Latest completed snapshot. Always a single atomic collection; never a
    /// partially-updated one.
    pub fn subscribe(&self) -> Arc<T> {
        Arc::clone(&lock_snapshot(&self.inner))
    }

    /// Idempotent. Returns without awaiting an in-flight fetch; its late
    /// result is discarded by the apply guard.
    pub fn stop(&mut self) {
        if self.inner.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        // Taking the snapshot lock once fences any apply() that had already
        // passed its stopped check; after this returns, nothing can land.
        drop(lock_snapshot(&self.inner));
        info!("{}: stopped", self.label);
    }
}

impl<T> Drop for EntitySyncStore<T> {
    fn drop(&mut self) {
        self.inner.stopped.store(true, Ordering::SeqCst);
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn lock_snapshot<T>(inner: &Inner<T>) -> std::sync::MutexGuard<'_, Arc<T>> {
    // A poisoned lock only means a fetcher panicked mid-apply; the stored
    // Arc is still the last fully-applied snapshot.
    inner.snapshot.lock().unwrap_or_else(|p| p.into_inner())
}

fn poll_loop<T, F>(
    label: &'static str,
    inner: &Arc<Inner<T>>,
    interval: Duration,
    fetcher: &F,
    stop_rx: &Receiver<()>,
) where
    T: Send + Sync + 'static,
    F: Fn() -> Result<T, String>,
{
    loop {
        if inner.stopped.load(Ordering::SeqCst) {
            break;
        }
        // At most one outstanding fetch per store: a tick that lands while a
        // fetch is still running is skipped, not queued.
        if !inner.busy.swap(true, Ordering::SeqCst) {
            let seq = inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            match fetcher() {
                Ok(value) => {
                    if apply(inner, seq, value) {
                        debug!("{label}: applied snapshot #{seq}");
                    }
                }
                Err(err) => {
                    warn!("{label}: fetch failed ({err}); keeping previous snapshot");
                }
            }
            inner.busy.store(false, Ordering::SeqCst);
        }
        // recv_timeout doubles as the interval tick and the stop wake-up.
        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }
    debug!("{label}: poll loop exited");
}

/// Apply a fetched snapshot if it is still current: rejected after `stop()`
/// and rejected when an out-of-order result carries a sequence number at or
/// below the last applied one.
fn apply<T>(inner: &Inner<T>, seq: u64, value: T) -> bool {
    let mut snap = lock_snapshot(inner);
    if inner.stopped.load(Ordering::SeqCst) {
        return false;
    }
    if seq <= inner.last_applied.load(Ordering::SeqCst) {
        return false;
    }
    inner.last_applied.store(seq, Ordering::SeqCst);
    *snap = Arc::new(value);
    true
}
