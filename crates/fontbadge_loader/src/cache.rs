//! Single-flight font cache
//!
//! Holds the loaded font(s) for the life of the process. Each slot is
//! guarded by a three-state gate (`Idle -> InFlight -> Done`) kept in the
//! same mutex-protected state as the fonts themselves; callers that find a
//! gate `InFlight` sleep on the condition variable until the winner marks it
//! `Done`. Nothing is ever evicted or reloaded, and a failed download leaves
//! its slot empty until the process restarts. The one exception is the
//! shared slot of [`SlotPolicy::Single`]: a local file or asset that fails to
//! load hands the gate back (`Idle`), so it never shadows a later download.

use crate::config::{LoaderConfig, SlotPolicy};
use crate::error::{LoadError, Result};
use crate::fetch::{stream_to_file, FontFetcher, HttpFetcher};
use crate::handoff::{AsyncHandoff, WorkerPool};
use crate::resolver::CacheKey;
use crate::source::FontSource;
use fontbadge_text::FontFace;
use rustc_hash::FxHashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Instant;

/// Acquisition state of one cache slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    InFlight,
    /// Terminal, whether or not a font was obtained
    Done,
}

/// What an `ensure_loaded` call observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// This call performed the load and it succeeded
    Loaded,
    /// A font was already there, or another caller loaded it while we waited
    AlreadyLoaded,
    /// The slot's acquisition finished without a font (this call's or an
    /// earlier one); callers fall back to a default face
    Unavailable,
}

impl LoadOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, LoadOutcome::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SlotKey {
    /// Single policy: every source shares one slot
    Process,
    Network(CacheKey),
    Local(PathBuf),
}

#[derive(Default)]
struct Slot {
    gate: GateState,
    font: Option<Arc<FontFace>>,
}

#[derive(Default)]
struct CacheState {
    slots: FxHashMap<SlotKey, Slot>,
}

/// Process-wide font cache with single-flight acquisition
pub struct FontCache {
    config: LoaderConfig,
    fetcher: Arc<dyn FontFetcher>,
    state: Mutex<CacheState>,
    settled: Condvar,
    fetches: AtomicUsize,
}

static GLOBAL_CACHE: OnceLock<Arc<FontCache>> = OnceLock::new();

impl FontCache {
    /// Cache that downloads over HTTP
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_fetcher(config, Arc::new(HttpFetcher::new()))
    }

    pub fn with_fetcher(config: LoaderConfig, fetcher: Arc<dyn FontFetcher>) -> Self {
        Self {
            config,
            fetcher,
            state: Mutex::new(CacheState::default()),
            settled: Condvar::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Install the process-wide cache. Returns `false` if one was already
    /// installed (or created by [`FontCache::global`]).
    pub fn init_global(cache: FontCache) -> bool {
        GLOBAL_CACHE.set(Arc::new(cache)).is_ok()
    }

    /// The process-wide cache, created with default settings on first use
    pub fn global() -> Arc<FontCache> {
        Arc::clone(GLOBAL_CACHE.get_or_init(|| Arc::new(FontCache::new(LoaderConfig::default()))))
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Number of network downloads started so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot_key(&self, source: &FontSource) -> SlotKey {
        match (self.config.slot_policy, source) {
            (SlotPolicy::Single, _) => SlotKey::Process,
            (SlotPolicy::PerKey, FontSource::Network { url, .. }) => {
                SlotKey::Network(CacheKey::for_url(url))
            }
            (SlotPolicy::PerKey, FontSource::File(path)) => SlotKey::Local(path.clone()),
            (SlotPolicy::PerKey, FontSource::Asset(path)) => {
                SlotKey::Local(self.config.asset_root.join(path))
            }
        }
    }

    /// Gate state of the slot `source` maps to
    pub fn gate_state(&self, source: &FontSource) -> GateState {
        let key = self.slot_key(source);
        self.lock()
            .slots
            .get(&key)
            .map(|slot| slot.gate)
            .unwrap_or_default()
    }

    /// Whether acquisition for `source` has finished (successfully or not)
    pub fn is_resolved(&self, source: &FontSource) -> bool {
        self.gate_state(source) == GateState::Done
    }

    /// The font serving `source`, if one was loaded. Under
    /// [`SlotPolicy::Single`] this is the process font whatever `source` is.
    pub fn font_for(&self, source: &FontSource) -> Option<Arc<FontFace>> {
        let key = self.slot_key(source);
        self.lock().slots.get(&key).and_then(|slot| slot.font.clone())
    }

    /// Make sure the slot for `source` has been acquired. Blocks; call it from
    /// a worker (see [`ensure_loaded_async`](Self::ensure_loaded_async)).
    ///
    /// At most one caller per slot performs I/O; everyone else either sees a
    /// settled slot immediately or waits for the winner.
    pub fn ensure_loaded(&self, source: &FontSource) -> LoadOutcome {
        let key = self.slot_key(source);

        let mut state = self.lock();
        loop {
            let slot = state.slots.entry(key.clone()).or_default();
            if slot.font.is_some() {
                return LoadOutcome::AlreadyLoaded;
            }
            match slot.gate {
                GateState::Idle => {
                    slot.gate = GateState::InFlight;
                    break;
                }
                GateState::Done => return LoadOutcome::Unavailable,
                GateState::InFlight => {
                    state = self
                        .settled
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
        drop(state);

        // We won the gate. The guard settles it even if loading panics, so
        // waiters are never stranded by a crashed worker.
        let mut gate = GateGuard {
            cache: self,
            release_on_miss: key == SlotKey::Process && !source.is_network(),
            key,
            font: None,
        };
        match self.load(source) {
            Ok(face) => {
                tracing::debug!("font ready: {:?} ({})", source, face.family_name());
                gate.font = Some(Arc::new(face));
                LoadOutcome::Loaded
            }
            Err(e) => {
                tracing::warn!("font acquisition failed for {:?}: {}", source, e);
                LoadOutcome::Unavailable
            }
        }
    }

    /// Fire-and-return form of [`ensure_loaded`](Self::ensure_loaded): the
    /// acquisition runs on the handoff's workers and `on_ready` receives the
    /// outcome on the handoff's home thread. A panicking acquisition reports
    /// [`LoadOutcome::Unavailable`].
    pub fn ensure_loaded_async<R>(
        self: &Arc<Self>,
        source: FontSource,
        handoff: &AsyncHandoff,
        on_ready: R,
    ) where
        R: FnOnce(LoadOutcome) + 'static,
    {
        let cache = Arc::clone(self);
        handoff.run_then_notify(
            move || cache.ensure_loaded(&source),
            move |result| {
                let outcome = result.unwrap_or_else(|e| {
                    tracing::warn!("font acquisition did not finish: {}", e);
                    LoadOutcome::Unavailable
                });
                on_ready(outcome);
            },
        );
    }

    /// Start acquiring `source` ahead of the first render, with nobody
    /// waiting for the result.
    pub fn prefetch(self: &Arc<Self>, source: FontSource, workers: &WorkerPool) {
        let cache = Arc::clone(self);
        workers.spawn(move || {
            let outcome = cache.ensure_loaded(&source);
            tracing::debug!("prefetch of {:?} finished: {:?}", source, outcome);
        });
    }

    fn load(&self, source: &FontSource) -> Result<FontFace> {
        match source {
            FontSource::Network { url, .. } => {
                let path = self.download(url)?;
                parse_font_file(path)
            }
            FontSource::File(path) => parse_font_file(path.clone()),
            FontSource::Asset(path) => parse_font_file(self.config.asset_root.join(path)),
        }
    }

    /// Stream `url` into `<storage_dir>/<md5(url)>`
    fn download(&self, url: &str) -> Result<PathBuf> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let started = Instant::now();

        std::fs::create_dir_all(&self.config.storage_dir)?;
        let path = self.config.storage_dir.join(CacheKey::for_url(url));

        let mut reader = self.fetcher.open(url)?;
        let written = match stream_to_file(reader.as_mut(), &path, self.config.buffer_size) {
            Ok(n) => n,
            Err(source) => {
                // Do not leave a truncated font behind
                let _ = std::fs::remove_file(&path);
                return Err(LoadError::Fetch {
                    url: url.to_string(),
                    source,
                });
            }
        };

        tracing::debug!(
            "Time to download font file({}): {}ms, {} bytes",
            url,
            started.elapsed().as_millis(),
            written
        );
        Ok(path)
    }
}

fn parse_font_file(path: PathBuf) -> Result<FontFace> {
    FontFace::from_file(&path).map_err(|source| LoadError::BadResource { path, source })
}

/// Settles a won gate and wakes all waiters when dropped
struct GateGuard<'a> {
    cache: &'a FontCache,
    key: SlotKey,
    font: Option<Arc<FontFace>>,
    /// Return the gate to `Idle` instead of `Done` when no font was obtained
    release_on_miss: bool,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.cache.lock();
        let slot = state.slots.entry(self.key.clone()).or_default();
        slot.font = self.font.take();
        slot.gate = if slot.font.is_none() && self.release_on_miss {
            GateState::Idle
        } else {
            GateState::Done
        };
        drop(state);
        self.cache.settled.notify_all();
    }
}
