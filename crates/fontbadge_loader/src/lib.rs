//! fontbadge loader
//!
//! Getting a font into memory, exactly once.
//!
//! # Features
//!
//! - Font sources: network URL, local file, bundled asset
//! - MD5-derived cache filenames for downloaded fonts
//! - A process-wide, single-flight [`FontCache`]: concurrent requests share
//!   one download, download failures are final for the process run
//! - [`AsyncHandoff`]: run acquisition on a worker pool and deliver the
//!   outcome back on the component's home thread
//!
//! # Example
//!
//! ```ignore
//! use fontbadge_loader::{AsyncHandoff, FontCache, FontSource, WorkerPool};
//!
//! let handoff = AsyncHandoff::new(WorkerPool::global().clone());
//! let cache = FontCache::global();
//! cache.ensure_loaded_async(
//!     FontSource::network("https://example.com/icons.ttf", true),
//!     &handoff,
//!     |outcome| println!("font ready: {outcome:?}"),
//! );
//! // ...later, on the same thread
//! handoff.dispatch_pending();
//! ```

mod cache;
mod config;
mod error;
mod fetch;
mod handoff;
mod resolver;
mod source;

pub use cache::{FontCache, GateState, LoadOutcome};
pub use config::{LoaderConfig, SlotPolicy, DEFAULT_BUFFER_SIZE};
pub use error::{LoadError, Result};
pub use fetch::{stream_to_file, FontFetcher, HttpFetcher};
pub use handoff::{AsyncHandoff, WorkerPool};
pub use resolver::{CacheKey, FontSourceResolver, Resolution};
pub use source::FontSource;
