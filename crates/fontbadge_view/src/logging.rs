//! Debug logging switch
//!
//! Badges log through `tracing`; nothing is printed unless the host installs
//! a subscriber or calls [`enable_debugging`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "fontbadge_view=debug,fontbadge_loader=debug,fontbadge_text=debug";

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);
static SUBSCRIBER: Once = Once::new();

/// Turn draw-time indicators and debug output on or off for every badge.
///
/// The first time it is enabled, a `fmt` subscriber is installed (filtered
/// by `RUST_LOG` when set). A host that already installed its own global
/// subscriber keeps it.
pub fn enable_debugging(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled {
        SUBSCRIBER.call_once(|| {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
            let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
        });
    }
}

pub fn debugging_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}
