//! Font source classification and cache filenames

use crate::cache::FontCache;
use crate::error::{LoadError, Result};
use crate::source::FontSource;
use std::fmt;

/// Local filename of a downloaded font: lowercase hex MD5 of the URL bytes.
///
/// No normalization happens first, so `https://a/x.ttf?v=1` and
/// `https://a/x.ttf?v=2` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn for_url(url: &str) -> Self {
        Self(format!("{:x}", md5::compute(url.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::path::Path> for CacheKey {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

/// What a render has to do before it can draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// A background acquisition must finish first
    pub needs_async_fetch: bool,
    /// Filename under the storage directory (network sources only)
    pub cache_key: Option<CacheKey>,
}

/// Classifies a font request against the current cache state
pub struct FontSourceResolver<'a> {
    cache: &'a FontCache,
}

impl<'a> FontSourceResolver<'a> {
    pub fn new(cache: &'a FontCache) -> Self {
        Self { cache }
    }

    /// Fails with [`LoadError::InvalidSource`] when no source was configured.
    pub fn resolve(&self, source: Option<&FontSource>) -> Result<Resolution> {
        let source = source.ok_or(LoadError::InvalidSource)?;
        match source {
            FontSource::Network { url, .. } => Ok(Resolution {
                needs_async_fetch: !self.cache.is_resolved(source),
                cache_key: Some(CacheKey::for_url(url)),
            }),
            // Local loads are assumed fast
            FontSource::File(_) | FontSource::Asset(_) => Ok(Resolution {
                needs_async_fetch: false,
                cache_key: None,
            }),
        }
    }
}
