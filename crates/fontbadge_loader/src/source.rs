//! Font source types

use std::path::PathBuf;

/// Where a badge's font comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontSource {
    /// Download once per process and cache under the storage directory
    Network {
        url: String,
        /// Whether the host asked for a secure connection; the URL scheme
        /// decides the actual transport
        https: bool,
    },

    /// Load from a file path
    File(PathBuf),

    /// Load from the application's bundled assets (relative to the asset root)
    Asset(PathBuf),
}

impl FontSource {
    /// Create a network source
    pub fn network(url: impl Into<String>, https: bool) -> Self {
        Self::Network {
            url: url.into(),
            https,
        }
    }

    /// Create a file source
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Create an asset source
    pub fn asset(path: impl Into<PathBuf>) -> Self {
        Self::Asset(path.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Parse a resource URI string into a FontSource
    ///
    /// Supported formats:
    /// - `http://...` or `https://...` - network
    /// - `asset://fonts/icons.ttf` - bundled asset
    /// - `file:///path/to/font.ttf` - file path
    /// - `/path/to/font.ttf` - treated as file path
    pub fn from_uri(uri: &str) -> Self {
        if uri.starts_with("https://") {
            Self::network(uri, true)
        } else if uri.starts_with("http://") {
            Self::network(uri, false)
        } else if let Some(path) = uri.strip_prefix("asset://") {
            Self::Asset(PathBuf::from(path))
        } else if let Some(path) = uri.strip_prefix("file://") {
            Self::File(PathBuf::from(path))
        } else {
            Self::File(PathBuf::from(uri))
        }
    }
}

impl From<&str> for FontSource {
    fn from(s: &str) -> Self {
        Self::from_uri(s)
    }
}

impl From<String> for FontSource {
    fn from(s: String) -> Self {
        Self::from_uri(&s)
    }
}

impl From<PathBuf> for FontSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri_classification() {
        assert_eq!(
            FontSource::from_uri("https://cdn.example.com/a.ttf"),
            FontSource::network("https://cdn.example.com/a.ttf", true)
        );
        assert_eq!(
            FontSource::from_uri("http://cdn.example.com/a.ttf"),
            FontSource::network("http://cdn.example.com/a.ttf", false)
        );
        assert_eq!(
            FontSource::from_uri("asset://fonts/icons.ttf"),
            FontSource::asset("fonts/icons.ttf")
        );
        assert_eq!(
            FontSource::from_uri("file:///tmp/a.ttf"),
            FontSource::file("/tmp/a.ttf")
        );
        assert_eq!(FontSource::from("/tmp/a.ttf"), FontSource::file("/tmp/a.ttf"));
    }
}
