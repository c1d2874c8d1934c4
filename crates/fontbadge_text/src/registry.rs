//! Fallback font registry
//!
//! Badges whose font never arrived (failed download, unreadable file) still
//! draw their glyph in a system face. fontdb discovers installed fonts once;
//! the sans-serif face it resolves is cached, including a failed lookup.

use crate::font::FontFace;
use crate::{Result, TextError};
use fontdb::{Database, Family, Query, Source, Stretch, Style, Weight};
use std::sync::{Arc, Mutex, OnceLock};

/// Font registry that discovers and caches system fonts
pub struct FontRegistry {
    /// fontdb database containing all system fonts
    db: Database,
    /// Resolved fallback (`Some(None)` = looked up, nothing found)
    fallback: Option<Option<Arc<FontFace>>>,
}

impl FontRegistry {
    /// Create a new font registry and load system fonts
    pub fn new() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("fontdb discovered {} system faces", db.len());

        Self {
            db,
            fallback: None,
        }
    }

    /// Registry over an explicit database (tests, sandboxed hosts)
    pub fn with_database(db: Database) -> Self {
        Self {
            db,
            fallback: None,
        }
    }

    /// Load the sans-serif fallback face, or any face at all
    pub fn load_fallback(&mut self) -> Result<Arc<FontFace>> {
        // Check cache first (includes a failed lookup as None)
        if let Some(cached) = &self.fallback {
            return cached
                .clone()
                .ok_or_else(|| TextError::FontLoadError("No fallback font (cached)".to_string()));
        }

        let query = Query {
            families: &[Family::SansSerif],
            weight: Weight::NORMAL,
            style: Style::Normal,
            stretch: Stretch::Normal,
        };

        // Any face at all beats drawing nothing
        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|face| face.id));

        let Some(id) = id else {
            self.fallback = Some(None);
            return Err(TextError::FontLoadError("No fallback font".to_string()));
        };

        match self.load_face_by_id(id) {
            Ok(face) => {
                let face = Arc::new(face);
                self.fallback = Some(Some(Arc::clone(&face)));
                Ok(face)
            }
            Err(e) => {
                tracing::warn!("Failed to load fallback font: {:?}", e);
                self.fallback = Some(None);
                Err(e)
            }
        }
    }

    /// Load a font face by fontdb ID
    fn load_face_by_id(&self, id: fontdb::ID) -> Result<FontFace> {
        let (src, face_index) = self
            .db
            .face_source(id)
            .ok_or_else(|| TextError::FontLoadError("Font source not found".to_string()))?;

        let data = match src {
            Source::File(path) => std::fs::read(&path).map_err(|e| {
                TextError::FontLoadError(format!("Failed to read font file {:?}: {}", path, e))
            })?,
            Source::Binary(arc) => arc.as_ref().as_ref().to_vec(),
            Source::SharedFile(_path, data) => data.as_ref().as_ref().to_vec(),
        };

        FontFace::from_data_with_index(data, face_index)
    }

    /// Number of faces fontdb knows about
    pub fn face_count(&self) -> usize {
        self.db.len()
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global shared font registry singleton.
static GLOBAL_FONT_REGISTRY: OnceLock<Arc<Mutex<FontRegistry>>> = OnceLock::new();

/// Get the global shared font registry.
///
/// System font discovery walks the font directories, so every badge shares
/// one registry for the life of the process.
pub fn global_font_registry() -> Arc<Mutex<FontRegistry>> {
    Arc::clone(GLOBAL_FONT_REGISTRY.get_or_init(|| Arc::new(Mutex::new(FontRegistry::new()))))
}

/// The default face used when a badge has no font of its own.
pub fn fallback_face() -> Option<Arc<FontFace>> {
    let registry = global_font_registry();
    let mut reg = registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    reg.load_fallback().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_database_caches_the_miss() {
        let mut registry = FontRegistry::with_database(Database::new());
        assert_eq!(registry.face_count(), 0);

        let first = registry.load_fallback();
        assert!(first.is_err());

        // Second lookup is answered from the negative cache
        let second = registry.load_fallback().unwrap_err();
        assert!(second.to_string().contains("cached"));
    }

    #[test]
    fn test_fallback_is_shared() {
        let mut registry = FontRegistry::new();

        // System fonts may not be available in minimal CI environments
        let sans = registry.load_fallback();
        if sans.is_err() {
            println!("No system fonts available - skipping test (CI environment)");
            return;
        }

        let again = registry.load_fallback().unwrap();
        assert!(Arc::ptr_eq(&sans.unwrap(), &again));
    }
}
