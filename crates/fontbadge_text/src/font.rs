//! Parsed font faces and glyph measurement
//!
//! A [`FontFace`] owns the raw font bytes and re-parses the ttf-parser view on
//! demand; parsing a face is just table-directory bookkeeping, so it is cheap
//! enough to do per measurement.

use crate::{Result, TextError};
use std::path::Path;
use std::sync::Arc;
use ttf_parser::{Face, GlyphId};

/// Vertical extents and advance width of a string under one font and size.
///
/// `ascent` and `descent` are signed distances from the baseline in a y-down
/// coordinate space: ascent is negative (above the baseline), descent is
/// positive (below it). They come from the font's global bounding box, so
/// every character of a face reports the same extents.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub measured_width: f32,
}

impl GlyphMetrics {
    /// Metrics reported when no font is available at all
    pub const ZERO: GlyphMetrics = GlyphMetrics {
        ascent: 0.0,
        descent: 0.0,
        measured_width: 0.0,
    };

    pub fn new(ascent: f32, descent: f32, measured_width: f32) -> Self {
        Self {
            ascent,
            descent,
            measured_width,
        }
    }
}

/// A glyph placed on a single line, relative to the line origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    pub glyph_id: u16,
    /// Pen position (pixels) of this glyph's origin
    pub x: f32,
}

/// A loaded, validated font face
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    face_index: u32,
    family_name: String,
    units_per_em: u16,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("face_index", &self.face_index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl FontFace {
    /// Parse the first face of a font file already in memory
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    /// Parse a specific face of a font collection
    pub fn from_data_with_index(data: Vec<u8>, face_index: u32) -> Result<Self> {
        let (family_name, units_per_em) = {
            let face = Face::parse(&data, face_index)
                .map_err(|e| TextError::FontParseError(e.to_string()))?;
            if face.units_per_em() == 0 || face.number_of_glyphs() == 0 {
                return Err(TextError::InvalidFontData);
            }
            (read_family_name(&face), face.units_per_em())
        };

        Ok(Self {
            data: Arc::new(data),
            face_index,
            family_name,
            units_per_em,
        })
    }

    /// Read and parse a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| TextError::FontLoadError(format!("{}: {}", path.display(), e)))?;
        Self::from_data(data)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn face(&self) -> Face<'_> {
        // Validated in the constructor
        Face::parse(&self.data, self.face_index).expect("font data validated at load time")
    }

    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face().glyph_index(c).map(|id| id.0)
    }

    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).is_some()
    }

    /// Pixels per font unit at `font_size`
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em as f32
    }

    /// Lay out `text` on one line: one glyph per char, advancing by each
    /// glyph's horizontal advance. Missing characters map to glyph 0.
    pub fn glyph_run(&self, text: &str, font_size: f32) -> Vec<PositionedGlyph> {
        let face = self.face();
        let scale = self.scale(font_size);
        let mut pen = 0.0f32;
        let mut out = Vec::with_capacity(text.len());
        for c in text.chars() {
            let id = face.glyph_index(c).unwrap_or(GlyphId(0));
            out.push(PositionedGlyph { glyph_id: id.0, x: pen });
            pen += face.glyph_hor_advance(id).unwrap_or(0) as f32 * scale;
        }
        out
    }

    /// Advance width of `text` at `font_size`
    pub fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        let face = self.face();
        let scale = self.scale(font_size);
        text.chars()
            .map(|c| {
                let id = face.glyph_index(c).unwrap_or(GlyphId(0));
                face.glyph_hor_advance(id).unwrap_or(0) as f32 * scale
            })
            .sum()
    }

    /// Extents and width of `text` at `font_size`
    pub fn glyph_metrics(&self, text: &str, font_size: f32) -> GlyphMetrics {
        let face = self.face();
        let scale = self.scale(font_size);
        let bbox = face.global_bounding_box();
        GlyphMetrics {
            ascent: -(bbox.y_max as f32) * scale,
            descent: -(bbox.y_min as f32) * scale,
            measured_width: self.measure_text(text, font_size),
        }
    }
}

fn read_family_name(face: &Face<'_>) -> String {
    face.names()
        .into_iter()
        .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
        .find_map(|name| name.to_string())
        .unwrap_or_default()
}
