//! Font handling for fontbadge
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser)
//! - Glyph metrics and single-line text measurement (no shaping)
//! - Glyph rasterization (swash)
//! - A system fallback font, discovered through fontdb

pub mod font;
pub mod rasterizer;
pub mod registry;

pub use font::{FontFace, GlyphMetrics, PositionedGlyph};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use registry::{fallback_face, global_font_registry, FontRegistry};

// Re-export html-escape for entity decoding
pub use html_escape::decode_html_entities;

use thiserror::Error;

/// Text rendering errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid font data")]
    InvalidFontData,
}

pub type Result<T> = std::result::Result<T, TextError>;
