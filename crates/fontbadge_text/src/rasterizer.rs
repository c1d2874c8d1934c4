//! Glyph rasterization using swash
//!
//! Converts font glyph outlines to 8-bit coverage masks that the badge
//! rasterizer tints with the foreground color.

use crate::font::FontFace;
use crate::{Result, TextError};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

/// Rasterized glyph coverage mask with placement
#[derive(Debug, Clone)]
pub struct RasterizedGlyph {
    /// One coverage byte per pixel, row-major
    pub bitmap: Vec<u8>,
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Horizontal bearing (offset from origin to left edge)
    pub bearing_x: i32,
    /// Vertical bearing (offset from baseline up to top edge)
    pub bearing_y: i32,
}

impl RasterizedGlyph {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Coverage at a bitmap coordinate (0 outside the mask)
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.bitmap
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// Glyph rasterizer using swash
pub struct GlyphRasterizer {
    /// Swash scale context (caches scaling state)
    scale_context: ScaleContext,
}

impl GlyphRasterizer {
    /// Create a new glyph rasterizer
    pub fn new() -> Self {
        Self {
            scale_context: ScaleContext::new(),
        }
    }

    /// Rasterize a glyph at the given font size
    pub fn rasterize(
        &mut self,
        font: &FontFace,
        glyph_id: u16,
        font_size: f32,
    ) -> Result<RasterizedGlyph> {
        let swash_font = swash::FontRef::from_index(font.data(), font.face_index() as usize)
            .ok_or(TextError::InvalidFontData)?;

        let mut scaler = self
            .scale_context
            .builder(swash_font)
            .size(font_size)
            .build();

        let mut render = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ]);
        render.format(Format::Alpha);

        match render.render(&mut scaler, glyph_id) {
            Some(img) => Ok(RasterizedGlyph {
                bitmap: to_coverage(img.data, img.placement.width, img.placement.height),
                width: img.placement.width,
                height: img.placement.height,
                bearing_x: img.placement.left,
                bearing_y: img.placement.top,
            }),
            // Empty glyph (like space)
            None => Ok(RasterizedGlyph {
                bitmap: Vec::new(),
                width: 0,
                height: 0,
                bearing_x: 0,
                bearing_y: 0,
            }),
        }
    }
}

/// Color sources come back as RGBA; keep only their alpha so every glyph is
/// tinted uniformly with the badge foreground.
fn to_coverage(data: Vec<u8>, width: u32, height: u32) -> Vec<u8> {
    let pixels = (width * height) as usize;
    if pixels > 0 && data.len() == pixels * 4 {
        data.chunks_exact(4).map(|px| px[3]).collect()
    } else {
        data
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
