//! Background shapes and glyph drawing
//!
//! Records the badge onto a [`PaintContext`] in painter's order: outer fill,
//! background shape(s), then the glyph.

use crate::layout::GlyphPlacement;
use crate::shape::{ShapeSpec, ShapeType};
use fontbadge_paint::{Color, Gradient, PaintContext, Rect, TileMode};

/// Glyph color when no foreground color is set
pub const DEFAULT_FOREGROUND: Color = Color::BLACK;

/// Start angle of the upper half circle (clockwise degrees, y down)
const HALF_CIRCLE_TOP_START: f32 = 180.0;
const HALF_CIRCLE_BOTTOM_START: f32 = 0.0;
const HALF_CIRCLE_SWEEP: f32 = 180.0;

/// Extra height on the upper half so the two halves overlap at the seam
const SEAM_OVERLAP: f32 = 2.0;

/// Paint the background for a `width` x `height` badge
pub fn composite(surface: &mut PaintContext, spec: &ShapeSpec, width: i32, height: i32) {
    match spec.shape {
        ShapeType::Square => composite_square(surface, spec, width, height),
        ShapeType::Circle => composite_circle(surface, spec, width, height),
    }
}

fn composite_square(surface: &mut PaintContext, spec: &ShapeSpec, width: i32, height: i32) {
    let (w, h) = (width as f32, height as f32);
    let mid_y = (height / 2) as f32;

    let Some(bottom) = spec.bottom_half_color else {
        if let Some(background) = spec.background_color {
            surface.fill_surface(background);
        }
        return;
    };

    if let Some(gradient) = background_gradient(spec, width, height) {
        surface.fill_rect(0.0, 0.0, w, h, gradient);
        return;
    }

    if let Some(background) = spec.background_color {
        surface.fill_rect(0.0, 0.0, w, mid_y, background);
    }
    surface.fill_rect(0.0, mid_y, w, h - mid_y, bottom);
}

fn composite_circle(surface: &mut PaintContext, spec: &ShapeSpec, width: i32, height: i32) {
    let (w, h) = (width as f32, height as f32);
    let mid_x = (width / 2) as f32;
    let mid_y = (height / 2) as f32;

    if let Some(outer) = spec.outer_color {
        surface.fill_surface(outer);
    }

    let Some(bottom) = spec.bottom_half_color else {
        if let Some(background) = spec.background_color {
            surface.fill_circle(mid_x, mid_y, mid_x, background);
        }
        return;
    };

    if let Some(gradient) = background_gradient(spec, width, height) {
        surface.fill_circle(mid_x, mid_y, mid_x, gradient);
        return;
    }

    if let Some(background) = spec.background_color {
        surface.fill_arc(
            Rect::from_ltrb(0.0, 0.0, w, h + SEAM_OVERLAP),
            HALF_CIRCLE_TOP_START,
            HALF_CIRCLE_SWEEP,
            background,
        );
    }
    surface.fill_arc(
        Rect::from_ltrb(0.0, 0.0, w, h),
        HALF_CIRCLE_BOTTOM_START,
        HALF_CIRCLE_SWEEP,
        bottom,
    );
}

/// Vertical background-to-bottom gradient through the horizontal center
fn background_gradient(spec: &ShapeSpec, width: i32, height: i32) -> Option<Gradient> {
    if !spec.uses_gradient() {
        return None;
    }
    let top = spec.background_color?;
    let bottom = spec.bottom_half_color?;
    Some(Gradient::vertical(
        (width / 2) as f32,
        height as f32,
        top,
        bottom,
        TileMode::Repeat,
    ))
}

/// Draw `text` at `placement` in the foreground color
pub fn draw_glyph(
    surface: &mut PaintContext,
    text: &str,
    placement: &GlyphPlacement,
    spec: &ShapeSpec,
) {
    surface.draw_text(
        text,
        placement.draw_x as f32,
        placement.draw_y as f32,
        placement.text_size as f32,
        spec.foreground_color.unwrap_or(DEFAULT_FOREGROUND),
    );
}
