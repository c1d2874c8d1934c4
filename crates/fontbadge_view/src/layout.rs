//! Glyph placement
//!
//! Centers the part of the glyph above the baseline inside the shape. All
//! integer steps truncate toward zero, and the result is a pure function of
//! its inputs.

use crate::shape::ShapeSpec;
use fontbadge_text::GlyphMetrics;

/// Where and how large to draw the glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Left end of the baseline
    pub draw_x: i32,
    /// Baseline y
    pub draw_y: f64,
    pub text_size: i32,
}

/// Text size for a shape of height `shape_height`
pub fn text_size(shape_height: i32, font_size_multiplier: f64) -> i32 {
    (shape_height as f64 * font_size_multiplier) as i32
}

/// Compute the glyph placement for a `shape_width` x `shape_height` badge.
///
/// `metrics` must have been measured at [`text_size`] for the same height.
/// A zero (or non-finite) ascent skips the baseline correction and uses the
/// unadjusted center. Offsets saturate at the `i32` range.
pub fn layout(
    metrics: &GlyphMetrics,
    shape_width: i32,
    shape_height: i32,
    spec: &ShapeSpec,
) -> GlyphPlacement {
    let mid_x = shape_width / 2;
    let mid_y = shape_height / 2;

    let draw_x = (mid_x - (metrics.measured_width as i32) / 2).saturating_add(spec.x_offset);

    let abs_ascent = (metrics.ascent as f64).abs();
    let abs_descent = (metrics.descent as f64).abs();
    let glyph_height = abs_ascent + abs_descent;

    let center = (mid_y as f64 + glyph_height / 2.0) as i32;

    let draw_y = if abs_ascent > 0.0 && abs_ascent.is_finite() {
        center as f64 * (1.0 - abs_descent / abs_ascent) + spec.y_offset as f64
    } else {
        tracing::debug!(
            "degenerate glyph metrics (ascent {}), using unadjusted center",
            metrics.ascent
        );
        center as f64 + spec.y_offset as f64
    };

    GlyphPlacement {
        draw_x,
        draw_y,
        text_size: text_size(shape_height, spec.font_size_multiplier),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeType;

    #[test]
    fn test_text_size_truncates() {
        assert_eq!(text_size(100, 1.0), 100);
        assert_eq!(text_size(99, 0.5), 49);
        assert_eq!(text_size(10, 0.75), 7);
    }

    #[test]
    fn test_offsets_shift_the_glyph() {
        let metrics = GlyphMetrics::new(-20.0, 5.0, 30.0);
        let mut spec = ShapeSpec::new(ShapeType::Square);
        let base = layout(&metrics, 100, 100, &spec);

        spec.x_offset = -4;
        spec.y_offset = 6;
        let moved = layout(&metrics, 100, 100, &spec);

        assert_eq!(moved.draw_x, base.draw_x - 4);
        assert_eq!(moved.draw_y, base.draw_y + 6.0);
    }

    #[test]
    fn test_extreme_offsets_do_not_overflow() {
        let metrics = GlyphMetrics::new(-20.0, 5.0, 30.0);
        let mut spec = ShapeSpec::new(ShapeType::Square);
        spec.x_offset = i32::MAX;
        spec.y_offset = i32::MAX;
        let placement = layout(&metrics, 100, 100, &spec);
        assert_eq!(placement.draw_x, i32::MAX);

        spec.x_offset = i32::MIN;
        let placement = layout(&GlyphMetrics::ZERO, 100, 100, &spec);
        assert_eq!(placement.draw_x, i32::MIN + 50);
        assert_eq!(placement.draw_y, 50.0 + i32::MAX as f64);
    }

    #[test]
    fn test_odd_width_truncates_before_halving() {
        // trunc(31.9) = 31, 31 / 2 = 15
        let metrics = GlyphMetrics::new(-10.0, 2.0, 31.9);
        let placement = layout(&metrics, 101, 50, &ShapeSpec::default());
        assert_eq!(placement.draw_x, 50 - 15);
    }
}
