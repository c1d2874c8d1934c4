//! Glyph placement tests

use fontbadge_text::GlyphMetrics;
use fontbadge_view::{layout, text_size, GlyphPlacement, ShapeSpec, ShapeType};

#[test]
fn test_reference_placement() {
    let metrics = GlyphMetrics::new(-20.0, 5.0, 30.0);
    let placement = layout(&metrics, 100, 100, &ShapeSpec::new(ShapeType::Square));

    assert_eq!(
        placement,
        GlyphPlacement {
            draw_x: 35,
            draw_y: 46.5,
            text_size: 100,
        }
    );
}

#[test]
fn test_placement_is_deterministic() {
    let metrics = GlyphMetrics::new(-37.3, 9.1, 41.7);
    let mut spec = ShapeSpec::new(ShapeType::Circle);
    spec.font_size_multiplier = 0.6;
    spec.x_offset = 2;
    spec.y_offset = -3;

    let first = layout(&metrics, 64, 48, &spec);
    for _ in 0..10 {
        assert_eq!(layout(&metrics, 64, 48, &spec), first);
    }
    assert_eq!(first.text_size, text_size(48, 0.6));
}

#[test]
fn test_zero_ascent_uses_unadjusted_center() {
    let mut spec = ShapeSpec::default();
    spec.y_offset = 4;

    let placement = layout(&GlyphMetrics::ZERO, 100, 80, &spec);

    assert_eq!(placement.draw_x, 50);
    assert_eq!(placement.draw_y, 44.0);
    assert!(placement.draw_y.is_finite());
}

#[test]
fn test_zero_ascent_with_descent_stays_finite() {
    let metrics = GlyphMetrics::new(0.0, 6.0, 10.0);
    let placement = layout(&metrics, 40, 40, &ShapeSpec::default());

    // center = trunc(20 + 6 / 2) = 23
    assert_eq!(placement.draw_y, 23.0);
}

#[test]
fn test_positive_ascent_is_treated_by_magnitude() {
    let up = layout(&GlyphMetrics::new(-20.0, 5.0, 30.0), 100, 100, &ShapeSpec::default());
    let flipped = layout(&GlyphMetrics::new(20.0, -5.0, 30.0), 100, 100, &ShapeSpec::default());
    assert_eq!(up, flipped);
}
