//! CPU replay of recorded paint commands
//!
//! Shapes are sampled once per pixel at the pixel center (no anti-aliasing).
//! Glyphs are tinted swash coverage masks. Everything composites source-over
//! onto a transparent canvas.

use fontbadge_paint::{Color, FillStyle, PaintCommand, Point, Rect};
use fontbadge_text::{FontFace, GlyphRasterizer};
use image::{Rgba, RgbaImage};

/// Render `commands` into a `width` x `height` image.
///
/// Text commands are skipped when `font` is `None`.
pub fn render_to_image(
    commands: &[PaintCommand],
    width: u32,
    height: u32,
    font: Option<&FontFace>,
) -> RgbaImage {
    let mut canvas = RgbaImage::new(width, height);
    let mut rasterizer = GlyphRasterizer::new();

    for command in commands {
        match command {
            PaintCommand::FillSurface { color } => {
                for pixel in canvas.pixels_mut() {
                    blend(pixel, *color, 1.0);
                }
            }
            PaintCommand::FillRect { rect, style } => {
                fill_where(&mut canvas, *rect, style, |p| rect.contains(p));
            }
            PaintCommand::FillCircle { circle, style } => {
                let r = circle.radius;
                let bounds = Rect::new(circle.center.x - r, circle.center.y - r, r * 2.0, r * 2.0);
                fill_where(&mut canvas, bounds, style, |p| circle.contains(p));
            }
            PaintCommand::FillArc { arc, style } => {
                fill_where(&mut canvas, arc.bounds, style, |p| arc.contains(p));
            }
            PaintCommand::FillPath { path, style } => {
                if let Some(bounds) = path_bounds(&path.polygons()) {
                    fill_where(&mut canvas, bounds, style, |p| path.contains(p));
                }
            }
            PaintCommand::DrawText {
                text,
                position,
                size,
                color,
            } => {
                if let Some(font) = font {
                    draw_text(&mut canvas, &mut rasterizer, font, text, *position, *size, *color);
                }
            }
        }
    }

    canvas
}

/// Paint every pixel in `bounds` whose center satisfies `inside`
fn fill_where(
    canvas: &mut RgbaImage,
    bounds: Rect,
    style: &FillStyle,
    inside: impl Fn(Point) -> bool,
) {
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, bounds) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if inside(center) {
                blend(canvas.get_pixel_mut(x, y), style.color_at(center), 1.0);
            }
        }
    }
}

/// Pixel rows/columns touched by `bounds`, clipped to the canvas
fn pixel_span(canvas: &RgbaImage, bounds: Rect) -> Option<(u32, u32, u32, u32)> {
    let clip = |v: f32, max: u32| v.max(0.0).min(max as f32) as u32;
    let x0 = clip(bounds.x.floor(), canvas.width());
    let y0 = clip(bounds.y.floor(), canvas.height());
    let x1 = clip(bounds.right().ceil(), canvas.width());
    let y1 = clip(bounds.bottom().ceil(), canvas.height());
    (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
}

fn path_bounds(polygons: &[Vec<Point>]) -> Option<Rect> {
    let mut points = polygons.iter().flatten();
    let first = points.next()?;
    let (mut min, mut max) = (*first, *first);
    for p in points {
        min = Point::new(min.x.min(p.x), min.y.min(p.y));
        max = Point::new(max.x.max(p.x), max.y.max(p.y));
    }
    Some(Rect::from_ltrb(min.x, min.y, max.x, max.y))
}

fn draw_text(
    canvas: &mut RgbaImage,
    rasterizer: &mut GlyphRasterizer,
    font: &FontFace,
    text: &str,
    baseline_origin: Point,
    size: f32,
    color: Color,
) {
    let origin_x = baseline_origin.x.round() as i64;
    let baseline = baseline_origin.y.round() as i64;

    for glyph in font.glyph_run(text, size) {
        let mask = match rasterizer.rasterize(font, glyph.glyph_id, size) {
            Ok(mask) => mask,
            Err(e) => {
                tracing::warn!("failed to rasterize glyph {}: {}", glyph.glyph_id, e);
                continue;
            }
        };
        if mask.is_empty() {
            continue;
        }

        let left = origin_x + glyph.x.round() as i64 + mask.bearing_x as i64;
        let top = baseline - mask.bearing_y as i64;
        for gy in 0..mask.height {
            for gx in 0..mask.width {
                let coverage = mask.coverage(gx, gy);
                if coverage == 0 {
                    continue;
                }
                let x = left + gx as i64;
                let y = top + gy as i64;
                if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
                    continue;
                }
                blend(
                    canvas.get_pixel_mut(x as u32, y as u32),
                    color,
                    coverage as f32 / 255.0,
                );
            }
        }
    }
}

/// Source-over `src` onto `dst`, with `src` alpha scaled by `coverage`
fn blend(dst: &mut Rgba<u8>, src: Color, coverage: f32) {
    let sa = (src.a * coverage).clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: f32, d: f32| (s * sa + d * da * (1.0 - sa)) / out_a;
    let out = Color::new(mix(src.r, dr), mix(src.g, dg), mix(src.b, db), out_a);
    *dst = Rgba(out.to_rgba8());
}
