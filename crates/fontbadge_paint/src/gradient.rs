//! Gradient fills

use crate::color::Color;
use crate::path::Point;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

/// What a gradient does past its start and end points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileMode {
    /// Extend the edge colors
    #[default]
    Clamp,
    /// Restart the gradient from the first stop
    Repeat,
}

/// Gradient type
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
        tile_mode: TileMode,
    },
}

impl Gradient {
    /// Create a simple linear gradient between two colors
    pub fn linear_simple(
        start: Point,
        end: Point,
        from: Color,
        to: Color,
        tile_mode: TileMode,
    ) -> Self {
        Gradient::Linear {
            start,
            end,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
            tile_mode,
        }
    }

    /// Top-to-bottom gradient spanning `0..height` at horizontal position `x`
    pub fn vertical(x: f32, height: f32, top: Color, bottom: Color, tile_mode: TileMode) -> Self {
        Self::linear_simple(
            Point::new(x, 0.0),
            Point::new(x, height),
            top,
            bottom,
            tile_mode,
        )
    }

    /// Sample the gradient at a point
    pub fn color_at(&self, point: Point) -> Color {
        match self {
            Gradient::Linear {
                start,
                end,
                stops,
                tile_mode,
            } => {
                let dx = end.x - start.x;
                let dy = end.y - start.y;
                let len_sq = dx * dx + dy * dy;
                let t = if len_sq == 0.0 {
                    0.0
                } else {
                    ((point.x - start.x) * dx + (point.y - start.y) * dy) / len_sq
                };
                sample_stops(stops, tile(t, *tile_mode))
            }
        }
    }
}

fn tile(t: f32, mode: TileMode) -> f32 {
    match mode {
        TileMode::Clamp => t.clamp(0.0, 1.0),
        TileMode::Repeat => t.rem_euclid(1.0),
    }
}

fn sample_stops(stops: &[GradientStop], t: f32) -> Color {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Color::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            let local = if span <= 0.0 { 1.0 } else { (t - a.offset) / span };
            return a.color.lerp(b.color, local);
        }
    }
    last.color
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_gradient_midpoint() {
        let g = Gradient::vertical(50.0, 100.0, Color::BLACK, Color::WHITE, TileMode::Clamp);
        assert_eq!(g.color_at(Point::new(0.0, 0.0)), Color::BLACK);
        assert_eq!(g.color_at(Point::new(99.0, 50.0)).to_rgba8(), [128, 128, 128, 255]);
        assert_eq!(g.color_at(Point::new(50.0, 250.0)), Color::WHITE);
    }

    #[test]
    fn test_repeat_tiling_wraps() {
        let g = Gradient::vertical(0.0, 100.0, Color::BLACK, Color::WHITE, TileMode::Repeat);
        assert_eq!(
            g.color_at(Point::new(0.0, 125.0)),
            g.color_at(Point::new(0.0, 25.0))
        );
    }
}
