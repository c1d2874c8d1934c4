//! Geometric primitives

use crate::path::Point;

/// A rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build from left/top/right/bottom edges
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the right and bottom edges are outside, so two
    /// rects sharing an edge never both claim the same pixel row.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// A circle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub const fn new(center: Point, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        (dx * dx + dy * dy) <= (self.radius * self.radius)
    }
}

/// A filled elliptical wedge ("pie slice") inscribed in `bounds`.
///
/// Angles are in degrees, measured clockwise from the positive x axis with y
/// pointing down, so `start = 180, sweep = 180` is the top half and
/// `start = 0, sweep = 180` is the bottom half.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArcSegment {
    pub bounds: Rect,
    pub start_angle: f32,
    pub sweep_angle: f32,
}

impl ArcSegment {
    pub const fn new(bounds: Rect, start_angle: f32, sweep_angle: f32) -> Self {
        Self {
            bounds,
            start_angle,
            sweep_angle,
        }
    }

    pub fn contains(&self, point: Point) -> bool {
        let rx = self.bounds.width / 2.0;
        let ry = self.bounds.height / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let c = self.bounds.center();
        let nx = (point.x - c.x) / rx;
        let ny = (point.y - c.y) / ry;
        if nx * nx + ny * ny > 1.0 {
            return false;
        }
        if self.sweep_angle.abs() >= 360.0 {
            return true;
        }

        // Clockwise angle in y-down space, normalized to 0..360
        let angle = ny.atan2(nx).to_degrees().rem_euclid(360.0);
        let (start, sweep) = if self.sweep_angle >= 0.0 {
            (self.start_angle, self.sweep_angle)
        } else {
            (self.start_angle + self.sweep_angle, -self.sweep_angle)
        };
        (angle - start).rem_euclid(360.0) <= sweep
    }
}
