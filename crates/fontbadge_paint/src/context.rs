//! Paint context - the recording drawing surface

use crate::color::Color;
use crate::gradient::Gradient;
use crate::path::{Path, Point};
use crate::primitives::*;

/// Fill style for shapes
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Color(Color),
    Gradient(Gradient),
}

impl FillStyle {
    /// Resolve the paint color at a given pixel center
    pub fn color_at(&self, point: Point) -> Color {
        match self {
            FillStyle::Color(c) => *c,
            FillStyle::Gradient(g) => g.color_at(point),
        }
    }
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Color(color)
    }
}

impl From<Gradient> for FillStyle {
    fn from(gradient: Gradient) -> Self {
        FillStyle::Gradient(gradient)
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    /// Flood the whole surface (the canvas `drawColor` call)
    FillSurface {
        color: Color,
    },
    FillRect {
        rect: Rect,
        style: FillStyle,
    },
    FillCircle {
        circle: Circle,
        style: FillStyle,
    },
    /// Pie slice: the arc plus the two radii back to the center
    FillArc {
        arc: ArcSegment,
        style: FillStyle,
    },
    FillPath {
        path: Path,
        style: FillStyle,
    },
    /// `position` is the left end of the text baseline
    DrawText {
        text: String,
        position: Point,
        size: f32,
        color: Color,
    },
}

/// The paint context used for badge drawing
#[derive(Debug)]
pub struct PaintContext {
    width: f32,
    height: f32,
    commands: Vec<PaintCommand>,
}

impl PaintContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take ownership of recorded commands
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    // === Shape drawing ===

    pub fn fill_surface(&mut self, color: Color) {
        self.commands.push(PaintCommand::FillSurface { color });
    }

    pub fn fill_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: impl Into<FillStyle>,
    ) {
        self.commands.push(PaintCommand::FillRect {
            rect: Rect::new(x, y, width, height),
            style: style.into(),
        });
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, style: impl Into<FillStyle>) {
        self.commands.push(PaintCommand::FillCircle {
            circle: Circle::new(Point::new(cx, cy), radius),
            style: style.into(),
        });
    }

    pub fn fill_arc(
        &mut self,
        bounds: Rect,
        start_angle: f32,
        sweep_angle: f32,
        style: impl Into<FillStyle>,
    ) {
        self.commands.push(PaintCommand::FillArc {
            arc: ArcSegment::new(bounds, start_angle, sweep_angle),
            style: style.into(),
        });
    }

    // === Path drawing ===

    pub fn fill_path(&mut self, path: Path, style: impl Into<FillStyle>) {
        self.commands.push(PaintCommand::FillPath {
            path,
            style: style.into(),
        });
    }

    // === Text ===

    pub fn draw_text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(PaintCommand::DrawText {
            text: text.into(),
            position: Point::new(x, y),
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_recorded_in_order() {
        let mut ctx = PaintContext::new(10.0, 10.0);
        ctx.fill_surface(Color::RED);
        ctx.fill_circle(5.0, 5.0, 5.0, Color::BLUE);
        ctx.draw_text("A", 1.0, 8.0, 10.0, Color::BLACK);

        let cmds = ctx.take_commands();
        assert_eq!(cmds.len(), 3);
        assert!(matches!(cmds[0], PaintCommand::FillSurface { .. }));
        assert!(matches!(cmds[1], PaintCommand::FillCircle { .. }));
        assert!(matches!(cmds[2], PaintCommand::DrawText { .. }));
        assert!(ctx.commands().is_empty());
    }
}
