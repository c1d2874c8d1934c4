//! Badge shape and decoration settings

use fontbadge_paint::Color;

/// Outline of the badge background
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShapeType {
    #[default]
    Square,
    Circle,
}

/// Everything that decides how a badge background and glyph are painted.
///
/// Absent colors are not painted at all.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSpec {
    pub shape: ShapeType,
    pub foreground_color: Option<Color>,
    pub background_color: Option<Color>,
    /// Fill outside the circle (circles only)
    pub outer_color: Option<Color>,
    /// Lower half of a split background, or the far end of the gradient
    pub bottom_half_color: Option<Color>,
    pub has_gradient: bool,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Glyph size relative to the shape height
    pub font_size_multiplier: f64,
}

impl Default for ShapeSpec {
    fn default() -> Self {
        Self {
            shape: ShapeType::default(),
            foreground_color: None,
            background_color: None,
            outer_color: None,
            bottom_half_color: None,
            has_gradient: false,
            x_offset: 0,
            y_offset: 0,
            font_size_multiplier: 1.0,
        }
    }
}

impl ShapeSpec {
    pub fn new(shape: ShapeType) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// The gradient only applies when it has both ends
    pub fn uses_gradient(&self) -> bool {
        self.has_gradient && self.background_color.is_some() && self.bottom_half_color.is_some()
    }

    /// Clear the four colors and the gradient flag. Shape, offsets and the
    /// size multiplier are kept.
    pub fn reset_decorators(&mut self) {
        self.foreground_color = None;
        self.background_color = None;
        self.outer_color = None;
        self.bottom_half_color = None;
        self.has_gradient = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_needs_both_colors() {
        let mut spec = ShapeSpec::new(ShapeType::Square);
        spec.has_gradient = true;
        spec.bottom_half_color = Some(Color::BLUE);
        assert!(!spec.uses_gradient());

        spec.background_color = Some(Color::RED);
        assert!(spec.uses_gradient());
    }

    #[test]
    fn test_reset_keeps_geometry() {
        let mut spec = ShapeSpec::new(ShapeType::Circle);
        spec.foreground_color = Some(Color::WHITE);
        spec.outer_color = Some(Color::BLACK);
        spec.has_gradient = true;
        spec.x_offset = 3;
        spec.font_size_multiplier = 0.5;

        spec.reset_decorators();

        assert_eq!(spec.foreground_color, None);
        assert_eq!(spec.outer_color, None);
        assert!(!spec.has_gradient);
        assert_eq!(spec.shape, ShapeType::Circle);
        assert_eq!(spec.x_offset, 3);
        assert_eq!(spec.font_size_multiplier, 0.5);
    }
}
