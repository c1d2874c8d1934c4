//! Path building and representation

use smallvec::SmallVec;

/// A 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Path command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// How overlapping sub-paths decide what is inside
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// A 2D polygonal path composed of commands
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: SmallVec<[PathCommand; 16]>,
    fill_rule: FillRule,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Flatten into closed polygons (one per sub-path)
    pub fn polygons(&self) -> Vec<Vec<Point>> {
        let mut out = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if current.len() > 2 {
                        out.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::Close => {
                    if current.len() > 2 {
                        out.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }
        if current.len() > 2 {
            out.push(current);
        }
        out
    }

    /// Point-in-polygon test honoring the fill rule
    pub fn contains(&self, point: Point) -> bool {
        let mut winding = 0i32;
        let mut crossings = 0u32;
        for poly in self.polygons() {
            let n = poly.len();
            for i in 0..n {
                let a = poly[i];
                let b = poly[(i + 1) % n];
                if (a.y <= point.y) != (b.y <= point.y) {
                    let t = (point.y - a.y) / (b.y - a.y);
                    let x = a.x + t * (b.x - a.x);
                    if point.x < x {
                        crossings += 1;
                        winding += if b.y > a.y { 1 } else { -1 };
                    }
                }
            }
        }
        match self.fill_rule {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => crossings % 2 == 1,
        }
    }
}

/// Builder for constructing paths
///
/// Like a canvas path, the pen starts at the origin, so a path that begins
/// with `line_to` implicitly starts at (0, 0).
pub struct PathBuilder {
    path: Path,
    current: Point,
}

impl PathBuilder {
    pub fn new() -> Self {
        let mut path = Path::new();
        path.commands.push(PathCommand::MoveTo(Point::ZERO));
        Self {
            path,
            current: Point::ZERO,
        }
    }

    pub fn fill_rule(mut self, rule: FillRule) -> Self {
        self.path.fill_rule = rule;
        self
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        // Replace a dangling move so empty sub-paths do not accumulate
        if let Some(PathCommand::MoveTo(_)) = self.path.commands.last() {
            self.path.commands.pop();
        }
        self.path.commands.push(PathCommand::MoveTo(point));
        self.current = point;
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        self.path.commands.push(PathCommand::LineTo(point));
        self.current = point;
        self
    }

    pub fn close(mut self) -> Self {
        self.path.commands.push(PathCommand::Close);
        self
    }

    pub fn current(&self) -> Point {
        self.current
    }

    pub fn build(self) -> Path {
        self.path
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::new()
    }
}
