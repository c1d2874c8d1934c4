//! fontbadge paint surface
//!
//! A small 2D drawing API, in the spirit of an HTML Canvas, that records what a
//! badge wants drawn instead of drawing it right away.
//!
//! # Features
//!
//! - Solid surface fills and rectangle fills
//! - Circles and pie-slice arcs (used for split circular badges)
//! - Vertical/horizontal linear gradients with clamp, repeat and mirror tiling
//! - Simple polygon paths
//! - Text draw commands
//!
//! The recorded [`PaintCommand`] list can be inspected (tests) or replayed by a
//! rasterizer.

pub mod color;
pub mod context;
pub mod gradient;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use context::{FillStyle, PaintCommand, PaintContext};
pub use gradient::{Gradient, GradientStop, TileMode};
pub use path::{FillRule, Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
