//! fontbadge view
//!
//! A badge is one glyph, taken from an arbitrary font, centered over a
//! colored square or circle. This crate turns font metrics and shape
//! settings into draw operations and hosts the [`FontBadge`] component that
//! ties them to the loader.
//!
//! # Features
//!
//! - [`layout`]: deterministic glyph placement from font metrics
//! - [`compositor`]: solid, split and gradient backgrounds for both shapes
//! - [`raster`]: CPU replay of the recorded commands into an RGBA image
//! - [`FontBadge`]: setup surface, deferred network rendering, debug indicator
//!
//! # Example
//!
//! ```ignore
//! use fontbadge_view::{FontBadge, ShapeType};
//! use fontbadge_loader::{AsyncHandoff, WorkerPool};
//! use fontbadge_paint::Color;
//! use std::rc::Rc;
//!
//! let handoff = Rc::new(AsyncHandoff::new(WorkerPool::global().clone()));
//! let mut badge = FontBadge::new(Rc::clone(&handoff));
//! badge.setup_network_font("https://example.com/icons.ttf", true, "&#xe600;", ShapeType::Circle);
//! badge
//!     .add_background_color(Color::from_argb(0xFF2196F3))
//!     .add_foreground_color(Color::WHITE);
//! badge.set_size(96, 96);
//! badge.request_render()?;
//! handoff.wait_and_dispatch(std::time::Duration::from_secs(5));
//! ```

pub mod badge;
pub mod compositor;
pub mod config;
pub mod layout;
pub mod logging;
pub mod raster;
pub mod shape;

mod error;

pub use badge::{BadgeFrame, FontBadge, RenderStatus};
pub use compositor::{composite, draw_glyph, DEFAULT_FOREGROUND};
pub use config::{BadgeConfig, ConfigError, DebugConfig};
pub use error::{BadgeError, Result};
pub use layout::{layout, text_size, GlyphPlacement};
pub use raster::render_to_image;
pub use shape::{ShapeSpec, ShapeType};
