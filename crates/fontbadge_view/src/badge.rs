//! The badge component
//!
//! A [`FontBadge`] lives on its host's UI thread. Local fonts are loaded and
//! drawn inside [`FontBadge::request_render`]. A network font that is not in
//! the cache yet is acquired on the worker pool; the badge returns
//! [`RenderStatus::Pending`] and draws itself once the host pumps the
//! [`AsyncHandoff`] and the font is ready.

use crate::compositor::{composite, draw_glyph};
use crate::config::DebugConfig;
use crate::error::{BadgeError, Result};
use crate::layout::{layout, text_size, GlyphPlacement};
use crate::logging;
use crate::raster::render_to_image;
use crate::shape::{ShapeSpec, ShapeType};
use fontbadge_loader::{
    AsyncHandoff, FontCache, FontSource, FontSourceResolver, GateState, WorkerPool,
};
use fontbadge_paint::{Color, FillRule, PaintCommand, PaintContext, PathBuilder};
use fontbadge_text::{decode_html_entities, fallback_face, FontFace, GlyphMetrics};
use image::RgbaImage;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a render request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Waiting for the font; the badge draws itself when it arrives
    Pending,
    Drawn,
    /// The badge is not visible, nothing was drawn
    Hidden,
}

/// One finished drawing of a badge
#[derive(Debug, Clone)]
pub struct BadgeFrame {
    pub commands: Vec<PaintCommand>,
    pub placement: GlyphPlacement,
    /// Face the glyph was measured with (`None` when no font exists at all)
    pub font: Option<Arc<FontFace>>,
    pub draw_time: Duration,
    pub width: i32,
    pub height: i32,
}

impl BadgeFrame {
    /// Rasterize the frame
    pub fn to_image(&self) -> RgbaImage {
        render_to_image(
            &self.commands,
            self.width.max(0) as u32,
            self.height.max(0) as u32,
            self.font.as_deref(),
        )
    }
}

type FrameListener = Box<dyn FnMut(&BadgeFrame)>;

struct BadgeState {
    source: Option<FontSource>,
    character: String,
    spec: ShapeSpec,
    width: i32,
    height: i32,
    visible: bool,
    /// Face resolved for the current source, kept until the source changes
    typeface: Option<Arc<FontFace>>,
    awaiting_font: bool,
    last_frame: Option<BadgeFrame>,
    on_frame: Option<FrameListener>,
}

impl Default for BadgeState {
    fn default() -> Self {
        Self {
            source: None,
            character: String::new(),
            spec: ShapeSpec::default(),
            width: 0,
            height: 0,
            visible: true,
            typeface: None,
            awaiting_font: false,
            last_frame: None,
            on_frame: None,
        }
    }
}

/// Draws badge state into frames. Shared between the badge and its pending
/// ready callbacks.
#[derive(Clone)]
struct Renderer {
    cache: Arc<FontCache>,
    debug: DebugConfig,
}

impl Renderer {
    fn render(&self, state: &RefCell<BadgeState>) -> RenderStatus {
        let frame = match self.draw(&mut state.borrow_mut()) {
            Some(frame) => frame,
            None => return RenderStatus::Hidden,
        };

        // The listener runs without the state borrowed
        let mut listener = state.borrow_mut().on_frame.take();
        if let Some(listener) = listener.as_mut() {
            listener(&frame);
        }
        let mut state = state.borrow_mut();
        if state.on_frame.is_none() {
            state.on_frame = listener;
        }
        state.last_frame = Some(frame);
        RenderStatus::Drawn
    }

    fn draw(&self, state: &mut BadgeState) -> Option<BadgeFrame> {
        if !state.visible {
            return None;
        }
        let started = Instant::now();

        if state.typeface.is_none() {
            state.typeface = state.source.as_ref().and_then(|s| self.cache.font_for(s));
        }
        let font = state.typeface.clone().or_else(fallback_face);

        let text = decode_html_entities(&state.character).into_owned();
        let size = text_size(state.height, state.spec.font_size_multiplier);
        let metrics = font
            .as_ref()
            .map(|f| f.glyph_metrics(&text, size as f32))
            .unwrap_or(GlyphMetrics::ZERO);
        let placement = layout(&metrics, state.width, state.height, &state.spec);

        let mut surface = PaintContext::new(state.width as f32, state.height as f32);
        composite(&mut surface, &state.spec, state.width, state.height);
        draw_glyph(&mut surface, &text, &placement, &state.spec);

        let draw_time = started.elapsed();

        if self.debug.enabled || logging::debugging_enabled() {
            tracing::debug!("Font character {} took {}ms.", text, draw_time.as_millis());
            let leg = self.debug.indicator_size();
            let indicator = PathBuilder::new()
                .fill_rule(FillRule::EvenOdd)
                .line_to(leg, 0.0)
                .line_to(0.0, leg)
                .close()
                .build();
            surface.fill_path(indicator, indicator_color(draw_time));
        }

        Some(BadgeFrame {
            commands: surface.take_commands(),
            placement,
            font,
            draw_time,
            width: state.width,
            height: state.height,
        })
    }
}

/// Green up to 3 ms, yellow up to 5 ms, red beyond
pub(crate) fn indicator_color(draw_time: Duration) -> Color {
    match draw_time.as_millis() {
        0..=3 => Color::GREEN,
        4..=5 => Color::YELLOW,
        _ => Color::RED,
    }
}

/// A glyph-over-shape badge
pub struct FontBadge {
    state: Rc<RefCell<BadgeState>>,
    renderer: Renderer,
    handoff: Rc<AsyncHandoff>,
}

impl FontBadge {
    /// Badge backed by the process-wide font cache
    pub fn new(handoff: Rc<AsyncHandoff>) -> Self {
        Self::with_cache(FontCache::global(), handoff)
    }

    pub fn with_cache(cache: Arc<FontCache>, handoff: Rc<AsyncHandoff>) -> Self {
        Self {
            state: Rc::new(RefCell::new(BadgeState::default())),
            renderer: Renderer {
                cache,
                debug: DebugConfig::default(),
            },
            handoff,
        }
    }

    pub fn with_debug(mut self, debug: DebugConfig) -> Self {
        self.renderer.debug = debug;
        self
    }

    /// Start downloading a network font before any badge needs it
    pub fn prefetch_network_font(url: &str) {
        let https = url.starts_with("https://");
        FontCache::global().prefetch(FontSource::network(url, https), WorkerPool::global());
    }

    // === Setup ===

    pub fn setup_network_font(
        &mut self,
        url: impl Into<String>,
        https: bool,
        character: impl Into<String>,
        shape: ShapeType,
    ) -> &mut Self {
        self.setup(FontSource::network(url, https), character.into(), shape)
    }

    pub fn setup_file_font(
        &mut self,
        path: impl Into<PathBuf>,
        character: impl Into<String>,
        shape: ShapeType,
    ) -> &mut Self {
        self.setup(FontSource::file(path), character.into(), shape)
    }

    /// `path` is relative to the configured asset root
    pub fn setup_asset_font(
        &mut self,
        path: impl Into<PathBuf>,
        character: impl Into<String>,
        shape: ShapeType,
    ) -> &mut Self {
        self.setup(FontSource::asset(path), character.into(), shape)
    }

    fn setup(&mut self, source: FontSource, character: String, shape: ShapeType) -> &mut Self {
        {
            let mut state = self.state.borrow_mut();
            if state.source.as_ref() != Some(&source) {
                state.typeface = None;
            }
            state.source = Some(source);
            state.character = character;
            state.spec.shape = shape;
        }
        self
    }

    /// Replace the drawn text; HTML entities are decoded at draw time
    pub fn set_character(&mut self, character: impl Into<String>) -> &mut Self {
        self.state.borrow_mut().character = character.into();
        self
    }

    pub fn set_shape(&mut self, shape: ShapeType) -> &mut Self {
        self.state.borrow_mut().spec.shape = shape;
        self
    }

    // === Decorators ===

    pub fn add_foreground_color(&mut self, color: Color) -> &mut Self {
        self.state.borrow_mut().spec.foreground_color = Some(color);
        self
    }

    pub fn add_background_color(&mut self, color: Color) -> &mut Self {
        self.state.borrow_mut().spec.background_color = Some(color);
        self
    }

    /// Fill outside a circular badge
    pub fn add_outer_color(&mut self, color: Color) -> &mut Self {
        self.state.borrow_mut().spec.outer_color = Some(color);
        self
    }

    pub fn add_bottom_half_color(&mut self, color: Color) -> &mut Self {
        self.state.borrow_mut().spec.bottom_half_color = Some(color);
        self
    }

    /// Blend background into bottom-half color instead of splitting
    pub fn set_background_gradient(&mut self, gradient: bool) -> &mut Self {
        self.state.borrow_mut().spec.has_gradient = gradient;
        self
    }

    pub fn set_x_offset(&mut self, offset: i32) -> &mut Self {
        self.state.borrow_mut().spec.x_offset = offset;
        self
    }

    pub fn set_y_offset(&mut self, offset: i32) -> &mut Self {
        self.state.borrow_mut().spec.y_offset = offset;
        self
    }

    pub fn set_font_size_multiplier(&mut self, multiplier: f64) -> &mut Self {
        self.state.borrow_mut().spec.font_size_multiplier = multiplier;
        self
    }

    /// Forget all colors and the gradient flag, e.g. before reusing a badge
    /// for a different item
    pub fn reset_decorators(&mut self) -> &mut Self {
        self.state.borrow_mut().spec.reset_decorators();
        self
    }

    // === Host lifecycle ===

    pub fn set_size(&mut self, width: i32, height: i32) {
        let mut state = self.state.borrow_mut();
        state.width = width;
        state.height = height;
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.state.borrow_mut().visible = visible;
    }

    /// Called for every frame drawn, including ones drawn after a deferred
    /// font arrives
    pub fn on_frame<F>(&mut self, listener: F)
    where
        F: FnMut(&BadgeFrame) + 'static,
    {
        self.state.borrow_mut().on_frame = Some(Box::new(listener));
    }

    pub fn spec(&self) -> ShapeSpec {
        self.state.borrow().spec.clone()
    }

    pub fn last_frame(&self) -> Option<BadgeFrame> {
        self.state.borrow().last_frame.clone()
    }

    /// Whether a font acquisition for this badge has not reported back yet
    pub fn is_awaiting_font(&self) -> bool {
        self.state.borrow().awaiting_font
    }

    /// Draw the badge, or schedule the font acquisition it is waiting on.
    ///
    /// Fails only when no font source was set up. Font problems never fail a
    /// render; the badge falls back to a system face.
    pub fn request_render(&mut self) -> Result<RenderStatus> {
        let source = self
            .state
            .borrow()
            .source
            .clone()
            .ok_or(BadgeError::InvalidSource)?;
        let cache = &self.renderer.cache;
        let resolution = FontSourceResolver::new(cache).resolve(Some(&source))?;

        // Another badge's acquisition may hold the slot; never block on it here
        if resolution.needs_async_fetch || cache.gate_state(&source) == GateState::InFlight {
            self.schedule_acquisition(source);
            return Ok(RenderStatus::Pending);
        }

        if self.state.borrow().typeface.is_none() {
            let outcome = cache.ensure_loaded(&source);
            tracing::trace!("local font {:?}: {:?}", source, outcome);
        }
        Ok(self.renderer.render(&self.state))
    }

    fn schedule_acquisition(&self, source: FontSource) {
        {
            let mut state = self.state.borrow_mut();
            if state.awaiting_font {
                return;
            }
            state.awaiting_font = true;
        }

        let weak = Rc::downgrade(&self.state);
        let renderer = self.renderer.clone();
        self.renderer
            .cache
            .ensure_loaded_async(source, &self.handoff, move |outcome| {
                let Some(state) = weak.upgrade() else {
                    tracing::trace!("badge dropped before its font was ready ({:?})", outcome);
                    return;
                };
                tracing::debug!("font acquisition finished: {:?}", outcome);
                state.borrow_mut().awaiting_font = false;
                renderer.render(&state);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_thresholds() {
        assert_eq!(indicator_color(Duration::from_millis(0)), Color::GREEN);
        assert_eq!(indicator_color(Duration::from_millis(3)), Color::GREEN);
        assert_eq!(indicator_color(Duration::from_micros(3_900)), Color::GREEN);
        assert_eq!(indicator_color(Duration::from_millis(4)), Color::YELLOW);
        assert_eq!(indicator_color(Duration::from_millis(5)), Color::YELLOW);
        assert_eq!(indicator_color(Duration::from_millis(6)), Color::RED);
    }
}
