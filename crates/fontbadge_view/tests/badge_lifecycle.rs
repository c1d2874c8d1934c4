//! Badge lifecycle tests
//!
//! These tests verify that:
//! - Rendering without a font source fails fast
//! - Uncached network fonts defer drawing until the handoff delivers
//! - A badge torn down before its font arrives swallows the notification
//! - A crashed acquisition still wakes the badge, which draws a fallback
//! - Under the single-slot policy a broken local font does not block downloads
//! - Local fonts draw immediately, falling back to a system face
//! - Decorators, visibility and the debug indicator shape the frame

use fontbadge_loader::{
    AsyncHandoff, FontCache, FontFetcher, FontSource, LoadError, LoaderConfig, SlotPolicy,
    WorkerPool,
};
use fontbadge_paint::{Color, FillStyle, PaintCommand};
use fontbadge_view::{BadgeError, DebugConfig, FontBadge, RenderStatus, ShapeType};
use std::cell::Cell;
use std::io::{Cursor, Read};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

const URL: &str = "https://fonts.example.com/Icons.ttf";

/// Serves system font bytes when available, junk otherwise
struct StubFetcher {
    opens: AtomicUsize,
    crash: bool,
}

impl FontFetcher for StubFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>, LoadError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(20));
        if self.crash {
            panic!("fetcher crashed on {url}");
        }
        let bytes = fontbadge_text::fallback_face()
            .map(|face| face.data().to_vec())
            .unwrap_or_else(|| b"junk".to_vec());
        Ok(Box::new(Cursor::new(bytes)))
    }
}

struct Harness {
    _dir: tempfile::TempDir,
    cache: Arc<FontCache>,
    fetcher: Arc<StubFetcher>,
    handoff: Rc<AsyncHandoff>,
}

impl Harness {
    fn new() -> Self {
        Self::build(SlotPolicy::PerKey, false)
    }

    fn build(policy: SlotPolicy, crash: bool) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(StubFetcher {
            opens: AtomicUsize::new(0),
            crash,
        });
        let config = LoaderConfig::default()
            .with_storage_dir(dir.path())
            .with_slot_policy(policy);
        let cache = Arc::new(FontCache::with_fetcher(config, fetcher.clone()));
        Self {
            _dir: dir,
            cache,
            fetcher,
            handoff: Rc::new(AsyncHandoff::new(WorkerPool::global().clone())),
        }
    }

    fn badge(&self) -> FontBadge {
        let mut badge = FontBadge::with_cache(Arc::clone(&self.cache), Rc::clone(&self.handoff));
        badge.set_size(48, 48);
        badge
    }

    fn pump(&self) {
        assert!(self.handoff.run_until_idle(Duration::from_secs(10)));
    }
}

fn drawn_text(commands: &[PaintCommand]) -> Option<&str> {
    commands.iter().find_map(|c| match c {
        PaintCommand::DrawText { text, .. } => Some(text.as_str()),
        _ => None,
    })
}

#[test]
fn test_unconfigured_badge_is_invalid_source() {
    let h = Harness::new();
    let mut badge = h.badge();

    let err = badge.request_render().unwrap_err();
    assert!(matches!(err, BadgeError::InvalidSource));
    assert!(badge.last_frame().is_none());
}

#[test]
fn test_network_font_defers_then_draws() {
    let h = Harness::new();
    let mut badge = h.badge();
    badge.setup_network_font(URL, true, "A", ShapeType::Circle);

    let frames = Rc::new(Cell::new(0));
    let counter = Rc::clone(&frames);
    badge.on_frame(move |frame| {
        assert_eq!(frame.width, 48);
        counter.set(counter.get() + 1);
    });

    assert_eq!(badge.request_render().unwrap(), RenderStatus::Pending);
    assert!(badge.is_awaiting_font());
    assert!(badge.last_frame().is_none());

    // Asking again while waiting does not schedule a second acquisition
    assert_eq!(badge.request_render().unwrap(), RenderStatus::Pending);
    assert_eq!(h.handoff.pending(), 1);

    h.pump();

    assert!(!badge.is_awaiting_font());
    assert_eq!(frames.get(), 1);
    let frame = badge.last_frame().unwrap();
    assert_eq!(drawn_text(&frame.commands), Some("A"));

    // The font is settled now, so the next render is immediate
    assert_eq!(badge.request_render().unwrap(), RenderStatus::Drawn);
    assert_eq!(frames.get(), 2);
    assert_eq!(h.fetcher.opens.load(Ordering::SeqCst), 1);
}

#[test]
fn test_badges_share_one_download() {
    let h = Harness::new();
    let mut a = h.badge();
    let mut b = h.badge();
    a.setup_network_font(URL, true, "A", ShapeType::Square);
    b.setup_network_font(URL, true, "B", ShapeType::Circle);

    assert_eq!(a.request_render().unwrap(), RenderStatus::Pending);
    assert_eq!(b.request_render().unwrap(), RenderStatus::Pending);
    h.pump();

    assert!(a.last_frame().is_some());
    assert!(b.last_frame().is_some());
    assert_eq!(h.fetcher.opens.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dropped_badge_swallows_notification() {
    let h = Harness::new();
    let frames = Rc::new(Cell::new(0));
    {
        let mut badge = h.badge();
        badge.setup_network_font(URL, true, "A", ShapeType::Square);
        let counter = Rc::clone(&frames);
        badge.on_frame(move |_| counter.set(counter.get() + 1));
        assert_eq!(badge.request_render().unwrap(), RenderStatus::Pending);
    }

    h.pump();

    assert_eq!(frames.get(), 0);
    assert_eq!(h.handoff.pending(), 0);
    // The acquisition itself still completed
    assert_eq!(h.fetcher.opens.load(Ordering::SeqCst), 1);
}

#[test]
fn test_crashed_acquisition_still_draws_fallback() {
    let h = Harness::build(SlotPolicy::PerKey, true);
    let mut badge = h.badge();
    badge.setup_network_font(URL, true, "A", ShapeType::Square);

    let frames = Rc::new(Cell::new(0));
    let counter = Rc::clone(&frames);
    badge.on_frame(move |_| counter.set(counter.get() + 1));

    assert_eq!(badge.request_render().unwrap(), RenderStatus::Pending);
    h.pump();

    assert!(!badge.is_awaiting_font());
    assert_eq!(frames.get(), 1);
    let frame = badge.last_frame().unwrap();
    assert_eq!(drawn_text(&frame.commands), Some("A"));

    // The gate settled despite the crash; later renders are synchronous
    assert!(h.cache.is_resolved(&FontSource::network(URL, true)));
    assert_eq!(badge.request_render().unwrap(), RenderStatus::Drawn);
    assert_eq!(h.fetcher.opens.load(Ordering::SeqCst), 1);
}

#[test]
fn test_broken_local_font_does_not_block_network_font() {
    let h = Harness::build(SlotPolicy::Single, false);
    let mut local = h.badge();
    local.setup_file_font("/nonexistent/fontbadge/x.ttf", "L", ShapeType::Square);
    assert_eq!(local.request_render().unwrap(), RenderStatus::Drawn);

    let mut remote = h.badge();
    remote.setup_network_font(URL, true, "N", ShapeType::Square);
    assert_eq!(remote.request_render().unwrap(), RenderStatus::Pending);
    h.pump();

    assert_eq!(h.fetcher.opens.load(Ordering::SeqCst), 1);
    assert!(remote.last_frame().is_some());
    assert!(h.cache.is_resolved(&FontSource::network(URL, true)));
}

#[test]
fn test_missing_file_falls_back_and_decodes_entities() {
    let h = Harness::new();
    let mut badge = h.badge();
    badge.setup_file_font("/nonexistent/fontbadge/icons.ttf", "&amp;", ShapeType::Square);
    badge.add_background_color(Color::RED);

    assert_eq!(badge.request_render().unwrap(), RenderStatus::Drawn);

    let frame = badge.last_frame().unwrap();
    assert_eq!(drawn_text(&frame.commands), Some("&"));
    assert_eq!(frame.commands[0], PaintCommand::FillSurface { color: Color::RED });
    assert!(frame.placement.draw_y.is_finite());
    if frame.font.is_none() {
        // No font anywhere: zero metrics, unadjusted center
        assert_eq!(frame.placement.draw_y, 24.0);
    }
    assert_eq!(h.fetcher.opens.load(Ordering::SeqCst), 0);
}

#[test]
fn test_reset_decorators_clears_colors() {
    let h = Harness::new();
    let mut badge = h.badge();
    badge
        .setup_asset_font("fonts/icons.ttf", "x", ShapeType::Circle)
        .add_foreground_color(Color::WHITE)
        .add_background_color(Color::BLUE)
        .add_outer_color(Color::BLACK)
        .add_bottom_half_color(Color::GREEN)
        .set_background_gradient(true)
        .set_x_offset(3);

    badge.reset_decorators();

    let spec = badge.spec();
    assert_eq!(spec.foreground_color, None);
    assert_eq!(spec.background_color, None);
    assert_eq!(spec.outer_color, None);
    assert_eq!(spec.bottom_half_color, None);
    assert!(!spec.has_gradient);
    assert_eq!(spec.x_offset, 3);

    // With no decorators only the glyph is drawn, in the default color
    assert_eq!(badge.request_render().unwrap(), RenderStatus::Drawn);
    let frame = badge.last_frame().unwrap();
    assert_eq!(frame.commands.len(), 1);
    match &frame.commands[0] {
        PaintCommand::DrawText { color, .. } => assert_eq!(*color, Color::BLACK),
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_hidden_badge_draws_nothing() {
    let h = Harness::new();
    let mut badge = h.badge();
    badge.setup_file_font("/nonexistent/icons.ttf", "A", ShapeType::Square);
    badge.set_visible(false);

    assert_eq!(badge.request_render().unwrap(), RenderStatus::Hidden);
    assert!(badge.last_frame().is_none());

    badge.set_visible(true);
    assert_eq!(badge.request_render().unwrap(), RenderStatus::Drawn);
}

#[test]
fn test_debug_indicator_is_drawn_last() {
    let h = Harness::new();
    let debug = DebugConfig {
        enabled: true,
        indicator_width: 10.0,
        density: 2.0,
    };
    let mut badge = h.badge().with_debug(debug);
    badge.setup_file_font("/nonexistent/icons.ttf", "A", ShapeType::Square);

    badge.request_render().unwrap();

    let frame = badge.last_frame().unwrap();
    match frame.commands.last() {
        Some(PaintCommand::FillPath { path, style }) => {
            let polygons = path.polygons();
            assert_eq!(polygons.len(), 1);
            assert!(polygons[0].iter().any(|p| p.x == 20.0 && p.y == 0.0));
            assert!(matches!(style, FillStyle::Color(_)));
        }
        other => panic!("expected indicator path, got {other:?}"),
    }
}

#[test]
fn test_frame_rasterizes_at_badge_size() {
    let h = Harness::new();
    let mut badge = h.badge();
    badge
        .setup_file_font("/nonexistent/icons.ttf", "A", ShapeType::Circle)
        .add_outer_color(Color::WHITE)
        .add_background_color(Color::BLUE);
    badge.request_render().unwrap();

    let image = badge.last_frame().unwrap().to_image();
    assert_eq!(image.dimensions(), (48, 48));
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(image.get_pixel(2, 24).0, [0, 0, 255, 255]);
}

#[test]
fn test_character_and_shape_can_change_after_setup() {
    let h = Harness::new();
    let mut badge = h.badge();
    badge
        .setup_file_font("/nonexistent/icons.ttf", "A", ShapeType::Square)
        .add_outer_color(Color::WHITE)
        .set_character("&lt;")
        .set_shape(ShapeType::Circle);

    badge.request_render().unwrap();

    let frame = badge.last_frame().unwrap();
    assert_eq!(frame.commands[0], PaintCommand::FillSurface { color: Color::WHITE });
    assert_eq!(drawn_text(&frame.commands), Some("<"));
}
