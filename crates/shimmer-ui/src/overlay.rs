//! The sweep drawn over each placeholder block.

use shimmer_core::animation::{Easing, LoopingAnimation, OverlayFrame};
use shimmer_core::{
    Brush, LinearGradient, PlaceholderTheme, ScreenMetrics, ShimmerOverlay, Vec2, View, ViewId,
    ViewKind, ViewStyle,
};
use web_time::Duration;

use crate::aspect::declared_width;
use crate::dimension::parse_dimension;

/// How overlays look and loop for one `wrap` call.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayTemplate {
    pub duration: Duration,
    pub sweep_end: f32,
    /// Fill of the default swept block.
    pub brush: Brush,
    /// Custom element swept instead of the default block.
    pub element: Option<View>,
}

impl OverlayTemplate {
    /// A translucent highlight block sweeping once per second.
    pub fn shimmer(theme: &PlaceholderTheme) -> Self {
        Self {
            duration: Duration::from_millis(1000),
            sweep_end: 1.0,
            brush: Brush::Solid(theme.highlight),
            element: None,
        }
    }

    /// A base→highlight→base gradient over two seconds, stopping short of the
    /// far edge.
    pub fn skeleton(theme: &PlaceholderTheme) -> Self {
        Self {
            duration: Duration::from_millis(2000),
            sweep_end: 0.8,
            brush: LinearGradient::with_stops(Vec2 { x: 0.0, y: 0.25 }, Vec2 { x: 1.0, y: 0.25 }, &[
                (0.0, theme.base),
                (0.5, theme.highlight),
                (1.0, theme.base),
            ]),
            element: None,
        }
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn element(mut self, element: View) -> Self {
        self.element = Some(element);
        self
    }

    /// Overlay node for a placeholder of `placeholder_width`.
    pub fn overlay_view(
        &self,
        id: ViewId,
        child_style: &ViewStyle,
        placeholder_width: f32,
        parent_width: f32,
        screen: &ScreenMetrics,
    ) -> View {
        let sweep_width = sweep_width(child_style, placeholder_width, parent_width, screen);
        let swept = self.element.clone().unwrap_or_else(|| {
            View::new(id, ViewKind::Box).style(ViewStyle::new().background_brush(self.brush.clone()))
        });
        View::new(
            id,
            ViewKind::Overlay(ShimmerOverlay {
                sweep_width,
                duration: self.duration,
                sweep_end: self.sweep_end,
            }),
        )
        .style(ViewStyle::new().width(sweep_width))
        .child(swept)
    }
}

/// Distance the sweep travels to each side: the node's own width
/// (percentages against `parent_width`), else the placeholder's width, else
/// the screen width.
pub fn sweep_width(
    child_style: &ViewStyle,
    placeholder_width: f32,
    parent_width: f32,
    screen: &ScreenMetrics,
) -> f32 {
    declared_width(child_style, Some(parent_width))
        .and_then(|d| parse_dimension(Some(&d), Some(parent_width)))
        .or(Some(placeholder_width).filter(|w| w.is_finite()))
        .unwrap_or(screen.width)
}

/// A running sweep. The host starts one when a placeholder mounts, asks it for
/// a frame on every draw and stops it on unmount.
#[derive(Clone, Debug)]
pub struct ShimmerAnimation {
    overlay: ShimmerOverlay,
    progress: LoopingAnimation,
}

impl ShimmerAnimation {
    pub fn start(overlay: &ShimmerOverlay) -> Self {
        Self {
            overlay: *overlay,
            progress: LoopingAnimation::start(overlay.duration, overlay.sweep_end, Easing::EaseInOut),
        }
    }

    pub fn frame(&self) -> OverlayFrame {
        self.overlay.frame(self.progress.value())
    }

    pub fn stop(&mut self) {
        self.progress.stop();
    }

    pub fn is_running(&self) -> bool {
        self.progress.is_running()
    }
}
