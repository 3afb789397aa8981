#![allow(non_snake_case)]
//! Placeholder ("loading skeleton") rewriting of view trees.
//!
//! While content is loading, [`wrap`] replaces every content-bearing leaf of a
//! tree with a block sized like the leaf will be once the host lays it out.
//! Widths follow the host's flex rules: fixed, percentage and aspect-ratio
//! widths, rows sharing what is left, columns spanning the parent, margins
//! and padding insets.
//!
//! ```rust
//! use shimmer_core::*;
//! use shimmer_ui::*;
//!
//! let profile = Box(ViewStyle::new())
//!     .child(Image("avatar.png", ViewStyle::new().size(50.0, 50.0)))
//!     .child(Text("Jane Doe").accessibility_label("Jane Doe"));
//!
//! let loading = wrap(profile.clone(), true);
//! assert_eq!(loading.pointer_events, PointerEvents::None);
//!
//! // nothing changes once loaded
//! assert_eq!(wrap(profile.clone(), false), profile);
//! ```

pub mod aspect;
pub mod dimension;
pub mod distribute;
pub mod emitter;
pub mod list;
pub mod margin;
pub mod overlay;
pub mod walker;

use shimmer_core::*;
use web_time::Duration;

pub use aspect::{AspectDimensions, Axis, declared_height, declared_width, is_aspect_applicable, resolve_aspect};
pub use dimension::parse_dimension;
pub use distribute::{ChildKey, TotalWidths, WidthAllocation, compute_total_widths, distribute, label_width};
pub use emitter::{Emission, emit, placeholder_box_style};
pub use list::{SyntheticItem, synthetic_items};
pub use margin::{adjusted_width, horizontal_inset, horizontal_margin, running_margin};
pub use overlay::{OverlayTemplate, ShimmerAnimation, sweep_width};
pub use walker::{ParentContext, ParentRef, Walker};

pub fn Box(style: ViewStyle) -> View {
    View::new(0, ViewKind::Box).style(style)
}

/// A scrollable container; `content_style` styles its content area.
pub fn Scroll(style: ViewStyle, content_style: ViewStyle) -> View {
    View::new(0, ViewKind::Scroll)
        .style(style)
        .content_container_style(content_style)
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(0, ViewKind::Text { text: text.into() })
}

pub fn Image(source: impl Into<String>, style: ViewStyle) -> View {
    View::new(0, ViewKind::Image {
        source: source.into(),
    })
    .style(style)
}

/// A component node rendered by `render` on demand.
pub fn Composite(name: impl Into<String>, render: impl Fn() -> View + 'static) -> View {
    View::new(0, ViewKind::Component(Component::new(name, render)))
}

pub fn List(list: LazyList, style: ViewStyle) -> View {
    View::new(0, ViewKind::LazyList(list)).style(style)
}

/// Returns `children` untouched when not loading; otherwise the placeholder
/// tree under a transparent wrapper that ignores pointer input.
pub fn wrap(children: View, loading: bool) -> View {
    if !loading {
        return children;
    }
    let overlay = OverlayTemplate::shimmer(&placeholder_theme());
    placeholders(&children, overlay, loading)
}

fn placeholders(content: &View, overlay: OverlayTemplate, loading: bool) -> View {
    let walker = Walker::new(overlay, loading);
    log::debug!(
        "rewriting `{}` into placeholders (screen {}x{})",
        content.display_name(),
        walker.screen.width,
        walker.screen.height
    );
    View::new(0, ViewKind::Box)
        .pointer_events(PointerEvents::None)
        .with_children(walker.walk_root(content))
}

/// Options of [`Shimmer`].
#[derive(Clone, Debug, PartialEq)]
pub struct ShimmerOptions {
    pub loading: bool,
    /// One sweep of the overlay.
    pub duration: Duration,
    /// Swept instead of the default highlight block.
    pub element: Option<View>,
}

impl Default for ShimmerOptions {
    fn default() -> Self {
        Self {
            loading: true,
            duration: Duration::from_millis(1000),
            element: None,
        }
    }
}

/// [`wrap`] with a configurable sweep.
pub fn Shimmer(options: ShimmerOptions, content: View) -> View {
    if !options.loading {
        return content;
    }
    let mut overlay = OverlayTemplate::shimmer(&placeholder_theme()).duration(options.duration);
    if let Some(element) = options.element {
        overlay = overlay.element(element);
    }
    placeholders(&content, overlay, true)
}

/// Placeholder blocks with a base→highlight→base gradient sweep.
pub fn Skeleton(loading: bool, content: View) -> View {
    if !loading {
        return content;
    }
    placeholders(&content, OverlayTemplate::skeleton(&placeholder_theme()), true)
}
