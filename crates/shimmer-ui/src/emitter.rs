//! Materializing a resolved leaf as a placeholder block.

use shimmer_core::{
    Brush, Dimension, Placeholder, PlaceholderTheme, PointerEvents, ScreenMetrics, ShimmerConfig,
    View, ViewId, ViewKind, ViewStyle,
};

use crate::overlay::OverlayTemplate;

/// Everything known about a leaf once its geometry is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct Emission {
    pub index: usize,
    pub child_style: ViewStyle,
    pub box_style: ViewStyle,
    pub width: f32,
    pub height: f32,
    pub parent_width: f32,
    pub loading: bool,
}

/// Fill, clipping, margin and size of the drawn block. The block is inset by
/// `offset_for_width` on both axes; a node without its own margin gets
/// `default_margin`.
pub fn placeholder_box_style(
    child_style: &ViewStyle,
    width: f32,
    height: f32,
    config: &ShimmerConfig,
    theme: &PlaceholderTheme,
) -> ViewStyle {
    ViewStyle {
        background: Some(Brush::Solid(theme.base)),
        overflow_hidden: true,
        margin: Some(child_style.margin.unwrap_or(config.default_margin)),
        width: Some(Dimension::Points((width - config.offset_for_width).max(0.0))),
        height: Some(Dimension::Points((height - config.offset_for_width).max(0.0))),
        ..Default::default()
    }
}

/// Builds the placeholder node: the child's style with the block style on top,
/// non-interactive while loading, holding one overlay node.
pub fn emit(emission: Emission, overlay: &OverlayTemplate, screen: &ScreenMetrics) -> View {
    let Emission {
        index,
        child_style,
        box_style,
        width,
        height,
        parent_width,
        loading,
    } = emission;
    let id = index as ViewId;
    let sweep = overlay.overlay_view(id, &child_style, width, parent_width, screen);
    log::trace!("placeholder #{index}: {width}x{height} in {parent_width}");

    View::new(
        id,
        ViewKind::Placeholder(Placeholder {
            index,
            width,
            height,
            parent_width,
        }),
    )
    .style(child_style.merged(&box_style))
    .pointer_events(if loading {
        PointerEvents::None
    } else {
        PointerEvents::Auto
    })
    .child(sweep)
}
