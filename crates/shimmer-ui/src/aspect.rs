//! Aspect-ratio derivation of a missing width or height.

use shimmer_core::{Dimension, ViewStyle, screen_metrics};

use crate::dimension::parse_dimension;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

/// Width and height of a style after aspect-ratio derivation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AspectDimensions {
    pub width: Option<f32>,
    pub height: Option<f32>,
}

/// Parses the style's width against `reference_width` and its height against
/// the screen height, then derives whichever side is missing when exactly one
/// is known and the ratio is positive and finite.
pub fn resolve_aspect(style: &ViewStyle, reference_width: Option<f32>) -> AspectDimensions {
    let width = parse_dimension(style.width.as_ref(), reference_width);
    let height = parse_dimension(style.height.as_ref(), Some(screen_metrics().height));

    let Some(ratio) = style.aspect_ratio.and_then(|a| a.usable()) else {
        return AspectDimensions { width, height };
    };

    let known = |v: Option<f32>| v.filter(|v| *v != 0.0);
    match (known(width), known(height)) {
        (Some(w), None) => AspectDimensions {
            width,
            height: Some(w / ratio),
        },
        (None, Some(h)) => AspectDimensions {
            width: Some(h * ratio),
            height,
        },
        _ => AspectDimensions { width, height },
    }
}

/// An aspect ratio is set and `axis` carries no explicit value.
pub fn is_aspect_applicable(style: &ViewStyle, axis: Axis) -> bool {
    let explicit = match axis {
        Axis::Width => style.width.is_some(),
        Axis::Height => style.height.is_some(),
    };
    style.aspect_ratio.is_some_and(|a| a.is_set()) && !explicit
}

/// The width a node declares: the aspect-derived value when the ratio applies
/// to the width, otherwise the style's own width.
pub fn declared_width(style: &ViewStyle, reference_width: Option<f32>) -> Option<Dimension> {
    if is_aspect_applicable(style, Axis::Width) {
        resolve_aspect(style, reference_width)
            .width
            .map(Dimension::Points)
    } else {
        style.width.clone()
    }
}

/// Height counterpart of [`declared_width`].
pub fn declared_height(style: &ViewStyle, reference_width: Option<f32>) -> Option<Dimension> {
    if is_aspect_applicable(style, Axis::Height) {
        resolve_aspect(style, reference_width)
            .height
            .map(Dimension::Points)
    } else {
        style.height.clone()
    }
}
