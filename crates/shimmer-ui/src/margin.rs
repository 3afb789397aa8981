//! Horizontal margin and padding bookkeeping.

use shimmer_core::{ViewStyle, shimmer_config};

/// Total horizontal margin of a node. `margin` and `margin_horizontal` apply
/// to both sides.
pub fn horizontal_margin(style: &ViewStyle) -> f32 {
    let both = shimmer_config().padding_margin_multiplier;
    style.margin.unwrap_or(0.0) * both
        + style.margin_horizontal.unwrap_or(0.0) * both
        + style.margin_left.unwrap_or(0.0)
        + style.margin_right.unwrap_or(0.0)
}

/// Adds a leaf's `margin`, `margin_left` and `margin_right` to the running
/// total carried across siblings and returns the new total.
pub fn running_margin(style: &ViewStyle, acc: f32) -> f32 {
    [style.margin, style.margin_left, style.margin_right]
        .into_iter()
        .flatten()
        .fold(acc, |acc, m| acc + m)
}

/// Horizontal padding of a parent, subtracted from every child width at its
/// level. Side paddings win over `padding_horizontal`, which wins over
/// `padding`.
pub fn horizontal_inset(parent: &ViewStyle) -> f32 {
    let both = shimmer_config().padding_margin_multiplier;
    let sides = parent.padding_left.unwrap_or(0.0) + parent.padding_right.unwrap_or(0.0);
    if sides != 0.0 {
        return sides;
    }
    let horizontal = parent.padding_horizontal.unwrap_or(0.0) * both;
    if horizontal != 0.0 {
        return horizontal;
    }
    parent.padding.unwrap_or(0.0) * both
}

/// Width left for a placeholder once its own and preceding margins are taken.
pub fn adjusted_width(width: f32, total_margin: f32, prev_margin: f32) -> f32 {
    (width - total_margin - prev_margin).max(0.0)
}
