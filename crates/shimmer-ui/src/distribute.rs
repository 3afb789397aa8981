//! Splitting a parent's width between its children.

use smallvec::SmallVec;

use shimmer_core::{Dimension, View, ViewStyle, shimmer_config};

use crate::aspect::declared_width;
use crate::dimension::{is_percentage, leading_float, parse_dimension};

/// Position of a child among its siblings.
pub type ChildKey = usize;

/// Widths of one sibling set, keyed by child position. Lives for a single
/// level of the walk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WidthAllocation {
    widths: SmallVec<[f32; 8]>,
}

impl WidthAllocation {
    pub fn get(&self, key: ChildKey) -> Option<f32> {
        self.widths.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.widths.iter().copied()
    }
}

/// Fixed width and flexible-child count of a sibling set, as used for the
/// remaining-width math of a level.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TotalWidths {
    pub fixed_width: f32,
    pub unsized_count: usize,
}

/// Width implied by a text leaf's accessibility label when it has no style
/// width.
pub fn label_width(view: &View) -> Option<f32> {
    if !view.is_text() || view.style.width.is_some() {
        return None;
    }
    let len = view.accessibility_label.as_deref()?.chars().count();
    (len > 0).then(|| len as f32 * shimmer_config().length_multiplier)
}

/// Explicit width, then aspect-derived width, then the label heuristic.
pub(crate) fn child_declared_width(child: &View) -> Option<Dimension> {
    declared_width(&child.style, None).or_else(|| label_width(child).map(Dimension::Points))
}

/// Children with a declared width keep it. The others share what is left on a
/// row, or each span the whole parent in a column.
pub fn distribute(children: &[View], parent_width: f32, parent_style: &ViewStyle) -> WidthAllocation {
    let declared: SmallVec<[Option<Dimension>; 8]> =
        children.iter().map(child_declared_width).collect();

    let mut assigned = 0.0;
    let mut unassigned = 0usize;
    for d in &declared {
        match d {
            Some(d) => assigned += parse_dimension(Some(d), Some(parent_width)).unwrap_or(0.0),
            None => unassigned += 1,
        }
    }

    let share = if parent_style.is_row() {
        (parent_width - assigned) / unassigned.max(1) as f32
    } else {
        parent_width
    };

    let widths = declared
        .iter()
        .map(|d| match d {
            None => share,
            Some(d) => match parse_dimension(Some(d), Some(parent_width)) {
                Some(w) if w != 0.0 => w,
                Some(_) => share,
                None => parent_width,
            },
        })
        .collect();

    log::trace!(
        "distributed {parent_width} over {} children ({unassigned} flexible)",
        children.len()
    );
    WidthAllocation { widths }
}

/// Sums the widths children fix for themselves and counts the ones that fix
/// none. A width resolving to zero counts as flexible; an unparseable one
/// counts as neither.
pub fn compute_total_widths(children: &[View], parent_width: f32) -> TotalWidths {
    let denominator = shimmer_config().percentage_denominator;
    children
        .iter()
        .fold(TotalWidths::default(), |mut totals, child| {
            match child_declared_width(child) {
                None => totals.unsized_count += 1,
                Some(d) if is_percentage(&d) || contains_percent(&d) => {
                    let pct = match &d {
                        Dimension::Percent(p) => Some(*p),
                        Dimension::Raw(raw) => leading_float(raw),
                        Dimension::Points(_) => None,
                    };
                    totals.fixed_width += pct.unwrap_or(0.0) / denominator * parent_width;
                }
                Some(d) => match parse_dimension(Some(&d), None) {
                    Some(w) if w != 0.0 => totals.fixed_width += w,
                    Some(_) => totals.unsized_count += 1,
                    None => {}
                },
            }
            totals
        })
}

fn contains_percent(d: &Dimension) -> bool {
    matches!(d, Dimension::Raw(raw) if raw.contains('%'))
}
