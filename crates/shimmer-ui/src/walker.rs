//! The recursive placeholder rewrite.
//!
//! Each level of the tree is walked with the context its parent hands down.
//! A level first predicts what the host would give its children (parent
//! width, padding inset, fixed vs. flexible children), then visits every
//! child: containers recurse, components are expanded, lists are adapted and
//! leaves become placeholder blocks.

use std::slice;

use shimmer_core::{
    Dimension, ExpandError, NodeClass, PlaceholderTheme, Result, ScreenMetrics, ShimmerConfig, View,
    ViewStyle, placeholder_theme, screen_metrics, shimmer_config,
};

use crate::aspect::{declared_height, declared_width};
use crate::dimension::{is_percentage, parse_dimension};
use crate::distribute::{
    ChildKey, WidthAllocation, child_declared_width, compute_total_widths, distribute, label_width,
};
use crate::emitter::{Emission, emit, placeholder_box_style};
use crate::margin::{adjusted_width, horizontal_inset, horizontal_margin, running_margin};
use crate::overlay::OverlayTemplate;

/// The node whose children are being walked.
#[derive(Clone, Copy, Debug)]
pub enum ParentRef<'a> {
    /// Sentinel above the wrapped content; has no style and no siblings.
    Root,
    Node(&'a View),
}

/// What a parent hands down to the walk of its children. Rebuilt for every
/// descent, never shared between sibling subtrees.
#[derive(Clone, Copy, Debug)]
pub struct ParentContext<'a> {
    pub parent: ParentRef<'a>,
    /// Width predicted for the parent by its own level.
    pub calculated_width: Option<f32>,
    /// Resolved width of the grandparent, which a percentage width of the
    /// parent refers to.
    pub reference_width: Option<f32>,
    /// The grandparent lays out in a row.
    pub previous_row: bool,
    /// Margin accumulated by earlier leaves of the grandparent's level.
    pub prev_margin: f32,
    /// Component expansions on the path from the root to this level.
    pub expansion_depth: usize,
}

impl<'a> ParentContext<'a> {
    pub fn root() -> Self {
        Self {
            parent: ParentRef::Root,
            calculated_width: None,
            reference_width: None,
            previous_row: false,
            prev_margin: 0.0,
            expansion_depth: 0,
        }
    }

    pub fn child_of(parent: &'a View, width: f32, previous_row: bool, prev_margin: f32) -> Self {
        Self {
            parent: ParentRef::Node(parent),
            calculated_width: Some(width),
            reference_width: None,
            previous_row,
            prev_margin,
            expansion_depth: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self.parent, ParentRef::Root)
    }
}

/// Sizing decisions of one level, shared by all of its children.
#[derive(Clone, Debug)]
pub(crate) struct Level {
    pub(crate) inset: f32,
    pub(crate) is_row: bool,
    pub(crate) parent_width: f32,
    pub(crate) parent_height: f32,
    pub(crate) allocation: WidthAllocation,
    pub(crate) calculated_child_width: f32,
}

impl Level {
    fn new(children: &[View], ctx: &ParentContext<'_>, screen: &ScreenMetrics) -> Level {
        let root_style = ViewStyle::default();
        let (parent_style, content_style, siblings) = match ctx.parent {
            ParentRef::Root => (&root_style, None, &[][..]),
            ParentRef::Node(v) => (
                &v.style,
                v.content_container_style.as_ref(),
                v.children.as_slice(),
            ),
        };

        let inset = horizontal_inset(parent_style);
        let is_row = parent_style.is_row();
        let nested_in_column = !ctx.is_root() && !is_row;
        let calc = ctx.calculated_width;
        let known_calc = calc.filter(|w| *w != 0.0);

        let base = declared_width(parent_style, None)
            .filter(|d| !is_zero(d))
            .or_else(|| content_style.and_then(|s| declared_width(s, calc)).filter(|d| !is_zero(d)));
        let parent_width = match base {
            Some(d) if is_percentage(&d) => {
                let reference = if ctx.is_root() {
                    screen.width
                } else {
                    ctx.reference_width.or(calc).unwrap_or(screen.width)
                };
                parse_dimension(Some(&d), Some(reference)).unwrap_or(reference)
            }
            Some(d) => parse_dimension(Some(&d), None).unwrap_or(screen.width),
            None => known_calc.unwrap_or(screen.width),
        };

        let totals = compute_total_widths(children, parent_width);
        let remaining = parent_width - inset - totals.fixed_width;
        let allocation = if siblings.is_empty() {
            WidthAllocation::default()
        } else {
            distribute(siblings, parent_width - inset, parent_style)
        };

        let divisor = if nested_in_column {
            1.0
        } else {
            totals.unsized_count.max(1) as f32
        };
        let available = if nested_in_column {
            parent_width - inset
        } else {
            remaining
        };
        let computed = match known_calc {
            Some(c) if !is_row => c - inset,
            _ => available,
        };
        let adjusted = children
            .last()
            .and_then(|last| adjusted_child_width(last, ctx, parent_width))
            .filter(|w| *w != 0.0);

        let calculated_child_width = match (ctx.previous_row, calc) {
            (true, Some(c)) => c - inset,
            _ => match adjusted {
                Some(a) => a - inset,
                None => computed / divisor,
            },
        };

        let height_reference = Some(calculated_child_width);
        let parent_height = content_style
            .and_then(|s| declared_height(s, height_reference))
            .or_else(|| declared_height(parent_style, height_reference))
            .and_then(|d| parse_dimension(Some(&d), Some(screen.height)))
            .filter(|h| *h != 0.0)
            .unwrap_or(screen.height);

        Level {
            inset,
            is_row,
            parent_width,
            parent_height,
            allocation,
            calculated_child_width,
        }
    }

    /// Context for walking the children of `parent`, a child of this level.
    pub(crate) fn context_for<'a>(
        &self,
        parent: &'a View,
        width: f32,
        running: f32,
        expansion_depth: usize,
    ) -> ParentContext<'a> {
        ParentContext {
            reference_width: Some(self.parent_width),
            expansion_depth,
            ..ParentContext::child_of(parent, width, self.is_row, running)
        }
    }

    /// Width handed down to the child at `key`: its share of the parent's
    /// content width, or the level's generic child width.
    pub(crate) fn child_width(&self, key: Option<ChildKey>) -> f32 {
        key.and_then(|k| self.allocation.get(k))
            .filter(|w| *w > 0.0)
            .unwrap_or(self.calculated_child_width)
    }
}

fn is_zero(d: &Dimension) -> bool {
    matches!(d, Dimension::Points(v) if *v == 0.0)
}

/// Width a level's children are sized after. At the root that is the
/// wrapped node itself; deeper down only a parent with a single child
/// dictates it.
fn adjusted_child_width(child: &View, ctx: &ParentContext<'_>, parent_width: f32) -> Option<f32> {
    let subject = match ctx.parent {
        ParentRef::Root => child,
        ParentRef::Node(parent) => match parent.children.as_slice() {
            [only] => only,
            _ => return None,
        },
    };
    let declared = if subject.class() == (NodeClass::Composite { expandable: true }) {
        subject
            .expand()
            .ok()
            .and_then(|v| child_declared_width(&v))
    } else {
        child_declared_width(subject)
    }?;
    parse_dimension(Some(&declared), Some(parent_width))
}

/// Rewrites trees into placeholder trees. Captures the ambient screen
/// metrics, theme and config when created.
#[derive(Clone, Debug)]
pub struct Walker {
    pub(crate) config: ShimmerConfig,
    pub(crate) screen: ScreenMetrics,
    pub(crate) theme: PlaceholderTheme,
    pub(crate) overlay: OverlayTemplate,
    pub(crate) loading: bool,
}

impl Walker {
    pub fn new(overlay: OverlayTemplate, loading: bool) -> Self {
        Self {
            config: shimmer_config(),
            screen: screen_metrics(),
            theme: placeholder_theme(),
            overlay,
            loading,
        }
    }

    /// Walks `children` below `ctx.parent` and returns their rewritten
    /// counterparts, in order.
    pub fn walk(&self, children: &[View], ctx: ParentContext<'_>) -> Vec<View> {
        let level = Level::new(children, &ctx, &self.screen);
        log::trace!(
            "level: {} children, parent width {}, child width {}",
            children.len(),
            level.parent_width,
            level.calculated_child_width
        );

        let mut running = 0.0;
        let mut out = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let (view, next) = self.visit(child, index, Some(index), &level, &ctx, running);
            running = next;
            out.push(view);
        }
        out
    }

    fn visit(
        &self,
        node: &View,
        index: usize,
        key: Option<ChildKey>,
        level: &Level,
        ctx: &ParentContext<'_>,
        running: f32,
    ) -> (View, f32) {
        match node.class() {
            NodeClass::VirtualizedList => (
                self.adapt_list(node, level, running, ctx.expansion_depth),
                running,
            ),
            NodeClass::Container | NodeClass::Composite { expandable: false } => {
                let width = level.child_width(key);
                let inner = level.context_for(node, width, running, ctx.expansion_depth);
                let children = self.walk(&node.children, inner);
                let mut out = node.clone();
                out.children = children;
                (out, running)
            }
            NodeClass::Composite { expandable: true } => match self.expand_from(node, ctx.expansion_depth) {
                Ok((expanded, expansion_depth)) => {
                    let ctx = ParentContext {
                        expansion_depth,
                        ..*ctx
                    };
                    self.visit(&expanded, index, None, level, &ctx, running)
                }
                Err(err) => {
                    log::warn!("{err}; drawing `{}` as one block", node.display_name());
                    self.leaf(node, index, key, level, ctx, running)
                }
            },
            NodeClass::Leaf => self.leaf(node, index, key, level, ctx, running),
        }
    }

    /// Expands a component until its output is no longer an expandable
    /// component.
    pub fn expand_fully(&self, node: &View) -> Result<View> {
        self.expand_from(node, 0).map(|(view, _)| view)
    }

    /// Expands `node` below `depth` earlier expansions. Returns the output and
    /// the depth reached; fails once the depth would pass
    /// `max_expansion_depth`, which also catches components that render
    /// themselves further down their own subtree.
    pub(crate) fn expand_from(&self, node: &View, mut depth: usize) -> Result<(View, usize)> {
        let mut current: Option<View> = None;
        loop {
            let subject = current.as_ref().unwrap_or(node);
            if subject.class() != (NodeClass::Composite { expandable: true }) {
                break;
            }
            if depth >= self.config.max_expansion_depth {
                return Err(ExpandError::DepthExceeded {
                    component: node.display_name().to_string(),
                    depth,
                });
            }
            current = Some(subject.expand()?);
            depth += 1;
        }
        Ok((current.unwrap_or_else(|| node.clone()), depth))
    }

    fn leaf(
        &self,
        node: &View,
        index: usize,
        key: Option<ChildKey>,
        level: &Level,
        ctx: &ParentContext<'_>,
        running: f32,
    ) -> (View, f32) {
        let style = &node.style;
        let running = running_margin(style, running);
        let total_margin = horizontal_margin(style);

        let resolved = declared_width(style, Some(level.parent_width))
            .and_then(|d| parse_dimension(Some(&d), Some(level.parent_width)))
            .or_else(|| label_width(node))
            .unwrap_or_else(|| level.child_width(key));
        let width = adjusted_width(resolved, total_margin, ctx.prev_margin);

        let height = declared_height(style, Some(level.parent_width))
            .and_then(|d| parse_dimension(Some(&d), Some(level.parent_height)))
            .or(style.font_size)
            .unwrap_or(self.config.default_font_size);

        let emission = Emission {
            index,
            child_style: style.clone(),
            box_style: placeholder_box_style(style, width, height, &self.config, &self.theme),
            width,
            height,
            parent_width: level.parent_width,
            loading: self.loading,
        };
        (emit(emission, &self.overlay, &self.screen), running)
    }

    /// Rewrites the single tree `content` from the synthetic root.
    pub fn walk_root(&self, content: &View) -> Vec<View> {
        self.walk(slice::from_ref(content), ParentContext::root())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimmer_core::{Component, Placeholder, ViewKind};

    fn walker() -> Walker {
        Walker::new(OverlayTemplate::shimmer(&PlaceholderTheme::default()), true)
    }

    fn placeholder(v: &View) -> Placeholder {
        match &v.kind {
            ViewKind::Placeholder(p) => *p,
            other => panic!("expected a placeholder, got {other:?}"),
        }
    }

    fn column(children: Vec<View>) -> View {
        View::new(0, ViewKind::Box).with_children(children)
    }

    #[test]
    fn test_percentage_round_trip() {
        let leaf = View::new(1, ViewKind::Box).style(ViewStyle::new().width_percent(50.0).margin(5.0));
        let parent = View::new(0, ViewKind::Box)
            .style(ViewStyle::new().width(300.0))
            .child(leaf);
        let out = walker().walk_root(&parent);
        let p = placeholder(&out[0].children[0]);
        assert_eq!(p.parent_width, 300.0);
        assert_eq!(p.width, 150.0 - 10.0);
    }

    #[test]
    fn test_row_children_share_width() {
        let row = View::new(0, ViewKind::Box)
            .style(ViewStyle::new().row().width(400.0))
            .with_children(vec![
                View::new(1, ViewKind::Box).style(ViewStyle::new().width(100.0)),
                View::new(2, ViewKind::Box),
                View::new(3, ViewKind::Box),
            ]);
        let out = walker().walk_root(&row);
        let widths: Vec<f32> = out[0].children.iter().map(|c| placeholder(c).width).collect();
        assert_eq!(widths, vec![100.0, 150.0, 150.0]);
        assert_eq!(widths.iter().sum::<f32>(), 400.0);
    }

    #[test]
    fn test_column_children_full_width_minus_padding() {
        let col = View::new(0, ViewKind::Box)
            .style(ViewStyle::new().width(300.0).padding(10.0))
            .with_children(vec![View::new(1, ViewKind::Box), View::new(2, ViewKind::Box)]);
        let out = walker().walk_root(&col);
        for c in &out[0].children {
            assert_eq!(placeholder(c).width, 280.0);
        }
    }

    #[test]
    fn test_aspect_leaf_and_height() {
        let parent = column(vec![
            View::new(1, ViewKind::Image { source: "a.png".into() })
                .style(ViewStyle::new().height(100.0).aspect_ratio(2.0)),
            View::new(2, ViewKind::Image { source: "b.png".into() })
                .style(ViewStyle::new().width(100.0).aspect_ratio(2.0)),
        ]);
        let out = walker().walk_root(&parent);
        let a = placeholder(&out[0].children[0]);
        assert_eq!((a.width, a.height), (200.0, 100.0));
        let b = placeholder(&out[0].children[1]);
        assert_eq!((b.width, b.height), (100.0, 50.0));
    }

    #[test]
    fn test_height_fallbacks() {
        let parent = column(vec![
            View::new(1, ViewKind::Text { text: "x".into() }).style(ViewStyle::new().font_size(22.0)),
            View::new(2, ViewKind::Box),
            View::new(3, ViewKind::Box).style(ViewStyle::new().height_percent(50.0)),
        ])
        .style(ViewStyle::new().height(200.0));
        let out = walker().walk_root(&parent);
        assert_eq!(placeholder(&out[0].children[0]).height, 22.0);
        assert_eq!(placeholder(&out[0].children[1]).height, 16.0);
        assert_eq!(placeholder(&out[0].children[2]).height, 100.0);
    }

    #[test]
    fn test_margins_reduce_width_and_carry_into_nested_levels() {
        let parent = column(vec![
            View::new(1, ViewKind::Box).style(ViewStyle::new().margin(5.0)),
            column(vec![View::new(3, ViewKind::Box)]),
        ])
        .style(ViewStyle::new().width(200.0));
        let out = walker().walk_root(&parent);
        assert_eq!(placeholder(&out[0].children[0]).width, 190.0);
        // the earlier sibling's margin is subtracted one level down
        assert_eq!(placeholder(&out[0].children[1].children[0]).width, 195.0);
    }

    #[test]
    fn test_negative_width_clamps_to_zero() {
        let parent = column(vec![View::new(1, ViewKind::Box).style(ViewStyle::new().width(4.0).margin(10.0))]);
        let out = walker().walk_root(&parent);
        assert_eq!(placeholder(&out[0].children[0]).width, 0.0);
    }

    #[test]
    fn test_component_is_expanded() {
        let card = View::new(
            1,
            ViewKind::Component(Component::new("Card", || {
                View::new(10, ViewKind::Box)
                    .style(ViewStyle::new().row().width(200.0))
                    .with_children(vec![View::new(11, ViewKind::Box), View::new(12, ViewKind::Box)])
            })),
        );
        let out = walker().walk_root(&column(vec![card]));
        let expanded = &out[0].children[0];
        assert_eq!(expanded.id, 10);
        let widths: Vec<f32> = expanded.children.iter().map(|c| placeholder(c).width).collect();
        assert_eq!(widths, vec![100.0, 100.0]);
    }

    #[test]
    fn test_component_with_own_children_recurses() {
        let comp = View::new(1, ViewKind::Component(Component::new("Section", View::default)))
            .child(View::new(2, ViewKind::Text { text: "t".into() }).accessibility_label("abc"));
        let out = walker().walk_root(&column(vec![comp]));
        let section = &out[0].children[0];
        assert!(matches!(section.kind, ViewKind::Component(_)));
        assert_eq!(placeholder(&section.children[0]).width, 30.0);
    }

    fn self_expanding() -> View {
        View::new(7, ViewKind::Component(Component::new("Forever", self_expanding)))
    }

    #[test]
    fn test_expansion_depth_is_bounded() {
        let w = walker();
        let err = w.expand_fully(&self_expanding()).unwrap_err();
        assert_eq!(
            err,
            ExpandError::DepthExceeded {
                component: "Forever".into(),
                depth: 32,
            }
        );
        // the walk degrades to a single block instead of failing
        let out = w.walk_root(&column(vec![self_expanding()]));
        assert!(matches!(out[0].children[0].kind, ViewKind::Placeholder(_)));
    }

    #[test]
    fn test_padded_row_subtracts_inset_once() {
        let row = View::new(0, ViewKind::Box)
            .style(ViewStyle::new().row().width(400.0).padding(10.0))
            .with_children(vec![
                View::new(1, ViewKind::Box).style(ViewStyle::new().width(80.0)),
                View::new(2, ViewKind::Box),
                View::new(3, ViewKind::Box),
            ]);
        let out = walker().walk_root(&row);
        let widths: Vec<f32> = out[0].children.iter().map(|c| placeholder(c).width).collect();
        assert_eq!(widths, vec![80.0, 150.0, 150.0]);
        assert_eq!(widths.iter().sum::<f32>(), 400.0 - 20.0);
    }

    #[test]
    fn test_row_child_container_hands_down_its_width() {
        let cell = || View::new(20, ViewKind::Component(Component::new("Cell", || View::new(21, ViewKind::Box))));
        let inner = View::new(2, ViewKind::Box)
            .style(ViewStyle::new().padding(5.0))
            .with_children(vec![View::new(3, ViewKind::Box), cell()]);
        let row = View::new(0, ViewKind::Box)
            .style(ViewStyle::new().row().width(400.0))
            .with_children(vec![View::new(1, ViewKind::Box).style(ViewStyle::new().width(100.0)), inner]);
        let out = walker().walk_root(&row);
        let inner = &out[0].children[1];
        // the keyed leaf and the expanded cell both span the container minus its padding
        assert_eq!(placeholder(&inner.children[0]).width, 290.0);
        assert_eq!(placeholder(&inner.children[1]).width, 290.0);
    }

    #[test]
    fn test_previous_row_inherits_width_minus_inset() {
        let nested = View::new(2, ViewKind::Box)
            .style(ViewStyle::new().row().padding(5.0))
            .with_children(vec![
                View::new(3, ViewKind::Box).style(ViewStyle::new().width(40.0)),
                View::new(4, ViewKind::Box),
            ]);
        let screen = ScreenMetrics::default();
        let children = nested.children.clone();

        let under_row = ParentContext::child_of(&nested, 300.0, true, 0.0);
        let level = Level::new(&children, &under_row, &screen);
        assert_eq!(level.inset, 10.0);
        assert_eq!(level.calculated_child_width, 290.0);

        let under_column = ParentContext::child_of(&nested, 300.0, false, 0.0);
        let level = Level::new(&children, &under_column, &screen);
        assert_eq!(level.calculated_child_width, 250.0);
    }

    fn nested_self() -> View {
        View::new(
            7,
            ViewKind::Component(Component::new("Tree", || View::new(8, ViewKind::Box).child(nested_self()))),
        )
    }

    #[test]
    fn test_indirect_self_expansion_is_bounded() {
        let w = walker();
        let out = w.walk_root(&column(vec![nested_self()]));
        let mut node = &out[0].children[0];
        let mut boxes = 0;
        while matches!(node.kind, ViewKind::Box) {
            boxes += 1;
            node = &node.children[0];
        }
        assert_eq!(boxes, w.config.max_expansion_depth);
        assert!(matches!(node.kind, ViewKind::Placeholder(_)));
        assert_eq!(
            w.expand_from(&nested_self(), 32).unwrap_err(),
            ExpandError::DepthExceeded {
                component: "Tree".into(),
                depth: 32,
            }
        );
    }

    #[test]
    fn test_root_context_is_sentinel() {
        assert!(ParentContext::root().is_root());
        let v = View::default();
        assert!(!ParentContext::child_of(&v, 10.0, false, 0.0).is_root());
    }
}
