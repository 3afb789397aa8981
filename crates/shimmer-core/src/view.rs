use std::any::Any;
use std::rc::Rc;

use web_time::Duration;

use crate::error::{ExpandError, Result};
use crate::ViewStyle;

pub type ViewId = u64;

/// Item template of a virtualized list. Receives the type-erased data item.
pub type RenderItem = Rc<dyn Fn(ListItem<'_>) -> View>;

/// Whether a node receives pointer input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

/// A higher-order node whose real shape is obtained by invoking it.
///
/// The render closure captures the component's inputs, so invoking it is the
/// "expand" step: pure, idempotent and safe to call speculatively.
#[derive(Clone)]
pub struct Component {
    pub name: String,
    render: Rc<dyn Fn() -> View>,
}

impl Component {
    pub fn new(name: impl Into<String>, render: impl Fn() -> View + 'static) -> Self {
        Self {
            name: name.into(),
            render: Rc::new(render),
        }
    }

    pub fn render(&self) -> View {
        (self.render)()
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Rc::ptr_eq(&self.render, &other.render)
    }
}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("name", &self.name)
            .field("render", &"<fn>")
            .finish()
    }
}

/// One data item handed to a list's item template.
#[derive(Clone, Copy)]
pub struct ListItem<'a> {
    pub data: &'a dyn Any,
    pub index: usize,
}

/// A virtualized list: data plus an item template that is only run when the
/// host draws the list.
#[derive(Clone)]
pub struct LazyList {
    pub data: Rc<[Rc<dyn Any>]>,
    pub render_item: Option<RenderItem>,
    pub horizontal: bool,
    pub item_spacing: f32,
}

impl LazyList {
    /// Typed constructor. The template gets `None` when a data item is not a `T`.
    pub fn new<T, F>(items: Vec<T>, render: F) -> Self
    where
        T: 'static,
        F: Fn(Option<&T>, usize) -> View + 'static,
    {
        let data: Vec<Rc<dyn Any>> = items
            .into_iter()
            .map(|item| Rc::new(item) as Rc<dyn Any>)
            .collect();
        let render_item: RenderItem =
            Rc::new(move |item: ListItem<'_>| render(item.data.downcast_ref::<T>(), item.index));
        Self {
            data: data.into(),
            render_item: Some(render_item),
            horizontal: false,
            item_spacing: 0.0,
        }
    }

    /// A list that has data but no item template yet.
    pub fn untemplated(data: Vec<Rc<dyn Any>>) -> Self {
        Self {
            data: data.into(),
            render_item: None,
            horizontal: false,
            item_spacing: 0.0,
        }
    }

    pub fn horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Runs the template over every data item, the way the host does at draw time.
    pub fn render_items(&self) -> Vec<View> {
        let Some(render) = &self.render_item else {
            return Vec::new();
        };
        self.data
            .iter()
            .enumerate()
            .map(|(index, data)| {
                render(ListItem {
                    data: data.as_ref(),
                    index,
                })
            })
            .collect()
    }
}

impl PartialEq for LazyList {
    fn eq(&self, other: &Self) -> bool {
        let same_template = match (&self.render_item, &other.render_item) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        Rc::ptr_eq(&self.data, &other.data)
            && same_template
            && self.horizontal == other.horizontal
            && self.item_spacing == other.item_spacing
    }
}

impl std::fmt::Debug for LazyList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyList")
            .field("len", &self.data.len())
            .field("render_item", &self.render_item.as_ref().map(|_| "<fn>"))
            .field("horizontal", &self.horizontal)
            .field("item_spacing", &self.item_spacing)
            .finish()
    }
}

/// Geometry of an emitted placeholder block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placeholder {
    pub index: usize,
    pub width: f32,
    pub height: f32,
    pub parent_width: f32,
}

/// The animated sweep drawn over a placeholder. Only sizing and timing live
/// here; the host drives the frames. What is swept is the overlay node's
/// single child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShimmerOverlay {
    pub sweep_width: f32,
    pub duration: Duration,
    /// Loop target of the sweep progress, in `0.0..=1.0`.
    pub sweep_end: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ViewKind {
    #[default]
    Box,
    Scroll,
    Text {
        text: String,
    },
    Image {
        source: String,
    },
    Component(Component),
    LazyList(LazyList),
    Placeholder(Placeholder),
    Overlay(ShimmerOverlay),
}

impl ViewKind {
    pub fn name(&self) -> &'static str {
        match self {
            ViewKind::Box => "Box",
            ViewKind::Scroll => "Scroll",
            ViewKind::Text { .. } => "Text",
            ViewKind::Image { .. } => "Image",
            ViewKind::Component(_) => "Component",
            ViewKind::LazyList(_) => "LazyList",
            ViewKind::Placeholder(_) => "Placeholder",
            ViewKind::Overlay(_) => "Overlay",
        }
    }
}

/// How the placeholder walk treats a node. Decided once per node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClass {
    /// Text-like, or childless with nothing to expand.
    Leaf,
    /// Primitive node with children.
    Container,
    /// Higher-order node. `expandable` is set when it carries no children of
    /// its own and must be invoked to get its rendered output.
    Composite { expandable: bool },
    VirtualizedList,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct View {
    pub id: ViewId,
    pub kind: ViewKind,
    pub style: ViewStyle,
    pub children: Vec<View>,
    pub accessibility_label: Option<String>,
    /// Styles the logical content area of scrollables and lists.
    pub content_container_style: Option<ViewStyle>,
    pub pointer_events: PointerEvents,
}

impl View {
    pub fn new(id: ViewId, kind: ViewKind) -> Self {
        View {
            id,
            kind,
            ..Default::default()
        }
    }
    pub fn style(mut self, style: ViewStyle) -> Self {
        self.style = style;
        self
    }
    pub fn with_children(mut self, kids: Vec<View>) -> Self {
        self.children = kids;
        self
    }
    pub fn child(mut self, kid: View) -> Self {
        self.children.push(kid);
        self
    }
    pub fn accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.accessibility_label = Some(label.into());
        self
    }
    pub fn content_container_style(mut self, style: ViewStyle) -> Self {
        self.content_container_style = Some(style);
        self
    }
    pub fn pointer_events(mut self, pe: PointerEvents) -> Self {
        self.pointer_events = pe;
        self
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ViewKind::Text { .. })
    }

    pub fn class(&self) -> NodeClass {
        match &self.kind {
            ViewKind::LazyList(_) => NodeClass::VirtualizedList,
            ViewKind::Component(_) => NodeClass::Composite {
                expandable: self.children.is_empty(),
            },
            ViewKind::Text { .. } => NodeClass::Leaf,
            _ if self.children.is_empty() => NodeClass::Leaf,
            _ => NodeClass::Container,
        }
    }

    /// Invokes a component node once to obtain its rendered output.
    pub fn expand(&self) -> Result<View> {
        match &self.kind {
            ViewKind::Component(c) => {
                log::trace!("expanding component `{}`", c.name);
                Ok(c.render())
            }
            other => Err(ExpandError::NotExpandable { kind: other.name() }),
        }
    }

    /// Name used in diagnostics: the component name, else the kind name.
    pub fn display_name(&self) -> &str {
        match &self.kind {
            ViewKind::Component(c) => &c.name,
            other => other.name(),
        }
    }
}
