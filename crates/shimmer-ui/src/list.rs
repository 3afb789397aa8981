//! Virtualized lists while loading.
//!
//! A list's items only exist once the host runs its template, so the list is
//! handed a fixed synthetic dataset and a template that rewrites whatever the
//! list's own template renders.

use std::any::Any;
use std::rc::Rc;

use shimmer_core::{LazyList, ListItem, NodeClass, RenderItem, View, ViewKind};

use crate::walker::{Level, Walker};

/// Stand-in data item fed to a list's template while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntheticItem {
    pub id: String,
    pub title: String,
}

/// `count` items with ids `"1"`, `"2"`, ... and titles `"Item 1"`, ...
pub fn synthetic_items(count: usize) -> Rc<[Rc<dyn Any>]> {
    (1..=count)
        .map(|i| {
            Rc::new(SyntheticItem {
                id: i.to_string(),
                title: format!("Item {i}"),
            }) as Rc<dyn Any>
        })
        .collect()
}

impl Walker {
    /// Clones a list node with synthetic data and a rewriting template. Every
    /// other list setting is kept; a list without a template stays without.
    pub(crate) fn adapt_list(&self, node: &View, level: &Level, running: f32, depth: usize) -> View {
        let ViewKind::LazyList(list) = &node.kind else {
            return node.clone();
        };
        let render_item = list
            .render_item
            .clone()
            .map(|template| self.wrap_template(template, level.clone(), running, depth));
        if render_item.is_none() {
            log::debug!("list `{}` has no item template", node.id);
        }

        let mut out = node.clone();
        out.kind = ViewKind::LazyList(LazyList {
            data: synthetic_items(self.config.synthetic_item_count),
            render_item,
            ..list.clone()
        });
        out
    }

    fn wrap_template(&self, template: RenderItem, level: Level, running: f32, depth: usize) -> RenderItem {
        let walker = self.clone();
        Rc::new(move |item: ListItem<'_>| walker.list_item(template(item), &level, running, depth))
    }

    fn list_item(&self, rendered: View, level: &Level, running: f32, depth: usize) -> View {
        let width = level.child_width(None);
        let (item, depth) = match self.expand_from(&rendered, depth) {
            Ok(expanded) => expanded,
            Err(err) => {
                log::warn!("{err}; list item drawn as one block");
                (rendered, depth)
            }
        };

        match item.class() {
            NodeClass::Container | NodeClass::Composite { expandable: false } => {
                let children = self.walk(&item.children, level.context_for(&item, width, running, depth));
                let mut out = item;
                out.children = children;
                out
            }
            _ => {
                // a bare leaf item is walked as the only child of a plain holder
                let holder = View::new(item.id, ViewKind::Box).child(item);
                self.walk(&holder.children, level.context_for(&holder, width, running, depth))
                    .into_iter()
                    .next()
                    .unwrap_or_default()
            }
        }
    }
}
