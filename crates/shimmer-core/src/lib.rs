//! # Views, styles and placeholder locals
//!
//! `shimmer-core` holds the data model the placeholder engine walks:
//!
//! - `View`: an immutable tree node with a `ViewKind`, a `ViewStyle` and
//!   children.
//! - `ViewStyle`: the subset of layout style that decides placeholder
//!   geometry (widths, heights, aspect ratio, margins, padding, direction).
//! - locals: `ScreenMetrics`, `PlaceholderTheme` and `ShimmerConfig`,
//!   provided per subtree.
//!
//! ## Building a tree
//!
//! ```rust
//! use shimmer_core::*;
//!
//! let row = View::new(1, ViewKind::Box)
//!     .style(ViewStyle::new().row().padding(8.0))
//!     .child(View::new(2, ViewKind::Image { source: "avatar.png".into() })
//!         .style(ViewStyle::new().size(48.0, 48.0)))
//!     .child(View::new(3, ViewKind::Text { text: "Jane".into() })
//!         .accessibility_label("Jane Doe"));
//!
//! assert_eq!(row.class(), NodeClass::Container);
//! assert_eq!(row.children[1].class(), NodeClass::Leaf);
//! ```
//!
//! ## Components
//!
//! A `Component` node is not drawn directly; it is expanded into the view it
//! renders. Expansion is pure and may run more than once:
//!
//! ```rust
//! use shimmer_core::*;
//!
//! let card = View::new(7, ViewKind::Component(Component::new("Card", || {
//!     View::new(8, ViewKind::Box).style(ViewStyle::new().width(120.0))
//! })));
//!
//! assert_eq!(card.class(), NodeClass::Composite { expandable: true });
//! assert_eq!(card.expand().unwrap().style.width, Some(Dimension::Points(120.0)));
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod locals;
pub mod style;
pub mod tests;
pub mod view;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use locals::*;
pub use style::*;
pub use view::*;
