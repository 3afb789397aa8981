//! # Screen metrics, theme and tuning
//!
//! Placeholder prediction reads its ambient inputs from thread‑local
//! "composition locals":
//!
//! - `ScreenMetrics`: viewport width/height, the last-resort reference size.
//! - `PlaceholderTheme`: block and sweep colors.
//! - `ShimmerConfig`: numeric constants of the prediction.
//!
//! Override them for a subtree with `with_screen_metrics`,
//! `with_placeholder_theme` and `with_shimmer_config`:
//!
//! ```rust
//! use shimmer_core::*;
//!
//! let metrics = ScreenMetrics { width: 400.0, height: 800.0 };
//! with_screen_metrics(metrics, || {
//!     assert_eq!(screen_metrics().width, 400.0);
//! });
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;

use crate::Color;

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Non-panicking frame guard (ensures pop on unwind)
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

fn provide<T: 'static, R>(value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<T>(), Box::new(value));
        f()
    })
}

fn current<T: Copy + Default + 'static>() -> T {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return *t;
            }
        }
        T::default()
    })
}

// Typed API

/// Viewport size supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMetrics {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

/// Colors of placeholder blocks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaceholderTheme {
    /// Fill of the block itself.
    pub base: Color,
    /// Brightest color of the sweep.
    pub highlight: Color,
}

impl Default for PlaceholderTheme {
    fn default() -> Self {
        Self {
            base: Color::from_hex("#9b9b9b"),
            highlight: Color::WHITE,
        }
    }
}

/// Numeric constants of the placeholder prediction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShimmerConfig {
    /// Width per accessibility-label character of a text leaf.
    pub length_multiplier: f32,
    pub percentage_denominator: f32,
    /// `margin`/`padding` apply to both sides.
    pub padding_margin_multiplier: f32,
    /// Inset subtracted from the drawn block's width and height.
    pub offset_for_width: f32,
    /// Block margin when the node has none.
    pub default_margin: f32,
    /// Block height when the node has no height and no font size.
    pub default_font_size: f32,
    /// Items rendered by a virtualized list while loading.
    pub synthetic_item_count: usize,
    pub max_expansion_depth: usize,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            length_multiplier: 10.0,
            percentage_denominator: 100.0,
            padding_margin_multiplier: 2.0,
            offset_for_width: 4.0,
            default_margin: 3.0,
            default_font_size: 16.0,
            synthetic_item_count: 4,
            max_expansion_depth: 32,
        }
    }
}

pub fn with_screen_metrics<R>(metrics: ScreenMetrics, f: impl FnOnce() -> R) -> R {
    provide(metrics, f)
}

pub fn with_placeholder_theme<R>(theme: PlaceholderTheme, f: impl FnOnce() -> R) -> R {
    provide(theme, f)
}

pub fn with_shimmer_config<R>(config: ShimmerConfig, f: impl FnOnce() -> R) -> R {
    provide(config, f)
}

// Getters with defaults if not set

pub fn screen_metrics() -> ScreenMetrics {
    current()
}

pub fn placeholder_theme() -> PlaceholderTheme {
    current()
}

pub fn shimmer_config() -> ShimmerConfig {
    current()
}
