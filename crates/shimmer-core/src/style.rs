use taffy::FlexDirection;

use crate::{Brush, Color};

/// A raw style dimension as the author wrote it.
#[derive(Clone, Debug, PartialEq)]
pub enum Dimension {
    Points(f32),
    /// `50.0` means 50%.
    Percent(f32),
    /// Unparsed string, e.g. `"50px"` or `"25%"`.
    Raw(String),
}

impl From<f32> for Dimension {
    fn from(v: f32) -> Self {
        Dimension::Points(v)
    }
}

impl From<&str> for Dimension {
    fn from(s: &str) -> Self {
        Dimension::Raw(s.to_string())
    }
}

impl From<String> for Dimension {
    fn from(s: String) -> Self {
        Dimension::Raw(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AspectRatio {
    Ratio(f32),
    Auto,
}

impl AspectRatio {
    /// Whether an aspect ratio is set at all (`Auto` counts, zero and NaN don't).
    pub fn is_set(&self) -> bool {
        match self {
            AspectRatio::Ratio(r) => *r != 0.0 && !r.is_nan(),
            AspectRatio::Auto => true,
        }
    }

    /// The ratio usable for deriving a missing side.
    pub fn usable(&self) -> Option<f32> {
        match self {
            AspectRatio::Ratio(r) if r.is_finite() && *r > 0.0 => Some(*r),
            _ => None,
        }
    }
}

/// Style descriptor of a node. Only the properties that influence placeholder
/// geometry are modelled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewStyle {
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub aspect_ratio: Option<AspectRatio>,
    /// `None` means column.
    pub flex_direction: Option<FlexDirection>,
    pub margin: Option<f32>,
    pub margin_left: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_horizontal: Option<f32>,
    pub padding: Option<f32>,
    pub padding_left: Option<f32>,
    pub padding_right: Option<f32>,
    pub padding_horizontal: Option<f32>,
    pub font_size: Option<f32>,
    pub background: Option<Brush>,
    pub overflow_hidden: bool,
}

impl ViewStyle {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn width(mut self, w: f32) -> Self {
        self.width = Some(Dimension::Points(w));
        self
    }
    pub fn width_percent(mut self, p: f32) -> Self {
        self.width = Some(Dimension::Percent(p));
        self
    }
    pub fn width_dim(mut self, d: impl Into<Dimension>) -> Self {
        self.width = Some(d.into());
        self
    }
    pub fn height(mut self, h: f32) -> Self {
        self.height = Some(Dimension::Points(h));
        self
    }
    pub fn height_percent(mut self, p: f32) -> Self {
        self.height = Some(Dimension::Percent(p));
        self
    }
    pub fn height_dim(mut self, d: impl Into<Dimension>) -> Self {
        self.height = Some(d.into());
        self
    }
    pub fn size(self, w: f32, h: f32) -> Self {
        self.width(w).height(h)
    }
    pub fn aspect_ratio(mut self, ratio: f32) -> Self {
        self.aspect_ratio = Some(AspectRatio::Ratio(ratio));
        self
    }
    pub fn aspect_ratio_auto(mut self) -> Self {
        self.aspect_ratio = Some(AspectRatio::Auto);
        self
    }
    pub fn flex_dir(mut self, d: FlexDirection) -> Self {
        self.flex_direction = Some(d);
        self
    }
    pub fn row(self) -> Self {
        self.flex_dir(FlexDirection::Row)
    }
    pub fn column(self) -> Self {
        self.flex_dir(FlexDirection::Column)
    }
    pub fn margin(mut self, v: f32) -> Self {
        self.margin = Some(v);
        self
    }
    pub fn margin_left(mut self, v: f32) -> Self {
        self.margin_left = Some(v);
        self
    }
    pub fn margin_right(mut self, v: f32) -> Self {
        self.margin_right = Some(v);
        self
    }
    pub fn margin_horizontal(mut self, v: f32) -> Self {
        self.margin_horizontal = Some(v);
        self
    }
    pub fn padding(mut self, v: f32) -> Self {
        self.padding = Some(v);
        self
    }
    pub fn padding_left(mut self, v: f32) -> Self {
        self.padding_left = Some(v);
        self
    }
    pub fn padding_right(mut self, v: f32) -> Self {
        self.padding_right = Some(v);
        self
    }
    pub fn padding_horizontal(mut self, v: f32) -> Self {
        self.padding_horizontal = Some(v);
        self
    }
    pub fn font_size(mut self, v: f32) -> Self {
        self.font_size = Some(v);
        self
    }
    /// Set a solid color background.
    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(Brush::Solid(color));
        self
    }
    pub fn background_brush(mut self, brush: Brush) -> Self {
        self.background = Some(brush);
        self
    }
    pub fn overflow_hidden(mut self) -> Self {
        self.overflow_hidden = true;
        self
    }

    /// Only an explicit `Row` counts; reversed rows are not predicted.
    pub fn is_row(&self) -> bool {
        self.flex_direction == Some(FlexDirection::Row)
    }

    /// Flattens `other` on top of `self`; set fields of `other` win.
    pub fn merged(&self, other: &ViewStyle) -> ViewStyle {
        ViewStyle {
            width: other.width.clone().or_else(|| self.width.clone()),
            height: other.height.clone().or_else(|| self.height.clone()),
            aspect_ratio: other.aspect_ratio.or(self.aspect_ratio),
            flex_direction: other.flex_direction.or(self.flex_direction),
            margin: other.margin.or(self.margin),
            margin_left: other.margin_left.or(self.margin_left),
            margin_right: other.margin_right.or(self.margin_right),
            margin_horizontal: other.margin_horizontal.or(self.margin_horizontal),
            padding: other.padding.or(self.padding),
            padding_left: other.padding_left.or(self.padding_left),
            padding_right: other.padding_right.or(self.padding_right),
            padding_horizontal: other.padding_horizontal.or(self.padding_horizontal),
            font_size: other.font_size.or(self.font_size),
            background: other.background.clone().or_else(|| self.background.clone()),
            overflow_hidden: other.overflow_hidden || self.overflow_hidden,
        }
    }

    /// Converts to the host layout engine's style.
    ///
    /// A node without a width (declared or derivable from its height) becomes a
    /// flexible item (`flex: 1 1 0`), which is what the placeholder prediction
    /// assumes for unsized children.
    pub fn to_taffy(&self) -> taffy::Style {
        use taffy::geometry::{Rect, Size};
        use taffy::prelude::{auto, length, percent};
        use taffy::style::{Display, Style};

        fn dim(d: &Option<Dimension>) -> taffy::style::Dimension {
            match d {
                Some(Dimension::Points(v)) => length(*v),
                Some(Dimension::Percent(p)) => percent(*p / 100.0),
                _ => auto(),
            }
        }

        let mut s = Style {
            display: Display::Flex,
            flex_direction: self.flex_direction.unwrap_or(FlexDirection::Column),
            ..Default::default()
        };

        s.size = Size {
            width: dim(&self.width),
            height: dim(&self.height),
        };
        let derives_width =
            self.height.is_some() && self.aspect_ratio.and_then(|a| a.usable()).is_some();
        if self.width.is_none() && !derives_width {
            s.flex_grow = 1.0;
            s.flex_shrink = 1.0;
            s.flex_basis = length(0.0);
        }
        if let Some(r) = self.aspect_ratio.and_then(|a| a.usable()) {
            s.aspect_ratio = Some(r);
        }

        let side = |specific: Option<f32>, axis: Option<f32>, all: Option<f32>| {
            specific.or(axis).or(all).unwrap_or(0.0)
        };
        s.margin = Rect {
            left: length(side(self.margin_left, self.margin_horizontal, self.margin)),
            right: length(side(self.margin_right, self.margin_horizontal, self.margin)),
            top: length(self.margin.unwrap_or(0.0)),
            bottom: length(self.margin.unwrap_or(0.0)),
        };
        s.padding = Rect {
            left: length(side(self.padding_left, self.padding_horizontal, self.padding)),
            right: length(side(self.padding_right, self.padding_horizontal, self.padding)),
            top: length(self.padding.unwrap_or(0.0)),
            bottom: length(self.padding.unwrap_or(0.0)),
        };
        s
    }
}
