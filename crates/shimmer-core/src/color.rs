use smallvec::SmallVec;

use crate::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);

    pub fn from_hex(hex: &str) -> Self {
        let s = hex.trim_start_matches('#');
        let (r, g, b, a) = match s.len() {
            6 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                255,
            ),
            8 => (
                u8::from_str_radix(&s[0..2], 16).unwrap_or(0),
                u8::from_str_radix(&s[2..4], 16).unwrap_or(0),
                u8::from_str_radix(&s[4..6], 16).unwrap_or(0),
                u8::from_str_radix(&s[6..8], 16).unwrap_or(255),
            ),
            _ => (0, 0, 0, 255),
        };
        Color(r, g, b, a)
    }
}

/// A color stop at `offset` (`0.0..=1.0`) along a gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// Brush for filling placeholder blocks and overlays.
#[derive(Clone, Debug, PartialEq)]
pub enum Brush {
    /// Solid color fill
    Solid(Color),

    /// Linear gradient from `start` to `end` in normalized local coordinates
    /// (top-left is (0,0), bottom-right is (1,1)).
    Linear {
        start: Vec2,
        end: Vec2,
        stops: SmallVec<[GradientStop; 4]>,
    },
}

impl From<Color> for Brush {
    fn from(c: Color) -> Self {
        Brush::Solid(c)
    }
}

pub struct LinearGradient;

impl LinearGradient {
    pub fn with_stops(start: Vec2, end: Vec2, stops: &[(f32, Color)]) -> Brush {
        Brush::Linear {
            start,
            end,
            stops: stops
                .iter()
                .map(|&(offset, color)| GradientStop {
                    offset: offset.clamp(0.0, 1.0),
                    color,
                })
                .collect(),
        }
    }
}
