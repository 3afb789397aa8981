//! Resolving raw style dimensions to numbers.

use shimmer_core::{Dimension, shimmer_config};

/// Resolves `value` against `reference`.
///
/// Percentages need a non-zero reference; `"NNpx"` and bare leading numbers
/// parse as points. Anything else yields `None`.
pub fn parse_dimension(value: Option<&Dimension>, reference: Option<f32>) -> Option<f32> {
    match value? {
        Dimension::Points(v) => Some(*v),
        Dimension::Percent(p) => percent_of(*p, reference),
        Dimension::Raw(raw) => {
            let raw = raw.trim();
            if let Some(p) = raw.strip_suffix('%') {
                percent_of(leading_float(p)?, reference)
            } else if let Some(px) = raw.strip_suffix("px") {
                leading_float(px)
            } else {
                leading_float(raw)
            }
        }
    }
}

/// Whether `value` is relative to its parent.
pub fn is_percentage(value: &Dimension) -> bool {
    match value {
        Dimension::Percent(_) => true,
        Dimension::Raw(raw) => raw.trim_end().ends_with('%'),
        Dimension::Points(_) => false,
    }
}

fn percent_of(p: f32, reference: Option<f32>) -> Option<f32> {
    let reference = reference.filter(|r| *r != 0.0)?;
    Some(p / shimmer_config().percentage_denominator * reference)
}

/// Longest numeric prefix of `s`, e.g. `12.5` for `"12.5abc"`.
pub(crate) fn leading_float(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    (1..=end)
        .rev()
        .find_map(|n| s[..n].parse::<f32>().ok())
        .filter(|v| v.is_finite())
}
