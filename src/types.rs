//! Numeric primitives shared by the markup writers.

use std::fmt;

use serde::Deserialize;

/// A number as it appears in generated markup.
///
/// Formatting follows the scenegraph's native number-to-string rules:
/// integers print without a fractional part, `-0` prints as `0`, and
/// non-finite values print as `NaN`, `Infinity` or `-Infinity`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Num(pub f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v == 0.0 {
            f.write_str("0")
        } else if v.is_nan() {
            f.write_str("NaN")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
        } else {
            write!(f, "{v}")
        }
    }
}

/// Treat a missing or NaN number the way the scenegraph treats a falsy one.
#[inline]
pub(crate) fn or_zero(v: Option<f64>) -> f64 {
    match v {
        Some(v) if !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Margins around the plotting area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Padding {
    /// Same margin on all four sides.
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            left: v,
            right: v,
            bottom: v,
        }
    }

    /// Total horizontal margin.
    #[inline]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Total vertical margin.
    #[inline]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(Num(10.0).to_string(), "10");
        assert_eq!(Num(-3.0).to_string(), "-3");
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(Num(-0.0).to_string(), "0");
    }

    #[test]
    fn fractions_round_trip() {
        assert_eq!(Num(0.5).to_string(), "0.5");
        assert_eq!(Num(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(Num(f64::NAN).to_string(), "NaN");
        assert_eq!(Num(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Num(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        assert_eq!(or_zero(None), 0.0);
        assert_eq!(or_zero(Some(f64::NAN)), 0.0);
        assert_eq!(or_zero(Some(4.5)), 4.5);
    }

    #[test]
    fn padding_totals() {
        let p = Padding {
            top: 1.0,
            left: 2.0,
            right: 3.0,
            bottom: 4.0,
        };
        assert_eq!(p.horizontal(), 5.0);
        assert_eq!(p.vertical(), 5.0);
        assert_eq!(Padding::uniform(7.0).horizontal(), 14.0);
    }
}
