//! Exact, integer-backed length values.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, KernelResult};

const NANOMETERS_PER_MM: i64 = 1_000_000;
const NANOMETERS_PER_INCH: i64 = 25_400_000; // 25.4 mm
const NANOMETERS_PER_MIL: i64 = 25_400; // 0.0254 mm

/// A 64-bit signed count of nanometers. The fundamental length unit of the kernel.
///
/// All arithmetic is exact: no operation introduces rounding, since the backing
/// representation already is the finest granularity the file format persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Length(i64);

impl Length {
    pub const ZERO: Length = Length(0);

    pub const fn from_nanometers(nm: i64) -> Self {
        Length(nm)
    }

    pub const fn nanometers(&self) -> i64 {
        self.0
    }

    pub fn from_mm(mm: f64) -> KernelResult<Self> {
        let nm = mm * NANOMETERS_PER_MM as f64;
        if !nm.is_finite() || nm.abs() > i64::MAX as f64 {
            return Err(KernelError::OutOfRange(format!(
                "length {mm} mm does not fit in a nanometer-backed Length"
            )));
        }
        // Round to nearest, ties away from zero.
        Ok(Length(round_half_away_from_zero(nm)))
    }

    pub fn from_inches(inches: f64) -> KernelResult<Self> {
        Self::from_mm(inches * 25.4)
    }

    pub fn from_mils(mils: f64) -> KernelResult<Self> {
        Self::from_mm(mils * 0.0254)
    }

    /// Parses a decimal millimeter string, exact to 6 fractional digits.
    ///
    /// Splits on `.`, accepts an optional leading sign, and pads or truncates the
    /// fractional part to exactly 6 digits (6 decimals of millimeters is exactly
    /// 1 nanometer of resolution).
    pub fn from_mm_string(s: &str) -> KernelResult<Self> {
        let s = s.trim();
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, s.strip_prefix('+').unwrap_or(s)),
        };
        if rest.is_empty() {
            return Err(KernelError::InvalidNumber(s.to_string()));
        }
        let mut parts = rest.splitn(2, '.');
        let int_part = parts.next().unwrap_or("");
        let frac_part = parts.next().unwrap_or("");
        if parts.next().is_some() {
            return Err(KernelError::InvalidNumber(s.to_string()));
        }
        if (int_part.is_empty() && frac_part.is_empty())
            || !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(KernelError::InvalidNumber(s.to_string()));
        }
        let int_part = if int_part.is_empty() { "0" } else { int_part };
        let mut frac_digits: Vec<char> = frac_part.chars().take(6).collect();
        while frac_digits.len() < 6 {
            frac_digits.push('0');
        }
        let frac_str: String = frac_digits.into_iter().collect();
        let combined = format!("{int_part}{frac_str}");
        let magnitude: i64 = combined
            .parse()
            .map_err(|_| KernelError::OutOfRange(s.to_string()))?;
        Ok(Length(sign * magnitude))
    }

    pub fn to_mm(&self) -> f64 {
        self.0 as f64 / NANOMETERS_PER_MM as f64
    }

    pub fn to_inches(&self) -> f64 {
        self.0 as f64 / NANOMETERS_PER_INCH as f64
    }

    pub fn to_mils(&self) -> f64 {
        self.0 as f64 / NANOMETERS_PER_MIL as f64
    }

    /// Canonical decimal millimeter string used by the file format: up to 6
    /// fractional digits, trailing zeros trimmed (but at least one digit kept).
    pub fn to_mm_string(&self) -> String {
        decimal_fixed_point_to_string(self.0, 6)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn abs(&self) -> Length {
        Length(self.0.abs())
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_mm_string())
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<i64> for Length {
    type Output = Length;
    fn mul(self, rhs: i64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<i64> for Length {
    type Output = Length;
    fn div(self, rhs: i64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Formats a fixed-point integer `value` (scaled by `10^decimals`) as a decimal
/// string with trailing zeros trimmed, keeping at least the integer part.
///
/// Mirrors the reference format used across the numeric types for canonical
/// serialization (lengths in millimeters, angles in degrees).
pub(crate) fn decimal_fixed_point_to_string(value: i64, decimals: u32) -> String {
    let negative = value < 0;
    let magnitude = value.unsigned_abs();
    let scale = 10u64.pow(decimals);
    let int_part = magnitude / scale;
    let frac_part = magnitude % scale;
    let mut s = if negative && (int_part != 0 || frac_part != 0) {
        format!("-{int_part}")
    } else {
        format!("{int_part}")
    };
    if frac_part != 0 {
        let frac_str = format!("{:0width$}", frac_part, width = decimals as usize);
        let trimmed = frac_str.trim_end_matches('0');
        s.push('.');
        s.push_str(trimmed);
    }
    s
}

fn round_half_away_from_zero(x: f64) -> i64 {
    if x >= 0.0 {
        (x + 0.5).floor() as i64
    } else {
        (x - 0.5).ceil() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_round_trips_mm_strings() {
        let l = Length::from_mm_string("12.5").unwrap();
        assert_eq!(l.nanometers(), 12_500_000);
        assert_eq!(l.to_mm_string(), "12.5");
    }

    #[test]
    fn parses_negative_with_full_precision() {
        let l = Length::from_mm_string("-0.000001").unwrap();
        assert_eq!(l.nanometers(), -1);
        assert_eq!(l.to_mm_string(), "-0.000001");
    }

    #[test]
    fn truncates_beyond_six_fractional_digits() {
        let l = Length::from_mm_string("1.1234567").unwrap();
        assert_eq!(l.nanometers(), 1_123_456);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(Length::from_mm_string("1,5").is_err());
        assert!(Length::from_mm_string("1.2.3").is_err());
        assert!(Length::from_mm_string("abc").is_err());
    }

    #[test]
    fn zero_formats_without_fraction() {
        assert_eq!(Length::ZERO.to_mm_string(), "0");
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Length::from_nanometers(1_000_000);
        let b = Length::from_nanometers(500_000);
        assert_eq!((a + b).nanometers(), 1_500_000);
        assert_eq!((a - b).nanometers(), 500_000);
        assert_eq!((-a).nanometers(), -1_000_000);
        assert_eq!((a * 3).nanometers(), 3_000_000);
        assert_eq!((a / 4).nanometers(), 250_000);
    }

    #[test]
    fn inches_and_mils_convert_through_mm() {
        let inch = Length::from_inches(1.0).unwrap();
        assert_eq!(inch.nanometers(), NANOMETERS_PER_INCH);
        let mil = Length::from_mils(1000.0).unwrap();
        assert_eq!(mil.nanometers(), NANOMETERS_PER_INCH);
    }
}
