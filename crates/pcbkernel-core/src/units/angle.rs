//! Exact, integer-backed rotation values.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::length::decimal_fixed_point_to_string;
use crate::error::{KernelError, KernelResult};

const MICRODEG_PER_DEG: i64 = 1_000_000;
const FULL_TURN: i64 = 360 * MICRODEG_PER_DEG;

/// A 32-bit signed count of microdegrees, always normalized to the open range
/// `(-360e6, +360e6)` by taking the remainder against a full turn on every
/// construction and mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Angle(i32);

impl Angle {
    pub const fn from_microdegrees(microdeg: i32) -> Self {
        // Stored value is produced only through `new`, which normalizes; this
        // const fn is for literals already known to be in range (static tables).
        Angle(microdeg)
    }

    pub fn new(microdeg: i64) -> Self {
        Angle(normalize(microdeg))
    }

    pub fn from_deg(deg: f64) -> KernelResult<Self> {
        let microdeg = deg * MICRODEG_PER_DEG as f64;
        if !microdeg.is_finite() {
            return Err(KernelError::OutOfRange(format!("angle {deg} deg is not finite")));
        }
        Ok(Angle::new(round_half_away_from_zero(microdeg)))
    }

    pub fn from_deg_string(s: &str) -> KernelResult<Self> {
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
        Ok(Angle::new(sign * magnitude))
    }

    pub const fn microdegrees(&self) -> i32 {
        self.0
    }

    pub fn to_deg(&self) -> f64 {
        self.0 as f64 / MICRODEG_PER_DEG as f64
    }

    pub fn to_rad(&self) -> f64 {
        self.to_deg().to_radians()
    }

    pub fn to_deg_string(&self) -> String {
        decimal_fixed_point_to_string(self.0 as i64, 6)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Absolute value, preserving sign convention (0 stays 0).
    pub fn abs(&self) -> Angle {
        Angle(self.0.abs())
    }

    /// Flips the sign of the rotation; 0° is left untouched.
    pub fn inverted(&self) -> Angle {
        Angle(-self.0)
    }

    /// Rounds to the nearest multiple of `interval`, adding half the interval
    /// toward the value's own sign before truncating division.
    pub fn rounded(&self, interval: Angle) -> Angle {
        let iv = interval.0 as i64;
        if iv == 0 {
            return *self;
        }
        let v = self.0 as i64;
        let half = iv.abs() / 2;
        let adjusted = if v >= 0 { v + half } else { v - half };
        let rounded = (adjusted / iv) * iv;
        Angle::new(rounded)
    }

    /// Maps into `[0deg, 360deg)`.
    pub fn mapped_to_0_360(&self) -> Angle {
        if self.0 < 0 {
            Angle((self.0 as i64 + FULL_TURN) as i32)
        } else {
            *self
        }
    }

    /// Maps into the half-open interval `[-180deg, +180deg)`.
    pub fn mapped_to_180(&self) -> Angle {
        let zero_to_360 = self.mapped_to_0_360().0 as i64;
        if zero_to_360 >= FULL_TURN / 2 {
            Angle((zero_to_360 - FULL_TURN) as i32)
        } else {
            Angle(zero_to_360 as i32)
        }
    }

    pub const fn deg0() -> Angle {
        Angle(0)
    }
    pub const fn deg45() -> Angle {
        Angle(45_000_000)
    }
    pub const fn deg90() -> Angle {
        Angle(90_000_000)
    }
    pub const fn deg135() -> Angle {
        Angle(135_000_000)
    }
    pub const fn deg180() -> Angle {
        Angle(180_000_000)
    }
    pub const fn deg225() -> Angle {
        Angle(-135_000_000)
    }
    pub const fn deg270() -> Angle {
        Angle(-90_000_000)
    }
    pub const fn deg315() -> Angle {
        Angle(-45_000_000)
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::deg0()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_deg_string())
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle::new(self.0 as i64 + rhs.0 as i64)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(self.0 as i64 - rhs.0 as i64)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        self.inverted()
    }
}

fn normalize(microdeg: i64) -> i32 {
    let r = microdeg % FULL_TURN;
    r as i32
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
    fn normalizes_on_construction() {
        let a = Angle::new(360_000_000);
        assert_eq!(a.microdegrees(), 0);
        let b = Angle::new(-720_000_000 - 45_000_000);
        assert_eq!(b.microdegrees(), -45_000_000);
    }

    #[test]
    fn sum_with_negation_is_zero() {
        let a = Angle::new(123_456_789 % 360_000_000);
        let sum = a + (-a);
        assert_eq!(sum.microdegrees(), 0);
    }

    #[test]
    fn stays_within_open_range() {
        for v in [0_i64, 1, -1, 359_999_999, -359_999_999, 1_000_000_007] {
            let a = Angle::new(v);
            assert!(a.microdegrees().unsigned_abs() < 360_000_000);
        }
    }

    #[test]
    fn map_to_180_is_half_open() {
        assert_eq!(Angle::deg180().mapped_to_180().microdegrees(), -180_000_000);
        assert_eq!(Angle::new(179_000_000).mapped_to_180().microdegrees(), 179_000_000);
        assert_eq!(Angle::new(-180_000_000).mapped_to_180().microdegrees(), -180_000_000);
    }

    #[test]
    fn invert_leaves_zero_untouched() {
        assert_eq!(Angle::deg0().inverted(), Angle::deg0());
        assert_eq!(Angle::deg90().inverted(), Angle::deg270());
    }

    #[test]
    fn rounds_to_interval() {
        let a = Angle::new(47_000_000);
        assert_eq!(a.rounded(Angle::new(45_000_000)).microdegrees(), 45_000_000);
        let b = Angle::new(-47_000_000);
        assert_eq!(b.rounded(Angle::new(45_000_000)).microdegrees(), -45_000_000);
    }

    #[test]
    fn deg_string_round_trips() {
        let a = Angle::from_deg_string("-90.5").unwrap();
        assert_eq!(a.to_deg_string(), "-90.5");
    }
}
