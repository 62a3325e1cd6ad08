//! Exact, integer-backed ratio (percentage / fraction) values.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::length::decimal_fixed_point_to_string;
use crate::error::{KernelError, KernelResult};

/// A 32-bit signed count of parts-per-million.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ratio(i32);

impl Ratio {
    pub const fn from_ppm(ppm: i32) -> Self {
        Ratio(ppm)
    }

    pub const fn ppm(&self) -> i32 {
        self.0
    }

    pub fn to_percent(&self) -> f64 {
        self.0 as f64 / 1e4
    }

    pub fn to_normalized(&self) -> f64 {
        self.0 as f64 / 1e6
    }

    pub fn from_percent(percent: f64) -> KernelResult<Self> {
        let ppm = percent * 1e4;
        if !ppm.is_finite() || ppm.abs() > i32::MAX as f64 {
            return Err(KernelError::OutOfRange(format!("ratio {percent}% out of range")));
        }
        Ok(Ratio(round_half_away_from_zero(ppm)))
    }

    pub fn from_normalized(value: f64) -> KernelResult<Self> {
        let ppm = value * 1e6;
        if !ppm.is_finite() || ppm.abs() > i32::MAX as f64 {
            return Err(KernelError::OutOfRange(format!("ratio {value} out of range")));
        }
        Ok(Ratio(round_half_away_from_zero(ppm)))
    }

    /// Parses the canonical normalized decimal string (e.g. `"0.5"` for 50%),
    /// exact to 6 decimals.
    pub fn from_normalized_string(s: &str) -> KernelResult<Self> {
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
        let ppm = sign * magnitude;
        if ppm.unsigned_abs() > i32::MAX as u64 {
            return Err(KernelError::OutOfRange(s.to_string()));
        }
        Ok(Ratio(ppm as i32))
    }

    pub fn to_normalized_string(&self) -> String {
        decimal_fixed_point_to_string(self.0 as i64, 6)
    }

    pub fn percent0() -> Ratio {
        Ratio(0)
    }
    pub fn percent1() -> Ratio {
        Ratio(10_000)
    }
    pub fn percent5() -> Ratio {
        Ratio(50_000)
    }
    pub fn percent10() -> Ratio {
        Ratio(100_000)
    }
    pub fn percent50() -> Ratio {
        Ratio(500_000)
    }
    pub fn percent100() -> Ratio {
        Ratio(1_000_000)
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_normalized_string())
    }
}

impl Add for Ratio {
    type Output = Ratio;
    fn add(self, rhs: Ratio) -> Ratio {
        Ratio(self.0 + rhs.0)
    }
}

impl Sub for Ratio {
    type Output = Ratio;
    fn sub(self, rhs: Ratio) -> Ratio {
        Ratio(self.0 - rhs.0)
    }
}

impl Neg for Ratio {
    type Output = Ratio;
    fn neg(self) -> Ratio {
        Ratio(-self.0)
    }
}

fn round_half_away_from_zero(x: f64) -> i32 {
    let r = if x >= 0.0 { (x + 0.5).floor() } else { (x - 0.5).ceil() };
    r as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_and_normalized_agree() {
        let r = Ratio::percent50();
        assert_eq!(r.to_percent(), 50.0);
        assert_eq!(r.to_normalized(), 0.5);
    }

    #[test]
    fn parses_normalized_string_exactly() {
        let r = Ratio::from_normalized_string("0.5").unwrap();
        assert_eq!(r.ppm(), 500_000);
        assert_eq!(r.to_normalized_string(), "0.5");
    }

    #[test]
    fn from_percent_101_is_constructible_unrefined() {
        // Ratio itself has no range restriction; refinement happens in UnsignedLimitedRatio.
        let r = Ratio::from_percent(101.0).unwrap();
        assert_eq!(r.ppm(), 1_010_000);
    }
}
