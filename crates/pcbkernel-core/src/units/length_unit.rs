//! Presentation-only unit for displaying a [`Length`](super::length::Length).
//!
//! The kernel itself always stores and computes in nanometers; `LengthUnit` exists
//! purely so an editor can show a value in the unit the user prefers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::length::Length;
use crate::error::KernelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Millimeters,
    Micrometers,
    Inches,
    Mils,
}

impl LengthUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "mm",
            LengthUnit::Micrometers => "\u{b5}m",
            LengthUnit::Inches => "in",
            LengthUnit::Mils => "mil",
        }
    }

    pub fn all() -> &'static [LengthUnit] {
        &[
            LengthUnit::Millimeters,
            LengthUnit::Micrometers,
            LengthUnit::Inches,
            LengthUnit::Mils,
        ]
    }

    /// Formats `length` in this unit with up to `precision` fractional digits.
    pub fn format(&self, length: Length, precision: usize) -> String {
        let value = match self {
            LengthUnit::Millimeters => length.to_mm(),
            LengthUnit::Micrometers => length.to_mm() * 1000.0,
            LengthUnit::Inches => length.to_inches(),
            LengthUnit::Mils => length.to_mils(),
        };
        format!("{:.*} {}", precision, value, self.abbreviation())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for LengthUnit {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeters" | "millimeter" => Ok(LengthUnit::Millimeters),
            "um" | "\u{b5}m" | "micrometers" | "micrometer" => Ok(LengthUnit::Micrometers),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            "mil" | "mils" => Ok(LengthUnit::Mils),
            other => Err(KernelError::UnknownToken(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_abbreviation() {
        let l = Length::from_mm(10.0).unwrap();
        assert_eq!(LengthUnit::Millimeters.format(l, 2), "10.00 mm");
    }

    #[test]
    fn parses_known_abbreviations() {
        assert_eq!("mm".parse::<LengthUnit>().unwrap(), LengthUnit::Millimeters);
        assert_eq!("mil".parse::<LengthUnit>().unwrap(), LengthUnit::Mils);
    }

    #[test]
    fn rejects_unknown_unit() {
        assert!("furlong".parse::<LengthUnit>().is_err());
    }
}
