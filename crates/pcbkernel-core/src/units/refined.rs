//! Range-constrained refinements of [`Length`] and [`Ratio`].
//!
//! Each refinement's only constructor that can fail is [`TryFrom`]; there is no way
//! to obtain a value that violates the predicate except through `new_unchecked`,
//! which is for internal hot paths and only debug-asserts the invariant.

use serde::{Deserialize, Serialize};

use super::length::Length;
use super::ratio::Ratio;
use crate::error::{KernelError, KernelResult};

macro_rules! refined_length {
    ($name:ident, $predicate:expr, $kind:literal, $message:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "Length", into = "Length")]
        pub struct $name(Length);

        impl $name {
            pub fn new(value: Length) -> KernelResult<Self> {
                let predicate: fn(Length) -> bool = $predicate;
                if predicate(value) {
                    Ok($name(value))
                } else {
                    Err(KernelError::invalid_value($kind, $message))
                }
            }

            /// Bypasses the predicate check. Only for internal call sites that
            /// already know the value satisfies it (e.g. doubling a positive length).
            pub fn new_unchecked(value: Length) -> Self {
                let predicate: fn(Length) -> bool = $predicate;
                debug_assert!(predicate(value), $message);
                $name(value)
            }

            pub fn get(&self) -> Length {
                self.0
            }
        }

        impl TryFrom<Length> for $name {
            type Error = KernelError;
            fn try_from(value: Length) -> Result<Self, Self::Error> {
                $name::new(value)
            }
        }

        impl From<$name> for Length {
            fn from(value: $name) -> Length {
                value.0
            }
        }
    };
}

refined_length!(
    UnsignedLength,
    |l: Length| !l.is_negative(),
    "UnsignedLength",
    "length must be >= 0"
);
refined_length!(
    PositiveLength,
    |l: Length| l.is_positive(),
    "PositiveLength",
    "length must be > 0"
);

/// A [`Ratio`] constrained to be `>= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Ratio", into = "Ratio")]
pub struct UnsignedRatio(Ratio);

impl UnsignedRatio {
    pub fn new(value: Ratio) -> KernelResult<Self> {
        if value.ppm() >= 0 {
            Ok(UnsignedRatio(value))
        } else {
            Err(KernelError::invalid_value("UnsignedRatio", "ratio must be >= 0"))
        }
    }

    pub fn new_unchecked(value: Ratio) -> Self {
        debug_assert!(value.ppm() >= 0, "ratio must be >= 0");
        UnsignedRatio(value)
    }

    pub fn get(&self) -> Ratio {
        self.0
    }
}

impl TryFrom<Ratio> for UnsignedRatio {
    type Error = KernelError;
    fn try_from(value: Ratio) -> Result<Self, Self::Error> {
        UnsignedRatio::new(value)
    }
}

impl From<UnsignedRatio> for Ratio {
    fn from(value: UnsignedRatio) -> Ratio {
        value.0
    }
}

/// A [`Ratio`] constrained to `[0%, 100%]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Ratio", into = "Ratio")]
pub struct UnsignedLimitedRatio(Ratio);

impl UnsignedLimitedRatio {
    pub fn new(value: Ratio) -> KernelResult<Self> {
        if value.ppm() >= 0 && value.ppm() <= Ratio::percent100().ppm() {
            Ok(UnsignedLimitedRatio(value))
        } else {
            Err(KernelError::invalid_value(
                "UnsignedLimitedRatio",
                "ratio must be within [0%, 100%]",
            ))
        }
    }

    pub fn new_unchecked(value: Ratio) -> Self {
        debug_assert!(
            value.ppm() >= 0 && value.ppm() <= Ratio::percent100().ppm(),
            "ratio must be within [0%, 100%]"
        );
        UnsignedLimitedRatio(value)
    }

    pub fn get(&self) -> Ratio {
        self.0
    }
}

impl TryFrom<Ratio> for UnsignedLimitedRatio {
    type Error = KernelError;
    fn try_from(value: Ratio) -> Result<Self, Self::Error> {
        UnsignedLimitedRatio::new(value)
    }
}

impl From<UnsignedLimitedRatio> for Ratio {
    fn from(value: UnsignedLimitedRatio) -> Ratio {
        value.0
    }
}

/// A ratio with an absolute minimum and maximum: `value(x) = clamp(min, ratio * x, max)`.
///
/// Used for copper-clearance-like quantities that scale with a pad size but are
/// bounded by fixed minimum/maximum lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedUnsignedRatio {
    ratio: UnsignedRatio,
    min: UnsignedLength,
    max: UnsignedLength,
}

impl BoundedUnsignedRatio {
    pub fn new(ratio: UnsignedRatio, min: UnsignedLength, max: UnsignedLength) -> KernelResult<Self> {
        if min.get() > max.get() {
            return Err(KernelError::invalid_value(
                "BoundedUnsignedRatio",
                "min must be <= max",
            ));
        }
        Ok(BoundedUnsignedRatio { ratio, min, max })
    }

    pub fn ratio(&self) -> UnsignedRatio {
        self.ratio
    }

    pub fn min(&self) -> UnsignedLength {
        self.min
    }

    pub fn max(&self) -> UnsignedLength {
        self.max
    }

    /// `clamp(min, ratio * input, max)`.
    pub fn calc_value(&self, input: Length) -> Length {
        let scaled_nm = (input.nanometers() as f64 * self.ratio.get().to_normalized()).round() as i64;
        let scaled = Length::from_nanometers(scaled_nm);
        if scaled < self.min.get() {
            self.min.get()
        } else if scaled > self.max.get() {
            self.max.get()
        } else {
            scaled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_length_rejects_zero() {
        let err = PositiveLength::new(Length::ZERO).unwrap_err();
        assert!(matches!(err, KernelError::InvalidValue { .. }));
    }

    #[test]
    fn positive_length_accepts_positive() {
        let l = Length::from_nanometers(1);
        assert!(PositiveLength::new(l).is_ok());
    }

    #[test]
    fn unsigned_limited_ratio_rejects_over_100_percent() {
        let over = Ratio::from_percent(101.0).unwrap();
        assert!(UnsignedLimitedRatio::new(over).is_err());
    }

    #[test]
    fn unsigned_limited_ratio_accepts_boundaries() {
        assert!(UnsignedLimitedRatio::new(Ratio::percent0()).is_ok());
        assert!(UnsignedLimitedRatio::new(Ratio::percent100()).is_ok());
    }

    #[test]
    fn bounded_unsigned_ratio_rejects_inverted_bounds() {
        let min = UnsignedLength::new(Length::from_nanometers(100)).unwrap();
        let max = UnsignedLength::new(Length::from_nanometers(50)).unwrap();
        let ratio = UnsignedRatio::new(Ratio::percent50()).unwrap();
        assert!(BoundedUnsignedRatio::new(ratio, min, max).is_err());
    }

    #[test]
    fn bounded_unsigned_ratio_clamps() {
        let min = UnsignedLength::new(Length::from_nanometers(1_000)).unwrap();
        let max = UnsignedLength::new(Length::from_nanometers(10_000)).unwrap();
        let ratio = UnsignedRatio::new(Ratio::percent50()).unwrap();
        let b = BoundedUnsignedRatio::new(ratio, min, max).unwrap();
        assert_eq!(b.calc_value(Length::from_nanometers(1_000)).nanometers(), 1_000);
        assert_eq!(b.calc_value(Length::from_nanometers(100_000)).nanometers(), 10_000);
        assert_eq!(b.calc_value(Length::from_nanometers(16_000)).nanometers(), 8_000);
    }
}
