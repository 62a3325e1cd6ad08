//! L0: exact numeric value types and their range-constrained refinements.

mod angle;
mod length;
mod length_unit;
mod ratio;
mod refined;

pub use angle::Angle;
pub use length::Length;
pub use length_unit::LengthUnit;
pub use ratio::Ratio;
pub use refined::{BoundedUnsignedRatio, PositiveLength, UnsignedLength, UnsignedLimitedRatio, UnsignedRatio};
