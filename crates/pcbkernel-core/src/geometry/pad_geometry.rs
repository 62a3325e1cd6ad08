//! The resolved outline shape of a pad: a single [`Path`] polygon, derived
//! from a `PadShape` and its size/corner-radius fields, usable by exporters
//! without re-deriving shape math from the entity's raw fields.

use crate::units::{PositiveLength, UnsignedLength};

use super::path::Path;

/// The flattened outline of one pad, as built by `Pad::geometry()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PadGeometry {
    outline: Path,
}

impl PadGeometry {
    /// A rectangle (optionally rounded) of `width` x `height`, centered at
    /// the pad's local origin.
    pub fn rounded_rect(width: PositiveLength, height: PositiveLength, corner_radius: UnsignedLength) -> Self {
        PadGeometry { outline: Path::centered_rect(width, height, corner_radius) }
    }

    /// A rectangle with 45-degree chamfered corners, optionally rounded.
    pub fn rounded_octagon(width: PositiveLength, height: PositiveLength, corner_radius: UnsignedLength) -> Self {
        PadGeometry { outline: Path::octagon(width, height, corner_radius) }
    }

    /// An arbitrary, user-authored outline.
    pub fn custom(outline: Path) -> Self {
        PadGeometry { outline }
    }

    pub fn outline(&self) -> &Path {
        &self.outline
    }
}
