//! A single point in a [`Path`](super::path::Path) plus the arc to the next vertex.

use serde::{Deserialize, Serialize};

use crate::units::Angle;

use super::point::Point;

/// A path vertex: a position plus the "bulge" angle of the arc segment from this
/// vertex to the next one. `bulge == 0` means the segment is a straight line.
///
/// The bulge of the *last* vertex in a path is meaningless and must be ignored by
/// callers (there is no "next vertex" to arc toward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point,
    pub bulge: Angle,
}

impl Vertex {
    pub fn new(position: Point, bulge: Angle) -> Self {
        Vertex { position, bulge }
    }

    pub fn straight(position: Point) -> Self {
        Vertex::new(position, Angle::deg0())
    }

    pub fn is_straight(&self) -> bool {
        self.bulge.is_zero()
    }
}
