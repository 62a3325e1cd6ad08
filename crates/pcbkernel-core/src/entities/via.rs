//! Vertical interconnects between board copper layers.

use uuid::Uuid;

use crate::geometry::Point;
use crate::signal::Signal;
use crate::units::PositiveLength;

/// Whether a via's annular ring is covered by solder mask.
///
/// No upstream `via.h`/`via.cpp` made it into the retrieval pack; this mirrors
/// the simplified "optional cover-by-solder-mask" wording and the `Auto`/
/// explicit-override shape already used by [`super::pad::MaskConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViaStopMask {
    Auto,
    Disabled,
}

/// A plated hole connecting two or more board copper layers.
pub struct Via {
    uuid: Uuid,
    position: Point,
    size: PositiveLength,
    drill: PositiveLength,
    stop_mask: ViaStopMask,
    pub on_edited: Signal<ViaEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViaEvent {
    UuidChanged,
    PositionChanged,
    SizeChanged,
    DrillChanged,
    StopMaskChanged,
}

impl Via {
    pub fn new(uuid: Uuid, position: Point, size: PositiveLength, drill: PositiveLength, stop_mask: ViaStopMask) -> Self {
        Via {
            uuid,
            position,
            size,
            drill,
            stop_mask,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn size(&self) -> PositiveLength {
        self.size
    }
    pub fn drill(&self) -> PositiveLength {
        self.drill
    }
    pub fn stop_mask(&self) -> ViaStopMask {
        self.stop_mask
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&ViaEvent::UuidChanged);
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.on_edited.notify(&ViaEvent::PositionChanged);
        true
    }

    pub fn set_size(&mut self, size: PositiveLength) -> bool {
        if size == self.size {
            return false;
        }
        self.size = size;
        self.on_edited.notify(&ViaEvent::SizeChanged);
        true
    }

    pub fn set_drill(&mut self, drill: PositiveLength) -> bool {
        if drill == self.drill {
            return false;
        }
        self.drill = drill;
        self.on_edited.notify(&ViaEvent::DrillChanged);
        true
    }

    pub fn set_stop_mask(&mut self, stop_mask: ViaStopMask) -> bool {
        if stop_mask == self.stop_mask {
            return false;
        }
        self.stop_mask = stop_mask;
        self.on_edited.notify(&ViaEvent::StopMaskChanged);
        true
    }
}

impl Clone for Via {
    fn clone(&self) -> Self {
        Via::new(self.uuid, self.position, self.size, self.drill, self.stop_mask)
    }
}

impl PartialEq for Via {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.position == other.position
            && self.size == other.size
            && self.drill == other.drill
            && self.stop_mask == other.stop_mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;

    #[test]
    fn setter_returns_false_when_unchanged() {
        let mut v = Via::new(
            Uuid::from_bytes([1; 16]),
            Point::ORIGIN,
            PositiveLength::new(Length::from_nanometers(600_000)).unwrap(),
            PositiveLength::new(Length::from_nanometers(300_000)).unwrap(),
            ViaStopMask::Auto,
        );
        assert!(!v.set_stop_mask(ViaStopMask::Auto));
        assert!(v.set_stop_mask(ViaStopMask::Disabled));
    }
}
