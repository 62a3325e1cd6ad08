//! Schematic symbol pins.

use uuid::Uuid;

use crate::geometry::{Alignment, HAlign, Point, VAlign};
use crate::signal::Signal;
use crate::units::{Angle, Length, PositiveLength, UnsignedLength};

/// A single connectable pin on a schematic symbol.
pub struct SymbolPin {
    uuid: Uuid,
    name: String,
    position: Point,
    length: UnsignedLength,
    rotation: Angle,
    name_position: Point,
    name_rotation: Angle,
    name_height: PositiveLength,
    name_alignment: Alignment,
    pub on_edited: Signal<SymbolPinEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPinEvent {
    UuidChanged,
    NameChanged,
    PositionChanged,
    LengthChanged,
    RotationChanged,
    NamePositionChanged,
    NameRotationChanged,
    NameHeightChanged,
    NameAlignmentChanged,
}

#[allow(clippy::too_many_arguments)]
impl SymbolPin {
    pub fn new(
        uuid: Uuid,
        name: impl Into<String>,
        position: Point,
        length: UnsignedLength,
        rotation: Angle,
        name_position: Point,
        name_rotation: Angle,
        name_height: PositiveLength,
        name_alignment: Alignment,
    ) -> Self {
        SymbolPin {
            uuid,
            name: name.into(),
            position,
            length,
            rotation,
            name_position,
            name_rotation,
            name_height,
            name_alignment,
            on_edited: Signal::new(),
        }
    }

    /// A pin with the library's recommended name placement: offset past the
    /// pin's far end by a fixed gap, left-aligned, vertically centered.
    pub fn with_default_name_placement(
        uuid: Uuid,
        name: impl Into<String>,
        position: Point,
        length: UnsignedLength,
        rotation: Angle,
    ) -> Self {
        SymbolPin::new(
            uuid,
            name,
            position,
            length,
            rotation,
            SymbolPin::default_name_position(length),
            Angle::deg0(),
            SymbolPin::default_name_height(),
            SymbolPin::default_name_alignment(),
        )
    }

    pub fn default_name_position(length: UnsignedLength) -> Point {
        Point::new(length.get() + Length::from_nanometers(1_270_000), Length::ZERO)
    }

    pub fn default_name_height() -> PositiveLength {
        PositiveLength::new(Length::from_nanometers(2_500_000)).expect("2.5mm is positive")
    }

    pub fn default_name_alignment() -> Alignment {
        Alignment::new(HAlign::Left, VAlign::Center)
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn length(&self) -> UnsignedLength {
        self.length
    }
    pub fn rotation(&self) -> Angle {
        self.rotation
    }
    pub fn name_position(&self) -> Point {
        self.name_position
    }
    pub fn name_rotation(&self) -> Angle {
        self.name_rotation
    }
    pub fn name_height(&self) -> PositiveLength {
        self.name_height
    }
    pub fn name_alignment(&self) -> Alignment {
        self.name_alignment
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&SymbolPinEvent::UuidChanged);
        true
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name == self.name {
            return false;
        }
        self.name = name;
        self.on_edited.notify(&SymbolPinEvent::NameChanged);
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.on_edited.notify(&SymbolPinEvent::PositionChanged);
        true
    }

    pub fn set_length(&mut self, length: UnsignedLength) -> bool {
        if length == self.length {
            return false;
        }
        self.length = length;
        self.on_edited.notify(&SymbolPinEvent::LengthChanged);
        true
    }
}

impl Clone for SymbolPin {
    fn clone(&self) -> Self {
        SymbolPin::new(
            self.uuid,
            self.name.clone(),
            self.position,
            self.length,
            self.rotation,
            self.name_position,
            self.name_rotation,
            self.name_height,
            self.name_alignment,
        )
    }
}

impl PartialEq for SymbolPin {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.name == other.name
            && self.position == other.position
            && self.length == other.length
            && self.rotation == other.rotation
            && self.name_position == other.name_position
            && self.name_rotation == other.name_rotation
            && self.name_height == other.name_height
            && self.name_alignment == other.name_alignment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_name_position_sits_past_pin_length() {
        let length = UnsignedLength::new(Length::from_nanometers(2_540_000)).unwrap();
        let pos = SymbolPin::default_name_position(length);
        assert_eq!(pos, Point::new(Length::from_nanometers(3_810_000), Length::ZERO));
    }

    #[test]
    fn default_placement_is_left_center_aligned() {
        assert_eq!(SymbolPin::default_name_alignment(), Alignment::new(HAlign::Left, VAlign::Center));
    }
}
