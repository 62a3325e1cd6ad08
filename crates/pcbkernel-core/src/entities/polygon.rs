//! Outline/fill shapes drawn on a single layer.

use uuid::Uuid;

use crate::geometry::Path;
use crate::signal::Signal;
use crate::units::UnsignedLength;

use super::layer::Layer;

/// A polygon (outline, optionally filled) on one layer.
pub struct Polygon {
    uuid: Uuid,
    layer: Layer,
    line_width: UnsignedLength,
    is_filled: bool,
    is_grab_area: bool,
    path: Path,
    pub on_edited: Signal<PolygonEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonEvent {
    UuidChanged,
    LayerChanged,
    LineWidthChanged,
    IsFilledChanged,
    IsGrabAreaChanged,
    PathChanged,
}

impl Polygon {
    pub fn new(uuid: Uuid, layer: Layer, line_width: UnsignedLength, is_filled: bool, is_grab_area: bool, path: Path) -> Self {
        Polygon {
            uuid,
            layer,
            line_width,
            is_filled,
            is_grab_area,
            path,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
    pub fn line_width(&self) -> UnsignedLength {
        self.line_width
    }
    pub fn is_filled(&self) -> bool {
        self.is_filled
    }
    pub fn is_grab_area(&self) -> bool {
        self.is_grab_area
    }
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&PolygonEvent::UuidChanged);
        true
    }

    pub fn set_layer(&mut self, layer: Layer) -> bool {
        if layer == self.layer {
            return false;
        }
        self.layer = layer;
        self.on_edited.notify(&PolygonEvent::LayerChanged);
        true
    }

    pub fn set_line_width(&mut self, line_width: UnsignedLength) -> bool {
        if line_width == self.line_width {
            return false;
        }
        self.line_width = line_width;
        self.on_edited.notify(&PolygonEvent::LineWidthChanged);
        true
    }

    pub fn set_is_filled(&mut self, is_filled: bool) -> bool {
        if is_filled == self.is_filled {
            return false;
        }
        self.is_filled = is_filled;
        self.on_edited.notify(&PolygonEvent::IsFilledChanged);
        true
    }

    pub fn set_is_grab_area(&mut self, is_grab_area: bool) -> bool {
        if is_grab_area == self.is_grab_area {
            return false;
        }
        self.is_grab_area = is_grab_area;
        self.on_edited.notify(&PolygonEvent::IsGrabAreaChanged);
        true
    }

    pub fn set_path(&mut self, path: Path) -> bool {
        if path == self.path {
            return false;
        }
        self.path = path;
        self.on_edited.notify(&PolygonEvent::PathChanged);
        true
    }
}

impl Clone for Polygon {
    fn clone(&self) -> Self {
        Polygon::new(self.uuid, self.layer.clone(), self.line_width, self.is_filled, self.is_grab_area, self.path.clone())
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.layer == other.layer
            && self.line_width == other.line_width
            && self.is_filled == other.is_filled
            && self.is_grab_area == other.is_grab_area
            && self.path == other.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setter_returns_false_when_unchanged() {
        let mut p = Polygon::new(
            Uuid::from_bytes([1; 16]),
            Layer::top_copper(),
            UnsignedLength::new(crate::units::Length::ZERO).unwrap(),
            false,
            false,
            Path::new(vec![]),
        );
        assert!(!p.set_is_filled(false));
        assert!(p.set_is_filled(true));
    }
}
