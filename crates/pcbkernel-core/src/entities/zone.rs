//! Keep-out/rule regions on one or more board layers.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Path;
use crate::signal::Signal;

bitflags! {
    /// The board layers a [`Zone`] spans.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ZoneLayers: u32 {
        const TOP = 1 << 0;
        const INNER = 1 << 1;
        const BOTTOM = 1 << 2;
    }
}

bitflags! {
    /// The restrictions a [`Zone`] imposes within its outline.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ZoneRules: u32 {
        /// Forbids copper pours, except planes.
        const NO_COPPER = 1 << 0;
        const NO_PLANES = 1 << 1;
        const NO_EXPOSURE = 1 << 2;
        const NO_DEVICES = 1 << 3;
    }
}

/// A polygonal keep-out/rule region on one or more board layers.
pub struct Zone {
    uuid: Uuid,
    layers: ZoneLayers,
    rules: ZoneRules,
    outline: Path,
    pub on_edited: Signal<ZoneEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    UuidChanged,
    LayersChanged,
    RulesChanged,
    OutlineChanged,
}

impl Zone {
    pub fn new(uuid: Uuid, layers: ZoneLayers, rules: ZoneRules, outline: Path) -> Self {
        Zone {
            uuid,
            layers,
            rules,
            outline,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn layers(&self) -> ZoneLayers {
        self.layers
    }
    pub fn rules(&self) -> ZoneRules {
        self.rules
    }
    pub fn outline(&self) -> &Path {
        &self.outline
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&ZoneEvent::UuidChanged);
        true
    }

    pub fn set_layers(&mut self, layers: ZoneLayers) -> bool {
        if layers == self.layers {
            return false;
        }
        self.layers = layers;
        self.on_edited.notify(&ZoneEvent::LayersChanged);
        true
    }

    pub fn set_rules(&mut self, rules: ZoneRules) -> bool {
        if rules == self.rules {
            return false;
        }
        self.rules = rules;
        self.on_edited.notify(&ZoneEvent::RulesChanged);
        true
    }

    pub fn set_outline(&mut self, outline: Path) -> bool {
        if outline == self.outline {
            return false;
        }
        self.outline = outline;
        self.on_edited.notify(&ZoneEvent::OutlineChanged);
        true
    }
}

impl Clone for Zone {
    fn clone(&self) -> Self {
        Zone::new(self.uuid, self.layers, self.rules, self.outline.clone())
    }
}

impl PartialEq for Zone {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.layers == other.layers
            && self.rules == other.rules
            && self.outline == other.outline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_and_rules_combine_with_bitwise_or() {
        let layers = ZoneLayers::TOP | ZoneLayers::BOTTOM;
        assert!(layers.contains(ZoneLayers::TOP));
        assert!(!layers.contains(ZoneLayers::INNER));

        let rules = ZoneRules::NO_COPPER | ZoneRules::NO_DEVICES;
        assert!(rules.contains(ZoneRules::NO_DEVICES));
        assert!(!rules.contains(ZoneRules::NO_PLANES));
    }

    #[test]
    fn setter_returns_false_when_unchanged() {
        let mut z = Zone::new(Uuid::from_bytes([1; 16]), ZoneLayers::TOP, ZoneRules::NO_COPPER, Path::new(vec![]));
        assert!(!z.set_layers(ZoneLayers::TOP));
        assert!(z.set_layers(ZoneLayers::TOP | ZoneLayers::INNER));
    }
}
