//! Small named entities: buses, net signals, assembly variants and library metadata.

use uuid::Uuid;

use crate::error::{KernelError, KernelResult};
use crate::signal::Signal;

/// A non-empty, trimmed bus identifier — the same rule the model applies to
/// other circuit identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BusName(String);

impl BusName {
    pub fn new(name: impl Into<String>) -> KernelResult<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(KernelError::invalid_value("BusName", "bus name must not be empty"));
        }
        Ok(BusName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A named group of related nets (e.g. a parallel data bus), modeled as a
/// parallel graph alongside the wire/trace connectivity: buses do not
/// participate in the net-segment simplifier.
pub struct Bus {
    uuid: Uuid,
    name: BusName,
    pub on_edited: Signal<BusEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    UuidChanged,
    NameChanged,
}

impl Bus {
    pub fn new(uuid: Uuid, name: BusName) -> Self {
        Bus { uuid, name, on_edited: Signal::new() }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn name(&self) -> &BusName {
        &self.name
    }

    pub fn set_name(&mut self, name: BusName) -> bool {
        if name == self.name {
            return false;
        }
        self.name = name;
        self.on_edited.notify(&BusEvent::NameChanged);
        true
    }
}

impl Clone for Bus {
    fn clone(&self) -> Self {
        Bus::new(self.uuid, self.name.clone())
    }
}

impl PartialEq for Bus {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.name == other.name
    }
}

/// A named net, optionally belonging to a [`Bus`].
pub struct NetSignal {
    uuid: Uuid,
    name: String,
    bus: Option<Uuid>,
    pub on_edited: Signal<NetSignalEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetSignalEvent {
    UuidChanged,
    NameChanged,
    BusChanged,
}

impl NetSignal {
    pub fn new(uuid: Uuid, name: impl Into<String>, bus: Option<Uuid>) -> Self {
        NetSignal { uuid, name: name.into(), bus, on_edited: Signal::new() }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn bus(&self) -> Option<Uuid> {
        self.bus
    }

    pub fn set_bus(&mut self, bus: Option<Uuid>) -> bool {
        if bus == self.bus {
            return false;
        }
        self.bus = bus;
        self.on_edited.notify(&NetSignalEvent::BusChanged);
        true
    }
}

impl Clone for NetSignal {
    fn clone(&self) -> Self {
        NetSignal::new(self.uuid, self.name.clone(), self.bus)
    }
}

impl PartialEq for NetSignal {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.name == other.name && self.bus == other.bus
    }
}

/// A named BOM/assembly configuration (e.g. "Default", "No Populate Testpoints").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyVariant {
    uuid: Uuid,
    name: String,
    description: String,
}

impl AssemblyVariant {
    pub fn new(uuid: Uuid, name: impl Into<String>, description: impl Into<String>) -> Self {
        AssemblyVariant { uuid, name: name.into(), description: description.into() }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Per-assembly-variant fitted/not-fitted state and attribute overrides for
/// one placed component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAssemblyOption {
    uuid: Uuid,
    device: Uuid,
    assembly_variant: Uuid,
    attributes: Vec<(String, String)>,
}

impl ComponentAssemblyOption {
    pub fn new(uuid: Uuid, device: Uuid, assembly_variant: Uuid, attributes: Vec<(String, String)>) -> Self {
        ComponentAssemblyOption { uuid, device, assembly_variant, attributes }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn device(&self) -> Uuid {
        self.device
    }
    pub fn assembly_variant(&self) -> Uuid {
        self.assembly_variant
    }
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }
}

/// A named, typed attachment (datasheet, 3-D model, ...) referenced by a
/// library element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    media_type: String,
    file_path: String,
}

impl Resource {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, file_path: impl Into<String>) -> Self {
        Resource {
            name: name.into(),
            media_type: media_type.into(),
            file_path: file_path.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn media_type(&self) -> &str {
        &self.media_type
    }
    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

/// Identifies a 3-D step model attached to a footprint. The model's own
/// geometry is an external collaborator, out of scope here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageModel {
    uuid: Uuid,
    name: String,
}

impl PackageModel {
    pub fn new(uuid: Uuid, name: impl Into<String>) -> Self {
        PackageModel { uuid, name: name.into() }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Maps one footprint pad to a component signal; `signal` may be unassigned
/// while a device is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevicePadSignalMapItem {
    pad: Uuid,
    signal: Option<Uuid>,
}

impl DevicePadSignalMapItem {
    pub fn new(pad: Uuid, signal: Option<Uuid>) -> Self {
        DevicePadSignalMapItem { pad, signal }
    }

    pub fn pad(&self) -> Uuid {
        self.pad
    }
    pub fn signal(&self) -> Option<Uuid> {
        self.signal
    }
}

/// A plain interned string used for library search metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: impl Into<String>) -> Self {
        Tag(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bus_name_rejects_blank() {
        assert!(BusName::new("   ").is_err());
        assert!(BusName::new(" D0 ").unwrap().as_str() == "D0");
    }

    #[test]
    fn net_signal_set_bus_returns_false_when_unchanged() {
        let mut s = NetSignal::new(Uuid::from_bytes([1; 16]), "GND", None);
        assert!(!s.set_bus(None));
        let bus = Uuid::from_bytes([2; 16]);
        assert!(s.set_bus(Some(bus)));
        assert_eq!(s.bus(), Some(bus));
    }
}
