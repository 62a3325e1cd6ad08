//! Junctions and the wire/trace segments that connect them.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::geometry::Point;
use crate::signal::Signal;
use crate::units::{PositiveLength, UnsignedLength};

use super::layer::Layer;

/// Implicit routing point where two or more wires/traces meet.
pub struct Junction {
    uuid: Uuid,
    position: Point,
    pub on_edited: Signal<JunctionEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionEvent {
    UuidChanged,
    PositionChanged,
}

impl Junction {
    pub fn new(uuid: Uuid, position: Point) -> Self {
        Junction {
            uuid,
            position,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&JunctionEvent::UuidChanged);
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.on_edited.notify(&JunctionEvent::PositionChanged);
        true
    }
}

impl Clone for Junction {
    fn clone(&self) -> Self {
        Junction::new(self.uuid, self.position)
    }
}

impl PartialEq for Junction {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.position == other.position
    }
}

/// Endpoint of a schematic wire: either a junction or a symbol pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NetLineAnchor {
    Junction(Uuid),
    Pin { symbol: Uuid, pin: Uuid },
}

/// Endpoint of a board trace: a junction, via, board pad, or footprint pad.
///
/// Implements a total order used solely to canonicalize a trace's two
/// endpoints in the serialized form — it carries no semantic meaning about
/// which anchor kind is "greater".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceAnchor {
    Junction(Uuid),
    Via(Uuid),
    Pad(Uuid),
    FootprintPad { device: Uuid, pad: Uuid },
}

impl TraceAnchor {
    fn order_key(&self) -> (u8, Uuid, Uuid) {
        match *self {
            TraceAnchor::Junction(u) => (0, u, Uuid::nil()),
            TraceAnchor::Via(u) => (1, u, Uuid::nil()),
            TraceAnchor::Pad(u) => (2, u, Uuid::nil()),
            TraceAnchor::FootprintPad { device, pad } => (3, device, pad),
        }
    }
}

impl PartialOrd for TraceAnchor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TraceAnchor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

/// A schematic wire segment: two anchors plus an unsigned width, no layer.
pub struct NetLine {
    uuid: Uuid,
    width: UnsignedLength,
    p1: NetLineAnchor,
    p2: NetLineAnchor,
    pub on_edited: Signal<NetLineEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetLineEvent {
    UuidChanged,
    WidthChanged,
    AnchorsChanged,
}

impl NetLine {
    pub fn new(uuid: Uuid, width: UnsignedLength, a: NetLineAnchor, b: NetLineAnchor) -> Self {
        let (p1, p2) = normalize_anchors(a, b);
        NetLine {
            uuid,
            width,
            p1,
            p2,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn width(&self) -> UnsignedLength {
        self.width
    }
    pub fn p1(&self) -> NetLineAnchor {
        self.p1
    }
    pub fn p2(&self) -> NetLineAnchor {
        self.p2
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&NetLineEvent::UuidChanged);
        true
    }

    pub fn set_width(&mut self, width: UnsignedLength) -> bool {
        if width == self.width {
            return false;
        }
        self.width = width;
        self.on_edited.notify(&NetLineEvent::WidthChanged);
        true
    }

    pub fn set_anchors(&mut self, a: NetLineAnchor, b: NetLineAnchor) -> bool {
        let (p1, p2) = normalize_anchors(a, b);
        if p1 == self.p1 && p2 == self.p2 {
            return false;
        }
        self.p1 = p1;
        self.p2 = p2;
        self.on_edited.notify(&NetLineEvent::AnchorsChanged);
        true
    }
}

impl Clone for NetLine {
    fn clone(&self) -> Self {
        NetLine::new(self.uuid, self.width, self.p1, self.p2)
    }
}

impl PartialEq for NetLine {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.width == other.width && self.p1 == other.p1 && self.p2 == other.p2
    }
}

/// A board routing segment: two anchors, a layer, and a positive width.
///
/// The order of `p1`/`p2` is canonical (sorted): the constructor and
/// `set_anchors` swap the passed anchors if needed so `p1 <= p2` in
/// `TraceAnchor`'s total order.
pub struct Trace {
    uuid: Uuid,
    layer: Layer,
    width: PositiveLength,
    p1: TraceAnchor,
    p2: TraceAnchor,
    pub on_edited: Signal<TraceEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    UuidChanged,
    LayerChanged,
    WidthChanged,
    AnchorsChanged,
}

impl Trace {
    pub fn new(uuid: Uuid, layer: Layer, width: PositiveLength, a: TraceAnchor, b: TraceAnchor) -> Self {
        let (p1, p2) = normalize_trace_anchors(a, b);
        Trace {
            uuid,
            layer,
            width,
            p1,
            p2,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
    pub fn width(&self) -> PositiveLength {
        self.width
    }
    pub fn p1(&self) -> TraceAnchor {
        self.p1
    }
    pub fn p2(&self) -> TraceAnchor {
        self.p2
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&TraceEvent::UuidChanged);
        true
    }

    pub fn set_layer(&mut self, layer: Layer) -> bool {
        if layer == self.layer {
            return false;
        }
        self.layer = layer;
        self.on_edited.notify(&TraceEvent::LayerChanged);
        true
    }

    pub fn set_width(&mut self, width: PositiveLength) -> bool {
        if width == self.width {
            return false;
        }
        self.width = width;
        self.on_edited.notify(&TraceEvent::WidthChanged);
        true
    }

    pub fn set_anchors(&mut self, a: TraceAnchor, b: TraceAnchor) -> bool {
        let (p1, p2) = normalize_trace_anchors(a, b);
        if p1 == self.p1 && p2 == self.p2 {
            return false;
        }
        self.p1 = p1;
        self.p2 = p2;
        self.on_edited.notify(&TraceEvent::AnchorsChanged);
        true
    }
}

impl Clone for Trace {
    fn clone(&self) -> Self {
        Trace::new(self.uuid, self.layer.clone(), self.width, self.p1, self.p2)
    }
}

impl PartialEq for Trace {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.layer == other.layer
            && self.width == other.width
            && self.p1 == other.p1
            && self.p2 == other.p2
    }
}

fn normalize_anchors(a: NetLineAnchor, b: NetLineAnchor) -> (NetLineAnchor, NetLineAnchor) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

fn normalize_trace_anchors(a: TraceAnchor, b: TraceAnchor) -> (TraceAnchor, TraceAnchor) {
    if b < a {
        (b, a)
    } else {
        (a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;
    use pretty_assertions::assert_eq;

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    #[test]
    fn junction_setter_returns_false_when_unchanged() {
        let mut j = Junction::new(uuid(1), Point::ORIGIN);
        assert!(!j.set_position(Point::ORIGIN));
        assert!(j.set_position(Point::new(Length::from_nanometers(1), Length::ZERO)));
    }

    #[test]
    fn junction_notifies_on_edited() {
        use std::cell::RefCell;
        use std::rc::Rc;
        let mut j = Junction::new(uuid(1), Point::ORIGIN);
        let events = Rc::new(RefCell::new(Vec::new()));
        let events2 = events.clone();
        let _handle = j.on_edited.subscribe(move |e| events2.borrow_mut().push(*e));
        j.set_position(Point::new(Length::from_nanometers(5), Length::ZERO));
        assert_eq!(*events.borrow(), vec![JunctionEvent::PositionChanged]);
    }

    #[test]
    fn trace_anchors_are_canonicalized() {
        let via = TraceAnchor::Via(uuid(2));
        let junction = TraceAnchor::Junction(uuid(1));
        let width = PositiveLength::new(Length::from_nanometers(100_000)).unwrap();
        let t = Trace::new(uuid(3), Layer::top_copper(), width, junction, via);
        // Junction sorts first, so p1/p2 keep their passed-in order here.
        assert_eq!(t.p1(), junction);
        assert_eq!(t.p2(), via);
    }

    #[test]
    fn trace_anchors_swap_to_canonical_order() {
        let via = TraceAnchor::Via(uuid(2));
        let junction = TraceAnchor::Junction(uuid(1));
        let width = PositiveLength::new(Length::from_nanometers(100_000)).unwrap();
        let t = Trace::new(uuid(3), Layer::top_copper(), width, via, junction);
        assert_eq!(t.p1(), junction);
        assert_eq!(t.p2(), via);
    }

    #[test]
    fn trace_anchor_total_order_matches_via_pinorpad_junction() {
        let j = TraceAnchor::Junction(uuid(1));
        let v = TraceAnchor::Via(uuid(1));
        let p = TraceAnchor::Pad(uuid(1));
        assert!(j < v);
        assert!(v < p);
    }
}
