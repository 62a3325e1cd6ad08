//! L2: connectivity and library entities.

mod connectivity;
mod image;
mod layer;
mod misc;
mod pad;
mod polygon;
mod stroke_text;
mod symbol_pin;
mod via;
mod zone;

pub use connectivity::{Junction, JunctionEvent, NetLine, NetLineAnchor, NetLineEvent, Trace, TraceAnchor, TraceEvent};
pub use image::{Image, ImageEvent, ImageFileFormat, SVG_MIN_RASTER_PX};
pub use layer::Layer;
pub use misc::{
    AssemblyVariant, Bus, BusEvent, BusName, ComponentAssemblyOption, DevicePadSignalMapItem, NetSignal,
    NetSignalEvent, PackageModel, Resource, Tag,
};
pub use pad::{recommended_radius, ComponentSide, MaskConfig, Pad, PadEvent, PadFunction, PadHole, PadHoleEvent, PadShape};
pub use polygon::{Polygon, PolygonEvent};
pub use stroke_text::{StrokeText, StrokeTextEvent, StrokeTextSpacing};
pub use symbol_pin::{SymbolPin, SymbolPinEvent};
pub use via::{Via, ViaEvent, ViaStopMask};
pub use zone::{Zone, ZoneEvent, ZoneLayers, ZoneRules};
