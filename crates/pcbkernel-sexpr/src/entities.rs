//! Codec impls for every connectivity and library entity.

use uuid::Uuid;

use pcbkernel_core::units::{Angle, PositiveLength, Ratio, UnsignedLength, UnsignedLimitedRatio};
use pcbkernel_core::{
    Alignment, AssemblyVariant, Bus, BusName, ComponentAssemblyOption, ComponentSide,
    DevicePadSignalMapItem, Image, Junction, Layer, MaskConfig, NetLine,
    NetLineAnchor, NetSignal, Pad, PadFunction, PadHole, PadShape, PackageModel, Path, Point,
    Polygon, Resource, StrokeText, StrokeTextSpacing, SymbolPin, Tag, Trace, TraceAnchor, Via,
    ViaStopMask, Zone, ZoneLayers, ZoneRules,
};

use crate::codec::{decode_all, decode_field, decode_optional_field, decode_positional, require_child, FromSExpr, ToSExpr};
use crate::error::SExprError;
use crate::tree::SExpr;

fn push_uuid(list: &mut SExpr, uuid: Uuid) {
    list.push_field("uuid", uuid.to_sexpr());
}

fn decode_uuid(parent: &SExpr) -> crate::error::SExprResult<Uuid> {
    decode_field(parent, "uuid")
}

// ---------------------------------------------------------------- Junction

impl ToSExpr for Junction {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("junction");
        push_uuid(&mut list, self.uuid());
        list.push_field("position", self.position().to_sexpr());
        list
    }
}

impl FromSExpr for Junction {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let position: Point = decode_field(expr, "position")?;
        Ok(Junction::new(uuid, position))
    }
}

// ------------------------------------------------------------- NetLineAnchor

impl ToSExpr for NetLineAnchor {
    fn to_sexpr(&self) -> SExpr {
        match self {
            NetLineAnchor::Junction(uuid) => {
                let mut list = SExpr::list("junction");
                list.push(uuid.to_sexpr());
                list
            }
            NetLineAnchor::Pin { symbol, pin } => {
                let mut list = SExpr::list("pin");
                list.push_field("symbol", symbol.to_sexpr());
                list.push_field("pin", pin.to_sexpr());
                list
            }
        }
    }
}

impl FromSExpr for NetLineAnchor {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.tag() {
            Some("junction") => Ok(NetLineAnchor::Junction(decode_positional(expr)?)),
            Some("pin") => Ok(NetLineAnchor::Pin {
                symbol: decode_field(expr, "symbol")?,
                pin: decode_field(expr, "pin")?,
            }),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "junction|pin".to_string(),
                found: other.unwrap_or("<none>").to_string(),
            }),
        }
    }
}

// ----------------------------------------------------------------- NetLine

impl ToSExpr for NetLine {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("netline");
        push_uuid(&mut list, self.uuid());
        list.push_field("width", self.width().to_sexpr());
        let mut from = SExpr::list("from");
        from.push(self.p1().to_sexpr());
        list.push(from);
        let mut to = SExpr::list("to");
        to.push(self.p2().to_sexpr());
        list.push(to);
        list
    }
}

impl FromSExpr for NetLine {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let width: UnsignedLength = decode_field(expr, "width")?;
        let from = require_child(expr, "from")?;
        let to = require_child(expr, "to")?;
        let p1: NetLineAnchor = decode_positional(from)?;
        let p2: NetLineAnchor = decode_positional(to)?;
        Ok(NetLine::new(uuid, width, p1, p2))
    }
}

// ------------------------------------------------------------- TraceAnchor

impl ToSExpr for TraceAnchor {
    fn to_sexpr(&self) -> SExpr {
        match self {
            TraceAnchor::Junction(uuid) => {
                let mut list = SExpr::list("junction");
                list.push(uuid.to_sexpr());
                list
            }
            TraceAnchor::Via(uuid) => {
                let mut list = SExpr::list("via");
                list.push(uuid.to_sexpr());
                list
            }
            TraceAnchor::Pad(uuid) => {
                let mut list = SExpr::list("pad");
                list.push(uuid.to_sexpr());
                list
            }
            TraceAnchor::FootprintPad { device, pad } => {
                let mut list = SExpr::list("footprint_pad");
                list.push_field("device", device.to_sexpr());
                list.push_field("pad", pad.to_sexpr());
                list
            }
        }
    }
}

impl FromSExpr for TraceAnchor {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.tag() {
            Some("junction") => Ok(TraceAnchor::Junction(decode_positional(expr)?)),
            Some("via") => Ok(TraceAnchor::Via(decode_positional(expr)?)),
            Some("pad") => Ok(TraceAnchor::Pad(decode_positional(expr)?)),
            Some("footprint_pad") => Ok(TraceAnchor::FootprintPad {
                device: decode_field(expr, "device")?,
                pad: decode_field(expr, "pad")?,
            }),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "junction|via|pad|footprint_pad".to_string(),
                found: other.unwrap_or("<none>").to_string(),
            }),
        }
    }
}

// ------------------------------------------------------------------- Trace

impl ToSExpr for Trace {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("trace");
        push_uuid(&mut list, self.uuid());
        list.push_field("layer", self.layer().to_sexpr());
        list.push_field("width", self.width().to_sexpr());
        let mut from = SExpr::list("from");
        from.push(self.p1().to_sexpr());
        list.push(from);
        let mut to = SExpr::list("to");
        to.push(self.p2().to_sexpr());
        list.push(to);
        list
    }
}

impl FromSExpr for Trace {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let layer: Layer = decode_field(expr, "layer")?;
        let width: PositiveLength = decode_field(expr, "width")?;
        let from = require_child(expr, "from")?;
        let to = require_child(expr, "to")?;
        let p1: TraceAnchor = decode_positional(from)?;
        let p2: TraceAnchor = decode_positional(to)?;
        Ok(Trace::new(uuid, layer, width, p1, p2))
    }
}

// -------------------------------------------------------------------- Layer

impl ToSExpr for Layer {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(self.as_str())
    }
}

impl FromSExpr for Layer {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text = expr.as_atom().ok_or_else(|| {
            SExprError::malformed(expr.location(), format!("expected a layer name, found {expr:?}"))
        })?;
        Layer::new(text).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

// --------------------------------------------------------------- MaskConfig

impl ToSExpr for MaskConfig {
    fn to_sexpr(&self) -> SExpr {
        match (self.is_enabled(), self.offset()) {
            (false, _) => SExpr::atom("off"),
            (true, None) => SExpr::atom("auto"),
            (true, Some(offset)) => {
                let mut list = SExpr::list("manual");
                list.push(offset.to_sexpr());
                list
            }
        }
    }
}

impl FromSExpr for MaskConfig {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr {
            SExpr::Atom(value) if value == "off" => Ok(MaskConfig::off()),
            SExpr::Atom(value) if value == "auto" => Ok(MaskConfig::auto()),
            SExpr::List(_) if expr.tag() == Some("manual") => {
                let offset = expr
                    .positional()
                    .next()
                    .ok_or_else(|| SExprError::missing_child(expr.location(), "manual", "offset"))?;
                Ok(MaskConfig::manual(pcbkernel_core::units::Length::from_sexpr(offset)?))
            }
            _ => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "off|auto|manual".to_string(),
                found: format!("{expr:?}"),
            }),
        }
    }
}

// ---------------------------------------------------------------- PadShape

impl ToSExpr for PadShape {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            PadShape::RoundedRect => "rounded_rect",
            PadShape::RoundedOctagon => "rounded_octagon",
            PadShape::Custom => "custom",
        })
    }
}

impl FromSExpr for PadShape {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.as_atom() {
            Some("rounded_rect") => Ok(PadShape::RoundedRect),
            Some("rounded_octagon") => Ok(PadShape::RoundedOctagon),
            Some("custom") => Ok(PadShape::Custom),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "rounded_rect|rounded_octagon|custom".to_string(),
                found: other.unwrap_or("<non-atom>").to_string(),
            }),
        }
    }
}

// ------------------------------------------------------------ ComponentSide

impl ToSExpr for ComponentSide {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            ComponentSide::Top => "top",
            ComponentSide::Bottom => "bottom",
        })
    }
}

impl FromSExpr for ComponentSide {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.as_atom() {
            Some("top") => Ok(ComponentSide::Top),
            Some("bottom") => Ok(ComponentSide::Bottom),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "top|bottom".to_string(),
                found: other.unwrap_or("<non-atom>").to_string(),
            }),
        }
    }
}

// ------------------------------------------------------------- PadFunction

impl ToSExpr for PadFunction {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            PadFunction::Unspecified => "unspecified",
            PadFunction::StandardPad => "standard_pad",
            PadFunction::PressFitPad => "press_fit_pad",
            PadFunction::ThermalPad => "thermal_pad",
            PadFunction::BgaPad => "bga_pad",
            PadFunction::EdgeConnectorPad => "edge_connector_pad",
            PadFunction::TestPad => "test_pad",
            PadFunction::LocalFiducial => "local_fiducial",
            PadFunction::GlobalFiducial => "global_fiducial",
        })
    }
}

impl FromSExpr for PadFunction {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text = expr.as_atom().ok_or_else(|| {
            SExprError::malformed(expr.location(), format!("expected a pad function, found {expr:?}"))
        })?;
        match text {
            "unspecified" => Ok(PadFunction::Unspecified),
            "standard_pad" => Ok(PadFunction::StandardPad),
            "press_fit_pad" => Ok(PadFunction::PressFitPad),
            "thermal_pad" => Ok(PadFunction::ThermalPad),
            "bga_pad" => Ok(PadFunction::BgaPad),
            "edge_connector_pad" => Ok(PadFunction::EdgeConnectorPad),
            "test_pad" => Ok(PadFunction::TestPad),
            "local_fiducial" => Ok(PadFunction::LocalFiducial),
            "global_fiducial" => Ok(PadFunction::GlobalFiducial),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "a known pad function".to_string(),
                found: other.to_string(),
            }),
        }
    }
}

// ------------------------------------------------------------------ PadHole

impl ToSExpr for PadHole {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("hole");
        push_uuid(&mut list, self.uuid());
        list.push_field("diameter", self.diameter().to_sexpr());
        list.push(self.path().to_sexpr());
        list
    }
}

impl FromSExpr for PadHole {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let diameter: PositiveLength = decode_field(expr, "diameter")?;
        let path: Path = decode_field(expr, "path")?;
        PadHole::new(uuid, diameter, path).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

// --------------------------------------------------------------------- Pad

#[allow(clippy::too_many_lines)]
impl ToSExpr for Pad {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("pad");
        push_uuid(&mut list, self.uuid());
        list.push_field("position", self.position().to_sexpr());
        list.push_field("rotation", self.rotation().to_sexpr());
        list.push_field("shape", self.shape().to_sexpr());
        let mut size = SExpr::list("size");
        size.push(self.width().to_sexpr());
        size.push(self.height().to_sexpr());
        list.push(size);
        list.push_field("radius", self.radius().to_sexpr());
        if !self.custom_shape_outline().is_empty() {
            list.push(self.custom_shape_outline().to_sexpr());
        }
        let mut stop_mask = SExpr::list("stop_mask");
        stop_mask.push(self.stop_mask_config().to_sexpr());
        list.push(stop_mask);
        let mut solder_paste = SExpr::list("solder_paste");
        solder_paste.push(self.solder_paste_config().to_sexpr());
        list.push(solder_paste);
        list.push_field("clearance", self.copper_clearance().to_sexpr());
        list.push_field("side", self.component_side().to_sexpr());
        list.push_field("function", self.function().to_sexpr());
        for hole in self.holes() {
            list.push_line(hole.to_sexpr());
        }
        list
    }
}

impl FromSExpr for Pad {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let position: Point = decode_field(expr, "position")?;
        let rotation: Angle = decode_field(expr, "rotation")?;
        let shape: PadShape = decode_field(expr, "shape")?;
        let size = require_child(expr, "size")?;
        let mut size_values = size.positional();
        let width = PositiveLength::from_sexpr(size_values.next().ok_or_else(|| {
            SExprError::missing_child(size.location(), "size", "width")
        })?)?;
        let height = PositiveLength::from_sexpr(size_values.next().ok_or_else(|| {
            SExprError::missing_child(size.location(), "size", "height")
        })?)?;
        let radius: UnsignedLimitedRatio = decode_field(expr, "radius")?;
        let custom_shape_outline = match expr.child("path") {
            Some(path_expr) => Path::from_sexpr(path_expr)?,
            None => Path::new(vec![]),
        };
        let stop_mask_config = decode_positional(require_child(expr, "stop_mask")?)?;
        let solder_paste_config = decode_positional(require_child(expr, "solder_paste")?)?;
        let copper_clearance: UnsignedLength = decode_field(expr, "clearance")?;
        let component_side: ComponentSide = decode_field(expr, "side")?;
        let function: PadFunction = decode_field(expr, "function")?;
        let holes: Vec<PadHole> = decode_all(expr, "hole")?;
        Ok(Pad::new(
            uuid,
            position,
            rotation,
            shape,
            width,
            height,
            radius,
            custom_shape_outline,
            stop_mask_config,
            solder_paste_config,
            copper_clearance,
            component_side,
            function,
            holes,
        ))
    }
}

// --------------------------------------------------------------- ViaStopMask

impl ToSExpr for ViaStopMask {
    fn to_sexpr(&self) -> SExpr {
        SExpr::atom(match self {
            ViaStopMask::Auto => "auto",
            ViaStopMask::Disabled => "disabled",
        })
    }
}

impl FromSExpr for ViaStopMask {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr.as_atom() {
            Some("auto") => Ok(ViaStopMask::Auto),
            Some("disabled") => Ok(ViaStopMask::Disabled),
            other => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "auto|disabled".to_string(),
                found: other.unwrap_or("<non-atom>").to_string(),
            }),
        }
    }
}

// --------------------------------------------------------------------- Via

impl ToSExpr for Via {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("via");
        push_uuid(&mut list, self.uuid());
        list.push_field("position", self.position().to_sexpr());
        list.push_field("size", self.size().to_sexpr());
        list.push_field("drill", self.drill().to_sexpr());
        list.push_field("stop_mask", self.stop_mask().to_sexpr());
        list
    }
}

impl FromSExpr for Via {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let position: Point = decode_field(expr, "position")?;
        let size: PositiveLength = decode_field(expr, "size")?;
        let drill: PositiveLength = decode_field(expr, "drill")?;
        let stop_mask: ViaStopMask = decode_field(expr, "stop_mask")?;
        Ok(Via::new(uuid, position, size, drill, stop_mask))
    }
}

// --------------------------------------------------------------- ZoneLayers

const ZONE_LAYER_NAMES: &[(ZoneLayers, &str)] =
    &[(ZoneLayers::TOP, "top"), (ZoneLayers::INNER, "inner"), (ZoneLayers::BOTTOM, "bottom")];

const ZONE_RULE_NAMES: &[(ZoneRules, &str)] = &[
    (ZoneRules::NO_COPPER, "no_copper"),
    (ZoneRules::NO_PLANES, "no_planes"),
    (ZoneRules::NO_EXPOSURE, "no_exposure"),
    (ZoneRules::NO_DEVICES, "no_devices"),
];

impl ToSExpr for ZoneLayers {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("layers");
        for (flag, name) in ZONE_LAYER_NAMES {
            if self.contains(*flag) {
                list.push(SExpr::atom(*name));
            }
        }
        list
    }
}

impl FromSExpr for ZoneLayers {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let mut flags = ZoneLayers::empty();
        for value in expr.positional() {
            let name = value.as_atom().ok_or_else(|| {
                SExprError::malformed(value.location(), format!("expected a layer flag, found {value:?}"))
            })?;
            let (flag, _) = ZONE_LAYER_NAMES.iter().find(|(_, n)| *n == name).ok_or_else(|| {
                SExprError::UnknownToken {
                    location: value.location(),
                    expected: "top|inner|bottom".to_string(),
                    found: name.to_string(),
                }
            })?;
            flags |= *flag;
        }
        Ok(flags)
    }
}

impl ToSExpr for ZoneRules {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("rules");
        for (flag, name) in ZONE_RULE_NAMES {
            if self.contains(*flag) {
                list.push(SExpr::atom(*name));
            }
        }
        list
    }
}

impl FromSExpr for ZoneRules {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let mut flags = ZoneRules::empty();
        for value in expr.positional() {
            let name = value.as_atom().ok_or_else(|| {
                SExprError::malformed(value.location(), format!("expected a rule flag, found {value:?}"))
            })?;
            let (flag, _) = ZONE_RULE_NAMES.iter().find(|(_, n)| *n == name).ok_or_else(|| {
                SExprError::UnknownToken {
                    location: value.location(),
                    expected: "no_copper|no_planes|no_exposure|no_devices".to_string(),
                    found: name.to_string(),
                }
            })?;
            flags |= *flag;
        }
        Ok(flags)
    }
}

// -------------------------------------------------------------------- Zone

impl ToSExpr for Zone {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("zone");
        push_uuid(&mut list, self.uuid());
        list.push(self.layers().to_sexpr());
        list.push(self.rules().to_sexpr());
        list.push(self.outline().to_sexpr());
        list
    }
}

impl FromSExpr for Zone {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let layers = ZoneLayers::from_sexpr(require_child(expr, "layers")?)?;
        let rules = ZoneRules::from_sexpr(require_child(expr, "rules")?)?;
        let outline = Path::from_sexpr(require_child(expr, "path")?)?;
        Ok(Zone::new(uuid, layers, rules, outline))
    }
}

// -------------------------------------------------------- StrokeTextSpacing

impl ToSExpr for StrokeTextSpacing {
    fn to_sexpr(&self) -> SExpr {
        match self {
            StrokeTextSpacing::Auto => SExpr::atom("auto"),
            StrokeTextSpacing::Ratio(ratio) => {
                let mut list = SExpr::list("ratio");
                list.push(ratio.to_sexpr());
                list
            }
        }
    }
}

impl FromSExpr for StrokeTextSpacing {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        match expr {
            SExpr::Atom(value) if value == "auto" => Ok(StrokeTextSpacing::Auto),
            SExpr::List(_) if expr.tag() == Some("ratio") => {
                Ok(StrokeTextSpacing::Ratio(decode_positional(expr)?))
            }
            _ => Err(SExprError::UnknownToken {
                location: expr.location(),
                expected: "auto|ratio".to_string(),
                found: format!("{expr:?}"),
            }),
        }
    }
}

// ------------------------------------------------------------------ StrokeText

impl ToSExpr for StrokeText {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("stroke_text");
        push_uuid(&mut list, self.uuid());
        list.push_field("layer", self.layer().to_sexpr());
        list.push_field("text", SExpr::string(self.text()));
        list.push_field("position", self.position().to_sexpr());
        list.push_field("rotation", self.rotation().to_sexpr());
        list.push_field("height", self.height().to_sexpr());
        list.push_field("stroke_width", self.stroke_width().to_sexpr());
        list.push_field("letter_spacing", self.letter_spacing().to_sexpr());
        list.push_field("line_spacing", self.line_spacing().to_sexpr());
        list.push(self.align().to_sexpr());
        list.push_field("mirrored", self.mirrored().to_sexpr());
        list.push_field("auto_rotate", self.auto_rotate().to_sexpr());
        list
    }
}

impl FromSExpr for StrokeText {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let layer: Layer = decode_field(expr, "layer")?;
        let text: String = decode_field(expr, "text")?;
        let position: Point = decode_field(expr, "position")?;
        let rotation: Angle = decode_field(expr, "rotation")?;
        let height: PositiveLength = decode_field(expr, "height")?;
        let stroke_width: UnsignedLength = decode_field(expr, "stroke_width")?;
        let letter_spacing: StrokeTextSpacing = decode_field(expr, "letter_spacing")?;
        let line_spacing: StrokeTextSpacing = decode_field(expr, "line_spacing")?;
        let align = Alignment::from_sexpr(require_child(expr, "align")?)?;
        let mirrored: bool = decode_field(expr, "mirrored")?;
        let auto_rotate: bool = decode_field(expr, "auto_rotate")?;
        Ok(StrokeText::new(
            uuid,
            layer,
            text,
            position,
            rotation,
            height,
            stroke_width,
            letter_spacing,
            line_spacing,
            align,
            mirrored,
            auto_rotate,
        ))
    }
}

// -------------------------------------------------------------------- Polygon

impl ToSExpr for Polygon {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("polygon");
        push_uuid(&mut list, self.uuid());
        list.push_field("layer", self.layer().to_sexpr());
        list.push_field("width", self.line_width().to_sexpr());
        list.push_field("fill", self.is_filled().to_sexpr());
        list.push_field("grab_area", self.is_grab_area().to_sexpr());
        list.push(self.path().to_sexpr());
        list
    }
}

impl FromSExpr for Polygon {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let layer: Layer = decode_field(expr, "layer")?;
        let line_width: UnsignedLength = decode_field(expr, "width")?;
        let is_filled: bool = decode_field(expr, "fill")?;
        let is_grab_area: bool = decode_field(expr, "grab_area")?;
        let path = Path::from_sexpr(require_child(expr, "path")?)?;
        Ok(Polygon::new(uuid, layer, line_width, is_filled, is_grab_area, path))
    }
}

// ---------------------------------------------------------------------- Image

impl ToSExpr for Image {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("image");
        push_uuid(&mut list, self.uuid());
        list.push_field("file", SExpr::string(self.file_name()));
        list.push_field("position", self.position().to_sexpr());
        list.push_field("rotation", self.rotation().to_sexpr());
        let mut size = SExpr::list("size");
        size.push(self.width().to_sexpr());
        size.push(self.height().to_sexpr());
        list.push(size);
        if let Some(border) = self.border_width() {
            list.push_field("border_width", border.to_sexpr());
        }
        list
    }
}

impl FromSExpr for Image {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let file_name: String = decode_field(expr, "file")?;
        let position: Point = decode_field(expr, "position")?;
        let rotation: Angle = decode_field(expr, "rotation")?;
        let size = require_child(expr, "size")?;
        let mut size_values = size.positional();
        let width = PositiveLength::from_sexpr(
            size_values.next().ok_or_else(|| SExprError::missing_child(size.location(), "size", "width"))?,
        )?;
        let height = PositiveLength::from_sexpr(
            size_values.next().ok_or_else(|| SExprError::missing_child(size.location(), "size", "height"))?,
        )?;
        let border_width: Option<UnsignedLength> = decode_optional_field(expr, "border_width")?;
        Image::new(uuid, file_name, position, rotation, width, height, border_width)
            .map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

// ------------------------------------------------------------------- SymbolPin

impl ToSExpr for SymbolPin {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("pin");
        push_uuid(&mut list, self.uuid());
        list.push_field("name", SExpr::string(self.name()));
        list.push_field("position", self.position().to_sexpr());
        list.push_field("length", self.length().to_sexpr());
        list.push_field("rotation", self.rotation().to_sexpr());
        list.push_field("name_position", self.name_position().to_sexpr());
        list.push_field("name_rotation", self.name_rotation().to_sexpr());
        list.push_field("name_height", self.name_height().to_sexpr());
        let mut name_align = SExpr::list("name_align");
        name_align.push(self.name_alignment().h.to_sexpr());
        name_align.push(self.name_alignment().v.to_sexpr());
        list.push(name_align);
        list
    }
}

impl FromSExpr for SymbolPin {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let name: String = decode_field(expr, "name")?;
        let position: Point = decode_field(expr, "position")?;
        let length: UnsignedLength = decode_field(expr, "length")?;
        let rotation: Angle = decode_field(expr, "rotation")?;
        let name_position: Point = decode_field(expr, "name_position")?;
        let name_rotation: Angle = decode_field(expr, "name_rotation")?;
        let name_height: PositiveLength = decode_field(expr, "name_height")?;
        let name_align = require_child(expr, "name_align")?;
        let mut values = name_align.positional();
        let h = pcbkernel_core::HAlign::from_sexpr(
            values.next().ok_or_else(|| SExprError::missing_child(name_align.location(), "name_align", "h"))?,
        )?;
        let v = pcbkernel_core::VAlign::from_sexpr(
            values.next().ok_or_else(|| SExprError::missing_child(name_align.location(), "name_align", "v"))?,
        )?;
        Ok(SymbolPin::new(
            uuid,
            name,
            position,
            length,
            rotation,
            name_position,
            name_rotation,
            name_height,
            Alignment::new(h, v),
        ))
    }
}

// ----------------------------------------------------------------- BusName

impl ToSExpr for BusName {
    fn to_sexpr(&self) -> SExpr {
        SExpr::string(self.as_str())
    }
}

impl FromSExpr for BusName {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text: String = String::from_sexpr(expr)?;
        BusName::new(text).map_err(|e| SExprError::from_kernel_error(expr.location(), e))
    }
}

// --------------------------------------------------------------------- Bus

impl ToSExpr for Bus {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("bus");
        push_uuid(&mut list, self.uuid());
        list.push_field("name", self.name().to_sexpr());
        list
    }
}

impl FromSExpr for Bus {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let name: BusName = decode_field(expr, "name")?;
        Ok(Bus::new(uuid, name))
    }
}

// --------------------------------------------------------------- NetSignal

impl ToSExpr for NetSignal {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("net_signal");
        push_uuid(&mut list, self.uuid());
        list.push_field("name", SExpr::string(self.name()));
        if let Some(bus) = self.bus() {
            list.push_field("bus", bus.to_sexpr());
        }
        list
    }
}

impl FromSExpr for NetSignal {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let name: String = decode_field(expr, "name")?;
        let bus: Option<Uuid> = decode_optional_field(expr, "bus")?;
        Ok(NetSignal::new(uuid, name, bus))
    }
}

// --------------------------------------------------------- AssemblyVariant

impl ToSExpr for AssemblyVariant {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("assembly_variant");
        push_uuid(&mut list, self.uuid());
        list.push_field("name", SExpr::string(self.name()));
        list.push_field("description", SExpr::string(self.description()));
        list
    }
}

impl FromSExpr for AssemblyVariant {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let name: String = decode_field(expr, "name")?;
        let description: String = decode_field(expr, "description")?;
        Ok(AssemblyVariant::new(uuid, name, description))
    }
}

// ----------------------------------------------------- ComponentAssemblyOption

impl ToSExpr for ComponentAssemblyOption {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("assembly_option");
        push_uuid(&mut list, self.uuid());
        list.push_field("device", self.device().to_sexpr());
        list.push_field("assembly_variant", self.assembly_variant().to_sexpr());
        for (name, value) in self.attributes() {
            let mut attribute = SExpr::list("attribute");
            attribute.push(SExpr::string(name));
            attribute.push(SExpr::string(value));
            list.push(attribute);
        }
        list
    }
}

impl FromSExpr for ComponentAssemblyOption {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let device: Uuid = decode_field(expr, "device")?;
        let assembly_variant: Uuid = decode_field(expr, "assembly_variant")?;
        let mut attributes = Vec::new();
        for attribute in expr.children_tagged("attribute") {
            let mut values = attribute.positional();
            let name: String = String::from_sexpr(values.next().ok_or_else(|| {
                SExprError::missing_child(attribute.location(), "attribute", "name")
            })?)?;
            let value: String = String::from_sexpr(values.next().ok_or_else(|| {
                SExprError::missing_child(attribute.location(), "attribute", "value")
            })?)?;
            attributes.push((name, value));
        }
        Ok(ComponentAssemblyOption::new(uuid, device, assembly_variant, attributes))
    }
}

// ----------------------------------------------------------------- Resource

impl ToSExpr for Resource {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("resource");
        list.push_field("name", SExpr::string(self.name()));
        list.push_field("type", SExpr::string(self.media_type()));
        list.push_field("path", SExpr::string(self.file_path()));
        list
    }
}

impl FromSExpr for Resource {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let name: String = decode_field(expr, "name")?;
        let media_type: String = decode_field(expr, "type")?;
        let file_path: String = decode_field(expr, "path")?;
        Ok(Resource::new(name, media_type, file_path))
    }
}

// ------------------------------------------------------------- PackageModel

impl ToSExpr for PackageModel {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("package_model");
        push_uuid(&mut list, self.uuid());
        list.push_field("name", SExpr::string(self.name()));
        list
    }
}

impl FromSExpr for PackageModel {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let uuid = decode_uuid(expr)?;
        let name: String = decode_field(expr, "name")?;
        Ok(PackageModel::new(uuid, name))
    }
}

// ------------------------------------------------------ DevicePadSignalMapItem

impl ToSExpr for DevicePadSignalMapItem {
    fn to_sexpr(&self) -> SExpr {
        let mut list = SExpr::list("pad_signal_map");
        list.push_field("pad", self.pad().to_sexpr());
        if let Some(signal) = self.signal() {
            list.push_field("signal", signal.to_sexpr());
        }
        list
    }
}

impl FromSExpr for DevicePadSignalMapItem {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let pad: Uuid = decode_field(expr, "pad")?;
        let signal: Option<Uuid> = decode_optional_field(expr, "signal")?;
        Ok(DevicePadSignalMapItem::new(pad, signal))
    }
}

// ------------------------------------------------------------------------ Tag

impl ToSExpr for Tag {
    fn to_sexpr(&self) -> SExpr {
        SExpr::string(self.as_str())
    }
}

impl FromSExpr for Tag {
    fn from_sexpr(expr: &SExpr) -> crate::error::SExprResult<Self> {
        let text: String = String::from_sexpr(expr)?;
        Ok(Tag::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcbkernel_core::units::Length;
    use pcbkernel_core::Vertex;
    use crate::tree::{format, parse};

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    #[test]
    fn junction_round_trips() {
        let j = Junction::new(uuid(1), Point::new(Length::from_mm(1.0).unwrap(), Length::ZERO));
        let expr = j.to_sexpr();
        let decoded = Junction::from_sexpr(&expr).unwrap();
        assert!(decoded == j);
    }

    #[test]
    fn net_line_anchor_pin_round_trips() {
        let anchor = NetLineAnchor::Pin { symbol: uuid(1), pin: uuid(2) };
        let expr = anchor.to_sexpr();
        assert_eq!(NetLineAnchor::from_sexpr(&expr).unwrap(), anchor);
    }

    #[test]
    fn trace_round_trips_with_footprint_pad_anchor() {
        let width = PositiveLength::new(Length::from_nanometers(200_000)).unwrap();
        let t = Trace::new(
            uuid(3),
            Layer::top_copper(),
            width,
            TraceAnchor::Via(uuid(1)),
            TraceAnchor::FootprintPad { device: uuid(4), pad: uuid(5) },
        );
        let expr = t.to_sexpr();
        let decoded = Trace::from_sexpr(&expr).unwrap();
        assert!(decoded == t);
    }

    #[test]
    fn mask_config_variants_round_trip() {
        for config in [MaskConfig::off(), MaskConfig::auto(), MaskConfig::manual(Length::from_mm(0.1).unwrap())] {
            let expr = config.to_sexpr();
            assert_eq!(MaskConfig::from_sexpr(&expr).unwrap(), config);
        }
    }

    #[test]
    fn zone_layers_round_trip_through_names() {
        let layers = ZoneLayers::TOP | ZoneLayers::BOTTOM;
        let expr = layers.to_sexpr();
        assert_eq!(ZoneLayers::from_sexpr(&expr).unwrap(), layers);
    }

    #[test]
    fn zone_round_trips() {
        let outline = Path::new(vec![Vertex::straight(Point::ORIGIN), Vertex::straight(Point::new(Length::from_mm(1.0).unwrap(), Length::ZERO))]);
        let zone = Zone::new(uuid(1), ZoneLayers::TOP | ZoneLayers::INNER, ZoneRules::NO_COPPER, outline);
        let expr = zone.to_sexpr();
        let printed = format(&expr);
        let reparsed = parse(&printed).unwrap();
        let decoded = Zone::from_sexpr(&reparsed).unwrap();
        assert!(decoded == zone);
    }

    #[test]
    fn pad_round_trips_with_holes() {
        let width = PositiveLength::new(Length::from_mm(1.0).unwrap()).unwrap();
        let height = PositiveLength::new(Length::from_mm(1.0).unwrap()).unwrap();
        let hole = PadHole::new(
            uuid(9),
            PositiveLength::new(Length::from_nanometers(500_000)).unwrap(),
            Path::circle(PositiveLength::new(Length::from_nanometers(800_000)).unwrap()),
        )
        .unwrap();
        let pad = Pad::new(
            uuid(1),
            Point::ORIGIN,
            Angle::deg90(),
            PadShape::RoundedRect,
            width,
            height,
            UnsignedLimitedRatio::new(Ratio::percent50()).unwrap(),
            Path::new(vec![]),
            MaskConfig::auto(),
            MaskConfig::off(),
            UnsignedLength::new(Length::ZERO).unwrap(),
            ComponentSide::Top,
            PadFunction::StandardPad,
            vec![hole],
        );
        let expr = pad.to_sexpr();
        let decoded = Pad::from_sexpr(&expr).unwrap();
        assert_eq!(decoded.uuid(), pad.uuid());
        assert_eq!(decoded.holes().len(), 1);
        assert_eq!(decoded.shape(), pad.shape());
    }

    #[test]
    fn stroke_text_round_trips() {
        let text = StrokeText::new(
            uuid(1),
            Layer::top_copper(),
            "REF**",
            Point::ORIGIN,
            Angle::deg180(),
            PositiveLength::new(Length::from_nanometers(1_000_000)).unwrap(),
            UnsignedLength::new(Length::from_nanometers(200_000)).unwrap(),
            StrokeTextSpacing::Auto,
            StrokeTextSpacing::Ratio(Ratio::percent100()),
            Alignment::center(),
            true,
            true,
        );
        let expr = text.to_sexpr();
        let decoded = StrokeText::from_sexpr(&expr).unwrap();
        assert!(decoded == text);
    }

    #[test]
    fn image_round_trips_without_border() {
        let size = PositiveLength::new(Length::from_mm(5.0).unwrap()).unwrap();
        let image = Image::new(uuid(1), "logo.svg", Point::ORIGIN, Angle::deg0(), size, size, None).unwrap();
        let expr = image.to_sexpr();
        let decoded = Image::from_sexpr(&expr).unwrap();
        assert!(decoded == image);
    }

    #[test]
    fn bus_and_net_signal_round_trip() {
        let bus = Bus::new(uuid(1), BusName::new("D0..D7").unwrap());
        let expr = bus.to_sexpr();
        assert!(Bus::from_sexpr(&expr).unwrap() == bus);

        let signal = NetSignal::new(uuid(2), "GND", Some(uuid(1)));
        let expr = signal.to_sexpr();
        assert!(NetSignal::from_sexpr(&expr).unwrap() == signal);
    }

    #[test]
    fn component_assembly_option_round_trips_attributes() {
        let option = ComponentAssemblyOption::new(
            uuid(1),
            uuid(2),
            uuid(3),
            vec![("populate".to_string(), "false".to_string())],
        );
        let expr = option.to_sexpr();
        let decoded = ComponentAssemblyOption::from_sexpr(&expr).unwrap();
        assert_eq!(decoded, option);
    }
}
