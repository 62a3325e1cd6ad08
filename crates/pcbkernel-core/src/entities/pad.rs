//! Footprint/package pads and their holes.

use uuid::Uuid;

use crate::error::{KernelError, KernelResult};
use crate::geometry::{PadGeometry, Path};
use crate::signal::Signal;
use crate::units::{Angle, Length, PositiveLength, Ratio, UnsignedLength, UnsignedLimitedRatio};

use super::layer::Layer;

/// Whether a pad's stop-mask/solder-paste opening is generated automatically,
/// pulled in (or out) by an explicit offset, or suppressed entirely.
///
/// There is no dedicated upstream source file for this type in the retrieval
/// pack; it is shaped directly from `Pad::getStopMaskConfig()`'s observed
/// usage (`isEnabled()`, an optional `getOffset()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskConfig {
    enabled: bool,
    offset: Option<crate::units::Length>,
}

impl MaskConfig {
    /// No opening at all on this side.
    pub fn off() -> Self {
        MaskConfig { enabled: false, offset: None }
    }

    /// Automatic opening, sized by the board's default expansion.
    pub fn auto() -> Self {
        MaskConfig { enabled: true, offset: None }
    }

    /// Opening at an explicit offset from the pad outline.
    pub fn manual(offset: crate::units::Length) -> Self {
        MaskConfig { enabled: true, offset: Some(offset) }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn offset(&self) -> Option<crate::units::Length> {
        self.offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadShape {
    RoundedRect,
    RoundedOctagon,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentSide {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadFunction {
    Unspecified,
    StandardPad,
    PressFitPad,
    ThermalPad,
    BgaPad,
    EdgeConnectorPad,
    TestPad,
    LocalFiducial,
    GlobalFiducial,
}

impl PadFunction {
    pub fn is_fiducial(&self) -> bool {
        matches!(self, PadFunction::LocalFiducial | PadFunction::GlobalFiducial)
    }

    pub fn needs_soldering(&self) -> bool {
        !matches!(
            self,
            PadFunction::EdgeConnectorPad
                | PadFunction::TestPad
                | PadFunction::LocalFiducial
                | PadFunction::GlobalFiducial
        )
    }
}

/// A single drilled hole in a THT pad.
pub struct PadHole {
    uuid: Uuid,
    diameter: PositiveLength,
    path: Path,
    pub on_edited: Signal<PadHoleEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadHoleEvent {
    UuidChanged,
    DiameterChanged,
    PathChanged,
}

impl PadHole {
    pub fn new(uuid: Uuid, diameter: PositiveLength, path: Path) -> KernelResult<Self> {
        if path.is_empty() {
            return Err(KernelError::invalid_value("PadHole", "hole path must not be empty"));
        }
        Ok(PadHole {
            uuid,
            diameter,
            path,
            on_edited: Signal::new(),
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn diameter(&self) -> PositiveLength {
        self.diameter
    }
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// More than one vertex: a slot rather than a round hole.
    pub fn is_slot(&self) -> bool {
        self.path.len() > 1
    }

    pub fn is_multi_segment_slot(&self) -> bool {
        self.path.len() > 2
    }

    pub fn is_curved_slot(&self) -> bool {
        self.path.is_curved()
    }

    pub fn set_diameter(&mut self, diameter: PositiveLength) -> bool {
        if diameter == self.diameter {
            return false;
        }
        self.diameter = diameter;
        self.on_edited.notify(&PadHoleEvent::DiameterChanged);
        true
    }

    pub fn set_path(&mut self, path: Path) -> KernelResult<bool> {
        if path.is_empty() {
            return Err(KernelError::invalid_value("PadHole", "hole path must not be empty"));
        }
        if path == self.path {
            return Ok(false);
        }
        self.path = path;
        self.on_edited.notify(&PadHoleEvent::PathChanged);
        Ok(true)
    }
}

impl Clone for PadHole {
    fn clone(&self) -> Self {
        PadHole::new(self.uuid, self.diameter, self.path.clone()).expect("invariant already checked")
    }
}

impl PartialEq for PadHole {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid && self.diameter == other.diameter && self.path == other.path
    }
}

/// A footprint/package copper pad, SMT or THT.
pub struct Pad {
    uuid: Uuid,
    position: crate::geometry::Point,
    rotation: Angle,
    shape: PadShape,
    width: PositiveLength,
    height: PositiveLength,
    radius: UnsignedLimitedRatio,
    custom_shape_outline: Path,
    stop_mask_config: MaskConfig,
    solder_paste_config: MaskConfig,
    copper_clearance: UnsignedLength,
    component_side: ComponentSide,
    function: PadFunction,
    holes: Vec<PadHole>,
    pub on_edited: Signal<PadEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadEvent {
    UuidChanged,
    PositionChanged,
    RotationChanged,
    ShapeChanged,
    SizeChanged,
    RadiusChanged,
    CustomShapeOutlineChanged,
    StopMaskConfigChanged,
    SolderPasteConfigChanged,
    CopperClearanceChanged,
    ComponentSideChanged,
    FunctionChanged,
    HolesChanged,
}

#[allow(clippy::too_many_arguments)]
impl Pad {
    pub fn new(
        uuid: Uuid,
        position: crate::geometry::Point,
        rotation: Angle,
        shape: PadShape,
        width: PositiveLength,
        height: PositiveLength,
        radius: UnsignedLimitedRatio,
        custom_shape_outline: Path,
        stop_mask_config: MaskConfig,
        solder_paste_config: MaskConfig,
        copper_clearance: UnsignedLength,
        component_side: ComponentSide,
        function: PadFunction,
        holes: Vec<PadHole>,
    ) -> Self {
        Pad {
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
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn position(&self) -> crate::geometry::Point {
        self.position
    }
    pub fn rotation(&self) -> Angle {
        self.rotation
    }
    pub fn shape(&self) -> PadShape {
        self.shape
    }
    pub fn width(&self) -> PositiveLength {
        self.width
    }
    pub fn height(&self) -> PositiveLength {
        self.height
    }
    pub fn radius(&self) -> UnsignedLimitedRatio {
        self.radius
    }
    pub fn custom_shape_outline(&self) -> &Path {
        &self.custom_shape_outline
    }
    pub fn stop_mask_config(&self) -> MaskConfig {
        self.stop_mask_config
    }
    pub fn solder_paste_config(&self) -> MaskConfig {
        self.solder_paste_config
    }
    pub fn copper_clearance(&self) -> UnsignedLength {
        self.copper_clearance
    }
    pub fn component_side(&self) -> ComponentSide {
        self.component_side
    }
    pub fn function(&self) -> PadFunction {
        self.function
    }
    pub fn holes(&self) -> &[PadHole] {
        &self.holes
    }

    /// Non-empty holes list means through-hole technology.
    pub fn is_tht(&self) -> bool {
        !self.holes.is_empty()
    }

    pub fn has_top_copper(&self) -> bool {
        self.is_tht() || matches!(self.component_side, ComponentSide::Top)
    }

    pub fn has_bottom_copper(&self) -> bool {
        self.is_tht() || matches!(self.component_side, ComponentSide::Bottom)
    }

    pub fn has_auto_top_stop_mask(&self) -> bool {
        self.stop_mask_config.is_enabled() && self.has_top_copper()
    }

    pub fn has_auto_bottom_stop_mask(&self) -> bool {
        self.stop_mask_config.is_enabled() && self.has_bottom_copper()
    }

    /// Solder paste only applies to the SMT side (THT pads never get paste
    /// on either side, mirroring the source's `isTht() != isSide` check).
    pub fn has_auto_top_solder_paste(&self) -> bool {
        self.solder_paste_config.is_enabled() && (self.is_tht() != matches!(self.component_side, ComponentSide::Top))
    }

    pub fn has_auto_bottom_solder_paste(&self) -> bool {
        self.solder_paste_config.is_enabled()
            && (self.is_tht() != matches!(self.component_side, ComponentSide::Bottom))
    }

    /// The resolved outline shape for this pad's `shape`, `width`, `height`,
    /// `radius` and (for `Custom`) `custom_shape_outline` fields.
    pub fn geometry(&self) -> PadGeometry {
        match self.shape {
            PadShape::RoundedRect => PadGeometry::rounded_rect(self.width, self.height, self.corner_radius_length()),
            PadShape::RoundedOctagon => {
                PadGeometry::rounded_octagon(self.width, self.height, self.corner_radius_length())
            }
            PadShape::Custom => PadGeometry::custom(self.custom_shape_outline.clone()),
        }
    }

    /// `radius` is a ratio of `min(width, height)`; resolve it to an absolute length.
    fn corner_radius_length(&self) -> UnsignedLength {
        let min_size = self.width.get().min(self.height.get());
        let nm = (min_size.nanometers() as f64 * self.radius.get().to_normalized()).round() as i64;
        UnsignedLength::new_unchecked(Length::from_nanometers(nm))
    }

    pub fn smt_layer(&self) -> Layer {
        match self.component_side {
            ComponentSide::Top => Layer::top_copper(),
            ComponentSide::Bottom => Layer::bottom_copper(),
        }
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&PadEvent::UuidChanged);
        true
    }

    pub fn set_position(&mut self, position: crate::geometry::Point) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.on_edited.notify(&PadEvent::PositionChanged);
        true
    }

    pub fn set_rotation(&mut self, rotation: Angle) -> bool {
        if rotation == self.rotation {
            return false;
        }
        self.rotation = rotation;
        self.on_edited.notify(&PadEvent::RotationChanged);
        true
    }

    pub fn set_function(&mut self, function: PadFunction) -> bool {
        if function == self.function {
            return false;
        }
        self.function = function;
        self.on_edited.notify(&PadEvent::FunctionChanged);
        true
    }
}

impl Clone for Pad {
    fn clone(&self) -> Self {
        Pad::new(
            self.uuid,
            self.position,
            self.rotation,
            self.shape,
            self.width,
            self.height,
            self.radius,
            self.custom_shape_outline.clone(),
            self.stop_mask_config,
            self.solder_paste_config,
            self.copper_clearance,
            self.component_side,
            self.function,
            self.holes.clone(),
        )
    }
}

/// `clamp(0%, 50% of min(width, height), 50%)` — the IPC-7351C-recommended
/// corner radius, without the source's vestigial self-cancelling
/// `/= then *=` by `Ratio::fromPercent(1)`.
pub fn recommended_radius(width: PositiveLength, height: PositiveLength) -> UnsignedLimitedRatio {
    let size_mm = width.get().min(height.get()).nanometers() as f64 / 1_000_000.0;
    let max_radius = if size_mm > 0.0 {
        Ratio::from_normalized(0.5 / size_mm).unwrap_or(Ratio::percent50())
    } else {
        Ratio::percent50()
    };
    let clamped = max_radius.max(Ratio::percent0()).min(Ratio::percent50());
    UnsignedLimitedRatio::new(clamped).expect("clamped into [0%, 50%]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;
    use pretty_assertions::assert_eq;

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    fn pad(component_side: ComponentSide, holes: Vec<PadHole>) -> Pad {
        let width = PositiveLength::new(Length::from_mm(1.0).unwrap()).unwrap();
        let height = PositiveLength::new(Length::from_mm(1.0).unwrap()).unwrap();
        Pad::new(
            uuid(1),
            crate::geometry::Point::ORIGIN,
            Angle::deg0(),
            PadShape::RoundedRect,
            width,
            height,
            UnsignedLimitedRatio::new(Ratio::percent0()).unwrap(),
            Path::new(vec![]),
            MaskConfig::auto(),
            MaskConfig::auto(),
            UnsignedLength::new(Length::ZERO).unwrap(),
            component_side,
            PadFunction::StandardPad,
            holes,
        )
    }

    #[test]
    fn smt_pad_has_copper_on_its_own_side_only() {
        let p = pad(ComponentSide::Top, vec![]);
        assert!(p.has_top_copper());
        assert!(!p.has_bottom_copper());
        assert!(!p.is_tht());
    }

    #[test]
    fn tht_pad_has_copper_on_both_sides() {
        let hole = PadHole::new(
            uuid(2),
            PositiveLength::new(Length::from_nanometers(500_000)).unwrap(),
            Path::circle(PositiveLength::new(Length::from_nanometers(800_000)).unwrap()),
        )
        .unwrap();
        let p = pad(ComponentSide::Top, vec![hole]);
        assert!(p.is_tht());
        assert!(p.has_top_copper());
        assert!(p.has_bottom_copper());
    }

    #[test]
    fn smt_pad_gets_solder_paste_only_on_its_own_side() {
        let p = pad(ComponentSide::Top, vec![]);
        assert!(p.has_auto_top_solder_paste());
        assert!(!p.has_auto_bottom_solder_paste());
    }

    #[test]
    fn tht_pad_never_gets_solder_paste() {
        let hole = PadHole::new(
            uuid(2),
            PositiveLength::new(Length::from_nanometers(500_000)).unwrap(),
            Path::circle(PositiveLength::new(Length::from_nanometers(800_000)).unwrap()),
        )
        .unwrap();
        let p = pad(ComponentSide::Top, vec![hole]);
        assert!(!p.has_auto_top_solder_paste());
        assert!(!p.has_auto_bottom_solder_paste());
    }

    #[test]
    fn pad_hole_rejects_empty_path() {
        let err = PadHole::new(
            uuid(3),
            PositiveLength::new(Length::from_nanometers(500_000)).unwrap(),
            Path::new(vec![]),
        )
        .unwrap_err();
        assert!(matches!(err, KernelError::InvalidValue { .. }));
    }

    #[test]
    fn recommended_radius_clamps_to_50_percent_for_small_pads() {
        let tiny = PositiveLength::new(Length::from_nanometers(100)).unwrap();
        let r = recommended_radius(tiny, tiny);
        assert_eq!(r.get(), Ratio::percent50());
    }

    #[test]
    fn rounded_rect_geometry_resolves_radius_from_min_dimension() {
        let width = PositiveLength::new(Length::from_mm(2.0).unwrap()).unwrap();
        let height = PositiveLength::new(Length::from_mm(1.0).unwrap()).unwrap();
        let mut p = pad(ComponentSide::Top, vec![]);
        p.width = width;
        p.height = height;
        p.radius = UnsignedLimitedRatio::new(Ratio::percent50()).unwrap();
        let geometry = p.geometry();
        // 50% of min(2mm, 1mm) = 0.5mm radius, overflowing to an obround.
        assert!(geometry.outline().is_closed());
    }

    #[test]
    fn custom_shape_geometry_returns_the_authored_outline() {
        let mut p = pad(ComponentSide::Top, vec![]);
        p.shape = PadShape::Custom;
        p.custom_shape_outline = Path::rect(
            crate::geometry::Point::new(Length::from_mm(-1.0).unwrap(), Length::from_mm(-1.0).unwrap()),
            crate::geometry::Point::new(Length::from_mm(1.0).unwrap(), Length::from_mm(1.0).unwrap()),
        );
        let geometry = p.geometry();
        assert_eq!(geometry.outline(), &p.custom_shape_outline);
    }

    #[test]
    fn recommended_radius_is_half_mm_over_size_for_large_pads() {
        let width = PositiveLength::new(Length::from_mm(2.0).unwrap()).unwrap();
        let height = PositiveLength::new(Length::from_mm(4.0).unwrap()).unwrap();
        let r = recommended_radius(width, height);
        // min size is 2mm, so 0.5 / 2 = 25%.
        assert_eq!(r.get().to_percent().round(), 25.0);
    }
}
