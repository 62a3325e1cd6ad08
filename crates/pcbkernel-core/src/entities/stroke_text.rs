//! Vector-font text rendered as line strokes.

use uuid::Uuid;

use crate::geometry::{Alignment, Point};
use crate::signal::Signal;
use crate::units::{Angle, PositiveLength, Ratio, UnsignedLength};

use super::layer::Layer;

/// Letter- or line-spacing: either automatic (derived from the font) or an
/// explicit ratio of the nominal spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTextSpacing {
    Auto,
    Ratio(Ratio),
}

impl StrokeTextSpacing {
    pub fn ratio(&self) -> Option<Ratio> {
        match self {
            StrokeTextSpacing::Auto => None,
            StrokeTextSpacing::Ratio(r) => Some(*r),
        }
    }
}

/// A single piece of stroke-font text on a layer.
pub struct StrokeText {
    uuid: Uuid,
    layer: Layer,
    text: String,
    position: Point,
    rotation: Angle,
    height: PositiveLength,
    stroke_width: UnsignedLength,
    letter_spacing: StrokeTextSpacing,
    line_spacing: StrokeTextSpacing,
    align: Alignment,
    mirrored: bool,
    auto_rotate: bool,
    pub on_edited: Signal<StrokeTextEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTextEvent {
    UuidChanged,
    LayerChanged,
    TextChanged,
    PositionChanged,
    RotationChanged,
    HeightChanged,
    StrokeWidthChanged,
    LetterSpacingChanged,
    LineSpacingChanged,
    AlignChanged,
    MirroredChanged,
    AutoRotateChanged,
}

#[allow(clippy::too_many_arguments)]
impl StrokeText {
    pub fn new(
        uuid: Uuid,
        layer: Layer,
        text: impl Into<String>,
        position: Point,
        rotation: Angle,
        height: PositiveLength,
        stroke_width: UnsignedLength,
        letter_spacing: StrokeTextSpacing,
        line_spacing: StrokeTextSpacing,
        align: Alignment,
        mirrored: bool,
        auto_rotate: bool,
    ) -> Self {
        StrokeText {
            uuid,
            layer,
            text: text.into(),
            position,
            rotation,
            height,
            stroke_width,
            letter_spacing,
            line_spacing,
            align,
            mirrored,
            auto_rotate,
            on_edited: Signal::new(),
        }
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn layer(&self) -> &Layer {
        &self.layer
    }
    pub fn text(&self) -> &str {
        &self.text
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn rotation(&self) -> Angle {
        self.rotation
    }
    pub fn height(&self) -> PositiveLength {
        self.height
    }
    pub fn stroke_width(&self) -> UnsignedLength {
        self.stroke_width
    }
    pub fn letter_spacing(&self) -> StrokeTextSpacing {
        self.letter_spacing
    }
    pub fn line_spacing(&self) -> StrokeTextSpacing {
        self.line_spacing
    }
    pub fn align(&self) -> Alignment {
        self.align
    }
    pub fn mirrored(&self) -> bool {
        self.mirrored
    }
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// A rotation is upside-down for text if its 180°-mapped value falls in
    /// `[-180°, -90°) ∪ [90°, 180°]`; mirrored text uses the half-open
    /// variant `[-180°, -90°) ∪ (90°, 180°]` instead.
    pub fn is_upside_down(rotation: Angle, mirrored: bool) -> bool {
        let mapped = rotation.mapped_to_180().microdegrees();
        let neg_90 = Angle::deg90().inverted().microdegrees();
        let pos_90 = Angle::deg90().microdegrees();
        let pos_180 = Angle::deg180().microdegrees();
        let neg_180 = Angle::deg180().inverted().microdegrees();
        if mapped >= neg_180 && mapped < neg_90 {
            return true;
        }
        if mirrored {
            mapped > pos_90 && mapped <= pos_180
        } else {
            mapped >= pos_90 && mapped <= pos_180
        }
    }

    /// The rotation and alignment actually used when rendering, after
    /// applying `auto_rotate`'s 180°-flip-and-mirror-alignment rule.
    pub fn effective_rotation_and_alignment(&self) -> (Angle, Alignment) {
        if self.auto_rotate && StrokeText::is_upside_down(self.rotation, self.mirrored) {
            (self.rotation + Angle::deg180(), self.align.mirrored())
        } else {
            (self.rotation, self.align)
        }
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&StrokeTextEvent::UuidChanged);
        true
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.on_edited.notify(&StrokeTextEvent::TextChanged);
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.on_edited.notify(&StrokeTextEvent::PositionChanged);
        true
    }

    pub fn set_rotation(&mut self, rotation: Angle) -> bool {
        if rotation == self.rotation {
            return false;
        }
        self.rotation = rotation;
        self.on_edited.notify(&StrokeTextEvent::RotationChanged);
        true
    }

    pub fn set_mirrored(&mut self, mirrored: bool) -> bool {
        if mirrored == self.mirrored {
            return false;
        }
        self.mirrored = mirrored;
        self.on_edited.notify(&StrokeTextEvent::MirroredChanged);
        true
    }

    pub fn set_auto_rotate(&mut self, auto_rotate: bool) -> bool {
        if auto_rotate == self.auto_rotate {
            return false;
        }
        self.auto_rotate = auto_rotate;
        self.on_edited.notify(&StrokeTextEvent::AutoRotateChanged);
        true
    }
}

impl Clone for StrokeText {
    fn clone(&self) -> Self {
        StrokeText::new(
            self.uuid,
            self.layer.clone(),
            self.text.clone(),
            self.position,
            self.rotation,
            self.height,
            self.stroke_width,
            self.letter_spacing,
            self.line_spacing,
            self.align,
            self.mirrored,
            self.auto_rotate,
        )
    }
}

impl PartialEq for StrokeText {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.layer == other.layer
            && self.text == other.text
            && self.position == other.position
            && self.rotation == other.rotation
            && self.height == other.height
            && self.stroke_width == other.stroke_width
            && self.letter_spacing == other.letter_spacing
            && self.line_spacing == other.line_spacing
            && self.align == other.align
            && self.mirrored == other.mirrored
            && self.auto_rotate == other.auto_rotate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;

    fn text(rotation: Angle, mirrored: bool, auto_rotate: bool) -> StrokeText {
        StrokeText::new(
            Uuid::from_bytes([1; 16]),
            Layer::top_copper(),
            "hello",
            Point::ORIGIN,
            rotation,
            PositiveLength::new(Length::from_nanometers(1_000_000)).unwrap(),
            UnsignedLength::new(Length::from_nanometers(200_000)).unwrap(),
            StrokeTextSpacing::Auto,
            StrokeTextSpacing::Auto,
            Alignment::center(),
            mirrored,
            auto_rotate,
        )
    }

    #[test]
    fn upside_down_boundary_not_mirrored() {
        assert!(StrokeText::is_upside_down(Angle::deg90(), false));
        assert!(StrokeText::is_upside_down(Angle::deg180(), false));
        assert!(!StrokeText::is_upside_down(Angle::new(89_000_000), false));
    }

    #[test]
    fn upside_down_boundary_mirrored_excludes_90() {
        assert!(!StrokeText::is_upside_down(Angle::deg90(), true));
        assert!(StrokeText::is_upside_down(Angle::deg180(), true));
    }

    #[test]
    fn auto_rotate_flips_upside_down_text() {
        let t = text(Angle::deg180(), false, true);
        let (rotation, align) = t.effective_rotation_and_alignment();
        assert_eq!(rotation, Angle::deg0());
        assert_eq!(align, Alignment::center().mirrored());
    }

    #[test]
    fn auto_rotate_leaves_upright_text_untouched() {
        let t = text(Angle::deg0(), false, true);
        let (rotation, align) = t.effective_rotation_and_alignment();
        assert_eq!(rotation, Angle::deg0());
        assert_eq!(align, Alignment::center());
    }

    #[test]
    fn without_auto_rotate_nothing_changes() {
        let t = text(Angle::deg180(), false, false);
        let (rotation, align) = t.effective_rotation_and_alignment();
        assert_eq!(rotation, Angle::deg180());
        assert_eq!(align, Alignment::center());
    }
}
