//! Raster/vector illustrations embedded in a schematic or footprint.

use uuid::Uuid;

use crate::error::{KernelError, KernelResult};
use crate::geometry::Point;
use crate::signal::Signal;
use crate::units::{Angle, PositiveLength, UnsignedLength};

/// Supported embedded-image file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFileFormat {
    Jpg,
    Png,
    Svg,
}

/// SVGs are rasterized to at least this many pixels on their long side, to
/// avoid pixelated rendering at typical zoom levels. Rasterization itself is
/// an export-collaborator concern, out of scope here; this constant documents
/// the contract an exporter must honor.
pub const SVG_MIN_RASTER_PX: u32 = 800;

/// An embedded image: a file reference plus its placement on the canvas.
pub struct Image {
    uuid: Uuid,
    file_name: String,
    format: ImageFileFormat,
    position: Point,
    rotation: Angle,
    width: PositiveLength,
    height: PositiveLength,
    border_width: Option<UnsignedLength>,
    pub on_edited: Signal<ImageEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEvent {
    UuidChanged,
    FileNameChanged,
    PositionChanged,
    RotationChanged,
    SizeChanged,
    BorderWidthChanged,
}

#[allow(clippy::too_many_arguments)]
impl Image {
    pub fn new(
        uuid: Uuid,
        file_name: impl Into<String>,
        position: Point,
        rotation: Angle,
        width: PositiveLength,
        height: PositiveLength,
        border_width: Option<UnsignedLength>,
    ) -> KernelResult<Self> {
        let file_name = file_name.into();
        let format = format_from_file_name(&file_name)?;
        Ok(Image {
            uuid,
            file_name,
            format,
            position,
            rotation,
            width,
            height,
            border_width,
            on_edited: Signal::new(),
        })
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
    pub fn format(&self) -> ImageFileFormat {
        self.format
    }
    pub fn position(&self) -> Point {
        self.position
    }
    pub fn rotation(&self) -> Angle {
        self.rotation
    }
    pub fn width(&self) -> PositiveLength {
        self.width
    }
    pub fn height(&self) -> PositiveLength {
        self.height
    }
    pub fn border_width(&self) -> Option<UnsignedLength> {
        self.border_width
    }

    pub fn set_uuid(&mut self, uuid: Uuid) -> bool {
        if uuid == self.uuid {
            return false;
        }
        self.uuid = uuid;
        self.on_edited.notify(&ImageEvent::UuidChanged);
        true
    }

    pub fn set_position(&mut self, position: Point) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.on_edited.notify(&ImageEvent::PositionChanged);
        true
    }

    pub fn set_size(&mut self, width: PositiveLength, height: PositiveLength) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.on_edited.notify(&ImageEvent::SizeChanged);
        true
    }
}

impl Clone for Image {
    fn clone(&self) -> Self {
        Image {
            uuid: self.uuid,
            file_name: self.file_name.clone(),
            format: self.format,
            position: self.position,
            rotation: self.rotation,
            width: self.width,
            height: self.height,
            border_width: self.border_width,
            on_edited: Signal::new(),
        }
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
            && self.file_name == other.file_name
            && self.position == other.position
            && self.rotation == other.rotation
            && self.width == other.width
            && self.height == other.height
            && self.border_width == other.border_width
    }
}

/// There is no benefit in supporting both "jpg" and "jpeg" suffixes, so only
/// "jpg" is accepted; editors are expected to rename on import.
fn format_from_file_name(file_name: &str) -> KernelResult<ImageFileFormat> {
    let ext = file_name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
    match ext.as_str() {
        "jpg" => Ok(ImageFileFormat::Jpg),
        "png" => Ok(ImageFileFormat::Png),
        "svg" => Ok(ImageFileFormat::Svg),
        _ => Err(KernelError::invalid_value(
            "ImageFileFormat",
            format!("unsupported image file extension: '{file_name}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Length;

    fn image(name: &str) -> KernelResult<Image> {
        let size = PositiveLength::new(Length::from_mm(10.0).unwrap()).unwrap();
        Image::new(Uuid::from_bytes([1; 16]), name, Point::ORIGIN, Angle::deg0(), size, size, None)
    }

    #[test]
    fn accepts_known_extensions() {
        assert_eq!(image("logo.png").unwrap().format(), ImageFileFormat::Png);
        assert_eq!(image("logo.svg").unwrap().format(), ImageFileFormat::Svg);
        assert_eq!(image("logo.jpg").unwrap().format(), ImageFileFormat::Jpg);
    }

    #[test]
    fn rejects_jpeg_and_unknown_extensions() {
        assert!(image("logo.jpeg").is_err());
        assert!(image("logo.bmp").is_err());
    }
}
