use std::str::FromStr;

use image::{DynamicImage, RgbImage};

use crate::foundation::error::{MemeError, MemeResult};

/// Owned RGB8 pixel buffer being composited onto.
///
/// A canvas always has non-zero dimensions. It belongs to exactly one render invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    /// Create a canvas filled with a single color.
    pub fn new(width: u32, height: u32, fill: [u8; 3]) -> MemeResult<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            pixels: RgbImage::from_pixel(width, height, image::Rgb(fill)),
        })
    }

    /// Wrap an existing RGB8 image.
    pub fn from_rgb(pixels: RgbImage) -> MemeResult<Self> {
        check_dimensions(pixels.width(), pixels.height())?;
        Ok(Self { pixels })
    }

    /// Wrap tightly packed row-major RGB8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> MemeResult<Self> {
        check_dimensions(width, height)?;
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(MemeError::invalid_input(format!(
                "rgb8 buffer for {width}x{height} must be {expected} bytes, got {}",
                data.len()
            )));
        }
        let pixels = RgbImage::from_raw(width, height, data)
            .ok_or_else(|| MemeError::invalid_input("rgb8 buffer does not match dimensions"))?;
        Ok(Self { pixels })
    }

    /// Convert any decoded image to RGB8. Alpha is dropped; 16-bit and float channels are
    /// scaled down to 8 bits.
    pub fn from_dynamic(img: &DynamicImage) -> MemeResult<Self> {
        Self::from_rgb(img.to_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut RgbImage {
        &mut self.pixels
    }

    pub fn into_rgb(self) -> RgbImage {
        self.pixels
    }
}

fn check_dimensions(width: u32, height: u32) -> MemeResult<()> {
    if width == 0 || height == 0 {
        return Err(MemeError::invalid_input(format!(
            "image must be non-empty, got {width}x{height}"
        )));
    }
    Ok(())
}

/// One fully rendered canvas at a point on an animation timeline. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pixels: RgbImage,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the frame pixels.
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// Row-major RGB8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn into_rgb(self) -> RgbImage {
        self.pixels
    }
}

impl From<Canvas> for Frame {
    fn from(canvas: Canvas) -> Self {
        Self {
            pixels: canvas.into_rgb(),
        }
    }
}

/// Ordered, non-empty list of frames forming one animation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Build a sequence; all frames must share the first frame's dimensions.
    pub fn new(frames: Vec<Frame>) -> MemeResult<Self> {
        let Some(first) = frames.first() else {
            return Err(MemeError::invalid_input(
                "frame sequence must contain at least one frame",
            ));
        };
        let (w, h) = (first.width(), first.height());
        if let Some(bad) = frames.iter().position(|f| f.width() != w || f.height() != h) {
            return Err(MemeError::invalid_input(format!(
                "frame {bad} does not match sequence dimensions {w}x{h}"
            )));
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The final frame of the animation.
    pub fn last(&self) -> &Frame {
        &self.frames[self.frames.len() - 1]
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

/// Output of one render call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// Static mode, or nothing to animate.
    Still(Frame),
    /// An animated mode.
    Sequence(FrameSequence),
}

impl Rendered {
    pub fn frame_count(&self) -> usize {
        match self {
            Self::Still(_) => 1,
            Self::Sequence(seq) => seq.len(),
        }
    }

    /// The frame a viewer ends up looking at.
    pub fn final_frame(&self) -> &Frame {
        match self {
            Self::Still(frame) => frame,
            Self::Sequence(seq) => seq.last(),
        }
    }
}

/// Vertical placement rule for a caption block.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Top,
    #[serde(alias = "middle", alias = "centre")]
    Center,
    #[default]
    Bottom,
}

impl FromStr for Anchor {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "center" | "centre" | "middle" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => Err(MemeError::invalid_input(format!(
                "unknown anchor \"{other}\", expected top|center|bottom"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
