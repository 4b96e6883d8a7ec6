use std::path::PathBuf;

use anyhow::Context;

use crate::{
    assets::decode::decode_image,
    foundation::{
        core::Canvas,
        error::{MemeError, MemeResult},
    },
};

/// Placeholder color used when no base image is available.
pub const PLACEHOLDER_RGB: [u8; 3] = [64, 64, 64];

/// Provider of the base image a meme is drawn on.
///
/// The network image generator lives outside this crate; callers wrap it in an `ImageSource`
/// and pair it with a fallback via [`fetch_with_fallback`].
pub trait ImageSource {
    /// Short human-readable description used in logs and errors.
    fn describe(&self) -> String;
    /// Produce a fresh canvas.
    fn fetch(&self) -> MemeResult<Canvas>;
}

/// Image read and decoded from a file.
#[derive(Clone, Debug)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSource for FileSource {
    fn describe(&self) -> String {
        format!("file '{}'", self.path.display())
    }

    fn fetch(&self) -> MemeResult<Canvas> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("read image file '{}'", self.path.display()))?;
        decode_image(&bytes)
    }
}

/// Encoded image bytes already in memory.
#[derive(Clone, Debug)]
pub struct BytesSource {
    pub bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl ImageSource for BytesSource {
    fn describe(&self) -> String {
        format!("{} in-memory bytes", self.bytes.len())
    }

    fn fetch(&self) -> MemeResult<Canvas> {
        decode_image(&self.bytes)
    }
}

/// A flat color canvas; the stand-in when the real image cannot be obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolidSource {
    pub width: u32,
    pub height: u32,
    pub rgb: [u8; 3],
}

impl SolidSource {
    pub fn placeholder(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgb: PLACEHOLDER_RGB,
        }
    }
}

impl ImageSource for SolidSource {
    fn describe(&self) -> String {
        format!("solid {}x{} placeholder", self.width, self.height)
    }

    fn fetch(&self) -> MemeResult<Canvas> {
        Canvas::new(self.width, self.height, self.rgb)
    }
}

/// Fetch from `primary`, falling back to `fallback` if it fails.
///
/// Fails with [`MemeError::UpstreamImageUnavailable`] only when both sources fail.
pub fn fetch_with_fallback(
    primary: &dyn ImageSource,
    fallback: &dyn ImageSource,
) -> MemeResult<Canvas> {
    let primary_err = match primary.fetch() {
        Ok(canvas) => return Ok(canvas),
        Err(err) => err,
    };
    tracing::warn!(
        source = %primary.describe(),
        error = %primary_err,
        fallback = %fallback.describe(),
        "image source failed, using fallback"
    );
    fallback.fetch().map_err(|fallback_err| {
        MemeError::upstream_image_unavailable(format!(
            "{}: {primary_err}; fallback {}: {fallback_err}",
            primary.describe(),
            fallback.describe()
        ))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
