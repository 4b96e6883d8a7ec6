use image::{ExtendedColorType, ImageEncoder, codecs::jpeg::JpegEncoder};

use crate::foundation::{
    core::Frame,
    error::{MemeError, MemeResult},
};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Encode one frame as a baseline JPEG at `quality` (1..=100).
#[tracing::instrument(skip(frame), fields(width = frame.width(), height = frame.height()))]
pub fn encode_static(frame: &Frame, quality: u8) -> MemeResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(MemeError::invalid_input(format!(
            "jpeg quality must be in 1..=100, got {quality}"
        )));
    }

    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .write_image(
            frame.as_raw(),
            frame.width(),
            frame.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| MemeError::encode_failure(format!("jpeg: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
