use anyhow::Context;
use image::{DynamicImage, imageops::FilterType};

use crate::foundation::{core::Canvas, error::MemeResult};

/// Longest side kept after decoding; larger images are scaled down preserving aspect ratio.
pub const MAX_IMAGE_SIDE: u32 = 2000;

/// Decode PNG/JPEG/etc. bytes into an opaque RGB8 canvas, normalized by
/// [`Canvas::from_dynamic`].
pub fn decode_image(bytes: &[u8]) -> MemeResult<Canvas> {
    let img = image::load_from_memory(bytes).context("decode image from memory")?;
    Canvas::from_dynamic(&cap_size(img, MAX_IMAGE_SIDE))
}

fn cap_size(img: DynamicImage, max_side: u32) -> DynamicImage {
    if img.width().max(img.height()) <= max_side {
        return img;
    }
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        max_side,
        "downscaling oversized image"
    );
    img.resize(max_side, max_side, FilterType::Triangle)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
