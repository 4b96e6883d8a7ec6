use std::str::FromStr;

use image::{RgbImage, imageops};
use serde::{Deserialize, Serialize};

use crate::foundation::{core::Canvas, error::MemeError};

const BLUR_SIGMA: f32 = 2.0;

/// Noise seed for `vintage`; fixed so the filter is reproducible.
pub const VINTAGE_SEED: u64 = 0x6d65_6d65_6672_616d;

const SHARPEN_KERNEL: [f32; 9] = [-2.0, -2.0, -2.0, -2.0, 32.0, -2.0, -2.0, -2.0, -2.0];
const EDGE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Whole-image filter applied to the base before any text is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    None,
    BlackAndWhite,
    Sepia,
    Vintage,
    Blur,
    Sharpen,
    EdgeDetect,
}

impl FromStr for Filter {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s
            .trim()
            .to_ascii_lowercase()
            .replace(['-', ' '], "_")
            .replace('&', "and");
        match key.as_str() {
            "none" => Ok(Self::None),
            "black_and_white" | "grayscale" | "greyscale" => Ok(Self::BlackAndWhite),
            "sepia" => Ok(Self::Sepia),
            "vintage" => Ok(Self::Vintage),
            "blur" => Ok(Self::Blur),
            "sharpen" => Ok(Self::Sharpen),
            "edge_detect" | "edges" => Ok(Self::EdgeDetect),
            _ => Err(MemeError::invalid_input(format!(
                "unknown filter \"{}\", expected none|black_and_white|sepia|vintage|blur|sharpen|edge_detect",
                s.trim()
            ))),
        }
    }
}

/// Apply `filter` in place. Dimensions never change.
#[tracing::instrument(skip(canvas), fields(width = canvas.width(), height = canvas.height()))]
pub fn apply_filter(canvas: &mut Canvas, filter: Filter) {
    let img = canvas.pixels_mut();
    match filter {
        Filter::None => {}
        Filter::BlackAndWhite => black_and_white(img),
        Filter::Sepia => sepia(img),
        Filter::Vintage => vintage(img, VINTAGE_SEED),
        Filter::Blur => *img = imageops::blur(&*img, BLUR_SIGMA),
        Filter::Sharpen => *img = imageops::filter3x3(&*img, &SHARPEN_KERNEL),
        Filter::EdgeDetect => *img = imageops::filter3x3(&*img, &EDGE_KERNEL),
    }
}

fn black_and_white(img: &mut RgbImage) {
    let luma = imageops::grayscale(&*img);
    for (dst, src) in img.pixels_mut().zip(luma.pixels()) {
        dst.0 = [src.0[0]; 3];
    }
}

fn sepia(img: &mut RgbImage) {
    for px in img.pixels_mut() {
        let [r, g, b] = px.0.map(f32::from);
        px.0 = SEPIA.map(|row| (row[0] * r + row[1] * g + row[2] * b).min(255.0) as u8);
    }
}

fn vintage(img: &mut RgbImage, seed: u64) {
    let (w, h) = img.dimensions();
    let norm = |i: u32, n: u32| {
        if n <= 1 {
            0.0
        } else {
            -1.0 + 2.0 * i as f32 / (n - 1) as f32
        }
    };
    for (x, y, px) in img.enumerate_pixels_mut() {
        let (nx, ny) = (norm(x, w), norm(y, h));
        let vignette = (1.0 - (nx * nx + ny * ny).sqrt() / 1.4).clamp(0.0, 1.0);
        let noise = noise_at(x, y, seed);
        for c in px.0.iter_mut() {
            let darkened = (f32::from(*c) * vignette) as i32;
            *c = (darkened + noise).clamp(0, 255) as u8;
        }
    }
}

/// Integer in `[-20, 20)` derived only from the pixel position and seed.
fn noise_at(x: u32, y: u32, seed: u64) -> i32 {
    let h = mix64(seed ^ (u64::from(x) << 32 | u64::from(y)));
    (h % 40) as i32 - 20
}

fn mix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/fx.rs"]
mod tests;
