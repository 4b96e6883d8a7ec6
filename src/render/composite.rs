use image::RgbImage;

use crate::foundation::error::{MemeError, MemeResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied `src` scaled by `opacity` onto premultiplied `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Flatten a premultiplied RGBA8 overlay onto an opaque RGB8 image of the same size.
pub fn flatten_in_place(dst: &mut RgbImage, overlay: &[u8]) -> MemeResult<()> {
    let expected = dst.width() as usize * dst.height() as usize * 4;
    if overlay.len() != expected {
        return Err(MemeError::render_failure(format!(
            "overlay has {} bytes, expected {expected} for {}x{}",
            overlay.len(),
            dst.width(),
            dst.height()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(3).zip(overlay.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        for i in 0..3 {
            d[i] = add_sat_u8(s[i], mul_div255(u16::from(d[i]), inv));
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
