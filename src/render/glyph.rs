use crate::{
    assets::color::Rgba8,
    assets::font::FontFace,
    layout::engine::Layout,
    render::composite::{PremulRgba8, over},
};

/// Transparent premultiplied RGBA8 layer that text is drawn onto before flattening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Overlay {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Overlay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Premultiplied RGBA8, row-major, tightly packed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    fn blend(&mut self, x: i32, y: i32, color: PremulRgba8, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &mut self.data[i..i + 4];
        let out = over([px[0], px[1], px[2], px[3]], color, coverage);
        px.copy_from_slice(&out);
    }
}

/// The eight halo positions around a glyph, `d` pixels away on each axis.
pub fn halo_offsets(d: u32) -> Vec<(i32, i32)> {
    if d == 0 {
        return Vec::new();
    }
    let d = d as i32;
    let mut out = Vec::with_capacity(8);
    for dx in [-d, 0, d] {
        for dy in [-d, 0, d] {
            if dx != 0 || dy != 0 {
                out.push((dx, dy));
            }
        }
    }
    out
}

/// Draw every line of `layout`: outline color at each halo offset first, then the fill color at
/// the exact position. `dy` shifts the whole block vertically.
pub fn draw_layout(
    overlay: &mut Overlay,
    font: &FontFace,
    layout: &Layout,
    fill: Rgba8,
    outline: Rgba8,
    outline_px: u32,
    dy: i32,
) {
    let offsets = halo_offsets(outline_px);
    for line in &layout.lines {
        let y = line.y.saturating_add(dy);
        if outline.a > 0 {
            for &(ox, oy) in &offsets {
                draw_text(overlay, font, &line.text, layout.font_px, line.x + ox, y + oy, outline);
            }
        }
        draw_text(overlay, font, &line.text, layout.font_px, line.x, y, fill);
    }
}

/// Draw a single run of text with its line box top-left at `(x, y)`.
pub fn draw_text(
    overlay: &mut Overlay,
    font: &FontFace,
    text: &str,
    px: u32,
    x: i32,
    y: i32,
    color: Rgba8,
) {
    if color.a == 0 {
        return;
    }
    let premul = color.to_premul();
    font.draw_line(text, px, x, y, &mut |gx, gy, coverage| {
        overlay.blend(gx, gy, premul, coverage);
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/glyph.rs"]
mod tests;
