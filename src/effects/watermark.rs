use serde::{Deserialize, Serialize};

use crate::{
    assets::{color::Rgba8, font::FontFace},
    foundation::{
        core::Canvas,
        error::{MemeError, MemeResult},
    },
    render::{
        composite::flatten_in_place,
        glyph::{Overlay, draw_text},
    },
};

/// Text stamped in the bottom-right corner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkSpec {
    pub text: String,
    /// Alpha of the white text, in `[0, 1]`.
    pub opacity: f32,
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: "@MemeGen".to_owned(),
            opacity: 0.5,
        }
    }
}

impl WatermarkSpec {
    pub fn validate(&self) -> MemeResult<()> {
        if self.text.trim().is_empty() {
            return Err(MemeError::invalid_input("watermark text must be non-empty"));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(MemeError::invalid_input(format!(
                "watermark opacity must be in [0, 1], got {}",
                self.opacity
            )));
        }
        Ok(())
    }
}

/// Stamp `spec` onto `canvas` at `width / 15` px, `width / 50` px from the bottom-right edges.
#[tracing::instrument(skip_all, fields(text = %spec.text, opacity = spec.opacity))]
pub fn apply_watermark(canvas: &mut Canvas, spec: &WatermarkSpec, font: &FontFace) -> MemeResult<()> {
    spec.validate()?;

    let (w, h) = (canvas.width(), canvas.height());
    let px = (w / 15).max(1);
    let margin = (w / 50) as i32;
    let text_w = font.measure(&spec.text, px) as i32;
    let text_h = font.line_height(px) as i32;
    let x = w as i32 - text_w - margin;
    let y = h as i32 - text_h - margin;

    let mut overlay = Overlay::new(w, h);
    draw_text(
        &mut overlay,
        font,
        &spec.text,
        px,
        x,
        y,
        Rgba8::WHITE.with_opacity(spec.opacity),
    );
    if overlay.is_blank() {
        return Ok(());
    }
    flatten_in_place(canvas.pixels_mut(), overlay.data())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/watermark.rs"]
mod tests;
