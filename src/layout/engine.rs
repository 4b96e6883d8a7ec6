use serde::{Deserialize, Serialize};

use crate::{
    assets::font::FontFace,
    foundation::core::Anchor,
    foundation::error::{MemeError, MemeResult},
};

/// Font-size, wrapping and placement policy for caption layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPolicy {
    /// Lower bound of the width-derived base font size.
    pub min_font_px: u32,
    /// Upper bound of the width-derived base font size.
    pub max_font_px: u32,
    /// Base size is `canvas_width / width_divisor - char_count / length_divisor`.
    pub width_divisor: f32,
    pub length_divisor: f32,
    /// Share of the canvas width available to a line when choosing the wrap width.
    pub wrap_width_ratio: f32,
    pub min_wrap_chars: usize,
    pub max_wrap_chars: usize,
    /// Vertical gap between consecutive lines, in pixels.
    pub line_spacing: u32,
    /// Top/bottom margin as a share of canvas height.
    pub margin_ratio: f32,
    /// Smallest size the fit step may shrink to when a block overflows.
    pub shrink_floor_px: u32,
    /// Offset of the outline halo around each glyph, in pixels.
    pub outline_px: u32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            min_font_px: 30,
            max_font_px: 80,
            width_divisor: 12.0,
            length_divisor: 3.0,
            wrap_width_ratio: 0.9,
            min_wrap_chars: 1,
            max_wrap_chars: 20,
            line_spacing: 10,
            margin_ratio: 0.05,
            shrink_floor_px: 8,
            outline_px: 2,
        }
    }
}

impl LayoutPolicy {
    pub fn validate(&self) -> MemeResult<()> {
        if self.shrink_floor_px == 0 {
            return Err(MemeError::invalid_input("shrink_floor_px must be > 0"));
        }
        if !(self.shrink_floor_px <= self.min_font_px && self.min_font_px <= self.max_font_px) {
            return Err(MemeError::invalid_input(
                "font sizes must satisfy shrink_floor_px <= min_font_px <= max_font_px",
            ));
        }
        if self.min_wrap_chars == 0 || self.min_wrap_chars > self.max_wrap_chars {
            return Err(MemeError::invalid_input(
                "wrap widths must satisfy 0 < min_wrap_chars <= max_wrap_chars",
            ));
        }
        for (name, v) in [
            ("width_divisor", self.width_divisor),
            ("length_divisor", self.length_divisor),
            ("wrap_width_ratio", self.wrap_width_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(MemeError::invalid_input(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.margin_ratio.is_finite() || !(0.0..0.5).contains(&self.margin_ratio) {
            return Err(MemeError::invalid_input("margin_ratio must be in [0, 0.5)"));
        }
        Ok(())
    }
}

/// One wrapped line with its pixel box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutLine {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Computed wrap and placement for one caption. Recomputed, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Uppercased source text.
    pub text: String,
    pub anchor: Anchor,
    pub font_px: u32,
    pub lines: Vec<LayoutLine>,
    pub line_spacing: u32,
    pub block_height: u32,
    /// Top of the first line.
    pub y_start: i32,
}

impl Layout {
    /// `true` when there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Lay out `text` for a `canvas_width` x `canvas_height` canvas.
///
/// Pure: identical inputs always give an identical [`Layout`]. Empty or whitespace-only text
/// yields a layout with no lines.
pub fn compute_layout(
    font: &FontFace,
    text: &str,
    anchor: Anchor,
    canvas_width: u32,
    canvas_height: u32,
    policy: &LayoutPolicy,
) -> MemeResult<Layout> {
    policy.validate()?;

    let text = text.to_uppercase();
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Layout {
            text,
            anchor,
            font_px: 0,
            lines: Vec::new(),
            line_spacing: policy.line_spacing,
            block_height: 0,
            y_start: 0,
        });
    }

    let margin = (canvas_height as f32 * policy.margin_ratio) as u32;
    let avail_height = canvas_height.saturating_sub(2 * margin);

    let mut font_px = base_font_px(text.chars().count(), canvas_width, policy);
    let (lines, widths, line_height) = loop {
        let wrap = wrap_chars(font, font_px, canvas_width, policy);
        let lines = wrap_words(&words, wrap);
        let widths: Vec<u32> = lines.iter().map(|l| font.measure(l, font_px)).collect();
        let line_height = font.line_height(font_px);
        let block = block_height(lines.len(), line_height, policy.line_spacing);
        let widest = widths.iter().copied().max().unwrap_or(0);

        let fits = block <= avail_height && widest <= canvas_width;
        if fits || font_px <= policy.shrink_floor_px {
            if !fits {
                tracing::debug!(font_px, block, canvas_height, "caption overflows at shrink floor");
            }
            break (lines, widths, line_height);
        }
        font_px -= 1;
    };

    let block = block_height(lines.len(), line_height, policy.line_spacing);
    let y_start = anchor_y(anchor, block, canvas_height, margin);

    let mut y = i64::from(y_start);
    let laid: Vec<LayoutLine> = lines
        .into_iter()
        .zip(widths)
        .map(|(text, width)| {
            let x = (i64::from(canvas_width) - i64::from(width)) / 2;
            let line = LayoutLine {
                text,
                x: x as i32,
                y: y as i32,
                width,
                height: line_height,
            };
            y += i64::from(line_height) + i64::from(policy.line_spacing);
            line
        })
        .collect();

    Ok(Layout {
        text,
        anchor,
        font_px,
        lines: laid,
        line_spacing: policy.line_spacing,
        block_height: block,
        y_start,
    })
}

/// Width-derived size, shrunk by caption length and clamped to the policy range.
pub fn base_font_px(char_count: usize, canvas_width: u32, policy: &LayoutPolicy) -> u32 {
    let raw = canvas_width as f64 / f64::from(policy.width_divisor)
        - char_count as f64 / f64::from(policy.length_divisor);
    let raw = raw.trunc();
    raw.clamp(f64::from(policy.min_font_px), f64::from(policy.max_font_px)) as u32
}

/// Wrap width in characters for `font_px`; never zero, never unbounded.
pub fn wrap_chars(font: &FontFace, font_px: u32, canvas_width: u32, policy: &LayoutPolicy) -> usize {
    let mut avg = font.avg_advance(font_px);
    if !avg.is_finite() || avg <= 0.0 {
        avg = font_px.max(1) as f32 * 0.6;
    }
    let raw = (canvas_width as f32 * policy.wrap_width_ratio / avg).trunc();
    let raw = if raw.is_finite() && raw >= 0.0 {
        raw as usize
    } else {
        policy.max_wrap_chars
    };
    raw.clamp(policy.min_wrap_chars, policy.max_wrap_chars)
}

/// Greedy word wrap by character count. Words are never split; an over-long word gets its own
/// line unmodified.
pub fn wrap_words(words: &[&str], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in words {
        let len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = len;
        } else if current_len + 1 + len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn block_height(lines: usize, line_height: u32, spacing: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let n = lines as u32;
    n * line_height + (n - 1) * spacing
}

fn anchor_y(anchor: Anchor, block: u32, canvas_height: u32, margin: u32) -> i32 {
    let h = i64::from(canvas_height);
    let block = i64::from(block);
    let margin = i64::from(margin);
    let y = match anchor {
        Anchor::Top => margin,
        Anchor::Bottom => h - block - margin,
        Anchor::Center => (h - block) / 2,
    };
    if block <= h {
        y.clamp(0, h - block) as i32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
