use crate::{
    assets::color::Rgba8,
    assets::font::FontFace,
    foundation::core::{Canvas, Frame, FrameSequence, Rendered},
    foundation::error::MemeResult,
    layout::engine::{Layout, LayoutPolicy, compute_layout},
    render::composite::flatten_in_place,
    render::glyph::{Overlay, draw_layout},
    scene::model::{AnimationMode, AnimationParams, TextSpec},
};

/// A caption with its computed layout and colors.
struct Placed {
    layout: Layout,
    fill: Rgba8,
    outline: Rgba8,
}

/// Render `captions` onto copies of `base` for the requested animation mode.
///
/// `none` yields [`Rendered::Still`]; the animated modes yield [`Rendered::Sequence`]. When every
/// caption is empty the result is a still, pixel-identical copy of `base`. The base canvas is
/// never mutated.
#[tracing::instrument(
    skip_all,
    fields(mode = ?mode, captions = captions.len(), width = base.width(), height = base.height())
)]
pub fn render(
    base: &Canvas,
    captions: &[TextSpec],
    mode: AnimationMode,
    params: &AnimationParams,
    font: &FontFace,
    policy: &LayoutPolicy,
) -> MemeResult<Rendered> {
    policy.validate()?;
    params.validate()?;
    for caption in captions {
        caption.validate()?;
    }

    let nothing_to_draw = captions.iter().all(|c| {
        let text = if mode == AnimationMode::Typing {
            c.text.to_uppercase()
        } else {
            c.visible_text()
        };
        text.trim().is_empty()
    });
    if nothing_to_draw {
        tracing::debug!("no caption text, returning base canvas");
        return Ok(Rendered::Still(Frame::from(base.clone())));
    }

    let renderer = FrameRenderer { base, font, policy };
    let rendered = match mode {
        AnimationMode::None => {
            let placed = renderer.place(captions)?;
            Rendered::Still(renderer.compose(&placed, 1.0, 0)?)
        }
        AnimationMode::FadeIn => {
            let placed = renderer.place(captions)?;
            let n = params.fade_frames;
            let frames = (0..n)
                .map(|i| renderer.compose(&placed, (i + 1) as f32 / n as f32, 0))
                .collect::<MemeResult<Vec<_>>>()?;
            Rendered::Sequence(FrameSequence::new(frames)?)
        }
        AnimationMode::SlideUp => {
            let placed = renderer.place(captions)?;
            let frames = slide_offsets(base.height(), params)
                .into_iter()
                .map(|dy| renderer.compose(&placed, 1.0, dy))
                .collect::<MemeResult<Vec<_>>>()?;
            Rendered::Sequence(FrameSequence::new(frames)?)
        }
        AnimationMode::Typing => {
            let total = captions.iter().map(TextSpec::reveal_len).max().unwrap_or(0);
            let mut frames = Vec::with_capacity(total + params.typing_tail_frames);
            for k in 1..=total {
                // Layout is recomputed on every prefix, so wrapping and size may change.
                let revealed: Vec<TextSpec> = captions
                    .iter()
                    .map(|c| c.clone().with_reveal(k))
                    .collect();
                let placed = renderer.place(&revealed)?;
                frames.push(renderer.compose(&placed, 1.0, 0)?);
            }
            if let Some(last) = frames.last().cloned() {
                frames.extend(std::iter::repeat_n(last, params.typing_tail_frames));
            }
            Rendered::Sequence(FrameSequence::new(frames)?)
        }
    };

    tracing::debug!(frames = rendered.frame_count(), "rendered captions");
    Ok(rendered)
}

/// Vertical offset of the text block for each slide-up frame: starts at the maximum offset and
/// reaches zero on the last frame, never increasing in between.
pub fn slide_offsets(canvas_height: u32, params: &AnimationParams) -> Vec<i32> {
    let n = params.slide_frames.max(2);
    let max_offset = (canvas_height as f32 * params.slide_max_offset_ratio).round() as f64;
    (0..n)
        .map(|i| {
            let t = i as f64 / (n - 1) as f64;
            (max_offset * params.slide_curve.remaining(t)).round() as i32
        })
        .collect()
}

struct FrameRenderer<'a> {
    base: &'a Canvas,
    font: &'a FontFace,
    policy: &'a LayoutPolicy,
}

impl FrameRenderer<'_> {
    fn place(&self, captions: &[TextSpec]) -> MemeResult<Vec<Placed>> {
        captions
            .iter()
            .map(|c| {
                let layout = compute_layout(
                    self.font,
                    &c.visible_text(),
                    c.anchor,
                    self.base.width(),
                    self.base.height(),
                    self.policy,
                )?;
                Ok(Placed {
                    layout,
                    fill: c.fill,
                    outline: c.outline,
                })
            })
            .collect()
    }

    /// Draw all captions at `opacity`, shifted down by `dy`, onto a fresh copy of the base.
    fn compose(&self, placed: &[Placed], opacity: f32, dy: i32) -> MemeResult<Frame> {
        let mut overlay = Overlay::new(self.base.width(), self.base.height());
        for p in placed.iter().filter(|p| !p.layout.is_empty()) {
            draw_layout(
                &mut overlay,
                self.font,
                &p.layout,
                p.fill.with_opacity(opacity),
                p.outline.with_opacity(opacity),
                self.policy.outline_px,
                dy,
            );
        }

        let mut canvas = self.base.clone();
        if !overlay.is_blank() {
            flatten_in_place(canvas.pixels_mut(), overlay.data())?;
        }
        Ok(Frame::from(canvas))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/animator.rs"]
mod tests;
