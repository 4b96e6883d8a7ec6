use crate::{
    assets::font::cached_font,
    effects::{fx::apply_filter, watermark::apply_watermark},
    encode::output::{Encoded, OutputFormat, encode},
    foundation::{
        core::{Canvas, Rendered},
        error::MemeResult,
    },
    render::animator::render,
    scene::{
        config::RenderConfig,
        model::{AnimationMode, TextSpec},
        request::MemeRequest,
    },
};

/// Draw `captions` on `image` with the font resolved from `config.fonts`.
pub fn render_meme(
    image: &Canvas,
    captions: &[TextSpec],
    animation: AnimationMode,
    config: &RenderConfig,
) -> MemeResult<Rendered> {
    config.validate()?;
    let font = cached_font(&config.fonts)?;
    render(
        image,
        captions,
        animation,
        &config.animation,
        &font,
        &config.layout,
    )
}

/// Full request flow: filter, then watermark, then captions. `image` is left untouched.
#[tracing::instrument(skip_all, fields(animation = ?request.animation, filter = ?request.filter))]
pub fn render_request(image: &Canvas, request: &MemeRequest) -> MemeResult<Rendered> {
    request.validate()?;
    let font = cached_font(&request.config.fonts)?;
    tracing::debug!(font = font.source(), kind = font.kind(), "resolved font");

    let mut base = image.clone();
    apply_filter(&mut base, request.filter);
    if let Some(wm) = &request.watermark {
        apply_watermark(&mut base, wm, &font)?;
    }

    render(
        &base,
        &request.captions,
        request.animation,
        &request.config.animation,
        &font,
        &request.config.layout,
    )
}

/// Render a request and encode it in its output format.
///
/// When the request leaves `format` unset and the render has a single frame (every caption
/// empty, or a one-character typing run without a tail), the result is encoded as a still.
pub fn render_and_encode(image: &Canvas, request: &MemeRequest) -> MemeResult<Encoded> {
    let rendered = render_request(image, request)?;
    let format = match request.format {
        None if rendered.frame_count() < 2 => OutputFormat::Static,
        _ => request.output_format(),
    };
    encode(&rendered, format, &request.encode_settings())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
