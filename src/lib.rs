//! memeframe composites captions onto images and turns them into memes.
//!
//! Given a base image and a set of captions it deterministically produces either a single
//! frame or an ordered frame sequence, then encodes the result as JPEG or looping GIF.
//!
//! # Pipeline overview
//!
//! 1. **Source**: obtain a [`Canvas`] from an [`ImageSource`], with a placeholder fallback
//! 2. **Effects**: optional [`Filter`] and [`WatermarkSpec`] applied to the base
//! 3. **Layout**: `text + canvas size + font -> Layout` ([`compute_layout`])
//! 4. **Render**: captions drawn with an outline halo, optionally animated ([`render`])
//! 5. **Encode**: [`encode`] to `image/jpeg` or `image/gif`
//!
//! Identical inputs always yield identical pixels. No global state exists apart from the
//! process-wide font cache.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod effects;
mod encode;
mod foundation;
mod layout;
mod render;
mod scene;

pub use animation::slide::SlideCurve;
pub use assets::bitmap::BitmapFont;
pub use assets::color::Rgba8;
pub use assets::decode::{MAX_IMAGE_SIDE, decode_image};
pub use assets::font::{FontConfig, FontFace, OutlineFont, cached_font, resolve_font};
pub use assets::source::{
    BytesSource, FileSource, ImageSource, PLACEHOLDER_RGB, SolidSource, fetch_with_fallback,
};
pub use effects::fx::{Filter, apply_filter};
pub use effects::watermark::{WatermarkSpec, apply_watermark};
pub use encode::animated::{encode_animated, gif_delay_cs};
pub use encode::output::{EncodeSettings, Encoded, OutputFormat, encode};
pub use encode::still::{DEFAULT_JPEG_QUALITY, encode_static};
pub use foundation::core::{Anchor, Canvas, Frame, FrameSequence, Rendered};
pub use foundation::error::{MemeError, MemeResult};
pub use layout::engine::{Layout, LayoutLine, LayoutPolicy, compute_layout};
pub use render::animator::{render, slide_offsets};
pub use render::pipeline::{render_and_encode, render_meme, render_request};
pub use scene::config::RenderConfig;
pub use scene::model::{AnimationMode, AnimationParams, TextSpec};
pub use scene::request::MemeRequest;
