use crate::foundation::{
    core::FrameSequence,
    error::{MemeError, MemeResult},
};

/// NeuQuant sampling factor passed to the GIF quantizer (1 best, 30 fastest).
const QUANTIZER_SPEED: i32 = 10;

/// Per-frame delay in GIF centiseconds, at least 1.
pub fn gif_delay_cs(per_frame_ms: u32) -> u16 {
    let cs = (f64::from(per_frame_ms) / 10.0).round();
    cs.clamp(1.0, f64::from(u16::MAX)) as u16
}

/// Encode a sequence as an infinitely looping GIF with a uniform frame delay.
///
/// Each frame gets its own palette. At least two frames are required; dimensions must fit
/// the 16-bit GIF header fields.
#[tracing::instrument(skip(seq), fields(frames = seq.len()))]
pub fn encode_animated(seq: &FrameSequence, per_frame_ms: u32) -> MemeResult<Vec<u8>> {
    if seq.len() < 2 {
        return Err(MemeError::encode_failure(format!(
            "animated output needs at least 2 frames, got {}",
            seq.len()
        )));
    }
    let first = &seq.frames()[0];
    let (w, h) = match (u16::try_from(first.width()), u16::try_from(first.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(MemeError::encode_failure(format!(
                "{}x{} exceeds the GIF limit of {} px per side",
                first.width(),
                first.height(),
                u16::MAX
            )));
        }
    };
    let delay = gif_delay_cs(per_frame_ms);

    let gif_err = |e: gif::EncodingError| MemeError::encode_failure(format!("gif: {e}"));
    let mut buf = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut buf, w, h, &[]).map_err(gif_err)?;
        encoder.set_repeat(gif::Repeat::Infinite).map_err(gif_err)?;
        for frame in seq.frames() {
            let mut gif_frame = gif::Frame::from_rgb_speed(w, h, frame.as_raw(), QUANTIZER_SPEED);
            gif_frame.delay = delay;
            encoder.write_frame(&gif_frame).map_err(gif_err)?;
        }
    }
    tracing::debug!(bytes = buf.len(), delay_cs = delay, "encoded gif");
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/animated.rs"]
mod tests;
