use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    encode::{
        animated::encode_animated,
        still::{DEFAULT_JPEG_QUALITY, encode_static},
    },
    foundation::{
        core::Rendered,
        error::{MemeError, MemeResult},
    },
};

/// Requested output artifact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Single JPEG image.
    #[default]
    #[serde(alias = "jpeg", alias = "jpg")]
    Static,
    /// Looping GIF.
    #[serde(alias = "gif")]
    Animated,
}

impl OutputFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Static => "image/jpeg",
            Self::Animated => "image/gif",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Static => "jpg",
            Self::Animated => "gif",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" | "jpeg" | "jpg" => Ok(Self::Static),
            "animated" | "gif" => Ok(Self::Animated),
            other => Err(MemeError::invalid_input(format!(
                "unknown output format \"{other}\", expected static|animated"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeSettings {
    pub jpeg_quality: u8,
    /// Display time of each animation frame.
    pub frame_duration_ms: u32,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            frame_duration_ms: 100,
        }
    }
}

/// Encoded bytes plus their MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

/// Encode a render result.
///
/// `Static` output of a sequence encodes its last frame. `Animated` output of a still fails with
/// [`MemeError::EncodeFailure`].
pub fn encode(
    rendered: &Rendered,
    format: OutputFormat,
    settings: &EncodeSettings,
) -> MemeResult<Encoded> {
    let bytes = match (format, rendered) {
        (OutputFormat::Static, r) => encode_static(r.final_frame(), settings.jpeg_quality)?,
        (OutputFormat::Animated, Rendered::Sequence(seq)) => {
            encode_animated(seq, settings.frame_duration_ms)?
        }
        (OutputFormat::Animated, Rendered::Still(_)) => {
            return Err(MemeError::encode_failure(
                "animated output requires a frame sequence, got a single frame",
            ));
        }
    };
    Ok(Encoded {
        bytes,
        mime: format.mime(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/output.rs"]
mod tests;
