use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    effects::{fx::Filter, watermark::WatermarkSpec},
    encode::output::{EncodeSettings, OutputFormat},
    foundation::error::{MemeError, MemeResult},
    scene::{
        config::RenderConfig,
        model::{AnimationMode, TextSpec},
    },
};

/// JSON-facing description of one meme: captions, effects and output.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemeRequest {
    pub captions: Vec<TextSpec>,
    pub animation: AnimationMode,
    /// Output kind; when absent, animated modes produce a GIF and `none` a JPEG.
    pub format: Option<OutputFormat>,
    pub filter: Filter,
    pub watermark: Option<WatermarkSpec>,
    /// Per-frame display time, overriding `config.encode.frame_duration_ms`.
    pub duration_ms: Option<u32>,
    pub config: RenderConfig,
}

impl MemeRequest {
    pub fn from_reader<R: std::io::Read>(r: R) -> MemeResult<Self> {
        Ok(serde_json::from_reader(r)?)
    }

    pub fn from_json_str(s: &str) -> MemeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open meme request '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> MemeResult<()> {
        self.config.validate()?;
        for caption in &self.captions {
            caption.validate()?;
        }
        if let Some(wm) = &self.watermark {
            wm.validate()?;
        }
        if self.duration_ms == Some(0) {
            return Err(MemeError::invalid_input("duration_ms must be > 0"));
        }
        Ok(())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(if self.animation.is_animated() {
            OutputFormat::Animated
        } else {
            OutputFormat::Static
        })
    }

    /// Encode settings with the request-level duration applied.
    pub fn encode_settings(&self) -> EncodeSettings {
        let mut settings = self.config.encode.clone();
        if let Some(ms) = self.duration_ms {
            settings.frame_duration_ms = ms;
        }
        settings
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/request.rs"]
mod tests;
