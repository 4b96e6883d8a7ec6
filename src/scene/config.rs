use serde::{Deserialize, Serialize};

use crate::{
    assets::font::FontConfig,
    encode::output::EncodeSettings,
    foundation::error::{MemeError, MemeResult},
    layout::engine::LayoutPolicy,
    scene::model::AnimationParams,
};

/// Request-scoped rendering configuration. Every field has a default, so `{}` is valid JSON.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub layout: LayoutPolicy,
    pub animation: AnimationParams,
    pub fonts: FontConfig,
    pub encode: EncodeSettings,
}

impl RenderConfig {
    pub fn validate(&self) -> MemeResult<()> {
        self.layout.validate()?;
        self.animation.validate()?;
        if !(1..=100).contains(&self.encode.jpeg_quality) {
            return Err(MemeError::invalid_input(format!(
                "encode.jpeg_quality must be in 1..=100, got {}",
                self.encode.jpeg_quality
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
