use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    animation::slide::SlideCurve,
    assets::color::Rgba8,
    foundation::core::Anchor,
    foundation::error::{MemeError, MemeResult},
};

/// One caption to burn into the image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSpec {
    /// Raw caption; empty text is a no-op.
    pub text: String,
    pub anchor: Anchor,
    pub fill: Rgba8,
    pub outline: Rgba8,
    /// Number of leading characters of the uppercased text to show. `None` shows everything.
    pub reveal: Option<usize>,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            anchor: Anchor::Bottom,
            fill: Rgba8::WHITE,
            outline: Rgba8::BLACK,
            reveal: None,
        }
    }
}

impl TextSpec {
    pub fn new(text: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            anchor,
            ..Self::default()
        }
    }

    pub fn with_colors(mut self, fill: Rgba8, outline: Rgba8) -> Self {
        self.fill = fill;
        self.outline = outline;
        self
    }

    pub fn with_reveal(mut self, reveal: usize) -> Self {
        self.reveal = Some(reveal);
        self
    }

    /// Uppercased text cut at the reveal cursor.
    pub fn visible_text(&self) -> String {
        let upper = self.text.to_uppercase();
        match self.reveal {
            Some(n) => upper.chars().take(n).collect(),
            None => upper,
        }
    }

    /// Character count of the uppercased text, the unit the typing effect reveals by.
    pub fn reveal_len(&self) -> usize {
        self.text.to_uppercase().chars().count()
    }

    pub(crate) fn validate(&self) -> MemeResult<()> {
        if let Some(bad) = self
            .text
            .chars()
            .find(|c| c.is_control() && !c.is_whitespace())
        {
            return Err(MemeError::invalid_input(format!(
                "caption contains control character U+{:04X}",
                bad as u32
            )));
        }
        Ok(())
    }
}

/// Animation effect applied to the captions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// A single frame at full opacity.
    #[default]
    None,
    FadeIn,
    SlideUp,
    /// One frame per revealed character plus a hold tail.
    Typing,
}

impl AnimationMode {
    pub fn is_animated(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl FromStr for AnimationMode {
    type Err = MemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Self::None),
            "fade_in" => Ok(Self::FadeIn),
            "slide_up" => Ok(Self::SlideUp),
            "typing" => Ok(Self::Typing),
            other => Err(MemeError::invalid_input(format!(
                "unknown animation \"{other}\", expected none|fade_in|slide_up|typing"
            ))),
        }
    }
}

/// Frame counts and motion parameters for the animated modes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationParams {
    pub fade_frames: usize,
    pub slide_frames: usize,
    /// Starting offset of the slide, as a share of canvas height.
    pub slide_max_offset_ratio: f32,
    pub slide_curve: SlideCurve,
    /// Copies of the final typing frame appended so the caption can be read.
    pub typing_tail_frames: usize,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            fade_frames: 10,
            slide_frames: 10,
            slide_max_offset_ratio: 0.2,
            slide_curve: SlideCurve::Linear,
            typing_tail_frames: 5,
        }
    }
}

impl AnimationParams {
    pub fn validate(&self) -> MemeResult<()> {
        if self.fade_frames < 2 {
            return Err(MemeError::invalid_input("fade_frames must be >= 2"));
        }
        if self.slide_frames < 2 {
            return Err(MemeError::invalid_input("slide_frames must be >= 2"));
        }
        if !self.slide_max_offset_ratio.is_finite()
            || !(0.0..=1.0).contains(&self.slide_max_offset_ratio)
        {
            return Err(MemeError::invalid_input(
                "slide_max_offset_ratio must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
