/// Convenience result type used across memeframe.
pub type MemeResult<T> = Result<T, MemeError>;

/// Top-level error taxonomy used by the rendering APIs.
///
/// Only font loading recovers locally (through the built-in bitmap font). Every other failure
/// propagates to the caller with no partial output.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Malformed caller input: bad colors, zero-sized images, inconsistent parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No font could be resolved and the built-in fallback is disabled.
    #[error("font unavailable: {0}")]
    FontUnavailable(String),

    /// Unexpected drawing failure.
    #[error("render failure: {0}")]
    RenderFailure(String),

    /// Encoding a frame or frame sequence failed, or the caller picked the wrong encoder.
    #[error("encode failure: {0}")]
    EncodeFailure(String),

    /// The image source produced no usable image and no fallback succeeded.
    #[error("upstream image unavailable: {0}")]
    UpstreamImageUnavailable(String),

    /// Errors when serializing or deserializing requests.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    /// Build a [`MemeError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MemeError::FontUnavailable`] value.
    pub fn font_unavailable(msg: impl Into<String>) -> Self {
        Self::FontUnavailable(msg.into())
    }

    /// Build a [`MemeError::RenderFailure`] value.
    pub fn render_failure(msg: impl Into<String>) -> Self {
        Self::RenderFailure(msg.into())
    }

    /// Build a [`MemeError::EncodeFailure`] value.
    pub fn encode_failure(msg: impl Into<String>) -> Self {
        Self::EncodeFailure(msg.into())
    }

    /// Build a [`MemeError::UpstreamImageUnavailable`] value.
    pub fn upstream_image_unavailable(msg: impl Into<String>) -> Self {
        Self::UpstreamImageUnavailable(msg.into())
    }

    /// Build a [`MemeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for MemeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
