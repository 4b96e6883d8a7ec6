//! Output encoders.
//!
//! Stills are written as JPEG, frame sequences as looping GIF.

pub(crate) mod animated;
pub(crate) mod output;
pub(crate) mod still;
