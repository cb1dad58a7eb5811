//! Error taxonomy for the effect engine.
//!
//! Only genuinely fatal conditions surface as errors.  Out-of-range
//! parameters are clamped by the dispatcher, and degenerate dimensions
//! (1-pixel-wide or -tall images) are defined behavior for every effect,
//! so neither is represented here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EffectError {
    /// Zero-area or malformed input buffer.  Fatal to the call; the
    /// computation is deterministic, so retrying cannot help.
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },
}

impl EffectError {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        EffectError::InvalidImage {
            reason: reason.into(),
        }
    }
}
