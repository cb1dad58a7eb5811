//! pixelrift — deterministic glitch-art effects for flat RGBA buffers.
//!
//! Five parameter-driven pixel transforms (chromatic displacement, fractal
//! displacement, cellular evolution, wave distortion, layered noise) that map
//! a source image to a new image of identical dimensions.  Everything is
//! pure and synchronous: given the same buffer and parameters the output is
//! byte-identical, so previews, exports and re-runs never disagree.
//!
//! The crate owns no UI and no codecs.  Callers hand in an already-decoded
//! [`image::DynamicImage`] (or a raw RGBA byte buffer) and get back an
//! [`image::RgbaImage`] to encode or display however they like.
//!
//! ```no_run
//! use pixelrift::{apply_effect, buffer, presets};
//!
//! let decoded = image::open("input.png").unwrap();
//! let working = buffer::load_source(&decoded).unwrap();
//! let params = presets::find("Chromatic Rift").unwrap();
//! let result = apply_effect(&working, params);
//! result.save("output.png").unwrap();
//! ```

pub mod buffer;
pub mod error;
pub mod ops;
pub mod params;
pub mod presets;

pub use buffer::{MAX_HEIGHT, MAX_WIDTH};
pub use error::EffectError;
pub use ops::apply_effect;
pub use params::{EffectKind, EffectParams, EffectSettings};
