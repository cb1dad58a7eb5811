//! Effect dispatch — parameter clamping + exhaustive selection of one of
//! the five algorithms in [`effects`].

pub mod effects;

use image::RgbaImage;

use crate::params::EffectParams;

/// Apply one effect to a working buffer, returning a freshly allocated
/// buffer of identical dimensions.
///
/// Out-of-range parameters are clamped into their declared ranges before
/// dispatch.  The computation is pure: no clock, no unseeded randomness, no
/// external state — identical inputs always produce byte-identical output,
/// so concurrent invocations need no coordination.
pub fn apply_effect(flat: &RgbaImage, params: &EffectParams) -> RgbaImage {
    let clamped = params.clamped();
    let s = clamped.settings();
    log::debug!(
        "{} on {}x{} (intensity {}, scale {}, iterations {})",
        clamped.kind().name(),
        flat.width(),
        flat.height(),
        s.intensity,
        s.scale,
        s.iterations
    );

    match clamped {
        EffectParams::Chromatic(s) => {
            effects::chromatic_displacement_core(flat, s.intensity, s.iterations)
        }
        EffectParams::Fractal(s) => {
            effects::fractal_displacement_core(flat, s.intensity, s.scale, s.iterations)
        }
        EffectParams::Cellular(s) => {
            effects::cellular_evolution_core(flat, s.intensity, s.iterations)
        }
        EffectParams::Wave(s) => {
            effects::wave_distortion_core(flat, s.intensity, s.scale, s.iterations)
        }
        EffectParams::Noise(s) => {
            effects::layered_noise_core(flat, s.intensity, s.scale, s.iterations)
        }
    }
}
