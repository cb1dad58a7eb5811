//! Built-in presets — named parameter bundles, fixed at compile time.

use crate::params::{EffectParams, EffectSettings};

/// The five shipped presets.  Loaded once, never mutated at runtime.
pub const PRESETS: [(&str, EffectParams); 5] = [
    (
        "Chromatic Rift",
        EffectParams::Chromatic(EffectSettings {
            intensity: 85,
            scale: 60,
            iterations: 16,
            seed: 42,
        }),
    ),
    (
        "Mandelbrot Decay",
        EffectParams::Fractal(EffectSettings {
            intensity: 70,
            scale: 45,
            iterations: 32,
            seed: 7,
        }),
    ),
    (
        "Cellular Bloom",
        EffectParams::Cellular(EffectSettings {
            intensity: 90,
            scale: 100,
            iterations: 8,
            seed: 13,
        }),
    ),
    (
        "Harmonic Distortion",
        EffectParams::Wave(EffectSettings {
            intensity: 60,
            scale: 80,
            iterations: 6,
            seed: 99,
        }),
    ),
    (
        "Perlin Corruption",
        EffectParams::Noise(EffectSettings {
            intensity: 75,
            scale: 120,
            iterations: 5,
            seed: 1337,
        }),
    ),
];

/// Look up a preset by its display name.
pub fn find(name: &str) -> Option<&'static EffectParams> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, params)| params)
}

/// All preset names in menu order.
pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(n, _)| *n)
}
