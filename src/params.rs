//! Effect parameters — a closed tagged union over the five effects.
//!
//! Every effect shares the same four scalar knobs.  `seed` is carried for
//! the reproducibility contract (presets and saved parameter bundles record
//! it) but no current algorithm reads it; it is reserved for future
//! randomized variants.

use serde::{Deserialize, Serialize};

pub const INTENSITY_MAX: u8 = 100;
pub const SCALE_MIN: u8 = 10;
pub const SCALE_MAX: u8 = 200;
pub const ITERATIONS_MIN: u8 = 1;
pub const ITERATIONS_MAX: u8 = 64;

/// Discriminant for the five effects, for frontends that enumerate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Chromatic,
    Fractal,
    Cellular,
    Wave,
    Noise,
}

impl EffectKind {
    pub const ALL: [EffectKind; 5] = [
        EffectKind::Chromatic,
        EffectKind::Fractal,
        EffectKind::Cellular,
        EffectKind::Wave,
        EffectKind::Noise,
    ];

    /// Display name for menus and logs.
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Chromatic => "Chromatic Displacement",
            EffectKind::Fractal => "Fractal Displacement",
            EffectKind::Cellular => "Cellular Evolution",
            EffectKind::Wave => "Wave Distortion",
            EffectKind::Noise => "Layered Noise",
        }
    }
}

/// The four scalar knobs shared by every effect.
///
/// Declared ranges: `intensity` 0–100, `scale` 10–200, `iterations` 1–64.
/// Values outside those ranges are clamped by the dispatcher before any
/// algorithm runs — never rejected, never passed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSettings {
    pub intensity: u8,
    pub scale: u8,
    pub iterations: u8,
    pub seed: u32,
}

impl Default for EffectSettings {
    fn default() -> Self {
        // Slider midpoints a frontend would start from.
        EffectSettings {
            intensity: 50,
            scale: 100,
            iterations: 8,
            seed: 0,
        }
    }
}

impl EffectSettings {
    /// Copy with every field forced into its declared range.
    pub fn clamped(self) -> Self {
        EffectSettings {
            intensity: self.intensity.min(INTENSITY_MAX),
            scale: self.scale.clamp(SCALE_MIN, SCALE_MAX),
            iterations: self.iterations.clamp(ITERATIONS_MIN, ITERATIONS_MAX),
            seed: self.seed,
        }
    }
}

/// Parameters for one effect invocation.  The variant selects the algorithm;
/// each variant carries its own settings record so parameter bundles cannot
/// be confused across effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum EffectParams {
    Chromatic(EffectSettings),
    Fractal(EffectSettings),
    Cellular(EffectSettings),
    Wave(EffectSettings),
    Noise(EffectSettings),
}

impl EffectParams {
    pub fn kind(&self) -> EffectKind {
        match self {
            EffectParams::Chromatic(_) => EffectKind::Chromatic,
            EffectParams::Fractal(_) => EffectKind::Fractal,
            EffectParams::Cellular(_) => EffectKind::Cellular,
            EffectParams::Wave(_) => EffectKind::Wave,
            EffectParams::Noise(_) => EffectKind::Noise,
        }
    }

    pub fn settings(&self) -> EffectSettings {
        match self {
            EffectParams::Chromatic(s)
            | EffectParams::Fractal(s)
            | EffectParams::Cellular(s)
            | EffectParams::Wave(s)
            | EffectParams::Noise(s) => *s,
        }
    }

    /// Same variant with the settings clamped into range.
    pub fn clamped(&self) -> Self {
        match self {
            EffectParams::Chromatic(s) => EffectParams::Chromatic(s.clamped()),
            EffectParams::Fractal(s) => EffectParams::Fractal(s.clamped()),
            EffectParams::Cellular(s) => EffectParams::Cellular(s.clamped()),
            EffectParams::Wave(s) => EffectParams::Wave(s.clamped()),
            EffectParams::Noise(s) => EffectParams::Noise(s.clamped()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamping_forces_declared_ranges() {
        let s = EffectSettings {
            intensity: 150,
            scale: 5,
            iterations: 0,
            seed: 42,
        }
        .clamped();
        assert_eq!(s.intensity, 100);
        assert_eq!(s.scale, 10);
        assert_eq!(s.iterations, 1);
        assert_eq!(s.seed, 42);
    }

    #[test]
    fn clamping_leaves_in_range_values_alone() {
        let s = EffectSettings {
            intensity: 85,
            scale: 60,
            iterations: 16,
            seed: 7,
        };
        assert_eq!(s.clamped(), s);
    }

    #[test]
    fn params_clamp_preserves_variant() {
        let p = EffectParams::Wave(EffectSettings {
            intensity: 200,
            scale: 250,
            iterations: 99,
            seed: 0,
        });
        let c = p.clamped();
        assert_eq!(c.kind(), EffectKind::Wave);
        assert_eq!(c.settings().intensity, 100);
        assert_eq!(c.settings().scale, 200);
        assert_eq!(c.settings().iterations, 64);
    }

    #[test]
    fn serde_round_trip() {
        let p = EffectParams::Fractal(EffectSettings {
            intensity: 70,
            scale: 45,
            iterations: 32,
            seed: 7,
        });
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"effect\":\"fractal\""));
        let back: EffectParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn kind_names_are_distinct() {
        let mut names: Vec<_> = EffectKind::ALL.iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }
}
