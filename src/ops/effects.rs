// ============================================================================
// EFFECT KERNELS — rayon-parallelized glitch transforms over flat RGBA
// ============================================================================
//
// Every kernel reads a frozen source buffer and writes a freshly allocated
// destination of the same dimensions; rows are processed in parallel since
// no destination row depends on another.  Sampling always wraps toroidally
// (never clamps), so no displacement can read out of bounds — including on
// 1-pixel-wide or 1-pixel-tall images, where every modulo lands on 0.
//
// Parameters arrive pre-clamped from the dispatcher:
//   intensity 0–100, scale 10–200, iterations 1–64.
// ============================================================================

use image::RgbaImage;
use rayon::prelude::*;
use std::f32::consts::{PI, TAU};

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// Wrap an integer coordinate into `[0, len)`.
#[inline]
fn wrap(v: i64, len: usize) -> usize {
    v.rem_euclid(len as i64) as usize
}

/// Real-valued wrap into `[0, len)` followed by floor — in that order.
/// For tiny negative inputs `rem_euclid` can round up to exactly `len`,
/// so the result is pinned to the last valid index.
#[inline]
fn wrap_floor(v: f32, len: usize) -> usize {
    let wrapped = v.rem_euclid(len as f32);
    (wrapped.floor() as usize).min(len - 1)
}

/// Rec. 601 luma of an RGB triple, normalized to `[0, 1]`.
#[inline]
fn luminance(r: u8, g: u8, b: u8) -> f32 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0
}

// ============================================================================
// CHROMATIC DISPLACEMENT
// ============================================================================
//
// Iterative color separation: each iteration shifts the sampling point a
// little further around a circle and folds one channel (R, G, B in rotation)
// of the shifted sample into the output by running average.  The average
// reads the already-updated output channel, not the original input — that
// repeated halving in iteration order is what builds the smeared fringes,
// so the order is observable and must stay 0..n-1.

pub fn chromatic_displacement_core(flat: &RgbaImage, intensity: u8, iterations: u8) -> RgbaImage {
    let w = flat.width() as usize;
    let h = flat.height() as usize;
    if w == 0 || h == 0 {
        return flat.clone();
    }

    let src_raw = flat.as_raw();
    let stride = w * 4;
    let n = iterations as usize;
    // Output starts as a copy; channels not targeted by an iteration keep
    // whatever value they last held.  Alpha is never touched.
    let mut dst_raw = src_raw.clone();

    for i in 0..n {
        let offset = (intensity as f32 * 0.2 * (i + 1) as f32 / n as f32).floor();
        let angle = i as f32 / n as f32 * TAU;
        let dx = (angle.cos() * offset).round() as i64;
        let dy = (angle.sin() * offset).round() as i64;
        let channel = i % 3; // 0=red, 1=green, 2=blue

        dst_raw
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row_out)| {
                let sy = wrap(y as i64 + dy, h);
                let src_row = &src_raw[sy * stride..(sy + 1) * stride];
                for x in 0..w {
                    let sx = wrap(x as i64 + dx, w);
                    let pi = x * 4 + channel;
                    let sample = src_row[sx * 4 + channel];
                    row_out[pi] = ((row_out[pi] as u16 + sample as u16) / 2) as u8;
                }
            });
    }

    RgbaImage::from_raw(w as u32, h as u32, dst_raw).unwrap()
}

// ============================================================================
// FRACTAL DISPLACEMENT
// ============================================================================
//
// Escape-time displacement map: each pixel maps to a point of the complex
// plane centered on the image, iterates z <- z^2 + c until |z|^2 > 4 or the
// iteration cap is hit, and the escape index (scaled by intensity) becomes a
// diagonal sampling offset.  All four channels copy from the sampled pixel.

pub fn fractal_displacement_core(
    flat: &RgbaImage,
    intensity: u8,
    scale: u8,
    iterations: u8,
) -> RgbaImage {
    let w = flat.width() as usize;
    let h = flat.height() as usize;
    if w == 0 || h == 0 {
        return flat.clone();
    }

    let src_raw = flat.as_raw();
    let stride = w * 4;
    let mut dst_raw = vec![0u8; w * h * 4];

    let step = scale as f32 * 0.01;
    let center_x = w as f32 / 2.0;
    let center_y = h as f32 / 2.0;
    let max_iter = iterations as u32;

    dst_raw
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let c_im = (y as f32 - center_y) * step;
            for x in 0..w {
                let c_re = (x as f32 - center_x) * step;
                let mut z_re = 0.0f32;
                let mut z_im = 0.0f32;
                let mut index = 0u32;
                while index < max_iter && z_re * z_re + z_im * z_im <= 4.0 {
                    let next_re = z_re * z_re - z_im * z_im + c_re;
                    z_im = 2.0 * z_re * z_im + c_im;
                    z_re = next_re;
                    index += 1;
                }

                let displacement =
                    (index as f32 / max_iter as f32 * intensity as f32).floor() as usize;
                let sx = (x + displacement) % w;
                let sy = (y + displacement) % h;
                let si = sy * stride + sx * 4;
                let pi = x * 4;
                row_out[pi..pi + 4].copy_from_slice(&src_raw[si..si + 4]);
            }
        });

    RgbaImage::from_raw(w as u32, h as u32, dst_raw).unwrap()
}

// ============================================================================
// CELLULAR EVOLUTION
// ============================================================================
//
// Threshold the image to a live/dead grid by luma, run Conway's life rule
// for `iterations` generations on the interior (the 1-pixel border ring
// never evolves), then darken each pixel by its final cell value scaled by
// intensity.  Each generation reads a snapshot of the previous one, so a
// cell's update never leaks into its neighbors within the same generation.

pub fn cellular_evolution_core(flat: &RgbaImage, intensity: u8, iterations: u8) -> RgbaImage {
    let w = flat.width() as usize;
    let h = flat.height() as usize;
    if w == 0 || h == 0 {
        return flat.clone();
    }

    let src_raw = flat.as_raw();
    let stride = w * 4;

    // Alive iff normalized luma > 0.5.
    let mut grid: Vec<u8> = (0..w * h)
        .map(|idx| {
            let pi = idx * 4;
            (luminance(src_raw[pi], src_raw[pi + 1], src_raw[pi + 2]) > 0.5) as u8
        })
        .collect();

    // No interior cells unless both dimensions exceed 2.
    if w > 2 && h > 2 {
        for _ in 0..iterations {
            let prev = grid.clone();
            grid.par_chunks_mut(w)
                .enumerate()
                .skip(1)
                .take(h - 2)
                .for_each(|(y, row)| {
                    for x in 1..w - 1 {
                        let mut neighbors = 0u8;
                        for ny in [y - 1, y, y + 1] {
                            for nx in [x - 1, x, x + 1] {
                                if nx == x && ny == y {
                                    continue;
                                }
                                neighbors += prev[ny * w + nx];
                            }
                        }
                        row[x] = match (prev[y * w + x], neighbors) {
                            (1, 2) | (1, 3) => 1, // survives
                            (0, 3) => 1,          // birth
                            _ => 0,
                        };
                    }
                });
        }
    }

    // Recolor: live cells darken RGB by intensity; alpha is untouched.
    // Border cells still hold their initial value and are recolored with it.
    let darkening = intensity as f32 / 100.0;
    let mut dst_raw = vec![0u8; w * h * 4];
    dst_raw
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let src_row = &src_raw[y * stride..(y + 1) * stride];
            for x in 0..w {
                let pi = x * 4;
                let factor = 1.0 - grid[y * w + x] as f32 * darkening;
                row_out[pi] = (src_row[pi] as f32 * factor).round() as u8;
                row_out[pi + 1] = (src_row[pi + 1] as f32 * factor).round() as u8;
                row_out[pi + 2] = (src_row[pi + 2] as f32 * factor).round() as u8;
                row_out[pi + 3] = src_row[pi + 3];
            }
        });

    RgbaImage::from_raw(w as u32, h as u32, dst_raw).unwrap()
}

// ============================================================================
// WAVE DISTORTION
// ============================================================================
//
// Sum of `iterations` harmonics: frequency grows linearly, amplitude falls
// as 1/(i+1).  Horizontal displacement follows the row phase, vertical the
// column phase.  The sampling coordinate wraps in the real domain first and
// floors second, then copies all four channels.

pub fn wave_distortion_core(
    flat: &RgbaImage,
    intensity: u8,
    scale: u8,
    iterations: u8,
) -> RgbaImage {
    let w = flat.width() as usize;
    let h = flat.height() as usize;
    if w == 0 || h == 0 {
        return flat.clone();
    }

    let src_raw = flat.as_raw();
    let stride = w * 4;
    let mut dst_raw = vec![0u8; w * h * 4];

    let frequency = scale as f32 * 0.1;
    let amplitude = intensity as f32 * 0.1;
    let n = iterations as usize;

    dst_raw
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for x in 0..w {
                let mut displace_x = 0.0f32;
                let mut displace_y = 0.0f32;
                for i in 0..n {
                    let freq_i = frequency * (i + 1) as f32;
                    let amp_i = amplitude / (i + 1) as f32;
                    displace_x += (y as f32 * freq_i / h as f32).sin() * amp_i;
                    displace_y += (x as f32 * freq_i / w as f32).cos() * amp_i;
                }
                let sx = wrap_floor(x as f32 + displace_x, w);
                let sy = wrap_floor(y as f32 + displace_y, h);
                let si = sy * stride + sx * 4;
                let pi = x * 4;
                row_out[pi..pi + 4].copy_from_slice(&src_raw[si..si + 4]);
            }
        });

    RgbaImage::from_raw(w as u32, h as u32, dst_raw).unwrap()
}

// ============================================================================
// LAYERED-NOISE DISPLACEMENT
// ============================================================================
//
// Classic octave sum (amplitude halves, frequency doubles per octave) over a
// sin×cos field, normalized to [0, 1].  The value drives both a diagonal
// sampling offset and an intensity-scaled channel shift: red and green are
// pushed up, blue is pulled down.  The source formula upper-clamps red and
// green but carries no lower clamp on blue; only the clamped 8-bit store
// catches the negative range.  Kept as-is for output compatibility.

pub fn layered_noise_core(
    flat: &RgbaImage,
    intensity: u8,
    scale: u8,
    iterations: u8,
) -> RgbaImage {
    let w = flat.width() as usize;
    let h = flat.height() as usize;
    if w == 0 || h == 0 {
        return flat.clone();
    }

    let src_raw = flat.as_raw();
    let stride = w * 4;
    let mut dst_raw = vec![0u8; w * h * 4];

    let scale_step = scale as f32 * 0.01;
    let intensity_f = intensity as f32;
    let n = iterations as usize;

    dst_raw
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for x in 0..w {
                let mut amplitude = 1.0f32;
                let mut frequency = 1.0f32;
                let mut noise_value = 0.0f32;
                let mut max_value = 0.0f32;
                for _ in 0..n {
                    let sample_x = x as f32 * frequency * scale_step / w as f32;
                    let sample_y = y as f32 * frequency * scale_step / h as f32;
                    noise_value += amplitude * (sample_x * PI).sin() * (sample_y * PI).cos();
                    max_value += amplitude;
                    amplitude *= 0.5;
                    frequency *= 2.0;
                }
                let normalized = (noise_value / max_value + 1.0) / 2.0;

                let displacement = (normalized * intensity_f).floor() as usize;
                let sx = (x + displacement) % w;
                let sy = (y + displacement) % h;
                let si = sy * stride + sx * 4;

                let color_shift = (normalized * 255.0).floor();
                let r = 255.0f32.min(src_raw[si] as f32 + color_shift * intensity_f / 100.0);
                let g = 255.0f32.min(src_raw[si + 1] as f32 + color_shift * intensity_f / 200.0);
                let b = src_raw[si + 2] as f32 - color_shift * intensity_f / 200.0;

                let pi = x * 4;
                row_out[pi] = r.round().clamp(0.0, 255.0) as u8;
                row_out[pi + 1] = g.round().clamp(0.0, 255.0) as u8;
                row_out[pi + 2] = b.round().clamp(0.0, 255.0) as u8;
                row_out[pi + 3] = src_raw[si + 3];
            }
        });

    RgbaImage::from_raw(w as u32, h as u32, dst_raw).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gradient(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            Rgba([
                (x * 37 % 256) as u8,
                (y * 71 % 256) as u8,
                ((x + y) * 13 % 256) as u8,
                255,
            ])
        })
    }

    #[test]
    fn wrap_handles_negative_and_large_values() {
        assert_eq!(wrap(-1, 5), 4);
        assert_eq!(wrap(-11, 5), 4);
        assert_eq!(wrap(12, 5), 2);
        assert_eq!(wrap(0, 1), 0);
        assert_eq!(wrap(-7, 1), 0);
    }

    #[test]
    fn wrap_floor_stays_in_range() {
        assert_eq!(wrap_floor(3.7, 5), 3);
        assert_eq!(wrap_floor(-0.2, 5), 4);
        assert_eq!(wrap_floor(5.0, 5), 0);
        assert_eq!(wrap_floor(-1.0e-30, 3), 2); // f32 rem_euclid rounds up to 3.0
        assert_eq!(wrap_floor(7.9, 1), 0);
    }

    #[test]
    fn luminance_thresholds() {
        assert!(luminance(255, 255, 255) > 0.5);
        assert!(luminance(0, 0, 0) < 0.5);
        // Pure green sits above the 0.5 line, pure red and blue below.
        assert!(luminance(0, 255, 0) > 0.5);
        assert!(luminance(255, 0, 0) < 0.5);
        assert!(luminance(0, 0, 255) < 0.5);
    }

    #[test]
    fn chromatic_preserves_alpha_exactly() {
        let img = RgbaImage::from_fn(9, 7, |x, y| Rgba([100, 150, 200, (x * 31 + y) as u8]));
        let out = chromatic_displacement_core(&img, 100, 12);
        for (src, dst) in img.pixels().zip(out.pixels()) {
            assert_eq!(src[3], dst[3]);
        }
    }

    #[test]
    fn chromatic_on_uniform_image_is_identity() {
        // Every sample equals the output value, so averaging changes nothing.
        let img = RgbaImage::from_pixel(8, 8, Rgba([90, 120, 30, 255]));
        let out = chromatic_displacement_core(&img, 85, 16);
        assert_eq!(out, img);
    }

    #[test]
    fn fractal_zero_intensity_is_identity() {
        let img = gradient(16, 12);
        assert_eq!(fractal_displacement_core(&img, 0, 50, 10), img);
    }

    #[test]
    fn wave_zero_intensity_is_identity() {
        let img = gradient(16, 12);
        assert_eq!(wave_distortion_core(&img, 0, 50, 10), img);
    }

    #[test]
    fn noise_zero_intensity_is_identity() {
        let img = gradient(16, 12);
        assert_eq!(layered_noise_core(&img, 0, 50, 10), img);
    }

    #[test]
    fn cellular_all_white_kills_interior_only() {
        // Every cell starts alive; interior cells have 8 live neighbors and
        // die, while the border ring never evolves and stays alive.  Full
        // intensity then blacks out exactly the live (border) cells.
        let img = RgbaImage::from_pixel(5, 5, Rgba([255, 255, 255, 200]));
        let out = cellular_evolution_core(&img, 100, 1);
        for y in 0..5u32 {
            for x in 0..5u32 {
                let p = out.get_pixel(x, y);
                let border = x == 0 || y == 0 || x == 4 || y == 4;
                let expected = if border { 0 } else { 255 };
                assert_eq!(p[0], expected, "red at {x},{y}");
                assert_eq!(p[1], expected, "green at {x},{y}");
                assert_eq!(p[2], expected, "blue at {x},{y}");
                assert_eq!(p[3], 200, "alpha at {x},{y}");
            }
        }
    }

    #[test]
    fn cellular_blinker_returns_after_two_generations() {
        // A vertical triple in a 7x7 field oscillates with period 2; after
        // two generations the live set must match the initial one.  An
        // in-place update would break the oscillation.
        // Dark red background stays below the luma threshold but is
        // distinguishable from a darkened live cell in the output.
        let mut img = RgbaImage::from_pixel(7, 7, Rgba([120, 0, 0, 255]));
        for y in 2..5 {
            img.put_pixel(3, y, Rgba([255, 255, 255, 255]));
        }
        let out = cellular_evolution_core(&img, 100, 2);
        for y in 0..7u32 {
            for x in 0..7u32 {
                let initially_live = x == 3 && (2..5).contains(&y);
                // Intensity 100 sends live cells to RGB 0; dead cells keep
                // their source red channel.
                let expected = if initially_live { 0 } else { 120 };
                assert_eq!(out.get_pixel(x, y)[0], expected, "at {x},{y}");
            }
        }
    }

    #[test]
    fn cellular_thin_images_do_not_evolve() {
        // No interior cells and zero darkening: output is the input.
        let img = gradient(2, 10);
        let out = cellular_evolution_core(&img, 0, 8);
        assert_eq!(out, img);
    }

    #[test]
    fn all_kernels_tolerate_single_pixel_rows_and_columns() {
        for img in [gradient(1, 6), gradient(6, 1), gradient(1, 1)] {
            let dims = img.dimensions();
            assert_eq!(chromatic_displacement_core(&img, 100, 1).dimensions(), dims);
            assert_eq!(
                fractal_displacement_core(&img, 100, 200, 1).dimensions(),
                dims
            );
            assert_eq!(cellular_evolution_core(&img, 100, 1).dimensions(), dims);
            assert_eq!(wave_distortion_core(&img, 100, 200, 1).dimensions(), dims);
            assert_eq!(layered_noise_core(&img, 100, 200, 1).dimensions(), dims);
        }
    }

    #[test]
    fn noise_extreme_params_keep_alpha_opaque() {
        let img = gradient(10, 10);
        let out = layered_noise_core(&img, 100, 200, 64);
        assert!(out.pixels().all(|p| p[3] == 255));
    }
}
