//! Procedural cosine color-ramp synthesis, after Inigo Quilez:
//! color(t) = bias + mult * cos(2π (t * freq + phase)), read as HSV.

use rand::Rng;
use std::f64::consts::TAU;

use crate::model::Palette;

/// Number of ramp samples; t runs 0.0, 0.1, ..., 0.9.
const SAMPLES: usize = 10;

/// Parameters of the cosine ramp, one component set per channel. The fourth
/// component is pinned to 1.0 throughout.
#[derive(Debug, Clone, Copy)]
pub struct RampParams {
    pub bias: [f64; 4],
    pub mult: [f64; 4],
    pub freq: [f64; 4],
    pub phase: [f64; 4],
}

impl RampParams {
    /// Draws ramp parameters uniformly within the fixed per-channel bounds.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            bias: random_vector(0.4, 0.8, rng),
            mult: random_vector(0.2, 1.2, rng),
            freq: random_vector(0.1, 1.0, rng),
            phase: random_vector(0.0, 1.0, rng),
        }
    }
}

/// Synthesizes the 10-entry "Generated Palette". The cosine ramp is clamped
/// to [0, 1] and interpreted as HSV before conversion; alpha is fixed at 1.
pub fn palette_from_ramp(params: &RampParams) -> Palette {
    let mut colors = Vec::with_capacity(SAMPLES);
    for i in 0..SAMPLES {
        let t = i as f64 * 0.1;
        let mut hsv = [0.0; 3];
        for ch in 0..3 {
            let c = params.bias[ch]
                + params.mult[ch] * (TAU * (t * params.freq[ch] + params.phase[ch])).cos();
            hsv[ch] = c.clamp(0.0, 1.0);
        }
        colors.push(hsv_to_rgb(hsv));
    }
    Palette::new("Generated Palette", colors)
}

/// Piecewise-linear hue ramp.
fn hue_to_rgb(hue: f64) -> [f64; 3] {
    let r = ((hue * 6.0 - 3.0).abs() - 1.0).clamp(0.0, 1.0);
    let g = (2.0 - (hue * 6.0 - 2.0).abs()).clamp(0.0, 1.0);
    let b = (2.0 - (hue * 6.0 - 4.0).abs()).clamp(0.0, 1.0);
    [r, g, b]
}

fn hsv_to_rgb(hsv: [f64; 3]) -> [f64; 4] {
    let [h, s, v] = hsv;
    let rgb = hue_to_rgb(h);
    [
        ((rgb[0] - 1.0) * s + 1.0) * v,
        ((rgb[1] - 1.0) * s + 1.0) * v,
        ((rgb[2] - 1.0) * s + 1.0) * v,
        1.0,
    ]
}

fn random_vector<R: Rng>(min: f64, max: f64, rng: &mut R) -> [f64; 4] {
    let range = max - min;
    [
        min + range * rng.gen::<f64>(),
        min + range * rng.gen::<f64>(),
        min + range * rng.gen::<f64>(),
        1.0,
    ]
}
