//! Global (per-value) operators working on relative luminance.
//!
//! All four curves here are forward-only and operate in `Norm` scaling,
//! where 1.0 is SDR reference white.

use super::{bt1886_eotf, bt1886_oetf, CurveParams, ToneMapFunction};
use crate::parallel::map_samples;

// ---------------------------------------------------------------------------
// Reinhard
// ---------------------------------------------------------------------------

/// Simple non-linear global operator, after Erik Reinhard.
///
/// The parameter is the local contrast coefficient at the display peak:
/// 0.5 means reference white ends up about half as bright as when clipping.
///
/// ```text
/// offset = (1 − contrast) / contrast
/// out    = x / (x + offset) × (peak + offset) / peak
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReinhardCurve;

impl ToneMapFunction for ReinhardCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let peak = params.rescale(params.input_max);
        let contrast = params.param;
        let offset = (1.0 - contrast) / contrast;
        let scale = (peak + offset) / peak;

        map_samples(lut, |x| {
            let x = params.rescale(x);
            let x = x / (x + offset) * scale;
            params.rescale_out(x)
        });
    }
}

// ---------------------------------------------------------------------------
// Möbius
// ---------------------------------------------------------------------------

/// Reinhard generalized with a linear segment near black.
///
/// Values below the knee `j` (the parameter) map linearly; above it a Möbius
/// transform takes over, solved for `M(j) = j`, `M'(j) = 1` and
/// `M(peak) = 1`. Knees near 1.0 behave like clip, knees near 0.0 like
/// Reinhard.
///
/// Written relative to the knee so the join stays exact when `j` and `peak`
/// are both close to 1:
///
/// ```text
/// c    = (peak − 1) / ((1 − j)(peak − j))
/// M(x) = j + (x − j) / (1 + c(x − j))
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MobiusCurve;

impl ToneMapFunction for MobiusCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let peak = params.rescale(params.input_max);
        let j = params.param;

        // Above-knee values only exist when peak > j
        let c = (peak - 1.0) / ((1.0 - j) * (peak - j)).max(1e-6);

        map_samples(lut, |x| {
            let x = params.rescale(x);
            let x = if x <= j {
                x
            } else {
                let u = x - j;
                j + u / (1.0 + c * u)
            };
            params.rescale_out(x)
        });
    }
}

// ---------------------------------------------------------------------------
// Hable
// ---------------------------------------------------------------------------

/// Piece-wise filmic operator by John Hable (Uncharted 2).
///
/// Preserves dark and bright detail well, at the cost of shifting average
/// brightness noticeably. Roughly comparable to Reinhard at 0.24.
///
/// ```text
/// h(x) = (x(Ax + CB) + DE) / (x(Ax + B) + DF) − E/F
/// ```
#[derive(Debug, Clone, Copy)]
pub struct HableCurve;

impl HableCurve {
    const A: f32 = 0.15;
    const B: f32 = 0.50;
    const C: f32 = 0.10;
    const D: f32 = 0.20;
    const E: f32 = 0.02;
    const F: f32 = 0.30;

    fn hable(x: f32) -> f32 {
        (x * (Self::A * x + Self::C * Self::B) + Self::D * Self::E)
            / (x * (Self::A * x + Self::B) + Self::D * Self::F)
            - Self::E / Self::F
    }
}

impl ToneMapFunction for HableCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let peak = params.input_max / params.output_max;
        let scale = 1.0 / Self::hable(peak);

        map_samples(lut, |x| {
            let x = bt1886_oetf(x, params.input_min, params.input_max);
            let x = bt1886_eotf(x, 0.0, peak);
            let x = scale * Self::hable(x);
            let x = bt1886_oetf(x, 0.0, 1.0);
            bt1886_eotf(x, params.output_min, params.output_max)
        });
    }
}

// ---------------------------------------------------------------------------
// Gamma
// ---------------------------------------------------------------------------

/// Fits a power function between the cutoff and the peak, with a linear
/// section below the cutoff (the parameter, default 0.5).
///
/// ```text
/// γ   = ln(cutoff) / ln(cutoff / peak)
/// out = x                 x <= cutoff
///       (x / peak)^γ      otherwise
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GammaCurve;

impl ToneMapFunction for GammaCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let peak = params.rescale(params.input_max);
        let cutoff = params.param;

        if peak <= cutoff + 1e-6 {
            map_samples(lut, |x| params.rescale_out(params.rescale(x)));
            return;
        }

        let gamma = cutoff.ln() / (cutoff / peak).ln();
        map_samples(lut, |x| {
            let x = params.rescale(x);
            let x = if x > cutoff {
                (x / peak).powf(gamma)
            } else {
                x
            };
            params.rescale_out(x)
        });
    }
}
