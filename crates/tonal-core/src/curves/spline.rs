//! Two-polynomial spline joined at a pivot.
//!
//! # Algorithm
//! With every value shifted so the pivot sits at the origin, the curve is a
//! quadratic `P` below the pivot and a cubic `Q` above it, sharing the slope
//! `s` at the pivot:
//!
//! ```text
//! P(x) = Pa × x² + s × x            P(in_min) = out_min
//! Q(x) = Qa × x³ + Qb × x² + s × x  Q(in_max) = out_max, Q''(in_max) = 0
//! ```
//!
//! The knee slope starts from the linear ratio `out_max / in_max`, raised to
//! an exponent that grows with the peak ratio so that small peak differences
//! stay near-linear while large ones roll off harder. It is then capped so
//! both polynomials stay monotonic over their segment.

use super::{clampf, mix, CurveParams, LinearCurve, ToneMapFunction};
use crate::parallel::map_samples;

/// Contrast at the knee; 0.0 keeps the slope, 1.0 flattens it fully.
const SPLINE_CONTRAST: f32 = 0.5;
/// Scales the peak ratio into the slope exponent.
const SLOPE_TUNING: f32 = 1.5;
/// Lower bound of the slope exponent; the upper bound is `1 + SLOPE_OFFSET`.
const SLOPE_OFFSET: f32 = 0.2;

/// Simple spline of two polynomials joined at a pivot point (in PQ).
///
/// The parameter is the pivot, defaulting to 0.30. The same routine serves
/// forward and inverse mapping.
#[derive(Debug, Clone, Copy)]
pub struct SplineCurve;

impl SplineCurve {
    fn apply(lut: &mut [f32], params: &CurveParams) {
        // Pivot has to lie strictly inside both ranges
        let lo = params.input_min.max(params.output_min);
        let hi = params.input_max.min(params.output_max);
        if hi - lo <= 1e-6 {
            LinearCurve.map(lut, &CurveParams { param: 1.0, ..*params });
            return;
        }
        let pivot = clampf(params.param, mix(lo, hi, 0.1), mix(lo, hi, 0.9));

        let in_min = params.input_min - pivot;
        let in_max = params.input_max - pivot;
        let out_min = params.output_min - pivot;
        let out_max = params.output_max - pivot;

        let ratio = params.input_max / params.output_max - 1.0;
        let ratio = clampf(SLOPE_TUNING * ratio, SLOPE_OFFSET, 1.0 + SLOPE_OFFSET);
        let mut slope = (out_max / in_max).powf((1.0 - SPLINE_CONTRAST) * ratio);

        // Q'(in_max) >= 0 and P'(in_min) >= 0
        slope = slope.min(3.0 * out_max / in_max);
        slope = slope.min(2.0 * out_min / in_min);

        let pa = (out_min - slope * in_min) / (in_min * in_min);
        let pb = slope;

        let t = 2.0 * in_max * in_max;
        let qa = (slope * in_max - out_max) / (in_max * t);
        let qb = -3.0 * (slope * in_max - out_max) / t;
        let qc = slope;

        map_samples(lut, |x| {
            let x = x - pivot;
            let y = if x > 0.0 {
                ((qa * x + qb) * x + qc) * x
            } else {
                (pa * x + pb) * x
            };
            y + pivot
        });
    }
}

impl ToneMapFunction for SplineCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        Self::apply(lut, params);
    }

    fn map_inverse(&self, lut: &mut [f32], params: &CurveParams) {
        Self::apply(lut, params);
    }

    fn supports_inverse(&self) -> bool {
        true
    }
}
