//! Mapping engine: LUT generation and single-sample evaluation.
//!
//! Both entry points run the same chain over a batch of values:
//! 1. Normalize the configuration and resolve the curve (`None` → clip,
//!    `auto` → [`select_auto`](crate::transform::auto::select_auto))
//! 2. Convert extrema and sample positions into the curve's native scaling
//! 3. Pick the direction: inverse when the output peak exceeds the input
//!    peak, forward otherwise
//! 4. Run the curve routine once over the whole batch
//! 5. Convert back to the output scaling and clamp to the output range
//!
//! A forward-only curve asked to expand falls back to clip: in-range values
//! pass through, nothing is expanded.

use crate::curves::{clampf, mix, ClipCurve, CurveKind, CurveParams, ToneMapFunction};
use crate::parallel::{fill_indexed, map_samples};
use crate::scaling::{convert, convert_slice};
use crate::transform::auto::resolve_curve;
use crate::transform::params::ToneMapParams;

/// Output peak must exceed the input peak by this much (native scaling)
/// before a mapping counts as inverse.
const INVERSE_THRESHOLD: f32 = 1e-4;

/// Ranges narrower than this (native scaling) are treated as a single point.
const SPAN_EPSILON: f32 = 1e-6;

/// Generate a LUT of `params.lut_size` entries.
///
/// Entry `i` maps the input position `input_min + (input_max − input_min) ×
/// i / (lut_size − 1)`, expressed in `input_scaling`; outputs are in
/// `output_scaling`, within `[output_min, output_max]`. A `lut_size` of 0
/// yields an empty table.
pub fn generate(params: &ToneMapParams) -> Vec<f32> {
    let mut out = vec![0.0; params.lut_size];
    generate_into(&mut out, params);
    out
}

/// Fill a caller-owned buffer with a LUT spanning the whole input range.
///
/// Ignores `params.lut_size`; the table size is `out.len()`.
pub fn generate_into(out: &mut [f32], params: &ToneMapParams) {
    if out.is_empty() {
        return;
    }

    let params = params.normalized();
    let last = (out.len() - 1).max(1) as f32;
    let (lo, hi) = (params.input_min, params.input_max);
    fill_indexed(out, |i| mix(lo, hi, i as f32 / last));

    map_batch(out, &params);
}

/// Evaluate the mapping at a single input position, ignoring `lut_size`.
///
/// `x` is clamped into `[input_min, input_max]` first. Agrees with
/// [`generate`] at every LUT position.
pub fn sample(x: f32, params: &ToneMapParams) -> f32 {
    let params = params.normalized();
    let mut value = [clampf(x, params.input_min, params.input_max)];
    map_batch(&mut value, &params);
    value[0]
}

/// Map `values` (input positions in `params.input_scaling`) in place.
/// `params` must already be normalized.
fn map_batch(values: &mut [f32], params: &ToneMapParams) {
    let curve = resolve_curve(params);
    let scaling = curve.scaling;
    let (input_scaling, output_scaling) = (params.input_scaling, params.output_scaling);
    let (out_lo, out_hi) = (params.output_min, params.output_max);

    let native = CurveParams {
        param: params.param_for(curve),
        input_min: convert(params.input_min, input_scaling, scaling),
        input_max: convert(params.input_max, input_scaling, scaling),
        output_min: convert(params.output_min, output_scaling, scaling),
        output_max: convert(params.output_max, output_scaling, scaling),
    };

    if native.output_max - native.output_min <= SPAN_EPSILON {
        tracing::debug!(curve = curve.name, "degenerate output range, filling with output_min");
        map_samples(values, |_| out_lo);
        return;
    }

    convert_slice(values, input_scaling, scaling);

    if native.input_max - native.input_min <= SPAN_EPSILON {
        tracing::debug!(curve = curve.name, "degenerate input range, skipping curve");
    } else if native.output_max > native.input_max + INVERSE_THRESHOLD {
        match curve.kind.function() {
            Some(function) if function.supports_inverse() => function.map_inverse(values, &native),
            _ => {
                if curve.kind != CurveKind::Clip {
                    tracing::debug!(
                        curve = curve.name,
                        "curve is forward-only, inverse mapping falls back to clip"
                    );
                }
                ClipCurve.map(values, &native);
            }
        }
    } else {
        // Forward routines may assume input_max >= output_max
        let forward = CurveParams {
            output_max: native.output_max.min(native.input_max).max(native.output_min),
            ..native
        };
        match curve.kind.function() {
            Some(function) => function.map(values, &forward),
            None => ClipCurve.map(values, &forward),
        }
    }

    map_samples(values, |y| {
        let y = if y.is_finite() { y } else { native.output_min };
        clampf(convert(y, scaling, output_scaling), out_lo, out_hi)
    });
}
