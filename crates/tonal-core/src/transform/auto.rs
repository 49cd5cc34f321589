//! Resolution of the `auto` sentinel to a concrete curve.
//!
//! The choice is a pure function of the input and output peaks, so identical
//! configurations always resolve to the same curve.

use crate::curves::ToneMapCurve;
use crate::registry;
use crate::scaling::{convert, ScalingKind};
use crate::transform::params::ToneMapParams;

/// Pick a concrete curve for the given peaks, both in `Norm` scaling.
///
/// ```text
/// ratio = input_max / output_max
///
/// |ratio − 1| < 0.01                          → clip     (ranges already match)
/// ratio > 10                                  → spline   (extreme reduction, quasi-linear)
/// max(ratio, 1/ratio) > 2, min peak < 1.5     → bt2446a  (typical HDR ↔ SDR)
/// ratio < 1                                   → spline   (small inverse expansion)
/// otherwise                                   → bt2390   (small reduction, no color distortion)
/// ```
///
/// Degenerate peaks (zero, NaN) resolve to clip.
pub fn select_auto(input_max: f32, output_max: f32) -> &'static ToneMapCurve {
    if !(input_max > 0.0 && output_max > 0.0) {
        return &registry::CLIP;
    }

    let ratio = input_max / output_max;
    let curve = if (ratio - 1.0).abs() < 0.01 {
        &registry::CLIP
    } else if ratio > 10.0 {
        &registry::SPLINE
    } else if ratio.max(1.0 / ratio) > 2.0 && input_max.min(output_max) < 1.5 {
        &registry::BT2446A
    } else if ratio < 1.0 {
        &registry::SPLINE
    } else {
        &registry::BT2390
    };

    tracing::trace!(input_max, output_max, ratio, curve = curve.name, "auto tone-mapping curve");
    curve
}

/// The concrete curve `params` maps with: `clip` when no curve is set, the
/// [`select_auto`] pick for any `auto` curve, otherwise the curve itself.
pub fn resolve_curve(params: &ToneMapParams) -> &'static ToneMapCurve {
    let curve = params.curve.unwrap_or(&registry::CLIP);
    if !curve.is_auto() {
        return curve;
    }

    let input_max = convert(params.input_max, params.input_scaling, ScalingKind::Norm);
    let output_max = convert(params.output_max, params.output_scaling, ScalingKind::Norm);
    select_auto(input_max, output_max)
}
