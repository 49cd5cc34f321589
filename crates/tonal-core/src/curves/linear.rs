//! Clipping and linear-stretch curves.

use super::{clampf, CurveParams, ToneMapFunction};
use crate::parallel::map_samples;

// ---------------------------------------------------------------------------
// Clip
// ---------------------------------------------------------------------------

/// No tone mapping. In-range values pass through unchanged, everything else
/// is hard-clipped to the output range. No black point adaptation.
#[derive(Debug, Clone, Copy)]
pub struct ClipCurve;

impl ToneMapFunction for ClipCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let (lo, hi) = (params.output_min, params.output_max);
        map_samples(lut, |x| clampf(x, lo, hi));
    }
}

// ---------------------------------------------------------------------------
// Linear
// ---------------------------------------------------------------------------

/// Linearly stretches the input range onto the output range (in PQ), with
/// the parameter as an extra gain coefficient.
///
/// ```text
/// out = ((x − in_min) / (in_max − in_min)) × gain × (out_max − out_min) + out_min
/// ```
///
/// Used for both compression and expansion.
#[derive(Debug, Clone, Copy)]
pub struct LinearCurve;

impl LinearCurve {
    fn stretch(lut: &mut [f32], params: &CurveParams) {
        let gain = params.param;
        map_samples(lut, |x| params.rescale_out(params.rescale_in(x) * gain));
    }
}

impl ToneMapFunction for LinearCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        Self::stretch(lut, params);
    }

    fn map_inverse(&self, lut: &mut [f32], params: &CurveParams) {
        Self::stretch(lut, params);
    }

    fn supports_inverse(&self) -> bool {
        true
    }
}
