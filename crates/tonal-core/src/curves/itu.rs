//! EETFs from the ITU-R HDR reports.

use super::{bt1886_eotf, bt1886_oetf, CurveParams, ToneMapFunction};
use crate::parallel::map_samples;
use crate::scaling::{convert, ScalingKind};

// ---------------------------------------------------------------------------
// ITU-R BT.2390
// ---------------------------------------------------------------------------

/// EETF from ITU-R Report BT.2390: a hermite spline roll-off above a knee,
/// linear below it, followed by black point adaptation. Operates in PQ.
///
/// The parameter is the knee offset. It defaults to 1.0 rather than the 0.5
/// from the report; offsets of 0.5 and above keep the roll-off monotonic.
///
/// ```text
/// KS = (1 + offset) × maxLum − offset
///
/// x < KS  → x
/// x >= KS → P(x), hermite spline through (KS, KS) and (1, maxLum)
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bt2390Curve;

impl ToneMapFunction for Bt2390Curve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let min_lum = params.rescale_in(params.output_min);
        let max_lum = params.rescale_in(params.output_max);
        let offset = params.param;
        let ks = (1.0 + offset) * max_lum - offset;
        let bp = if min_lum > 0.0 {
            (1.0 / min_lum).min(4.0)
        } else {
            4.0
        };
        let gain_inv = 1.0 + min_lum / max_lum * (1.0 - max_lum).powf(bp);
        let gain = if max_lum < 1.0 { 1.0 / gain_inv } else { 1.0 };

        map_samples(lut, |x| {
            let mut x = params.rescale_in(x);

            if ks < 1.0 {
                let tb = (x - ks) / (1.0 - ks);
                let tb2 = tb * tb;
                let tb3 = tb2 * tb;
                let pb = (2.0 * tb3 - 3.0 * tb2 + 1.0) * ks
                    + (tb3 - 2.0 * tb2 + tb) * (1.0 - ks)
                    + (-2.0 * tb3 + 3.0 * tb2) * max_lum;
                if x >= ks {
                    x = pb;
                }
            }

            // Black point adaptation
            if x < 1.0 {
                x += min_lum * (1.0 - x).powf(bp);
                x = gain * (x - min_lum) + min_lum;
            }

            x * (params.input_max - params.input_min) + params.input_min
        });
    }
}

// ---------------------------------------------------------------------------
// ITU-R BT.2446 Method A
// ---------------------------------------------------------------------------

/// EETF from ITU-R Report BT.2446, method A. Not configurable. Supports
/// inverse mapping.
///
/// Registered with PQ as its native scaling; the report's math is defined on
/// absolute luminance, so values are moved to cd/m² for the duration of the
/// call.
///
/// ```text
/// p_hdr = 1 + 32 × (in_max / 10000)^(1/2.4)
/// p_sdr = 1 + 32 × (out_max / 10000)^(1/2.4)
///
/// Y'  = log(1 + (p_hdr − 1) × x^(1/2.4)) / log(p_hdr)
/// Y'c = 1.0770 × Y'                          Y' <= 0.7399
///       −1.1510 × Y'² + 2.7811 × Y' − 0.6302  Y' <  0.9909
///       0.5 × Y' + 0.5                        otherwise
/// out = BT.1886((p_sdr^Y'c − 1) / (p_sdr − 1))
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Bt2446aCurve;

impl Bt2446aCurve {
    fn in_nits(params: &CurveParams) -> CurveParams {
        CurveParams {
            param: params.param,
            input_min: pq_to_nits(params.input_min),
            input_max: pq_to_nits(params.input_max),
            output_min: pq_to_nits(params.output_min),
            output_max: pq_to_nits(params.output_max),
        }
    }
}

impl ToneMapFunction for Bt2446aCurve {
    fn map(&self, lut: &mut [f32], params: &CurveParams) {
        let nits = Self::in_nits(params);
        let phdr = 1.0 + 32.0 * (nits.input_max / 10000.0).powf(1.0 / 2.4);
        let psdr = 1.0 + 32.0 * (nits.output_max / 10000.0).powf(1.0 / 2.4);
        let log_phdr = phdr.ln();

        map_samples(lut, |x| {
            let x = nits.rescale_in(pq_to_nits(x)).max(0.0).powf(1.0 / 2.4);
            let x = (1.0 + (phdr - 1.0) * x).ln() / log_phdr;

            let x = if x <= 0.7399 {
                1.0770 * x
            } else if x < 0.9909 {
                (-1.1510 * x + 2.7811) * x - 0.6302
            } else {
                0.5 * x + 0.5
            };

            let x = (psdr.powf(x) - 1.0) / (psdr - 1.0);
            nits_to_pq(bt1886_eotf(x, nits.output_min, nits.output_max))
        });
    }

    fn map_inverse(&self, lut: &mut [f32], params: &CurveParams) {
        let nits = Self::in_nits(params);

        map_samples(lut, |x| {
            let x = bt1886_oetf(pq_to_nits(x), nits.input_min, nits.input_max) * 255.0;
            let x = if x > 70.0 {
                x.powf((2.8305e-6 * x - 7.4622e-4) * x + 1.2528)
            } else {
                x.powf((1.8712e-5 * x - 2.7334e-3) * x + 1.3141)
            };
            let x = (x / 1000.0).powf(1.0 / 2.4);
            nits_to_pq(bt1886_eotf(x, nits.output_min, nits.output_max))
        });
    }

    fn supports_inverse(&self) -> bool {
        true
    }
}

fn pq_to_nits(x: f32) -> f32 {
    convert(x, ScalingKind::Pq, ScalingKind::Nits)
}

fn nits_to_pq(x: f32) -> f32 {
    convert(x, ScalingKind::Nits, ScalingKind::Pq)
}
