//! Tone-mapping curves.
//!
//! A curve is a [`ToneMapCurve`] descriptor (name, parameter range, native
//! scaling) plus a [`CurveKind`] that dispatches to the routine implementing
//! it. Routines implement [`ToneMapFunction`] and rewrite a whole batch of
//! samples at once so per-call setup (spline coefficients, gain factors) is
//! computed once per batch.
//!
//! Routines only ever see values and extrema in their native scaling; the
//! engine does all scaling conversion around them.

pub mod global;
pub mod itu;
pub mod linear;
pub mod spline;

use std::fmt;

use crate::scaling::ScalingKind;

pub use global::{GammaCurve, HableCurve, MobiusCurve, ReinhardCurve};
pub use itu::{Bt2390Curve, Bt2446aCurve};
pub use linear::{ClipCurve, LinearCurve};
pub use spline::SplineCurve;

/// Native-scaled parameters for a single curve invocation.
///
/// For [`ToneMapFunction::map`], `input_max >= output_max`. For
/// [`ToneMapFunction::map_inverse`], `input_max <= output_max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// Curve parameter, already defaulted and clamped to the curve's range.
    pub param: f32,
    pub input_min: f32,
    pub input_max: f32,
    pub output_min: f32,
    pub output_max: f32,
}

impl CurveParams {
    /// Input-absolute to input-relative: `input_min → 0`, `input_max → 1`.
    #[inline]
    pub fn rescale_in(&self, x: f32) -> f32 {
        (x - self.input_min) / (self.input_max - self.input_min)
    }

    /// Input-absolute to output-relative: `input_min → 0`, one unit per
    /// output span.
    #[inline]
    pub fn rescale(&self, x: f32) -> f32 {
        (x - self.input_min) / (self.output_max - self.output_min)
    }

    /// Output-relative to output-absolute: `0 → output_min`, `1 → output_max`.
    #[inline]
    pub fn rescale_out(&self, x: f32) -> f32 {
        x * (self.output_max - self.output_min) + self.output_min
    }
}

/// A tone-mapping routine operating on values in its curve's native scaling.
pub trait ToneMapFunction: Send + Sync {
    /// Compress every value in `lut` in place.
    fn map(&self, lut: &mut [f32], params: &CurveParams);

    /// Expand every value in `lut` in place.
    ///
    /// Forward-only curves keep the default, which hard-clips like
    /// [`ClipCurve`].
    fn map_inverse(&self, lut: &mut [f32], params: &CurveParams) {
        ClipCurve.map(lut, params);
    }

    /// Whether [`map_inverse`](Self::map_inverse) is a real expansion.
    fn supports_inverse(&self) -> bool {
        false
    }
}

/// Closed set of curve implementations a [`ToneMapCurve`] can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveKind {
    /// Resolution sentinel. Replaced by a concrete curve before mapping.
    Auto,
    Clip,
    Bt2390,
    Bt2446a,
    Spline,
    Reinhard,
    Mobius,
    Hable,
    Gamma,
    Linear,
}

impl CurveKind {
    /// The routine implementing this kind, or `None` for [`CurveKind::Auto`].
    pub fn function(self) -> Option<&'static dyn ToneMapFunction> {
        match self {
            Self::Auto => None,
            Self::Clip => Some(&ClipCurve),
            Self::Bt2390 => Some(&Bt2390Curve),
            Self::Bt2446a => Some(&Bt2446aCurve),
            Self::Spline => Some(&SplineCurve),
            Self::Reinhard => Some(&ReinhardCurve),
            Self::Mobius => Some(&MobiusCurve),
            Self::Hable => Some(&HableCurve),
            Self::Gamma => Some(&GammaCurve),
            Self::Linear => Some(&LinearCurve),
        }
    }
}

/// Describes the single adjustable parameter of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParam {
    /// Display name of the parameter.
    pub name: &'static str,
    pub min: f32,
    pub default: f32,
    pub max: f32,
}

/// Immutable descriptor for a tone-mapping curve.
///
/// Configurations reference curves by `&'static` pointer and compare them by
/// identity, so two descriptors with identical contents are still distinct
/// curves.
#[derive(Debug, Clone)]
pub struct ToneMapCurve {
    /// Unique identifier, used for lookup and serialization.
    pub name: &'static str,
    /// Friendly / longer name.
    pub description: &'static str,
    /// Adjustable parameter, if the curve has one.
    pub param: Option<CurveParam>,
    /// Scaling the routine expects its input and output in.
    pub scaling: ScalingKind,
    pub kind: CurveKind,
}

impl ToneMapCurve {
    /// Whether this is the automatic-selection sentinel.
    pub fn is_auto(&self) -> bool {
        self.kind == CurveKind::Auto
    }

    /// Whether the curve can be used for inverse (expanding) mapping.
    pub fn supports_inverse(&self) -> bool {
        self.kind
            .function()
            .is_some_and(|function| function.supports_inverse())
    }

    /// Default parameter value, or 0.0 for curves without a parameter.
    pub fn param_default(&self) -> f32 {
        self.param.map_or(0.0, |p| p.default)
    }

    /// Resolve a user-supplied parameter: 0.0 (or non-finite) selects the
    /// default, anything else is clamped into the declared range.
    pub fn clamp_param(&self, value: f32) -> f32 {
        match self.param {
            None => 0.0,
            Some(p) if value == 0.0 || !value.is_finite() => p.default,
            Some(p) => value.clamp(p.min, p.max),
        }
    }
}

impl fmt::Display for ToneMapCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// `fminf(fmaxf(x, lo), hi)`. Unlike [`f32::clamp`], never panics and maps
/// NaN to `lo`.
#[inline]
pub(crate) fn clampf(x: f32, lo: f32, hi: f32) -> f32 {
    x.max(lo).min(hi)
}

/// `lo + (hi - lo) × t`, exact at both ends and constant when `lo == hi`.
#[inline]
pub(crate) fn mix(lo: f32, hi: f32, t: f32) -> f32 {
    if t >= 1.0 {
        hi
    } else {
        lo + (hi - lo) * t
    }
}

/// ITU-R BT.1886 EOTF over a display with black `min` and white `max`.
pub(crate) fn bt1886_eotf(x: f32, min: f32, max: f32) -> f32 {
    let lb = min.max(0.0).powf(1.0 / 2.4);
    let lw = max.max(0.0).powf(1.0 / 2.4);
    ((lw - lb) * x + lb).max(0.0).powf(2.4)
}

/// Inverse of [`bt1886_eotf`]. Values below `min` map to 0.
pub(crate) fn bt1886_oetf(x: f32, min: f32, max: f32) -> f32 {
    let lb = min.max(0.0).powf(1.0 / 2.4);
    let lw = max.max(0.0).powf(1.0 / 2.4);
    ((x.max(0.0).powf(1.0 / 2.4) - lb) / (lw - lb)).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn params() -> CurveParams {
        CurveParams {
            param: 0.0,
            input_min: 0.1,
            input_max: 2.1,
            output_min: 0.05,
            output_max: 1.05,
        }
    }

    #[test]
    fn test_rescale_helpers() {
        let p = params();
        assert!((p.rescale_in(0.1) - 0.0).abs() < EPSILON);
        assert!((p.rescale_in(2.1) - 1.0).abs() < EPSILON);
        assert!((p.rescale(1.1) - 1.0).abs() < EPSILON);
        assert!((p.rescale_out(1.0) - 1.05).abs() < EPSILON);
        assert!((p.rescale_out(0.0) - 0.05).abs() < EPSILON);
    }

    #[test]
    fn test_auto_has_no_function() {
        assert!(CurveKind::Auto.function().is_none());
        assert!(CurveKind::Clip.function().is_some());
    }

    #[test]
    fn test_clamp_param_defaults_and_clamps() {
        let curve = ToneMapCurve {
            name: "test",
            description: "Test curve",
            param: Some(CurveParam {
                name: "Knee",
                min: 0.5,
                default: 1.0,
                max: 2.0,
            }),
            scaling: ScalingKind::Pq,
            kind: CurveKind::Bt2390,
        };
        assert_eq!(curve.clamp_param(0.0), 1.0);
        assert_eq!(curve.clamp_param(f32::NAN), 1.0);
        assert_eq!(curve.clamp_param(0.1), 0.5);
        assert_eq!(curve.clamp_param(5.0), 2.0);
        assert_eq!(curve.clamp_param(1.5), 1.5);
    }

    #[test]
    fn test_bt1886_roundtrip() {
        for x in [0.0, 0.1, 0.5, 0.9, 1.0] {
            let back = bt1886_oetf(bt1886_eotf(x, 0.1, 100.0), 0.1, 100.0);
            assert!((back - x).abs() < 1e-4, "{x} -> {back}");
        }
    }

    #[test]
    fn test_clampf_handles_nan() {
        assert_eq!(clampf(f32::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clampf(2.0, 0.0, 1.0), 1.0);
        assert_eq!(mix(0.2, 0.7, 1.0), 0.7);
        assert_eq!(mix(0.2, 0.7, 0.0), 0.2);
    }
}
