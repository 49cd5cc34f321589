//! Built-in tone-mapping curve catalog.
//!
//! The catalog is plain `static` data: no initialization, no locking, safe to
//! read from any thread. Entries are never mutated, so `&'static` references
//! into it double as curve identities (see [`ToneMapParams::equal`]).
//!
//! [`ToneMapParams::equal`]: crate::transform::params::ToneMapParams::equal

use crate::curves::{CurveKind, CurveParam, ToneMapCurve};
use crate::error::ToneMapError;
use crate::scaling::ScalingKind;

/// Automatically pick a concrete curve from the input and output peaks.
/// Has no routine of its own.
pub static AUTO: ToneMapCurve = ToneMapCurve {
    name: "auto",
    description: "Automatic selection",
    param: None,
    scaling: ScalingKind::Norm,
    kind: CurveKind::Auto,
};

/// No tone mapping, just clips out-of-range values. Default when a
/// configuration names no curve.
pub static CLIP: ToneMapCurve = ToneMapCurve {
    name: "clip",
    description: "No tone mapping (clip)",
    param: None,
    scaling: ScalingKind::Norm,
    kind: CurveKind::Clip,
};

pub static BT2390: ToneMapCurve = ToneMapCurve {
    name: "bt2390",
    description: "ITU-R BT.2390 EETF",
    param: Some(CurveParam {
        name: "Knee offset",
        min: 0.50,
        default: 1.00,
        max: 2.00,
    }),
    scaling: ScalingKind::Pq,
    kind: CurveKind::Bt2390,
};

pub static BT2446A: ToneMapCurve = ToneMapCurve {
    name: "bt2446a",
    description: "ITU-R BT.2446 Method A",
    param: None,
    scaling: ScalingKind::Pq,
    kind: CurveKind::Bt2446a,
};

pub static SPLINE: ToneMapCurve = ToneMapCurve {
    name: "spline",
    description: "Single-pivot polynomial spline",
    param: Some(CurveParam {
        name: "Pivot point",
        min: 0.15,
        default: 0.30,
        max: 0.80,
    }),
    scaling: ScalingKind::Pq,
    kind: CurveKind::Spline,
};

pub static REINHARD: ToneMapCurve = ToneMapCurve {
    name: "reinhard",
    description: "Reinhard",
    param: Some(CurveParam {
        name: "Contrast",
        min: 0.001,
        default: 0.50,
        max: 0.99,
    }),
    scaling: ScalingKind::Norm,
    kind: CurveKind::Reinhard,
};

pub static MOBIUS: ToneMapCurve = ToneMapCurve {
    name: "mobius",
    description: "Mobius",
    param: Some(CurveParam {
        name: "Knee point",
        min: 0.00,
        default: 0.30,
        max: 0.99,
    }),
    scaling: ScalingKind::Norm,
    kind: CurveKind::Mobius,
};

pub static HABLE: ToneMapCurve = ToneMapCurve {
    name: "hable",
    description: "Filmic tone-mapping (Hable)",
    param: None,
    scaling: ScalingKind::Norm,
    kind: CurveKind::Hable,
};

pub static GAMMA: ToneMapCurve = ToneMapCurve {
    name: "gamma",
    description: "Gamma function with knee",
    param: Some(CurveParam {
        name: "Cutoff",
        min: 0.001,
        default: 0.50,
        max: 1.00,
    }),
    scaling: ScalingKind::Norm,
    kind: CurveKind::Gamma,
};

pub static LINEAR: ToneMapCurve = ToneMapCurve {
    name: "linear",
    description: "Perceptually linear stretch",
    param: Some(CurveParam {
        name: "Exposure",
        min: 0.001,
        default: 1.00,
        max: 10.0,
    }),
    scaling: ScalingKind::Pq,
    kind: CurveKind::Linear,
};

static CURVES: [&ToneMapCurve; 10] = [
    &AUTO, &CLIP, &BT2390, &BT2446A, &SPLINE, &REINHARD, &MOBIUS, &HABLE, &GAMMA, &LINEAR,
];

/// Every built-in curve, in fixed catalog order (`auto` first).
pub fn list() -> &'static [&'static ToneMapCurve] {
    &CURVES
}

/// Number of built-in curves, including `auto`.
pub fn count() -> usize {
    CURVES.len()
}

/// Find a built-in curve by exact name. Unknown names yield `None`; no
/// default is substituted.
pub fn lookup(name: &str) -> Option<&'static ToneMapCurve> {
    CURVES.iter().copied().find(|curve| curve.name == name)
}

/// Like [`lookup`], but reports a miss as [`ToneMapError::UnknownCurve`].
pub fn find(name: &str) -> Result<&'static ToneMapCurve, ToneMapError> {
    lookup(name).ok_or_else(|| ToneMapError::UnknownCurve(name.to_string()))
}
