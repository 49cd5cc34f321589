//! Luminance scalings and the conversions between them.
//!
//! Every tone-mapping curve declares the scaling it operates in. The engine
//! uses [`convert`] to move sample positions and range extrema into that
//! scaling and back out again.
//!
//! All conversions pivot through relative (`Norm`) luminance:
//!
//! ```text
//! Norm  ↔ Nits:  nits = norm × 203
//! Norm  ↔ Sqrt:  sqrt = √norm,  norm = sqrt²
//! Nits  ↔ PQ:    SMPTE ST 2084 inverse EOTF / EOTF
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToneMapError;
use crate::parallel::map_samples;

/// Luminance of SDR reference white, in cd/m² (ITU-R BT.2408).
pub const SDR_WHITE_NITS: f32 = 203.0;

/// Peak luminance representable by PQ, in cd/m².
pub const PQ_MAX_NITS: f32 = 10000.0;

// SMPTE ST 2084 constants.
const PQ_M1: f64 = 2610.0 / 16384.0;
const PQ_M2: f64 = 2523.0 / 32.0;
const PQ_C1: f64 = 3424.0 / 4096.0;
const PQ_C2: f64 = 2413.0 / 128.0;
const PQ_C3: f64 = 2392.0 / 128.0;

/// The representation a luminance value is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingKind {
    /// Relative luminance. 0.0 is absolute black, 1.0 is SDR reference white.
    #[default]
    Norm,
    /// Square root of `Norm`. Spreads values perceptually, which reduces
    /// banding in small LUTs.
    Sqrt,
    /// Absolute luminance in cd/m².
    Nits,
    /// ST 2084 code value in `[0, 1]`, covering `[0, 10000]` cd/m².
    Pq,
}

impl ScalingKind {
    /// All scalings, in declaration order.
    pub const ALL: [ScalingKind; 4] = [Self::Norm, Self::Sqrt, Self::Nits, Self::Pq];

    /// Short lower-case identifier, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Norm => "norm",
            Self::Sqrt => "sqrt",
            Self::Nits => "nits",
            Self::Pq => "pq",
        }
    }

    /// Human-readable label for UI menus.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Norm => "Relative (SDR white = 1.0)",
            Self::Sqrt => "Square-root relative",
            Self::Nits => "Absolute (cd/m²)",
            Self::Pq => "PQ (ST 2084)",
        }
    }

    /// Upper bound of the representable domain, i.e. 10000 cd/m² expressed
    /// in this scaling. The lower bound is always 0.
    pub fn max_value(self) -> f32 {
        match self {
            Self::Norm => PQ_MAX_NITS / SDR_WHITE_NITS,
            Self::Sqrt => (PQ_MAX_NITS / SDR_WHITE_NITS).sqrt(),
            Self::Nits => PQ_MAX_NITS,
            Self::Pq => 1.0,
        }
    }

    /// Clamp `value` into `[0, max_value()]`. NaN becomes 0.
    pub fn clamp(self, value: f32) -> f32 {
        if value.is_nan() {
            return 0.0;
        }
        value.max(0.0).min(self.max_value())
    }
}

impl fmt::Display for ScalingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalingKind {
    type Err = ToneMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToneMapError::UnknownScaling(s.to_string()))
    }
}

/// Convert a luminance value between scalings.
///
/// Out-of-domain input (negative, NaN, brighter than 10000 cd/m²) is clamped
/// to the domain of `from` before conversion, so the result is always finite
/// and within the domain of `to`. Zero maps to zero in every scaling.
pub fn convert(value: f32, from: ScalingKind, to: ScalingKind) -> f32 {
    let x = from.clamp(value);
    if from == to || x == 0.0 {
        return x;
    }
    let norm = to_norm(x as f64, from);
    to.clamp(from_norm(norm, to) as f32)
}

/// Convert every value in `values` in place. See [`convert`].
pub fn convert_slice(values: &mut [f32], from: ScalingKind, to: ScalingKind) {
    map_samples(values, |v| convert(v, from, to));
}

fn to_norm(x: f64, from: ScalingKind) -> f64 {
    match from {
        ScalingKind::Norm => x,
        ScalingKind::Sqrt => x * x,
        ScalingKind::Nits => x / SDR_WHITE_NITS as f64,
        ScalingKind::Pq => pq_to_nits(x) / SDR_WHITE_NITS as f64,
    }
}

fn from_norm(x: f64, to: ScalingKind) -> f64 {
    match to {
        ScalingKind::Norm => x,
        ScalingKind::Sqrt => x.max(0.0).sqrt(),
        ScalingKind::Nits => x * SDR_WHITE_NITS as f64,
        ScalingKind::Pq => nits_to_pq(x * SDR_WHITE_NITS as f64),
    }
}

// ---------------------------------------------------------------------------
// SMPTE ST 2084 (PQ)
// ---------------------------------------------------------------------------

/// PQ EOTF: code value in `[0, 1]` to absolute luminance in cd/m².
///
/// ```text
/// E' = E^(1/m2)
/// Y  = (max(E' − c1, 0) / (c2 − c3 × E'))^(1/m1) × 10000
/// ```
pub fn pq_to_nits(pq: f64) -> f64 {
    let e = pq.clamp(0.0, 1.0).powf(1.0 / PQ_M2);
    let num = (e - PQ_C1).max(0.0);
    let den = PQ_C2 - PQ_C3 * e;
    (num / den).powf(1.0 / PQ_M1) * PQ_MAX_NITS as f64
}

/// PQ inverse EOTF: absolute luminance in cd/m² to a code value in `[0, 1]`.
///
/// ```text
/// Y' = (Y / 10000)^m1
/// E  = ((c1 + c2 × Y') / (1 + c3 × Y'))^m2
/// ```
///
/// Zero luminance maps to code value 0 rather than `c1^m2`, keeping the
/// conversion an exact inverse of [`pq_to_nits`] at black.
pub fn nits_to_pq(nits: f64) -> f64 {
    let y = (nits / PQ_MAX_NITS as f64).clamp(0.0, 1.0);
    if y <= 0.0 {
        return 0.0;
    }
    let ym = y.powf(PQ_M1);
    ((PQ_C1 + PQ_C2 * ym) / (1.0 + PQ_C3 * ym)).powf(PQ_M2)
}
