//! Tone-mapping configuration, comparison and no-op detection.
//!
//! `ToneMapParams` is the single value a caller hands to the engine. It owns
//! no resources and is consumed synchronously; the engine never mutates it.

use serde::{Deserialize, Serialize};

use crate::curves::{CurveKind, ToneMapCurve};
use crate::error::ToneMapError;
use crate::scaling::{convert, ScalingKind};
use crate::transform::auto::resolve_curve;

/// Relative tolerance for the range comparisons in [`ToneMapParams::is_noop`].
const NOOP_TOLERANCE: f32 = 1e-6;

/// A tone-mapping configuration.
///
/// All extrema are expressed in the configuration's own scalings
/// (`input_scaling` for the input pair, `output_scaling` for the output
/// pair), not in the curve's native scaling.
///
/// Serializes with the curve as its name (`null` for none) and scalings as
/// lower-case names. Missing fields take their [`Default`] values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ToneMapParams {
    /// Curve to apply. `None` means [`CLIP`](crate::registry::CLIP).
    #[serde(with = "curve_by_name")]
    pub curve: Option<&'static ToneMapCurve>,
    /// Curve parameter. 0.0 selects the curve's default; other values are
    /// clamped to the curve's range.
    pub param: f32,
    pub input_scaling: ScalingKind,
    pub output_scaling: ScalingKind,
    /// Number of entries produced by [`generate`](crate::transform::engine::generate).
    pub lut_size: usize,
    pub input_min: f32,
    pub input_max: f32,
    pub output_min: f32,
    pub output_max: f32,
}

impl Default for ToneMapParams {
    /// Produces a no-op configuration: clip over identical `[0, 1]` ranges.
    fn default() -> Self {
        Self {
            curve: None,
            param: 0.0,
            input_scaling: ScalingKind::Norm,
            output_scaling: ScalingKind::Norm,
            lut_size: 256,
            input_min: 0.0,
            input_max: 1.0,
            output_min: 0.0,
            output_max: 1.0,
        }
    }
}

impl ToneMapParams {
    /// Compare two configurations.
    ///
    /// Curves are compared by identity, not by content: two distinct
    /// [`ToneMapCurve`] descriptors are never equal, even with identical
    /// fields, and `None` is distinct from an explicit `clip`. All numeric
    /// fields use exact equality.
    pub fn equal(&self, other: &Self) -> bool {
        let same_curve = match (self.curve, other.curve) {
            (None, None) => true,
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            _ => false,
        };

        same_curve
            && self.param == other.param
            && self.input_scaling == other.input_scaling
            && self.output_scaling == other.output_scaling
            && self.lut_size == other.lut_size
            && self.input_min == other.input_min
            && self.input_max == other.input_max
            && self.output_min == other.output_min
            && self.output_max == other.output_max
    }

    /// Whether mapping would leave every in-range sample unchanged, so the
    /// caller can skip the engine entirely.
    ///
    /// True when the effective curve is `clip` and the output range contains
    /// the input range. Out-of-range inputs would still be clipped by the
    /// engine.
    pub fn is_noop(&self) -> bool {
        let p = self.normalized();
        if resolve_curve(&p).kind != CurveKind::Clip {
            return false;
        }

        let in_min = convert(p.input_min, p.input_scaling, ScalingKind::Nits);
        let in_max = convert(p.input_max, p.input_scaling, ScalingKind::Nits);
        let out_min = convert(p.output_min, p.output_scaling, ScalingKind::Nits);
        let out_max = convert(p.output_max, p.output_scaling, ScalingKind::Nits);

        approx_le(out_min, in_min) && approx_le(in_max, out_max)
    }

    /// A copy with every extremum made admissible: NaN and negative values
    /// become 0, values beyond 10000 cd/m² are clamped, and each min/max
    /// pair is put in order.
    pub fn normalized(&self) -> Self {
        let (input_min, input_max) = ordered(
            self.input_scaling.clamp(self.input_min),
            self.input_scaling.clamp(self.input_max),
        );
        let (output_min, output_max) = ordered(
            self.output_scaling.clamp(self.output_min),
            self.output_scaling.clamp(self.output_max),
        );
        Self {
            input_min,
            input_max,
            output_min,
            output_max,
            ..*self
        }
    }

    /// The concrete curve the engine will run: `clip` when none is set,
    /// the auto-selected curve for `auto`.
    pub fn effective_curve(&self) -> &'static ToneMapCurve {
        resolve_curve(&self.normalized())
    }

    /// The parameter value the engine will pass to the effective curve.
    ///
    /// `auto` always runs its pick with that curve's default parameter.
    pub fn effective_param(&self) -> f32 {
        self.param_for(self.effective_curve())
    }

    /// Parameter to run `resolved` with, given this configuration's curve
    /// choice.
    pub(crate) fn param_for(&self, resolved: &ToneMapCurve) -> f32 {
        if self.curve.is_some_and(ToneMapCurve::is_auto) {
            resolved.param_default()
        } else {
            resolved.clamp_param(self.param)
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ToneMapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration to JSON.
    pub fn to_json(&self) -> Result<String, ToneMapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl PartialEq for ToneMapParams {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

/// Free-function form of [`ToneMapParams::equal`].
pub fn equal(a: &ToneMapParams, b: &ToneMapParams) -> bool {
    a.equal(b)
}

/// Free-function form of [`ToneMapParams::is_noop`].
pub fn is_noop(params: &ToneMapParams) -> bool {
    params.is_noop()
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn approx_le(a: f32, b: f32) -> bool {
    a <= b + NOOP_TOLERANCE * b.abs().max(1.0)
}

/// Serializes a curve reference as its registry name.
mod curve_by_name {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::curves::ToneMapCurve;
    use crate::registry;

    pub fn serialize<S>(curve: &Option<&'static ToneMapCurve>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match curve {
            Some(curve) => serializer.serialize_some(curve.name),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<&'static ToneMapCurve>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|name| registry::find(&name).map_err(serde::de::Error::custom))
            .transpose()
    }
}
