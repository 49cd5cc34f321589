//! Tonal Core: HDR/SDR dynamic-range tone mapping.
//!
//! Converts luminance between scalings and compresses (or expands) a
//! luminance range with a selectable curve, producing either a full 1D LUT
//! or a single sample. Pure numeric code: no I/O, no shared mutable state.
//!
//! ```
//! use tonal_core::{generate, registry, ScalingKind, ToneMapParams};
//!
//! let params = ToneMapParams {
//!     curve: registry::lookup("bt2390"),
//!     input_scaling: ScalingKind::Nits,
//!     output_scaling: ScalingKind::Nits,
//!     input_max: 1000.0,
//!     output_max: 203.0,
//!     lut_size: 64,
//!     ..Default::default()
//! };
//! let lut = generate(&params);
//! assert_eq!(lut.len(), 64);
//! ```

pub mod curves;
pub mod error;
pub mod parallel;
pub mod registry;
pub mod scaling;
pub mod transform;

// Re-exports for convenience.
pub use curves::{CurveKind, CurveParam, CurveParams, ToneMapCurve, ToneMapFunction};
pub use error::ToneMapError;
pub use scaling::{convert, ScalingKind, SDR_WHITE_NITS};
pub use transform::auto::select_auto;
pub use transform::engine::{generate, generate_into, sample};
pub use transform::params::{equal, is_noop, ToneMapParams};
