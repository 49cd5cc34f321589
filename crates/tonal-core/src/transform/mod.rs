//! Mapping pipeline: configuration, curve resolution, and LUT/sample evaluation.

pub mod auto;
pub mod engine;
pub mod params;
