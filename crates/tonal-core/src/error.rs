/// Errors surfaced at the configuration boundary.
///
/// Mapping itself never fails: out-of-contract inputs are clamped. These
/// variants only cover name lookups and configuration parsing.
#[derive(Debug, thiserror::Error)]
pub enum ToneMapError {
    #[error("unknown tone-mapping curve: {0}")]
    UnknownCurve(String),
    #[error("unknown HDR scaling: {0}")]
    UnknownScaling(String),
    #[error("invalid tone-mapping config: {0}")]
    Config(#[from] serde_json::Error),
}
