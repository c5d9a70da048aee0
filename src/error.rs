//! Error types for diagram construction.

/// Errors that can occur while building a diagram.
///
/// Degenerate geometry (parallel bisectors, edges that fall outside the boundary) and queries for
/// points that are not sites are not errors: they produce empty results.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoronoiError {
    /// The sweep reached a state its invariants rule out. The diagram is discarded.
    #[error("sweep invariant violated: {0}")]
    Invariant(&'static str),

    /// A configured tolerance is not a finite positive number.
    #[error("invalid {name} tolerance: {value} (must be finite and positive)")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Result type alias for diagram operations.
pub type Result<T> = std::result::Result<T, VoronoiError>;
