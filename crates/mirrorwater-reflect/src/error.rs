//! Error type shared by the reflection lifecycle operations.

/// Failures surfaced by registration, lifecycle, and configuration checks.
///
/// Geometry in the per-frame path never produces these; invalid numbers flow
/// through as NaN instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReflectionError {
    /// Malformed geometric input, e.g. an empty boundary or a non-unit normal.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The object or component is not in a state that allows the operation.
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// The host could not provide a render target or clip primitive.
    #[error("resource unavailable: {0}")]
    ResourceUnavailable(String),
}
