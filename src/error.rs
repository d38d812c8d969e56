//! Error types surfaced by the fabric and propagated, unmodified, to callers.

use thiserror::Error;

use crate::iterator::Locality;

/// Failures originating in the execution fabric.
///
/// The core performs no retries and has no partial-failure mode: a locality
/// that fails causes the whole algorithm call to return `Err`.
#[derive(Debug, Error)]
pub enum FabricError {
    /// A kernel panicked while running on the named locality.
    #[error("kernel panicked on {locality}: {message}")]
    KernelPanicked {
        /// The locality the kernel was dispatched to.
        locality: Locality,
        /// The panic payload, downcast to a string where possible.
        message: String,
    },
    /// The fabric or iterator trait violated a contract the core relies on
    /// (e.g. `localities()` returned nothing for a non-empty range). This is
    /// a programming error, not a transient failure.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),
}

/// The single public error type for every algorithm façade entry point.
#[derive(Debug, Error)]
pub enum DistError {
    /// A failure in kernel dispatch or completion.
    #[error(transparent)]
    Fabric(#[from] FabricError),
}
