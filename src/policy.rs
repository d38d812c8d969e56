//! Execution policy tags (C1).
//!
//! A policy selects *how* the core traverses localities; it never selects the
//! local algorithm used inside a locality, which is always the sequential
//! standard iterator adapter.

/// Dispatch discipline across localities.
///
/// Carries no state: the two variants exist purely to steer which algorithm
/// layer (C5) implementation the façade (C6) forwards a call to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionPolicy {
    /// Visit localities one at a time, on the coordinator's thread, in strict
    /// locality order.
    SeqByLocality,
    /// Dispatch all localities concurrently under a single completion
    /// handle, then combine results in locality order.
    ParByLocality,
}
