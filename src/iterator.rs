//! The distributed iterator trait (C2).
//!
//! Implementations translate an opaque global range into the localities that
//! cover it, the local sub-range a given locality owns, and the inverse
//! mapping from a local position back to a global one.

use std::fmt;
use std::ops::Deref;

/// Identifies a single locality (machine/process) in the totally ordered set
/// `L0 < L1 < ... < L(k-1)` that partitions a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Locality(pub usize);

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Maps a global range to per-locality local ranges and back.
///
/// `Self` is the global iterator type. A global iterator is an opaque handle:
/// comparable for equality, and dereferenceable only on the locality that
/// owns its element.
///
/// The classical `(local_begin, local_end)` pair collapses here into a
/// single dereferenceable `LocalRange` slice, since a Rust slice already
/// encodes both endpoints; `local_index` values passed to
/// `iterator_from_local` are offsets from the *start* of that slice, with
/// `local_index == local_range.len()` denoting the local end position.
///
/// Contract: `local_range` is a pure function of `(first, last,
/// current_locality)`. Calling it on any non-owner locality must return an
/// empty range; the core treats that locality as contributing nothing.
pub trait DistributedIterator: Sized + Clone + PartialEq + Send + Sync + 'static {
    /// The element type addressed by this iterator.
    type Value: Send + Sync + 'static;
    /// The signed integer type used for counts and distances.
    type Difference: Send + Copy + Default + std::ops::Add<Output = Self::Difference> + 'static;
    /// The dereferenceable view of a locality's slice of `[first, last)`.
    type LocalRange: Deref<Target = [Self::Value]> + Send + Sync;

    /// The minimum set of localities covering `[first, last)`, in owner
    /// order. Never empty for a non-empty range.
    fn localities(first: &Self, last: &Self) -> Vec<Locality>;

    /// This locality's slice of `[first, last)`, executed *on* `locality`.
    /// Possibly empty if `locality` holds no element within the range's
    /// endpoints.
    fn local_range(first: &Self, last: &Self, locality: Locality) -> Self::LocalRange;

    /// The inverse of `local_range`'s slicing: promotes `local_index` (an
    /// offset from the start of `local_range(first, last, locality)`) back
    /// to a global iterator denoting the same element.
    ///
    /// If `local_index` equals the local range's length, the result equals
    /// `last` only when `locality` is the last owner; otherwise it equals
    /// the next locality's local-begin-lifted iterator.
    fn iterator_from_local(first: &Self, last: &Self, locality: Locality, local_index: usize) -> Self;
}
