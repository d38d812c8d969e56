//! `transform` / `generate` (C5, supplemented from `original_source/examples/pi/pi.cc`'s
//! per-locality Monte Carlo sampling pattern — not part of the original
//! sequence-algorithm header, but a natural sibling of `for_each` built on the
//! same pattern layer).
//!
//! Unlike the read-only algorithms above, these mutate a [`DistVec`] in
//! place, so they are expressed directly against it rather than against the
//! generic `DistributedIterator` trait: the trait has no write operation,
//! only [`write_local`] does. `transform` requires `src` and `dst` to share
//! the same partitioning (same chunk layout); `generate` mutates in place.

use std::sync::Arc;

use crate::container::{write_local, DistVec, GlobalIter};
use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::{DistributedIterator, Locality};
use crate::patterns::{folding_map_void, map_void};

/// Sequential policy: visits localities in order, applying `op` to every
/// element of `src` and writing the result into the matching slot of `dst`.
pub fn transform_seq<T, U, Fab, F>(src: &Arc<DistVec<T>>, dst: &Arc<DistVec<U>>, fabric: &Fab, op: F) -> Result<(), FabricError>
where
    T: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
    Fab: ExecutionFabric,
    F: Fn(&T) -> U + Sync,
{
    assert_eq!(src.len(), dst.len(), "transform requires src and dst to share the same partitioning");
    let first = src.begin();
    let last = src.end();
    folding_map_void(&first, &last, fabric, |first, last, locality| {
        let lrange = GlobalIter::local_range(first, last, locality);
        for (i, v) in lrange.iter().enumerate() {
            write_local(dst, locality, i, op(v));
        }
    })
}

/// Parallel policy: dispatches all localities concurrently.
pub fn transform_par<T, U, Fab, F>(src: &Arc<DistVec<T>>, dst: &Arc<DistVec<U>>, fabric: &Fab, op: F) -> Result<(), FabricError>
where
    T: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
    Fab: ExecutionFabric,
    F: Fn(&T) -> U + Sync,
{
    assert_eq!(src.len(), dst.len(), "transform requires src and dst to share the same partitioning");
    let first = src.begin();
    let last = src.end();
    if first == last {
        return Ok(());
    }
    map_void(&first, &last, fabric, |first, last, locality| {
        let lrange = GlobalIter::local_range(first, last, locality);
        for (i, v) in lrange.iter().enumerate() {
            write_local(dst, locality, i, op(v));
        }
    })
}

/// Sequential policy: for each locality, `make_gen(locality)` builds a
/// locality-local generator (seeded however the caller likes — per
/// `pi.cc`, typically by locality index), which is then called once per
/// element of that locality's slice to overwrite it in place.
pub fn generate_seq<T, Fab, MakeGen, Gen>(data: &Arc<DistVec<T>>, fabric: &Fab, make_gen: MakeGen) -> Result<(), FabricError>
where
    T: Send + Sync + 'static,
    Fab: ExecutionFabric,
    MakeGen: Fn(Locality) -> Gen + Sync,
    Gen: FnMut() -> T,
{
    let first = data.begin();
    let last = data.end();
    folding_map_void(&first, &last, fabric, |first, last, locality| {
        let len = GlobalIter::local_range(first, last, locality).len();
        let mut gen = make_gen(locality);
        for i in 0..len {
            write_local(data, locality, i, gen());
        }
    })
}

/// Parallel policy: dispatches all localities concurrently; each locality
/// seeds and runs its own generator independently, with no cross-locality
/// reproducibility guarantee (Non-goal: numerical-floating-point-reproducible
/// reductions covers this family too).
pub fn generate_par<T, Fab, MakeGen, Gen>(data: &Arc<DistVec<T>>, fabric: &Fab, make_gen: MakeGen) -> Result<(), FabricError>
where
    T: Send + Sync + 'static,
    Fab: ExecutionFabric,
    MakeGen: Fn(Locality) -> Gen + Sync,
    Gen: FnMut() -> T,
{
    let first = data.begin();
    let last = data.end();
    if first == last {
        return Ok(());
    }
    map_void(&first, &last, fabric, |first, last, locality| {
        let len = GlobalIter::local_range(first, last, locality).len();
        let mut gen = make_gen(locality);
        for i in 0..len {
            write_local(data, locality, i, gen());
        }
    })
}
