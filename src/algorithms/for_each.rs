//! `for_each` (C5).
//!
//! Grounded on `shad::impl::for_each` (`non_modifyng_sequence_ops.h` lines
//! 374-418). No return. Within a locality, element visitation order matches
//! the local range's order; across localities in parallel mode, order is
//! unspecified.

use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::DistributedIterator;
use crate::patterns::{folding_map_void, local_map_void, map_void};

/// Sequential policy: visits localities in order.
pub fn for_each_seq<G, Fab, F>(first: &G, last: &G, fabric: &Fab, kernel: F) -> Result<(), FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    F: Fn(&G::Value) + Sync,
{
    folding_map_void(first, last, fabric, |first, last, locality| {
        let lrange = G::local_range(first, last, locality);
        local_map_void(&lrange, false, 1, |chunk| chunk.iter().for_each(|v| kernel(v)));
    })
}

/// Parallel policy: dispatches all localities concurrently.
pub fn for_each_par<G, Fab, F>(first: &G, last: &G, fabric: &Fab, kernel: F) -> Result<(), FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    F: Fn(&G::Value) + Sync,
{
    if *first == *last {
        return Ok(());
    }
    map_void(first, last, fabric, |first, last, locality| {
        let lrange = G::local_range(first, last, locality);
        local_map_void(&lrange, true, 4, |chunk| chunk.iter().for_each(|v| kernel(v)));
    })
}
