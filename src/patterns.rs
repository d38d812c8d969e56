//! The pattern layer (C4): the five higher-order combinators every concrete
//! algorithm is built from, plus their locality-local analogues.

use tracing::trace;

use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::{DistributedIterator, Locality};

/// Serial fold over localities, in order: `init <- kernel(first, last,
/// locality, init)` for each locality. Returns the final accumulator.
pub fn folding_map<G, Fab, S, K>(first: &G, last: &G, fabric: &Fab, kernel: K, init: S) -> Result<S, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    S: Send + Clone,
    K: Fn(&G, &G, Locality, S) -> S + Sync,
{
    let kernel = &kernel;
    let mut acc = init;
    for locality in G::localities(first, last) {
        let (first, last) = (first.clone(), last.clone());
        let step = acc.clone();
        acc = fabric.execute_at_with_ret(locality, move || kernel(&first, &last, locality, step))?;
    }
    Ok(acc)
}

/// Like [`folding_map`], but after each locality's update `halt(&acc)` is
/// evaluated on the coordinator; if true, no further localities are visited
/// and the current accumulator is returned.
pub fn folding_map_early_termination<G, Fab, S, K, H>(
    first: &G,
    last: &G,
    fabric: &Fab,
    kernel: K,
    halt: H,
    init: S,
) -> Result<S, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    S: Send + Clone,
    K: Fn(&G, &G, Locality, S) -> S + Sync,
    H: Fn(&S) -> bool,
{
    let kernel = &kernel;
    let mut acc = init;
    for locality in G::localities(first, last) {
        let (first_c, last_c) = (first.clone(), last.clone());
        let step = acc.clone();
        acc = fabric.execute_at_with_ret(locality, move || kernel(&first_c, &last_c, locality, step))?;
        if halt(&acc) {
            trace!(target: "shad_rs::pattern", %locality, "folding_map_early_termination halted");
            break;
        }
    }
    Ok(acc)
}

/// Serial, side-effecting fold over localities in order. No return value.
pub fn folding_map_void<G, Fab, K>(first: &G, last: &G, fabric: &Fab, kernel: K) -> Result<(), FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    K: Fn(&G, &G, Locality) + Sync,
{
    let kernel = &kernel;
    for locality in G::localities(first, last) {
        let (first, last) = (first.clone(), last.clone());
        fabric.execute_at_with_ret(locality, move || kernel(&first, &last, locality))?;
    }
    Ok(())
}

/// Parallel map over localities: dispatches one kernel per locality under a
/// single completion handle, and returns the results in locality order.
pub fn map<G, Fab, R, K>(first: &G, last: &G, fabric: &Fab, kernel: K) -> Result<Vec<R>, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    R: Send,
    K: Fn(&G, &G, Locality) -> R + Sync,
{
    let localities = G::localities(first, last);
    fabric.dispatch_batch(&localities, |locality| kernel(first, last, locality))
}

/// Parallel, side-effecting map over localities. No return value; awaited
/// before returning.
pub fn map_void<G, Fab, K>(first: &G, last: &G, fabric: &Fab, kernel: K) -> Result<(), FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    K: Fn(&G, &G, Locality) + Sync,
{
    let localities = G::localities(first, last);
    fabric.dispatch_batch(&localities, |locality| kernel(first, last, locality))?;
    Ok(())
}

/// The locality-local analogue of [`map`]: splits `local` into `num_chunks`
/// pieces and applies `kernel` to each, either thread-parallel or serially
/// depending on `parallel`. This level is policy-free; the caller picks
/// `parallel` according to its own execution policy.
pub fn local_map<T, R, K>(local: &[T], parallel: bool, num_chunks: usize, kernel: K) -> Vec<R>
where
    T: Sync,
    R: Send,
    K: Fn(&[T]) -> R + Sync,
{
    let num_chunks = num_chunks.max(1);
    if local.is_empty() {
        return vec![kernel(local)];
    }
    let chunk_size = local.len().div_ceil(num_chunks);
    let chunks: Vec<&[T]> = local.chunks(chunk_size).collect();
    if parallel && chunks.len() > 1 {
        std::thread::scope(|scope| {
            let kernel = &kernel;
            let handles: Vec<_> = chunks.iter().map(|&c| scope.spawn(move || kernel(c))).collect();
            handles.into_iter().map(|h| h.join().expect("local worker thread panicked")).collect()
        })
    } else {
        chunks.iter().map(|&c| kernel(c)).collect()
    }
}

/// The locality-local analogue of [`map_void`].
pub fn local_map_void<T, K>(local: &[T], parallel: bool, num_chunks: usize, kernel: K)
where
    T: Sync,
    K: Fn(&[T]) + Sync,
{
    local_map(local, parallel, num_chunks, |chunk| kernel(chunk));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_map_serial_matches_parallel() {
        let data: Vec<i32> = (0..17).collect();
        let serial = local_map(&data, false, 4, |chunk| chunk.iter().sum::<i32>());
        let parallel = local_map(&data, true, 4, |chunk| chunk.iter().sum::<i32>());
        assert_eq!(serial.iter().sum::<i32>(), parallel.iter().sum::<i32>());
        assert_eq!(serial.iter().sum::<i32>(), 16 * 17 / 2);
    }

    #[test]
    fn local_map_handles_empty_slice() {
        let data: Vec<i32> = Vec::new();
        let result = local_map(&data, true, 4, |chunk| chunk.len());
        assert_eq!(result, vec![0]);
    }
}
