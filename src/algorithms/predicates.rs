//! `all_of` / `any_of` (C5).
//!
//! Grounded on `shad::impl::all_of` / `shad::impl::any_of`
//! (`non_modifyng_sequence_ops.h` lines 43-162).

use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::DistributedIterator;
use crate::patterns::{folding_map_early_termination, local_map, map};

/// Sequential policy: `folding_map_early_termination`, halting as soon as a
/// locality's local result is `false`. Identity on empty range: `true`.
pub fn all_of_seq<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<bool, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(true);
    }
    folding_map_early_termination(
        first,
        last,
        fabric,
        |first, last, locality, _partial| {
            let lrange = G::local_range(first, last, locality);
            lrange.iter().all(|v| predicate(v))
        },
        |partial: &bool| !*partial,
        true,
    )
}

/// Parallel policy: `map` collects each locality's local `all`, then the
/// coordinator folds the partials with a local reduce. All submitted
/// kernels complete before the boolean is inspected (no early termination).
pub fn all_of_par<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<bool, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(true);
    }
    let partials = map(first, last, fabric, |first, last, locality| {
        let lrange = G::local_range(first, last, locality);
        let sub_results = local_map(&lrange, true, 4, |chunk| chunk.iter().all(|v| predicate(v)));
        sub_results.into_iter().all(|x| x)
    })?;
    Ok(partials.into_iter().all(|x| x))
}

/// Sequential policy: `folding_map_early_termination`, halting as soon as a
/// locality's local result is `true`. Identity on empty range: `false`.
pub fn any_of_seq<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<bool, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(false);
    }
    folding_map_early_termination(
        first,
        last,
        fabric,
        |first, last, locality, _partial| {
            let lrange = G::local_range(first, last, locality);
            lrange.iter().any(|v| predicate(v))
        },
        |partial: &bool| *partial,
        false,
    )
}

/// Parallel policy: `map` collects each locality's local `any`, then the
/// coordinator folds the partials. No early termination.
pub fn any_of_par<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<bool, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(false);
    }
    let partials = map(first, last, fabric, |first, last, locality| {
        let lrange = G::local_range(first, last, locality);
        let sub_results = local_map(&lrange, true, 4, |chunk| chunk.iter().any(|v| predicate(v)));
        sub_results.into_iter().any(|x| x)
    })?;
    Ok(partials.into_iter().any(|x| x))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::container::DistVec;
    use crate::fabric::LocalFabric;

    fn fixture_all_ones() -> Arc<DistVec<i32>> {
        DistVec::from_chunks(vec![vec![1, 1, 1, 1]; 4])
    }

    #[test]
    fn all_of_seq_true_when_every_element_matches() {
        let data = fixture_all_ones();
        let fabric = LocalFabric;
        let result = all_of_seq(&data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        assert!(result);
    }

    #[test]
    fn all_of_seq_false_with_one_mismatch() {
        let data = DistVec::from_chunks(vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ]);
        let fabric = LocalFabric;
        let result = all_of_seq(&data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        assert!(!result);
    }

    #[test]
    fn all_of_par_agrees_with_seq() {
        let data = DistVec::from_chunks(vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ]);
        let fabric = LocalFabric;
        let seq = all_of_seq(&data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        let par = all_of_par(&data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn all_of_on_empty_range_is_true() {
        let data: Arc<DistVec<i32>> = DistVec::from_chunks(vec![vec![]; 4]);
        let fabric = LocalFabric;
        let result = all_of_seq(&data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        assert!(result);
    }

    #[test]
    fn any_of_on_empty_range_is_false() {
        let data: Arc<DistVec<i32>> = DistVec::from_chunks(vec![vec![]; 4]);
        let fabric = LocalFabric;
        let result = any_of_seq(&data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        assert!(!result);
    }

    #[test]
    fn any_of_finds_match() {
        let data = DistVec::from_chunks(vec![
            vec![2, 2, 2, 2],
            vec![2, 2, 2, 2],
            vec![2, 2, 2, 7],
            vec![2, 2, 2, 2],
        ]);
        let fabric = LocalFabric;
        let seq = any_of_seq(&data.begin(), &data.end(), &fabric, |&v| v == 7).unwrap();
        let par = any_of_par(&data.begin(), &data.end(), &fabric, |&v| v == 7).unwrap();
        assert!(seq);
        assert!(par);
    }
}
