//! `find` / `find_if` / `find_if_not` (C5).
//!
//! Grounded on `shad::impl::find` / `find_if` / `find_if_not`
//! (`non_modifyng_sequence_ops.h` lines 164-372). Identity on empty range or
//! not-found: `last`. The returned iterator always denotes the *first*
//! matching position in global order (§8, invariant 4).

use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::DistributedIterator;
use crate::patterns::{folding_map_early_termination, map};

/// Sequential policy: short-circuits as soon as a locality reports a match,
/// by construction returning the first match in global order.
pub fn find_if_seq<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(last.clone());
    }
    folding_map_early_termination(
        first,
        last,
        fabric,
        |first, last, locality, partial| {
            let lrange = G::local_range(first, last, locality);
            match lrange.iter().position(|v| predicate(v)) {
                Some(pos) => G::iterator_from_local(first, last, locality, pos),
                None => partial,
            }
        },
        |partial: &G| *partial != *last,
        last.clone(),
    )
}

/// Parallel policy: every locality's kernel runs to completion; the
/// coordinator scans results *in locality order* and returns the first
/// non-`last` entry, never a later locality's match even if it finished
/// first.
pub fn find_if_par<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(last.clone());
    }
    let results = map(first, last, fabric, |first, last, locality| {
        let lrange = G::local_range(first, last, locality);
        match lrange.iter().position(|v| predicate(v)) {
            Some(pos) => G::iterator_from_local(first, last, locality, pos),
            None => last.clone(),
        }
    })?;
    Ok(results
        .into_iter()
        .find(|candidate| *candidate != *last)
        .unwrap_or_else(|| last.clone()))
}

/// `find_if_not` is `find_if` with the predicate inverted at the call site.
pub fn find_if_not_seq<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    find_if_seq(first, last, fabric, move |v| !predicate(v))
}

/// See [`find_if_not_seq`].
pub fn find_if_not_par<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    find_if_par(first, last, fabric, move |v| !predicate(v))
}

/// `find` is `find_if` against equality with a target value.
pub fn find_seq<G, Fab>(first: &G, last: &G, fabric: &Fab, target: G::Value) -> Result<G, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    G::Value: PartialEq,
{
    find_if_seq(first, last, fabric, move |v| *v == target)
}

/// See [`find_seq`].
pub fn find_par<G, Fab>(first: &G, last: &G, fabric: &Fab, target: G::Value) -> Result<G, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    G::Value: PartialEq,
{
    find_if_par(first, last, fabric, move |v| *v == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::DistVec;
    use crate::fabric::LocalFabric;

    fn fixture() -> std::sync::Arc<DistVec<i32>> {
        DistVec::from_chunks(vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ])
    }

    #[test]
    fn find_par_agrees_with_seq_on_unique_match() {
        let data = fixture();
        let fabric = LocalFabric;
        let found = find_par(&data.begin(), &data.end(), &fabric, 0).unwrap();
        let seq_found = find_seq(&data.begin(), &data.end(), &fabric, 0).unwrap();
        assert_eq!(found, seq_found);
        assert_ne!(found, data.end());
    }

    #[test]
    fn find_seq_on_empty_is_last() {
        let data: std::sync::Arc<DistVec<i32>> = DistVec::from_chunks(vec![vec![]; 4]);
        let fabric = LocalFabric;
        let found = find_seq(&data.begin(), &data.end(), &fabric, 0).unwrap();
        assert_eq!(found, data.end());
    }

    #[test]
    fn find_not_found_is_last() {
        let data = fixture();
        let fabric = LocalFabric;
        let found = find_seq(&data.begin(), &data.end(), &fabric, 99).unwrap();
        assert_eq!(found, data.end());
    }

    #[test]
    fn find_if_seq_and_par_agree() {
        let data = DistVec::from_chunks(vec![
            vec![3, 1, 4, 1],
            vec![5, 9, 2, 6],
            vec![5, 3, 5, 8],
            vec![9, 7, 9, 3],
        ]);
        let fabric = LocalFabric;
        let seq = find_if_seq(&data.begin(), &data.end(), &fabric, |&v| v == 9).unwrap();
        let par = find_if_par(&data.begin(), &data.end(), &fabric, |&v| v == 9).unwrap();
        assert_eq!(seq, par);
    }
}
