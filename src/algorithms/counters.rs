//! `count` / `count_if` (C5).
//!
//! Grounded on `shad::impl::count` / `count_if`
//! (`non_modifyng_sequence_ops.h` lines 420-550). Identity on empty: `0`.
//! Sum is associative, so the choice between `folding_map` (sequential) and
//! `map` (parallel) is purely a policy choice, not a correctness requirement
//! (§8, invariant 6).

use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::DistributedIterator;
use crate::patterns::{folding_map, map};

/// Sequential policy: sums partials via `folding_map`.
pub fn count_if_seq<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G::Difference, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
    G::Difference: From<i8>,
{
    folding_map(
        first,
        last,
        fabric,
        |first, last, locality, acc| {
            let lrange = G::local_range(first, last, locality);
            let local_count: G::Difference = lrange
                .iter()
                .filter(|v| predicate(v))
                .fold(G::Difference::default(), |sum, _| sum + G::Difference::from(1));
            acc + local_count
        },
        G::Difference::default(),
    )
}

/// Parallel policy: sums partials via `map`, combined in locality order.
pub fn count_if_par<G, Fab, P>(first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G::Difference, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
    G::Difference: From<i8>,
{
    if *first == *last {
        return Ok(G::Difference::default());
    }
    let partials = map(first, last, fabric, |first, last, locality| {
        let lrange = G::local_range(first, last, locality);
        lrange
            .iter()
            .filter(|v| predicate(v))
            .fold(G::Difference::default(), |sum, _| sum + G::Difference::from(1))
    })?;
    Ok(partials.into_iter().fold(G::Difference::default(), |a, b| a + b))
}

/// `count` is `count_if` against equality with a target value.
pub fn count_seq<G, Fab>(first: &G, last: &G, fabric: &Fab, target: G::Value) -> Result<G::Difference, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    G::Value: PartialEq,
    G::Difference: From<i8>,
{
    count_if_seq(first, last, fabric, move |v| *v == target)
}

/// See [`count_seq`].
pub fn count_par<G, Fab>(first: &G, last: &G, fabric: &Fab, target: G::Value) -> Result<G::Difference, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    G::Value: PartialEq,
    G::Difference: From<i8>,
{
    count_if_par(first, last, fabric, move |v| *v == target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::DistVec;
    use crate::fabric::LocalFabric;

    #[test]
    fn count_all_twos() {
        let data = DistVec::from_chunks(vec![vec![2, 2, 2, 2]; 4]);
        let fabric = LocalFabric;
        let seq = count_seq(&data.begin(), &data.end(), &fabric, 2).unwrap();
        let par = count_par(&data.begin(), &data.end(), &fabric, 2).unwrap();
        assert_eq!(seq, 16);
        assert_eq!(par, 16);
    }

    #[test]
    fn count_on_empty_is_zero() {
        let data: std::sync::Arc<DistVec<i32>> = DistVec::from_chunks(vec![vec![]; 4]);
        let fabric = LocalFabric;
        let seq = count_seq(&data.begin(), &data.end(), &fabric, 2).unwrap();
        let par = count_par(&data.begin(), &data.end(), &fabric, 2).unwrap();
        assert_eq!(seq, 0);
        assert_eq!(par, 0);
    }

    #[test]
    fn count_if_counts_matching_predicate() {
        let data = DistVec::from_chunks(vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8]]);
        let fabric = LocalFabric;
        let evens = count_if_seq(&data.begin(), &data.end(), &fabric, |&v| v % 2 == 0).unwrap();
        assert_eq!(evens, 4);
    }
}
