//! The public algorithm façade (C6).
//!
//! One function per algorithm, taking an [`ExecutionPolicy`] as its first
//! argument and forwarding to the sequential or parallel implementation in
//! `crate::algorithms` selected by a single `match`. No other runtime
//! dispatch occurs (§4.6). Every function returns `Result<T, DistError>`.

use std::sync::Arc;

use crate::algorithms::{counters, for_each as for_each_impl, minmax, predicates, search, transform as transform_impl};
use crate::container::DistVec;
use crate::error::DistError;
use crate::fabric::ExecutionFabric;
use crate::iterator::{DistributedIterator, Locality};
use crate::policy::ExecutionPolicy;

/// `true` iff `predicate` holds for every element of `[first, last)`.
/// `true` on an empty range.
pub fn all_of<G, Fab, P>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<bool, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => predicates::all_of_seq(first, last, fabric, predicate)?,
        ExecutionPolicy::ParByLocality => predicates::all_of_par(first, last, fabric, predicate)?,
    })
}

/// `true` iff `predicate` holds for at least one element of `[first, last)`.
/// `false` on an empty range.
pub fn any_of<G, Fab, P>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<bool, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => predicates::any_of_seq(first, last, fabric, predicate)?,
        ExecutionPolicy::ParByLocality => predicates::any_of_par(first, last, fabric, predicate)?,
    })
}

/// The iterator to the first element matching `predicate`, or `last`.
pub fn find_if<G, Fab, P>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => search::find_if_seq(first, last, fabric, predicate)?,
        ExecutionPolicy::ParByLocality => search::find_if_par(first, last, fabric, predicate)?,
    })
}

/// The iterator to the first element *not* matching `predicate`, or `last`.
pub fn find_if_not<G, Fab, P>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => search::find_if_not_seq(first, last, fabric, predicate)?,
        ExecutionPolicy::ParByLocality => search::find_if_not_par(first, last, fabric, predicate)?,
    })
}

/// The iterator to the first element equal to `target`, or `last`.
pub fn find<G, Fab>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, target: G::Value) -> Result<G, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    G::Value: PartialEq,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => search::find_seq(first, last, fabric, target)?,
        ExecutionPolicy::ParByLocality => search::find_par(first, last, fabric, target)?,
    })
}

/// Applies `kernel` to every element of `[first, last)` for side effects.
pub fn for_each<G, Fab, F>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, kernel: F) -> Result<(), DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    F: Fn(&G::Value) + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => for_each_impl::for_each_seq(first, last, fabric, kernel)?,
        ExecutionPolicy::ParByLocality => for_each_impl::for_each_par(first, last, fabric, kernel)?,
    })
}

/// The count of elements matching `predicate`. `0` on an empty range.
pub fn count_if<G, Fab, P>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, predicate: P) -> Result<G::Difference, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    P: Fn(&G::Value) -> bool + Sync,
    G::Difference: From<i8>,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => counters::count_if_seq(first, last, fabric, predicate)?,
        ExecutionPolicy::ParByLocality => counters::count_if_par(first, last, fabric, predicate)?,
    })
}

/// The count of elements equal to `target`. `0` on an empty range.
pub fn count<G, Fab>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, target: G::Value) -> Result<G::Difference, DistError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    G::Value: PartialEq,
    G::Difference: From<i8>,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => counters::count_seq(first, last, fabric, target)?,
        ExecutionPolicy::ParByLocality => counters::count_par(first, last, fabric, target)?,
    })
}

/// The iterator to the first maximum under `cmp`, or `last` on an empty range.
pub fn max_element_by<G, Fab, C>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<G, DistError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => minmax::max_element_seq(first, last, fabric, cmp)?,
        ExecutionPolicy::ParByLocality => minmax::max_element_par(first, last, fabric, cmp)?,
    })
}

/// [`max_element_by`] using `PartialOrd` as the comparator.
pub fn max_element<G, Fab>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab) -> Result<G, DistError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    max_element_by(policy, first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// The iterator to the first minimum under `cmp`, or `last` on an empty range.
pub fn min_element_by<G, Fab, C>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<G, DistError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => minmax::min_element_seq(first, last, fabric, cmp)?,
        ExecutionPolicy::ParByLocality => minmax::min_element_par(first, last, fabric, cmp)?,
    })
}

/// [`min_element_by`] using `PartialOrd` as the comparator.
pub fn min_element<G, Fab>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab) -> Result<G, DistError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    min_element_by(policy, first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// The iterators to the first minimum and last maximum under `cmp`, or
/// `(last, last)` on an empty range.
pub fn minmax_element_by<G, Fab, C>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<(G, G), DistError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => minmax::minmax_element_seq(first, last, fabric, cmp)?,
        ExecutionPolicy::ParByLocality => minmax::minmax_element_par(first, last, fabric, cmp)?,
    })
}

/// [`minmax_element_by`] using `PartialOrd` as the comparator.
pub fn minmax_element<G, Fab>(policy: ExecutionPolicy, first: &G, last: &G, fabric: &Fab) -> Result<(G, G), DistError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    minmax_element_by(policy, first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// Writes `op(v)` for every `v` in `src` into the matching slot of `dst`.
/// `src` and `dst` must share the same partitioning.
pub fn transform<T, U, Fab, F>(policy: ExecutionPolicy, src: &Arc<DistVec<T>>, dst: &Arc<DistVec<U>>, fabric: &Fab, op: F) -> Result<(), DistError>
where
    T: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
    Fab: ExecutionFabric,
    F: Fn(&T) -> U + Sync,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => transform_impl::transform_seq(src, dst, fabric, op)?,
        ExecutionPolicy::ParByLocality => transform_impl::transform_par(src, dst, fabric, op)?,
    })
}

/// Overwrites every element of `data` with a locality-seeded generator's
/// output. See [`crate::algorithms::transform::generate_seq`].
pub fn generate<T, Fab, MakeGen, Gen>(policy: ExecutionPolicy, data: &Arc<DistVec<T>>, fabric: &Fab, make_gen: MakeGen) -> Result<(), DistError>
where
    T: Send + Sync + 'static,
    Fab: ExecutionFabric,
    MakeGen: Fn(Locality) -> Gen + Sync,
    Gen: FnMut() -> T,
{
    Ok(match policy {
        ExecutionPolicy::SeqByLocality => transform_impl::generate_seq(data, fabric, make_gen)?,
        ExecutionPolicy::ParByLocality => transform_impl::generate_par(data, fabric, make_gen)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::LocalFabric;

    fn fixture() -> Arc<DistVec<i32>> {
        DistVec::from_chunks(vec![
            vec![1, 1, 1, 1],
            vec![1, 0, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ])
    }

    #[test]
    fn all_of_dispatches_by_policy() {
        let data = fixture();
        let fabric = LocalFabric;
        let seq = all_of(ExecutionPolicy::SeqByLocality, &data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        let par = all_of(ExecutionPolicy::ParByLocality, &data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
        assert!(!seq);
        assert_eq!(seq, par);
    }

    #[test]
    fn find_dispatches_by_policy() {
        let data = fixture();
        let fabric = LocalFabric;
        let seq = find(ExecutionPolicy::SeqByLocality, &data.begin(), &data.end(), &fabric, 0).unwrap();
        let par = find(ExecutionPolicy::ParByLocality, &data.begin(), &data.end(), &fabric, 0).unwrap();
        assert_eq!(seq, par);
        assert_ne!(seq, data.end());
    }

    #[test]
    fn max_element_matches_explicit_comparator() {
        let data = DistVec::from_chunks(vec![vec![3, 1, 4, 1], vec![5, 9, 2, 6]]);
        let fabric = LocalFabric;
        let default_max = max_element(ExecutionPolicy::SeqByLocality, &data.begin(), &data.end(), &fabric).unwrap();
        let by_max = max_element_by(ExecutionPolicy::SeqByLocality, &data.begin(), &data.end(), &fabric, |a: &i32, b: &i32| a < b).unwrap();
        assert_eq!(default_max, by_max);
    }

    #[test]
    fn transform_and_generate_dispatch_by_policy() {
        let src = DistVec::from_chunks(vec![vec![1, 2], vec![3, 4]]);
        let dst: Arc<DistVec<i32>> = DistVec::from_chunks(vec![vec![0, 0], vec![0, 0]]);
        let fabric = LocalFabric;
        transform(ExecutionPolicy::ParByLocality, &src, &dst, &fabric, |v| v * 10).unwrap();
        assert_eq!(dst.to_vec(), vec![10, 20, 30, 40]);

        generate(ExecutionPolicy::SeqByLocality, &dst, &fabric, |locality| move || locality.0 as i32).unwrap();
        assert_eq!(dst.to_vec(), vec![0, 0, 1, 1]);
    }
}
