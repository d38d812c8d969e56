//! `min_element` / `max_element` / `minmax_element` (C5).
//!
//! Grounded on `minimum_maximum_ops.h` in full. The coordinator combines
//! per-locality partials in locality order (§4.5, §8 invariant 5):
//! `max_element` keeps the *first* maximum, `min_element` keeps the *first*
//! minimum, `minmax_element` keeps the first minimum and the *last* maximum.
//!
//! The source's min-element combine step reuses the max comparator call
//! (`comp(min, it->second)`), which for a less-than comparator *replaces* on
//! a strictly greater candidate — a bug (see SPEC_FULL.md §9). This
//! implementation replaces only when the candidate is strictly less under
//! `cmp`, which is the semantically correct rule.

use crate::error::FabricError;
use crate::fabric::ExecutionFabric;
use crate::iterator::{DistributedIterator, Locality};

type Cmp<V> = dyn Fn(&V, &V) -> bool + Sync;

fn local_max<G: DistributedIterator>(first: &G, last: &G, locality: Locality, cmp: &Cmp<G::Value>) -> (G, G::Value)
where
    G::Value: Clone,
{
    let lrange = G::local_range(first, last, locality);
    let mut best = 0usize;
    for i in 1..lrange.len() {
        if cmp(&lrange[best], &lrange[i]) {
            best = i;
        }
    }
    (G::iterator_from_local(first, last, locality, best), lrange[best].clone())
}

fn local_min<G: DistributedIterator>(first: &G, last: &G, locality: Locality, cmp: &Cmp<G::Value>) -> (G, G::Value)
where
    G::Value: Clone,
{
    let lrange = G::local_range(first, last, locality);
    let mut best = 0usize;
    for i in 1..lrange.len() {
        if cmp(&lrange[i], &lrange[best]) {
            best = i;
        }
    }
    (G::iterator_from_local(first, last, locality, best), lrange[best].clone())
}

type MinMaxResult<G, V> = (G, G, V, V);

fn local_minmax<G: DistributedIterator>(first: &G, last: &G, locality: Locality, cmp: &Cmp<G::Value>) -> MinMaxResult<G, G::Value>
where
    G::Value: Clone,
{
    let lrange = G::local_range(first, last, locality);
    let mut min_idx = 0usize;
    let mut max_idx = 0usize;
    for i in 1..lrange.len() {
        if cmp(&lrange[i], &lrange[min_idx]) {
            min_idx = i;
        }
        if !cmp(&lrange[i], &lrange[max_idx]) {
            max_idx = i;
        }
    }
    (
        G::iterator_from_local(first, last, locality, min_idx),
        G::iterator_from_local(first, last, locality, max_idx),
        lrange[min_idx].clone(),
        lrange[max_idx].clone(),
    )
}

fn run_seq<G, Fab, R, K>(first: &G, last: &G, fabric: &Fab, kernel: K) -> Result<Vec<R>, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    R: Send,
    K: Fn(&G, &G, Locality) -> R + Sync,
{
    let kernel = &kernel;
    let mut results = Vec::new();
    for locality in G::localities(first, last) {
        let (first_c, last_c) = (first.clone(), last.clone());
        results.push(fabric.execute_at_with_ret(locality, move || kernel(&first_c, &last_c, locality))?);
    }
    Ok(results)
}

fn run_par<G, Fab, R, K>(first: &G, last: &G, fabric: &Fab, kernel: K) -> Result<Vec<R>, FabricError>
where
    G: DistributedIterator,
    Fab: ExecutionFabric,
    R: Send,
    K: Fn(&G, &G, Locality) -> R + Sync,
{
    let localities = G::localities(first, last);
    fabric.dispatch_batch(&localities, |locality| kernel(first, last, locality))
}

/// Sequential policy, explicit comparator. `last` on an empty range.
pub fn max_element_seq<G, Fab, C>(first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(last.clone());
    }
    let cmp: &Cmp<G::Value> = &cmp;
    let results = run_seq(first, last, fabric, |f, l, loc| local_max::<G>(f, l, loc, cmp))?;
    combine_max(results, cmp)
}

/// Parallel policy, explicit comparator.
pub fn max_element_par<G, Fab, C>(first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(last.clone());
    }
    let cmp: &Cmp<G::Value> = &cmp;
    let results = run_par(first, last, fabric, |f, l, loc| local_max::<G>(f, l, loc, cmp))?;
    combine_max(results, cmp)
}

fn combine_max<G, V>(results: Vec<(G, V)>, cmp: &Cmp<V>) -> Result<G, FabricError> {
    let mut iter = results.into_iter();
    let (mut best_it, mut best_val) = iter
        .next()
        .ok_or_else(|| FabricError::ProtocolViolation("localities() returned nothing for a non-empty range".into()))?;
    for (it, val) in iter {
        if cmp(&best_val, &val) {
            best_it = it;
            best_val = val;
        }
    }
    Ok(best_it)
}

/// Sequential policy, explicit comparator. `last` on an empty range.
pub fn min_element_seq<G, Fab, C>(first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(last.clone());
    }
    let cmp: &Cmp<G::Value> = &cmp;
    let results = run_seq(first, last, fabric, |f, l, loc| local_min::<G>(f, l, loc, cmp))?;
    combine_min(results, cmp)
}

/// Parallel policy, explicit comparator.
pub fn min_element_par<G, Fab, C>(first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok(last.clone());
    }
    let cmp: &Cmp<G::Value> = &cmp;
    let results = run_par(first, last, fabric, |f, l, loc| local_min::<G>(f, l, loc, cmp))?;
    combine_min(results, cmp)
}

fn combine_min<G, V>(results: Vec<(G, V)>, cmp: &Cmp<V>) -> Result<G, FabricError> {
    let mut iter = results.into_iter();
    let (mut best_it, mut best_val) = iter
        .next()
        .ok_or_else(|| FabricError::ProtocolViolation("localities() returned nothing for a non-empty range".into()))?;
    for (it, val) in iter {
        if cmp(&val, &best_val) {
            best_it = it;
            best_val = val;
        }
    }
    Ok(best_it)
}

/// Sequential policy, explicit comparator. `(last, last)` on an empty range.
pub fn minmax_element_seq<G, Fab, C>(first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<(G, G), FabricError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok((last.clone(), last.clone()));
    }
    let cmp: &Cmp<G::Value> = &cmp;
    let results = run_seq(first, last, fabric, |f, l, loc| local_minmax::<G>(f, l, loc, cmp))?;
    combine_minmax(results, cmp)
}

/// Parallel policy, explicit comparator.
pub fn minmax_element_par<G, Fab, C>(first: &G, last: &G, fabric: &Fab, cmp: C) -> Result<(G, G), FabricError>
where
    G: DistributedIterator,
    G::Value: Clone,
    Fab: ExecutionFabric,
    C: Fn(&G::Value, &G::Value) -> bool + Sync,
{
    if *first == *last {
        return Ok((last.clone(), last.clone()));
    }
    let cmp: &Cmp<G::Value> = &cmp;
    let results = run_par(first, last, fabric, |f, l, loc| local_minmax::<G>(f, l, loc, cmp))?;
    combine_minmax(results, cmp)
}

fn combine_minmax<G, V>(results: Vec<(G, G, V, V)>, cmp: &Cmp<V>) -> Result<(G, G), FabricError> {
    let mut iter = results.into_iter();
    let (mut min_it, mut max_it, mut min_val, mut max_val) = iter
        .next()
        .ok_or_else(|| FabricError::ProtocolViolation("localities() returned nothing for a non-empty range".into()))?;
    for (next_min_it, next_max_it, next_min_val, next_max_val) in iter {
        if cmp(&next_min_val, &min_val) {
            min_it = next_min_it;
            min_val = next_min_val;
        }
        if !cmp(&next_max_val, &max_val) {
            max_it = next_max_it;
            max_val = next_max_val;
        }
    }
    Ok((min_it, max_it))
}

/// `max_element` without an explicit comparator, using `PartialOrd`.
pub fn max_element_default_seq<G, Fab>(first: &G, last: &G, fabric: &Fab) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    max_element_seq(first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// See [`max_element_default_seq`].
pub fn max_element_default_par<G, Fab>(first: &G, last: &G, fabric: &Fab) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    max_element_par(first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// `min_element` without an explicit comparator, using `PartialOrd`.
pub fn min_element_default_seq<G, Fab>(first: &G, last: &G, fabric: &Fab) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    min_element_seq(first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// See [`min_element_default_seq`].
pub fn min_element_default_par<G, Fab>(first: &G, last: &G, fabric: &Fab) -> Result<G, FabricError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    min_element_par(first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// `minmax_element` without an explicit comparator, using `PartialOrd`.
pub fn minmax_element_default_seq<G, Fab>(first: &G, last: &G, fabric: &Fab) -> Result<(G, G), FabricError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    minmax_element_seq(first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

/// See [`minmax_element_default_seq`].
pub fn minmax_element_default_par<G, Fab>(first: &G, last: &G, fabric: &Fab) -> Result<(G, G), FabricError>
where
    G: DistributedIterator,
    G::Value: Clone + PartialOrd,
    Fab: ExecutionFabric,
{
    minmax_element_par(first, last, fabric, |a: &G::Value, b: &G::Value| a < b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::DistVec;
    use crate::fabric::LocalFabric;

    fn fixture() -> std::sync::Arc<DistVec<i32>> {
        DistVec::from_chunks(vec![
            vec![3, 1, 4, 1],
            vec![5, 9, 2, 6],
            vec![5, 3, 5, 8],
            vec![9, 7, 9, 3],
        ])
    }

    #[test]
    fn max_element_returns_first_maximum() {
        let data = fixture();
        let fabric = LocalFabric;
        let found = max_element_default_seq(&data.begin(), &data.end(), &fabric).unwrap();
        let expected = crate::container::GlobalIter::iterator_from_local(&data.begin(), &data.end(), crate::iterator::Locality(1), 1);
        assert_eq!(found, expected);
    }

    #[test]
    fn minmax_element_returns_first_min_and_last_max() {
        let data = fixture();
        let fabric = LocalFabric;
        let (min_it, max_it) = minmax_element_default_par(&data.begin(), &data.end(), &fabric).unwrap();
        let expected_min = crate::container::GlobalIter::iterator_from_local(&data.begin(), &data.end(), crate::iterator::Locality(0), 1);
        let expected_max = crate::container::GlobalIter::iterator_from_local(&data.begin(), &data.end(), crate::iterator::Locality(3), 2);
        assert_eq!(min_it, expected_min);
        assert_eq!(max_it, expected_max);
    }

    #[test]
    fn seq_and_par_agree_on_min_max() {
        let data = fixture();
        let fabric = LocalFabric;
        let max_seq = max_element_default_seq(&data.begin(), &data.end(), &fabric).unwrap();
        let max_par = max_element_default_par(&data.begin(), &data.end(), &fabric).unwrap();
        assert_eq!(max_seq, max_par);
        let min_seq = min_element_default_seq(&data.begin(), &data.end(), &fabric).unwrap();
        let min_par = min_element_default_par(&data.begin(), &data.end(), &fabric).unwrap();
        assert_eq!(min_seq, min_par);
    }

    #[test]
    fn min_element_on_empty_range_is_last() {
        let data: std::sync::Arc<DistVec<i32>> = DistVec::from_chunks(vec![vec![]; 3]);
        let fabric = LocalFabric;
        let found = min_element_default_seq(&data.begin(), &data.end(), &fabric).unwrap();
        assert_eq!(found, data.end());
    }
}
