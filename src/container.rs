//! A minimal in-process reference container (C7) implementing
//! [`DistributedIterator`](crate::iterator::DistributedIterator).
//!
//! `DistVec<T>` partitions a fixed-size sequence into contiguous,
//! near-equal chunks across a configured number of localities. It exists so
//! the algorithm layer is independently testable without a production
//! distributed container; downstream users with their own partitioned
//! container need only implement the trait themselves.

use std::sync::{Arc, Mutex};

use crate::iterator::{DistributedIterator, Locality};

/// A fixed-size sequence of `T`, partitioned across localities.
///
/// Chunk boundaries never change after construction (no resizing after
/// submission, consistent with the Non-goals around dynamic redistribution
/// and elastic membership).
#[derive(Debug)]
pub struct DistVec<T> {
    chunks: Vec<Mutex<Vec<T>>>,
    /// `offsets[i]` is the flat index at which chunk `i` begins;
    /// `offsets[chunks.len()]` equals `total_len`.
    offsets: Vec<usize>,
    total_len: usize,
}

impl<T> DistVec<T> {
    /// Builds a container from already-partitioned chunks, one per locality.
    pub fn from_chunks(chunks: Vec<Vec<T>>) -> Arc<Self> {
        let mut offsets = Vec::with_capacity(chunks.len() + 1);
        let mut acc = 0;
        for chunk in &chunks {
            offsets.push(acc);
            acc += chunk.len();
        }
        offsets.push(acc);
        let total_len = acc;
        Arc::new(Self {
            chunks: chunks.into_iter().map(Mutex::new).collect(),
            offsets,
            total_len,
        })
    }

    /// Splits `data` into `locality_count` contiguous, near-equal chunks.
    ///
    /// `locality_count` must be at least 1. The split favors giving earlier
    /// localities the extra elements when `data.len()` does not divide
    /// evenly, matching the common "first k localities get one more"
    /// partitioning convention.
    pub fn partitioned(data: Vec<T>, locality_count: usize) -> Arc<Self> {
        assert!(locality_count >= 1, "locality_count must be at least 1");
        let len = data.len();
        let base = len / locality_count;
        let remainder = len % locality_count;
        let mut chunks = Vec::with_capacity(locality_count);
        let mut iter = data.into_iter();
        for i in 0..locality_count {
            let size = base + if i < remainder { 1 } else { 0 };
            chunks.push(iter.by_ref().take(size).collect());
        }
        Self::from_chunks(chunks)
    }

    /// Number of localities this container is partitioned across.
    pub fn locality_count(&self) -> usize {
        self.chunks.len()
    }

    /// Total number of elements across all localities.
    pub fn len(&self) -> usize {
        self.total_len
    }

    /// Whether the container holds no elements.
    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    /// The global iterator denoting the first element (or `end()` if empty).
    pub fn begin(self: &Arc<Self>) -> GlobalIter<T> {
        GlobalIter { data: self.clone(), index: 0 }
    }

    /// The past-the-end global iterator.
    pub fn end(self: &Arc<Self>) -> GlobalIter<T> {
        GlobalIter { data: self.clone(), index: self.total_len }
    }

    fn chunk_range(&self, locality: Locality) -> (usize, usize) {
        (self.offsets[locality.0], self.offsets[locality.0 + 1])
    }
}

impl<T: Clone> DistVec<T> {
    /// Clones out the full sequence in global order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.total_len);
        for chunk in &self.chunks {
            out.extend(chunk.lock().expect("chunk mutex poisoned").iter().cloned());
        }
        out
    }
}

/// A global iterator into a [`DistVec`]: an opaque, comparable handle to a
/// single element, usable for addressing but dereferenceable only through
/// [`DistributedIterator::local_range`] on its owning locality.
pub struct GlobalIter<T> {
    data: Arc<DistVec<T>>,
    index: usize,
}

impl<T> Clone for GlobalIter<T> {
    fn clone(&self) -> Self {
        GlobalIter { data: self.data.clone(), index: self.index }
    }
}

impl<T> PartialEq for GlobalIter<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data) && self.index == other.index
    }
}

impl<T> std::fmt::Debug for GlobalIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalIter").field("index", &self.index).finish()
    }
}

impl<T: Clone + Send + Sync + 'static> DistributedIterator for GlobalIter<T> {
    type Value = T;
    type Difference = isize;
    type LocalRange = Vec<T>;

    fn localities(first: &Self, last: &Self) -> Vec<Locality> {
        let data = &first.data;
        let mut result = Vec::new();
        for i in 0..data.locality_count() {
            let (start, end) = data.chunk_range(Locality(i));
            if start.max(first.index) < end.min(last.index) {
                result.push(Locality(i));
            }
        }
        result
    }

    fn local_range(first: &Self, last: &Self, locality: Locality) -> Self::LocalRange {
        let data = &first.data;
        let (chunk_start, chunk_end) = data.chunk_range(locality);
        let window_start = chunk_start.max(first.index);
        let window_end = chunk_end.min(last.index);
        if window_start >= window_end {
            return Vec::new();
        }
        let chunk = data.chunks[locality.0].lock().expect("chunk mutex poisoned");
        chunk[(window_start - chunk_start)..(window_end - chunk_start)].to_vec()
    }

    fn iterator_from_local(first: &Self, last: &Self, locality: Locality, local_index: usize) -> Self {
        let data = &first.data;
        let (chunk_start, chunk_end) = data.chunk_range(locality);
        let window_start = chunk_start.max(first.index);
        let window_end = chunk_end.min(last.index);
        let flat = window_start + local_index;
        if flat < window_end {
            return GlobalIter { data: data.clone(), index: flat };
        }
        // Local end: advance to the first non-empty following locality
        // within [first, last), or to `last` if none remains.
        for i in (locality.0 + 1)..data.locality_count() {
            let (next_start, next_end) = data.chunk_range(Locality(i));
            let candidate = next_start.max(first.index);
            if candidate < next_end.min(last.index) {
                return GlobalIter { data: data.clone(), index: candidate };
            }
        }
        last.clone()
    }
}

/// Overwrites the element at `locality`'s chunk offset `local_index` with
/// `value`. Used by `transform`/`generate`; see [`crate::algorithms::transform`].
pub fn write_local<T>(data: &Arc<DistVec<T>>, locality: Locality, local_index: usize, value: T) {
    let mut chunk = data.chunks[locality.0].lock().expect("chunk mutex poisoned");
    chunk[local_index] = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Arc<DistVec<i32>> {
        DistVec::from_chunks(vec![
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
            vec![1, 1, 1, 1],
        ])
    }

    #[test]
    fn localities_covers_whole_range() {
        let data = fixture();
        let first = data.begin();
        let last = data.end();
        let locs = GlobalIter::localities(&first, &last);
        assert_eq!(locs, vec![Locality(0), Locality(1), Locality(2), Locality(3)]);
    }

    #[test]
    fn local_range_is_empty_on_non_owner_intersection() {
        let data = DistVec::from_chunks(vec![vec![10, 20], vec![30, 40]]);
        let first = data.begin();
        let last = GlobalIter { data: data.clone(), index: 1 };
        // Range [0,1) only touches locality 0.
        assert_eq!(GlobalIter::local_range(&first, &last, Locality(0)), vec![10]);
        assert_eq!(GlobalIter::local_range(&first, &last, Locality(1)), Vec::<i32>::new());
    }

    #[test]
    fn iterator_from_local_end_advances_to_next_locality() {
        let data = DistVec::from_chunks(vec![vec![10, 20], vec![], vec![30]]);
        let first = data.begin();
        let last = data.end();
        // Locality 0's local range has length 2; index 2 is its local end.
        let promoted = GlobalIter::iterator_from_local(&first, &last, Locality(0), 2);
        // Locality 1 is empty, so this should land on locality 2's first element.
        assert_eq!(promoted, GlobalIter { data: data.clone(), index: 3 });
    }

    #[test]
    fn iterator_from_local_end_of_last_locality_equals_last() {
        let data = DistVec::from_chunks(vec![vec![10, 20]]);
        let first = data.begin();
        let last = data.end();
        let promoted = GlobalIter::iterator_from_local(&first, &last, Locality(0), 2);
        assert_eq!(promoted, last);
    }

    #[test]
    fn partitioned_favors_earlier_localities_with_remainder() {
        let data = DistVec::partitioned(vec![1, 2, 3, 4, 5], 3);
        assert_eq!(data.locality_count(), 3);
        assert_eq!(data.to_vec(), vec![1, 2, 3, 4, 5]);
    }
}
