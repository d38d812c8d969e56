//! Distributed generic sequence algorithms over partitioned containers.
//!
//! The core decomposes an opaque global range into per-locality local
//! ranges (`iterator`), ships small kernels to the locality that owns each
//! range through a remote-execution fabric (`fabric`), and combines the
//! partial results deterministically (`patterns`, `algorithms`). Every
//! algorithm is available under both execution policies (`policy`) through
//! the public façade (`facade`).
//!
//! ```
//! use shad_rs::{all_of, policy::ExecutionPolicy, DistVec, LocalFabric};
//!
//! let data = DistVec::from_chunks(vec![vec![1, 1], vec![1, 1]]);
//! let fabric = LocalFabric;
//! let result = all_of(ExecutionPolicy::SeqByLocality, &data.begin(), &data.end(), &fabric, |&v| v == 1).unwrap();
//! assert!(result);
//! ```

pub mod algorithms;
pub mod container;
pub mod error;
pub mod fabric;
pub mod facade;
pub mod iterator;
pub mod patterns;
pub mod policy;

pub use container::DistVec;
pub use error::{DistError, FabricError};
pub use fabric::{ExecutionFabric, LocalFabric};
pub use facade::{
    all_of, any_of, count, count_if, find, find_if, find_if_not, for_each, generate, max_element, max_element_by, min_element,
    min_element_by, minmax_element, minmax_element_by, transform,
};
pub use iterator::{DistributedIterator, Locality};
pub use policy::ExecutionPolicy;
