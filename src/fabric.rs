//! The remote-execution fabric (C3): the interface the core consumes from the
//! runtime, plus a thread-backed in-process reference implementation.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::trace;

use crate::error::FabricError;
use crate::iterator::Locality;

/// The three primitives the core requires from a remote-execution runtime.
///
/// A production implementation would ship `kernel` across a process
/// boundary; `LocalFabric` below ships it onto a scoped thread instead,
/// which preserves the contract (one blocking call per kernel dispatch, one
/// join point per batch) without requiring an actual multi-machine runtime.
pub trait ExecutionFabric {
    /// Synchronously invokes `kernel` on `locality` and returns its result.
    fn execute_at_with_ret<F, R>(&self, locality: Locality, kernel: F) -> Result<R, FabricError>
    where
        F: FnOnce() -> R + Send,
        R: Send;

    /// Dispatches `kernel` to every locality in `localities` concurrently,
    /// under a single implicit completion handle, and returns the results in
    /// the same order as `localities`. Blocks until every kernel has
    /// completed (or failed) before returning.
    fn dispatch_batch<F, R>(&self, localities: &[Locality], kernel: F) -> Result<Vec<R>, FabricError>
    where
        F: Fn(Locality) -> R + Sync,
        R: Send;
}

/// An in-process fabric that runs each kernel on a `std::thread::scope`d
/// thread. Localities are abstract indices; the kernels themselves close
/// over whatever locality-local state (e.g. a `DistVec` chunk) they need.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFabric;

impl ExecutionFabric for LocalFabric {
    fn execute_at_with_ret<F, R>(&self, locality: Locality, kernel: F) -> Result<R, FabricError>
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        trace!(target: "shad_rs::fabric", %locality, "execute_at_with_ret");
        panic::catch_unwind(AssertUnwindSafe(kernel)).map_err(|payload| FabricError::KernelPanicked {
            locality,
            message: panic_message(payload),
        })
    }

    fn dispatch_batch<F, R>(&self, localities: &[Locality], kernel: F) -> Result<Vec<R>, FabricError>
    where
        F: Fn(Locality) -> R + Sync,
        R: Send,
    {
        if localities.is_empty() {
            return Err(FabricError::ProtocolViolation(
                "dispatch_batch called with no localities".to_string(),
            ));
        }
        trace!(target: "shad_rs::fabric", count = localities.len(), "dispatch_batch");
        std::thread::scope(|scope| {
            let kernel = &kernel;
            let handles: Vec<_> = localities
                .iter()
                .map(|&locality| {
                    scope.spawn(move || {
                        panic::catch_unwind(AssertUnwindSafe(|| kernel(locality)))
                    })
                })
                .collect();

            let mut results = Vec::with_capacity(handles.len());
            for (locality, handle) in localities.iter().zip(handles) {
                match handle.join() {
                    Ok(Ok(value)) => results.push(value),
                    Ok(Err(payload)) => {
                        return Err(FabricError::KernelPanicked {
                            locality: *locality,
                            message: panic_message(payload),
                        })
                    }
                    Err(_) => {
                        return Err(FabricError::KernelPanicked {
                            locality: *locality,
                            message: "worker thread did not unwind cleanly".to_string(),
                        })
                    }
                }
            }
            trace!(target: "shad_rs::fabric", count = results.len(), "dispatch_batch complete");
            Ok(results)
        })
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_at_with_ret_returns_value() {
        let fabric = LocalFabric;
        let result = fabric.execute_at_with_ret(Locality(0), || 2 + 2);
        assert_eq!(result.unwrap(), 4);
    }

    #[test]
    fn execute_at_with_ret_surfaces_panics() {
        let fabric = LocalFabric;
        let result: Result<(), _> = fabric.execute_at_with_ret(Locality(3), || panic!("boom"));
        match result {
            Err(FabricError::KernelPanicked { locality, message }) => {
                assert_eq!(locality, Locality(3));
                assert_eq!(message, "boom");
            }
            other => panic!("expected KernelPanicked, got {other:?}"),
        }
    }

    #[test]
    fn dispatch_batch_preserves_locality_order() {
        let fabric = LocalFabric;
        let localities = vec![Locality(0), Locality(1), Locality(2)];
        let results = fabric
            .dispatch_batch(&localities, |loc| loc.0 * 10)
            .unwrap();
        assert_eq!(results, vec![0, 10, 20]);
    }

    #[test]
    fn dispatch_batch_rejects_empty_localities() {
        let fabric = LocalFabric;
        let result = fabric.dispatch_batch::<_, ()>(&[], |_| ());
        assert!(matches!(result, Err(FabricError::ProtocolViolation(_))));
    }

    #[test]
    fn dispatch_trace_events_emit_under_a_configured_subscriber() {
        use tracing_subscriber::EnvFilter;

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("shad_rs=trace"))
            .with_test_writer()
            .try_init();

        let fabric = LocalFabric;
        let localities = vec![Locality(0), Locality(1)];
        let results = fabric.dispatch_batch(&localities, |loc| loc.0).unwrap();
        assert_eq!(results, vec![0, 1]);
    }

    #[test]
    fn dispatch_batch_surfaces_first_panic() {
        let fabric = LocalFabric;
        let localities = vec![Locality(0), Locality(1)];
        let result = fabric.dispatch_batch(&localities, |loc| {
            if loc == Locality(1) {
                panic!("locality 1 failed");
            }
            loc.0
        });
        assert!(matches!(result, Err(FabricError::KernelPanicked { .. })));
    }
}
