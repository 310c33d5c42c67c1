//! Interior-point update driver.
//!
//! Every interior point of the next level depends only on the retained
//! levels, which are read-only during the update. The driver can therefore
//! split the interior into contiguous chunks and fill them on scoped worker
//! threads; the end of the scope is the barrier between steps. Each point
//! is computed by the same closure either way, so the output does not
//! depend on the chunking.

use std::thread;

/// Thread fan-out for the interior update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parallelism {
    /// Worker threads per step. `0` and `1` both mean sequential.
    pub workers: usize,
    /// Grids with fewer points than this are always updated sequentially.
    pub threshold: usize,
}

impl Parallelism {
    /// Default minimum grid size before threads are used.
    pub const DEFAULT_THRESHOLD: usize = 4096;

    /// Always update on the calling thread.
    pub const fn sequential() -> Self {
        Self {
            workers: 1,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Whether a grid of `nx` points is split across threads.
    pub fn is_parallel_for(&self, nx: usize) -> bool {
        self.workers > 1 && nx >= self.threshold
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::sequential()
    }
}

/// Fill `out[1..n-1]` with `point(i)` for every interior index `i`.
///
/// Endpoints are left untouched; the caller imposes boundary values.
pub fn update_interior<F>(out: &mut [f64], parallelism: Parallelism, point: F)
where
    F: Fn(usize) -> f64 + Sync,
{
    let n = out.len();
    if n < 3 {
        return;
    }
    let interior = &mut out[1..n - 1];

    if !parallelism.is_parallel_for(n) {
        for (k, v) in interior.iter_mut().enumerate() {
            *v = point(k + 1);
        }
        return;
    }

    let chunk_len = interior.len().div_ceil(parallelism.workers);
    let point = &point;
    thread::scope(|scope| {
        for (c, chunk) in interior.chunks_mut(chunk_len).enumerate() {
            let first = 1 + c * chunk_len;
            scope.spawn(move || {
                for (k, v) in chunk.iter_mut().enumerate() {
                    *v = point(first + k);
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_untouched() {
        let mut out = vec![-1.0; 6];
        update_interior(&mut out, Parallelism::sequential(), |i| i as f64);
        assert_eq!(out, vec![-1.0, 1.0, 2.0, 3.0, 4.0, -1.0]);
    }

    #[test]
    fn short_grids_are_noop() {
        let mut out = vec![7.0, 8.0];
        update_interior(&mut out, Parallelism::sequential(), |_| 0.0);
        assert_eq!(out, vec![7.0, 8.0]);
    }

    #[test]
    fn chunked_update_matches_sequential() {
        let point = |i: usize| (i as f64 * 0.37).sin() / (1.0 + i as f64);
        let mut seq = vec![0.0; 1001];
        update_interior(&mut seq, Parallelism::sequential(), point);

        for workers in [2, 3, 7, 64] {
            let mut par = vec![0.0; 1001];
            let p = Parallelism {
                workers,
                threshold: 0,
            };
            assert!(p.is_parallel_for(1001));
            update_interior(&mut par, p, point);
            assert_eq!(par, seq, "workers={workers}");
        }
    }

    #[test]
    fn below_threshold_stays_sequential() {
        let p = Parallelism {
            workers: 8,
            threshold: 100,
        };
        assert!(!p.is_parallel_for(99));
        assert!(p.is_parallel_for(100));
        assert!(!Parallelism::sequential().is_parallel_for(1_000_000));
    }
}
