//! Sample-wise dispatch with an automatic sequential/parallel split.
//!
//! Every LUT entry depends only on its own input position and the shared,
//! immutable curve parameters, so large batches are mapped with rayon.
//! Small batches (and single samples) stay on the calling thread, where
//! thread-pool overhead would dominate.

use rayon::prelude::*;

/// Minimum number of samples before work is split across threads.
pub const PARALLEL_THRESHOLD: usize = 4096;

/// Replace every value in `values` with `f(value)`.
///
/// The result is identical whether the batch runs sequentially or in
/// parallel.
pub fn map_samples<F>(values: &mut [f32], f: F)
where
    F: Fn(f32) -> f32 + Sync + Send,
{
    if values.len() >= PARALLEL_THRESHOLD {
        values.par_iter_mut().for_each(|v| *v = f(*v));
    } else {
        for v in values.iter_mut() {
            *v = f(*v);
        }
    }
}

/// Fill `values` with `f(index)`.
pub fn fill_indexed<F>(values: &mut [f32], f: F)
where
    F: Fn(usize) -> f32 + Sync + Send,
{
    if values.len() >= PARALLEL_THRESHOLD {
        values
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, v)| *v = f(i));
    } else {
        for (i, v) in values.iter_mut().enumerate() {
            *v = f(i);
        }
    }
}
