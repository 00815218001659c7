//! Row-wise iteration over an output plane
//!
//! Every transform writes its result one row at a time, reading the input
//! buffer only. Rows never overlap, so they can be filled by independent
//! workers when the `parallel` feature is enabled.

/// Call `f(y, row)` for every `row_len`-sized row of `data`.
///
/// `data.len()` must be a multiple of `row_len`; a trailing partial row is
/// passed through as-is.
#[cfg(feature = "parallel")]
pub fn for_each_row_mut<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    use rayon::prelude::*;

    if row_len == 0 {
        return;
    }
    data.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Call `f(y, row)` for every `row_len`-sized row of `data`.
///
/// `data.len()` must be a multiple of `row_len`; a trailing partial row is
/// passed through as-is.
#[cfg(not(feature = "parallel"))]
pub fn for_each_row_mut<T, F>(data: &mut [T], row_len: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }
    data.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}
