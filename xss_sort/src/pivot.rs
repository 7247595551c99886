use crate::network::{sort_n, sort_vec};
use crate::{coex, SimdCompare, SimdSortable};

/// Ranges longer than this take the pivot from a median-of-5 register network.
const PIVOT_BLOCKS_MIN_LEN: usize = 1024;

/// Median of 8 equally spaced samples.
#[inline]
pub(crate) fn get_pivot<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(data: &[T]) -> T {
    debug_assert!(!data.is_empty());
    let delta = data.len() / 8;
    let mut samples = [data[0]; 8];
    for (i, sample) in samples.iter_mut().enumerate() {
        *sample = data[i * delta];
    }
    sort_n::<T, N, U>(&mut samples);
    samples[4]
}

/// Pivot from five registers loaded at even offsets. Corresponding lanes are
/// run through a median-of-5 network, the median register is sorted and its
/// middle lane returned.
pub(crate) fn get_pivot_blocks<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &[T],
) -> T {
    if data.len() <= PIVOT_BLOCKS_MIN_LEN {
        return get_pivot::<T, N, U>(data);
    }

    let delta = (data.len() - N) / 5;
    let mut vecs = [U::set(T::MIN_VALUE); 5];
    for (i, vec) in vecs.iter_mut().enumerate() {
        *vec = U::loadu(&data[i * delta..]);
    }

    // optimal 5-element sorting network
    for (a, b) in [
        (0, 3),
        (1, 4),
        (0, 2),
        (1, 3),
        (0, 1),
        (2, 4),
        (1, 2),
        (3, 4),
        (2, 3),
    ] {
        let (lo, hi) = vecs.split_at_mut(b);
        coex(&mut lo[a], &mut hi[0]);
    }

    let median = sort_vec::<T, N, U>(vecs[2]);
    U::get_value_at_idx(median, N / 2)
}
