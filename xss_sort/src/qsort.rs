use crate::network::sort_n;
use crate::partition::{partition_unrolled, vectorized_partition};
use crate::pivot::get_pivot_blocks;
use crate::{SimdCompare, SimdSortable};

/// Recursion budget for a range of `len` elements.
#[inline]
pub(crate) fn max_iters(len: usize) -> i64 {
    if len < 2 {
        0
    } else {
        2 * len.ilog2() as i64
    }
}

pub(crate) fn insertion_sort<T: SimdSortable>(data: &mut [T]) {
    for k in 1..data.len() {
        let value = data[k];
        if value < data[k - 1] {
            let mut i = k;
            while i > 0 && value < data[i - 1] {
                data[i] = data[i - 1];
                i -= 1;
            }
            data[i] = value;
        }
    }
}

/// Guaranteed `O(n log n)` sort for ranges the pivot heuristic keeps failing on.
#[cold]
pub(crate) fn fallback_sort<T: SimdSortable>(data: &mut [T]) {
    log::trace!(
        "recursion budget exhausted, sorting {} elements with sort_unstable_by",
        data.len()
    );
    data.sort_unstable_by(T::total_cmp);
}

pub(crate) fn qsort_<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    max_iters: i64,
) {
    /*
     * Resort to sort_unstable if quicksort isnt making any progress
     */
    if max_iters <= 0 {
        fallback_sort(data);
        return;
    }
    /*
     * Base case: use bitonic networks to sort small arrays
     */
    if data.len() <= U::NETWORK_SORT_THRESHOLD {
        sort_n::<T, N, U>(data);
        return;
    }

    let pivot = get_pivot_blocks::<T, N, U>(data);
    let mut smallest = T::MAX_VALUE;
    let mut biggest = T::MIN_VALUE;
    let pivot_index = partition_unrolled::<T, N, U>(data, pivot, &mut smallest, &mut biggest, false);
    let (left, right) = data.split_at_mut(pivot_index);
    if pivot != smallest {
        qsort_::<T, N, U>(left, max_iters - 1);
    }
    if pivot != biggest {
        qsort_::<T, N, U>(right, max_iters - 1);
    }
}

/*
 * Float ranges are sorted without NaNs and with every zero positive. NaNs are
 * swapped to the back and negative zeros counted; after sorting the first
 * `negative_zeros` zeros get their sign back.
 */
struct FloatPrepass {
    len: usize,
    negative_zeros: usize,
}

fn float_prepass<T: SimdSortable>(data: &mut [T]) -> FloatPrepass {
    let mut end = data.len();
    let mut negative_zeros = 0;
    let mut i = 0;
    while i < end {
        let value = data[i];
        if value.is_nan() {
            end -= 1;
            data.swap(i, end);
            continue;
        }
        if value == T::ZERO && value.total_cmp(&T::ZERO).is_lt() {
            negative_zeros += 1;
            data[i] = T::ZERO;
        }
        i += 1;
    }
    FloatPrepass {
        len: end,
        negative_zeros,
    }
}

fn restore_negative_zeros<T: SimdSortable>(data: &mut [T], count: usize) {
    if count == 0 {
        return;
    }
    let first_zero = data.partition_point(|v| *v < T::ZERO);
    for value in &mut data[first_zero..first_zero + count] {
        *value = T::NEGATIVE_ZERO;
    }
}

/// Sorts `data` ascending: insertion sort for short ranges, the vectorized
/// introsort otherwise. Floats follow IEEE total order with NaNs last.
pub(crate) fn xss_sort<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(data: &mut [T]) {
    let (data, negative_zeros) = if T::IS_FLOAT {
        let prepass = float_prepass(data);
        (&mut data[..prepass.len], prepass.negative_zeros)
    } else {
        (data, 0)
    };

    if data.len() <= T::INSERTION_SORT_THRESHOLD {
        insertion_sort(data);
    } else {
        qsort_::<T, N, U>(data, max_iters(data.len()));
    }

    restore_negative_zeros(data, negative_zeros);
}

/*
 * Two pivot values p1 <= p2 taken from the given indices. On return, with
 * [lower, upper] the result:
 *   [0, lower)       < p1
 *   lower            == p1
 *   (lower, upper)   in [p1, p2]
 *   upper            == p2
 *   (upper, len)     > p2
 */
fn dual_pivot_partition<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    index_pivot1: usize,
    index_pivot2: usize,
) -> [usize; 2] {
    let pivot1 = data[index_pivot1];
    let pivot2 = data[index_pivot2];
    debug_assert!(!(pivot1 > pivot2), "pivots out of order");

    let low = 0;
    let start = low + 1;
    let end = data.len() - 1;

    data.swap(index_pivot1, low);
    // the first swap may have moved pivot2 into pivot1's slot
    let index_pivot2 = if index_pivot2 == low {
        index_pivot1
    } else {
        index_pivot2
    };
    data.swap(index_pivot2, end);

    let pivot_index2 = start + vectorized_partition::<T, N, U>(&mut data[start..end], pivot2, true);
    data.swap(end, pivot_index2);
    let upper = pivot_index2;

    if upper == start {
        return [low, upper];
    }

    let pivot_index1 = start + vectorized_partition::<T, N, U>(&mut data[start..upper], pivot1, false);
    let lower = pivot_index1 - 1;
    data.swap(low, lower);
    [lower, upper]
}

/*
 * One pivot, two passes: [0, first) < pivot, [first, second) == pivot,
 * [second, len) > pivot.
 */
fn single_pivot_partition<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    index_pivot: usize,
) -> [usize; 2] {
    let pivot = data[index_pivot];
    let first = vectorized_partition::<T, N, U>(data, pivot, false);
    let second = first + vectorized_partition::<T, N, U>(&mut data[first..], pivot, true);
    [first, second]
}

/// One dual-pivot (or, with equal indices, single-pivot) partition pass over
/// `data`. Indices are relative to `data`; the range must hold no NaN.
pub(crate) fn xss_partition<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    index_pivot1: usize,
    index_pivot2: usize,
) -> [usize; 2] {
    if data.is_empty() {
        return [0, 0];
    }
    debug_assert!(data.iter().all(|v| !v.is_nan()), "partition range holds NaN");
    if index_pivot1 == index_pivot2 {
        single_pivot_partition::<T, N, U>(data, index_pivot1)
    } else {
        dual_pivot_partition::<T, N, U>(data, index_pivot1, index_pivot2)
    }
}
