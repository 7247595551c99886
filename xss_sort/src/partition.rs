use crate::{SimdCompare, SimdSortable};

#[inline]
fn goes_right<T: SimdSortable>(value: T, pivot: T, use_gt: bool) -> bool {
    if use_gt {
        value > pivot
    } else {
        value >= pivot
    }
}

/*
 * Parition one register around the pivot: lanes failing the comparison go to
 * l_store, the others to the end of the block starting at r_store. Returns how
 * many lanes went right.
 */
#[inline]
#[allow(clippy::too_many_arguments)]
fn partition_vec<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    l_store: usize,
    r_store: usize,
    curr_vec: U,
    pivot_vec: U,
    smallest_vec: &mut U,
    biggest_vec: &mut U,
    use_gt: bool,
) -> usize {
    let mask = if use_gt {
        U::gt(curr_vec, pivot_vec)
    } else {
        U::ge(curr_vec, pivot_vec)
    };
    let amount = U::double_compressstore(data, l_store, r_store, mask, curr_vec);
    *smallest_vec = U::min(curr_vec, *smallest_vec);
    *biggest_vec = U::max(curr_vec, *biggest_vec);
    amount
}

/// Both store points keep a register of free slots outside the unread
/// window `[left, right)`, so full-width stores never touch unread data.
#[inline]
fn stores_clear_of_reads(l_store: usize, r_store: usize, left: usize, right: usize, n: usize) -> bool {
    l_store + n <= left && right <= r_store
}

/// Once every register has been read, the two store blocks either coincide
/// or do not overlap.
#[inline]
fn stores_disjoint(l_store: usize, r_store: usize, n: usize) -> bool {
    l_store == r_store || l_store + n <= r_store
}

/// Moves elements one at a time until the unprocessed window
/// `[*left, *right)` holds a multiple of `N` elements.
#[inline]
#[allow(clippy::too_many_arguments)]
fn trim_to_width<T: SimdSortable, const N: usize>(
    data: &mut [T],
    left: &mut usize,
    right: &mut usize,
    pivot: T,
    smallest: &mut T,
    biggest: &mut T,
    use_gt: bool,
) {
    for _ in 0..(*right - *left) % N {
        let value = data[*left];
        if value < *smallest {
            *smallest = value;
        }
        if value > *biggest {
            *biggest = value;
        }
        if goes_right(value, pivot, use_gt) {
            *right -= 1;
            data.swap(*left, *right);
        } else {
            *left += 1;
        }
    }
}

/// Partitions `data` in place around `pivot` and returns the index of the
/// first element of the right side. Elements `>= pivot` (or `> pivot` with
/// `use_gt`) end up right of the boundary. `smallest` and `biggest` are
/// narrowed to the minimum and maximum seen.
pub(crate) fn partition_simd<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    pivot: T,
    smallest: &mut T,
    biggest: &mut T,
    use_gt: bool,
) -> usize {
    /* make array length divisible by N , shortening the array */
    let mut left = 0;
    let mut right = data.len();
    trim_to_width::<T, N>(data, &mut left, &mut right, pivot, smallest, biggest, use_gt);

    if left == right {
        return left; /* less than N elements in the array */
    }

    let pivot_vec = U::set(pivot);
    let mut min_vec = U::set(*smallest);
    let mut max_vec = U::set(*biggest);

    if right - left == N {
        let vec = U::loadu(&data[left..]);
        let amount = partition_vec(
            data,
            left,
            left,
            vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
            use_gt,
        );
        *smallest = U::reducemin(min_vec);
        *biggest = U::reducemax(max_vec);
        return left + N - amount;
    }

    // first and last N values are partitioned at the end
    let vec_left = U::loadu(&data[left..]);
    let vec_right = U::loadu(&data[right - N..]);
    // store points of the vectors
    let mut l_store = left;
    let mut r_store = right - N;
    // indices for loading the elements
    left += N;
    right -= N;
    while right - left != 0 {
        /*
         * if fewer elements are stored on the right side of the array,
         * then next elements are loaded from the right side,
         * otherwise from the left side
         */
        let curr_vec = if (r_store + N) - right < left - l_store {
            right -= N;
            U::loadu(&data[right..])
        } else {
            let vec = U::loadu(&data[left..]);
            left += N;
            vec
        };
        debug_assert!(
            stores_clear_of_reads(l_store, r_store, left, right, N),
            "store cursors {}..{} reach unread {}..{}",
            l_store,
            r_store,
            left,
            right
        );
        let amount = partition_vec(
            data,
            l_store,
            r_store,
            curr_vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
            use_gt,
        );
        r_store -= amount;
        l_store += N - amount;
    }

    /* partition and save vec_left and vec_right */
    debug_assert!(stores_disjoint(l_store, r_store, N));
    let amount = partition_vec(
        data,
        l_store,
        r_store,
        vec_left,
        pivot_vec,
        &mut min_vec,
        &mut max_vec,
        use_gt,
    );
    l_store += N - amount;
    let amount = partition_vec(
        data,
        l_store,
        l_store,
        vec_right,
        pivot_vec,
        &mut min_vec,
        &mut max_vec,
        use_gt,
    );
    l_store += N - amount;
    *smallest = U::reducemin(min_vec);
    *biggest = U::reducemax(max_vec);
    l_store
}

/// Same contract as [`partition_simd`], reading and writing `UNROLL`
/// registers per iteration. Ranges shorter than `3 * UNROLL * N` use the
/// plain loop.
pub(crate) fn partition_simd_unrolled<T, const N: usize, U, const UNROLL: usize>(
    data: &mut [T],
    pivot: T,
    smallest: &mut T,
    biggest: &mut T,
    use_gt: bool,
) -> usize
where
    T: SimdSortable,
    U: SimdCompare<T, N>,
{
    if data.len() < 3 * UNROLL * N {
        return partition_simd::<T, N, U>(data, pivot, smallest, biggest, use_gt);
    }

    let mut left = 0;
    let mut right = data.len();
    trim_to_width::<T, N>(data, &mut left, &mut right, pivot, smallest, biggest, use_gt);

    // elements not yet written back, minus the block at the right store point
    let mut unpartitioned = right - left - N;
    let mut l_store = left;

    let pivot_vec = U::set(pivot);
    let mut min_vec = U::set(*smallest);
    let mut max_vec = U::set(*biggest);

    // leading registers that make the remaining count a multiple of UNROLL
    let vecs_to_partition = ((right - left) / N) % UNROLL;
    let mut vec_align = [pivot_vec; UNROLL];
    for (i, vec) in vec_align.iter_mut().take(vecs_to_partition).enumerate() {
        *vec = U::loadu(&data[left + i * N..]);
    }
    left += vecs_to_partition * N;

    // first and last UNROLL registers are partitioned at the end
    let mut vec_left = [pivot_vec; UNROLL];
    let mut vec_right = [pivot_vec; UNROLL];
    for ii in 0..UNROLL {
        vec_left[ii] = U::loadu(&data[left + N * ii..]);
        vec_right[ii] = U::loadu(&data[right - N * (UNROLL - ii)..]);
    }
    left += UNROLL * N;
    right -= UNROLL * N;

    while right - left != 0 {
        let mut curr_vec = [pivot_vec; UNROLL];
        if (l_store + unpartitioned + N) - right < left - l_store {
            right -= UNROLL * N;
            for (ii, vec) in curr_vec.iter_mut().enumerate() {
                *vec = U::loadu(&data[right + ii * N..]);
            }
        } else {
            for (ii, vec) in curr_vec.iter_mut().enumerate() {
                *vec = U::loadu(&data[left + ii * N..]);
            }
            left += UNROLL * N;
        }
        for vec in curr_vec {
            debug_assert!(
                stores_clear_of_reads(l_store, l_store + unpartitioned, left, right, N),
                "store cursors {}..{} reach unread {}..{}",
                l_store,
                l_store + unpartitioned,
                left,
                right
            );
            let amount = partition_vec(
                data,
                l_store,
                l_store + unpartitioned,
                vec,
                pivot_vec,
                &mut min_vec,
                &mut max_vec,
                use_gt,
            );
            l_store += N - amount;
            unpartitioned -= N;
        }
    }

    let held = vec_left
        .into_iter()
        .chain(vec_right)
        .chain(vec_align.into_iter().take(vecs_to_partition));
    for vec in held {
        debug_assert!(stores_disjoint(l_store, l_store + unpartitioned, N));
        let amount = partition_vec(
            data,
            l_store,
            l_store + unpartitioned,
            vec,
            pivot_vec,
            &mut min_vec,
            &mut max_vec,
            use_gt,
        );
        l_store += N - amount;
        unpartitioned = unpartitioned.saturating_sub(N);
    }

    *smallest = U::reducemin(min_vec);
    *biggest = U::reducemax(max_vec);
    l_store
}

/// Partition with the unroll factor configured for `U`.
pub(crate) fn partition_unrolled<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    pivot: T,
    smallest: &mut T,
    biggest: &mut T,
    use_gt: bool,
) -> usize {
    match U::PARTITION_UNROLL_FACTOR {
        0 | 1 => partition_simd::<T, N, U>(data, pivot, smallest, biggest, use_gt),
        2 => partition_simd_unrolled::<T, N, U, 2>(data, pivot, smallest, biggest, use_gt),
        3 | 4 => partition_simd_unrolled::<T, N, U, 4>(data, pivot, smallest, biggest, use_gt),
        _ => partition_simd_unrolled::<T, N, U, 8>(data, pivot, smallest, biggest, use_gt),
    }
}

/// Partitions the whole slice without tracking bounds for the caller.
#[inline]
pub(crate) fn vectorized_partition<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    data: &mut [T],
    pivot: T,
    use_gt: bool,
) -> usize {
    let mut smallest = T::MAX_VALUE;
    let mut biggest = T::MIN_VALUE;
    partition_unrolled::<T, N, U>(data, pivot, &mut smallest, &mut biggest, use_gt)
}
