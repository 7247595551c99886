//! Vectorized quicksort and dual-pivot partition for primitive slices.
//!
//! The engine is written once against [`SimdCompare`] and instantiated per
//! (register width, element type). [`platform`] binds each element type to the
//! widest backend compiled into the binary; [`sort`] and [`partition`] are the
//! entry points most callers want.

pub mod api;
pub mod error;
pub(crate) mod network;
pub(crate) mod partition;
pub(crate) mod pivot;
pub mod platform;
pub(crate) mod qsort;

use std::{cmp::Ordering, fmt::Debug};

pub use api::{partition, partition_array, sort, sort_array, sort_range, ArrayMut, ElementType};
pub use error::{Result, SortError};
pub use platform::{simd_level, SimdLevel, SimdSort};

/// Lane operations the sorting engine needs from one vector register type.
///
/// `NUM_LANES` must be a power of two no larger than 64; masks are handed
/// around as [`Self::OPMask`] and built from plain lane bitmaps with
/// [`SimdCompare::lane_mask`].
pub trait SimdCompare<T: SimdSortable, const NUM_LANES: usize>: Copy + Debug {
    type OPMask: Copy + Debug;

    /// Ranges up to this many elements are sorted by the bitonic network.
    const NETWORK_SORT_THRESHOLD: usize;
    /// Vectors partitioned per loop iteration on large ranges.
    const PARTITION_UNROLL_FACTOR: usize;

    fn min(a: Self, b: Self) -> Self;
    fn max(a: Self, b: Self) -> Self;

    /// Lanes of `b` where `mask` is set, lanes of `a` elsewhere.
    fn mask_mov(a: Self, b: Self, mask: Self::OPMask) -> Self;

    /// Lane `i` of the result is lane `i ^ distance` of `a`.
    fn shuffle_xor(a: Self, distance: usize) -> Self;

    fn loadu(data: &[T]) -> Self;
    fn storeu(input: Self, data: &mut [T]);

    /// Loads the lanes selected by `mask`, taking the rest from `fill`.
    /// Selected lanes must lie inside `data`.
    fn mask_loadu(fill: Self, mask: Self::OPMask, data: &[T]) -> Self;
    fn mask_storeu(input: Self, mask: Self::OPMask, data: &mut [T]);

    /// Mask of the first `count` lanes.
    fn partial_mask(count: usize) -> Self::OPMask;
    fn lane_mask(bits: u64) -> Self::OPMask;

    fn get_value_at_idx(input: Self, idx: usize) -> T;

    fn set(value: T) -> Self;

    fn ge(a: Self, b: Self) -> Self::OPMask;
    fn gt(a: Self, b: Self) -> Self::OPMask;
    fn eq(a: Self, b: Self) -> Self::OPMask;

    fn ones_count(mask: Self::OPMask) -> usize;
    fn not_mask(mask: Self::OPMask) -> Self::OPMask;

    fn reducemin(x: Self) -> T {
        let mut v = x;
        let mut distance = NUM_LANES / 2;
        while distance > 0 {
            v = Self::min(v, Self::shuffle_xor(v, distance));
            distance /= 2;
        }
        Self::get_value_at_idx(v, 0)
    }

    fn reducemax(x: Self) -> T {
        let mut v = x;
        let mut distance = NUM_LANES / 2;
        while distance > 0 {
            v = Self::max(v, Self::shuffle_xor(v, distance));
            distance /= 2;
        }
        Self::get_value_at_idx(v, 0)
    }

    /// Writes the lanes selected by `mask` to the front of `array`, densely
    /// packed in lane order.
    fn mask_compressstoreu(array: &mut [T], mask: Self::OPMask, data: Self);

    /// Sends the lanes not selected by `mask` to `array[l_store..]` and the
    /// selected ones to the end of the block `array[r_store..r_store + N]`.
    /// Returns the number of selected lanes.
    ///
    /// Overrides may write full registers at both store points, so callers
    /// must keep `NUM_LANES` writable slots at each and either `l_store ==
    /// r_store` or the two blocks disjoint.
    #[inline]
    fn double_compressstore(
        array: &mut [T],
        l_store: usize,
        r_store: usize,
        mask: Self::OPMask,
        data: Self,
    ) -> usize {
        let amount = Self::ones_count(mask);
        Self::mask_compressstoreu(&mut array[l_store..], Self::not_mask(mask), data);
        Self::mask_compressstoreu(&mut array[r_store + NUM_LANES - amount..], mask, data);
        amount
    }
}

/// Element types the engine can sort.
pub trait SimdSortable: PartialOrd + Copy + Debug {
    /// Largest value, used as padding; `+inf` for floats.
    const MAX_VALUE: Self;
    /// Smallest value; `-inf` for floats.
    const MIN_VALUE: Self;
    const ZERO: Self;
    /// `-0.0` for floats, `0` otherwise.
    const NEGATIVE_ZERO: Self;
    /// Ranges of at most this length go straight to insertion sort.
    const INSERTION_SORT_THRESHOLD: usize;
    const IS_FLOAT: bool = false;

    #[inline]
    fn is_nan(self) -> bool {
        false
    }

    fn total_cmp(&self, other: &Self) -> Ordering;
}

impl SimdSortable for i32 {
    const MAX_VALUE: Self = i32::MAX;
    const MIN_VALUE: Self = i32::MIN;
    const ZERO: Self = 0;
    const NEGATIVE_ZERO: Self = 0;
    const INSERTION_SORT_THRESHOLD: usize = 16;

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl SimdSortable for i64 {
    const MAX_VALUE: Self = i64::MAX;
    const MIN_VALUE: Self = i64::MIN;
    const ZERO: Self = 0;
    const NEGATIVE_ZERO: Self = 0;
    const INSERTION_SORT_THRESHOLD: usize = 20;

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl SimdSortable for f32 {
    const MAX_VALUE: Self = f32::INFINITY;
    const MIN_VALUE: Self = f32::NEG_INFINITY;
    const ZERO: Self = 0.0;
    const NEGATIVE_ZERO: Self = -0.0;
    const INSERTION_SORT_THRESHOLD: usize = 16;
    const IS_FLOAT: bool = true;

    #[inline]
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        f32::total_cmp(self, other)
    }
}

impl SimdSortable for f64 {
    const MAX_VALUE: Self = f64::INFINITY;
    const MIN_VALUE: Self = f64::NEG_INFINITY;
    const ZERO: Self = 0.0;
    const NEGATIVE_ZERO: Self = -0.0;
    const INSERTION_SORT_THRESHOLD: usize = 20;
    const IS_FLOAT: bool = true;

    #[inline]
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }

    #[inline]
    fn total_cmp(&self, other: &Self) -> Ordering {
        f64::total_cmp(self, other)
    }
}

///
/// COEX == Compare and Exchange two registers by swapping min and max values
///
#[inline]
pub(crate) fn coex<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(a: &mut U, b: &mut U) {
    let temp = *a;
    *a = U::min(*a, *b);
    *b = U::max(temp, *b);
}

#[inline]
pub(crate) fn cmp_merge<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    in1: U,
    in2: U,
    mask: U::OPMask,
) -> U {
    let min_values = U::min(in2, in1);
    let max_values = U::max(in2, in1);
    U::mask_mov(min_values, max_values, mask) // 0 -> min, 1 -> max
}
