//! Register emulation on plain arrays. Compiles on every target and is what
//! the engine binds to when no x86 vector extension is enabled at build time.

use std::array;

use crate::partition::vectorized_partition;
use crate::qsort::{xss_partition, xss_sort};
use crate::{SimdCompare, SimdSortable};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PortableVec<T, const N: usize>([T; N]);

pub type PortableI32x8 = PortableVec<i32, 8>;
pub type PortableF32x8 = PortableVec<f32, 8>;
pub type PortableI64x4 = PortableVec<i64, 4>;
pub type PortableF64x4 = PortableVec<f64, 4>;

pub type PortableI32x16 = PortableVec<i32, 16>;
pub type PortableF32x16 = PortableVec<f32, 16>;
pub type PortableI64x8 = PortableVec<i64, 8>;
pub type PortableF64x8 = PortableVec<f64, 8>;

impl<T, const N: usize> From<[T; N]> for PortableVec<T, N> {
    fn from(v: [T; N]) -> Self {
        Self(v)
    }
}

impl<T: SimdSortable, const N: usize> PortableVec<T, N> {
    #[inline]
    fn select(bits: u64, lane: usize) -> bool {
        bits >> lane & 1 == 1
    }

    #[inline]
    fn compare(a: Self, b: Self, f: impl Fn(T, T) -> bool) -> u64 {
        (0..N)
            .filter(|&i| f(a.0[i], b.0[i]))
            .fold(0, |bits, i| bits | (1 << i))
    }
}

impl<T: SimdSortable, const N: usize> SimdCompare<T, N> for PortableVec<T, N> {
    type OPMask = u64;

    const NETWORK_SORT_THRESHOLD: usize = if 32 * N > 512 { 512 } else { 32 * N };
    const PARTITION_UNROLL_FACTOR: usize = 4;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        Self(array::from_fn(|i| if b.0[i] < a.0[i] { b.0[i] } else { a.0[i] }))
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        Self(array::from_fn(|i| if b.0[i] > a.0[i] { b.0[i] } else { a.0[i] }))
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: u64) -> Self {
        Self(array::from_fn(|i| {
            if Self::select(mask, i) {
                b.0[i]
            } else {
                a.0[i]
            }
        }))
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        Self(array::from_fn(|i| a.0[i ^ distance]))
    }

    #[inline]
    fn loadu(data: &[T]) -> Self {
        let data = &data[..N];
        Self(array::from_fn(|i| data[i]))
    }

    #[inline]
    fn storeu(input: Self, data: &mut [T]) {
        data[..N].copy_from_slice(&input.0);
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: u64, data: &[T]) -> Self {
        Self(array::from_fn(|i| {
            if Self::select(mask, i) {
                data[i]
            } else {
                fill.0[i]
            }
        }))
    }

    #[inline]
    fn mask_storeu(input: Self, mask: u64, data: &mut [T]) {
        for (i, value) in input.0.iter().enumerate() {
            if Self::select(mask, i) {
                data[i] = *value;
            }
        }
    }

    #[inline]
    fn partial_mask(count: usize) -> u64 {
        if count >= 64 {
            u64::MAX
        } else {
            (1 << count) - 1
        }
    }

    #[inline]
    fn lane_mask(bits: u64) -> u64 {
        bits & Self::partial_mask(N)
    }

    #[inline]
    fn get_value_at_idx(input: Self, idx: usize) -> T {
        input.0[idx]
    }

    #[inline]
    fn set(value: T) -> Self {
        Self([value; N])
    }

    #[inline]
    fn ge(a: Self, b: Self) -> u64 {
        Self::compare(a, b, |x, y| x >= y)
    }

    #[inline]
    fn gt(a: Self, b: Self) -> u64 {
        Self::compare(a, b, |x, y| x > y)
    }

    #[inline]
    fn eq(a: Self, b: Self) -> u64 {
        Self::compare(a, b, |x, y| x == y)
    }

    #[inline]
    fn ones_count(mask: u64) -> usize {
        mask.count_ones() as usize
    }

    #[inline]
    fn not_mask(mask: u64) -> u64 {
        !mask & Self::partial_mask(N)
    }

    #[inline]
    fn mask_compressstoreu(array: &mut [T], mask: u64, data: Self) {
        let selected = data.0.iter().enumerate().filter(|(i, _)| Self::select(mask, *i));
        for (slot, (_, value)) in array.iter_mut().zip(selected) {
            *slot = *value;
        }
        debug_assert!(array.len() >= Self::ones_count(mask));
    }
}

pub fn portable_sort_i32(data: &mut [i32]) {
    xss_sort::<i32, 16, PortableI32x16>(data)
}

pub fn portable_sort_i64(data: &mut [i64]) {
    xss_sort::<i64, 8, PortableI64x8>(data)
}

pub fn portable_sort_f32(data: &mut [f32]) {
    xss_sort::<f32, 16, PortableF32x16>(data)
}

pub fn portable_sort_f64(data: &mut [f64]) {
    xss_sort::<f64, 8, PortableF64x8>(data)
}

pub fn portable_partition_i32(data: &mut [i32], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<i32, 16, PortableI32x16>(data, pivot_index1, pivot_index2)
}

pub fn portable_partition_i64(data: &mut [i64], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<i64, 8, PortableI64x8>(data, pivot_index1, pivot_index2)
}

pub fn portable_partition_f32(data: &mut [f32], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<f32, 16, PortableF32x16>(data, pivot_index1, pivot_index2)
}

pub fn portable_partition_f64(data: &mut [f64], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<f64, 8, PortableF64x8>(data, pivot_index1, pivot_index2)
}

/// Single partition pass of the whole slice around `pivot`, used by the
/// benchmarks to time the partition loop on its own.
pub fn portable_partition_around_i64(data: &mut [i64], pivot: i64) -> usize {
    vectorized_partition::<i64, 8, PortableI64x8>(data, pivot, false)
}
