use crate::partition::vectorized_partition;
use crate::qsort::{xss_partition, xss_sort};

mod common;
pub mod f32_impl;
pub mod f64_impl;
pub mod i32_impl;
pub mod i64_impl;

pub use self::f32_impl::Avx2F32x8;
pub use self::f64_impl::Avx2F64x4;
pub use self::i32_impl::Avx2I32x8;
pub use self::i64_impl::Avx2I64x4;

pub fn avx2_sort_i32(data: &mut [i32]) {
    xss_sort::<i32, 8, Avx2I32x8>(data)
}

pub fn avx2_sort_i64(data: &mut [i64]) {
    xss_sort::<i64, 4, Avx2I64x4>(data)
}

pub fn avx2_sort_f32(data: &mut [f32]) {
    xss_sort::<f32, 8, Avx2F32x8>(data)
}

pub fn avx2_sort_f64(data: &mut [f64]) {
    xss_sort::<f64, 4, Avx2F64x4>(data)
}

pub fn avx2_partition_i32(data: &mut [i32], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<i32, 8, Avx2I32x8>(data, pivot_index1, pivot_index2)
}

pub fn avx2_partition_i64(data: &mut [i64], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<i64, 4, Avx2I64x4>(data, pivot_index1, pivot_index2)
}

pub fn avx2_partition_f32(data: &mut [f32], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<f32, 8, Avx2F32x8>(data, pivot_index1, pivot_index2)
}

pub fn avx2_partition_f64(data: &mut [f64], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<f64, 4, Avx2F64x4>(data, pivot_index1, pivot_index2)
}

pub fn avx2_partition_around_i64(data: &mut [i64], pivot: i64) -> usize {
    vectorized_partition::<i64, 4, Avx2I64x4>(data, pivot, false)
}
