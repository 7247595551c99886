use crate::partition::vectorized_partition;
use crate::qsort::{xss_partition, xss_sort};

mod common;
pub mod f32_impl;
pub mod f64_impl;
pub mod i32_impl;
pub mod i64_impl;

pub use self::f32_impl::Avx512F32x16;
pub use self::f64_impl::Avx512F64x8;
pub use self::i32_impl::Avx512I32x16;
pub use self::i64_impl::Avx512I64x8;

pub fn avx512_sort_i32(data: &mut [i32]) {
    xss_sort::<i32, 16, Avx512I32x16>(data)
}

pub fn avx512_sort_i64(data: &mut [i64]) {
    xss_sort::<i64, 8, Avx512I64x8>(data)
}

pub fn avx512_sort_f32(data: &mut [f32]) {
    xss_sort::<f32, 16, Avx512F32x16>(data)
}

pub fn avx512_sort_f64(data: &mut [f64]) {
    xss_sort::<f64, 8, Avx512F64x8>(data)
}

pub fn avx512_partition_i32(data: &mut [i32], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<i32, 16, Avx512I32x16>(data, pivot_index1, pivot_index2)
}

pub fn avx512_partition_i64(data: &mut [i64], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<i64, 8, Avx512I64x8>(data, pivot_index1, pivot_index2)
}

pub fn avx512_partition_f32(data: &mut [f32], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<f32, 16, Avx512F32x16>(data, pivot_index1, pivot_index2)
}

pub fn avx512_partition_f64(data: &mut [f64], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
    xss_partition::<f64, 8, Avx512F64x8>(data, pivot_index1, pivot_index2)
}

pub fn avx512_partition_around_i64(data: &mut [i64], pivot: i64) -> usize {
    vectorized_partition::<i64, 8, Avx512I64x8>(data, pivot, false)
}

#[cfg(test)]
mod test {
    use crate::network::test::*;

    use super::*;

    test_sort_e2e!(i32, avx512_sort_i32);
    test_sort_e2e!(i64, avx512_sort_i64);
    test_sort_e2e!(f32, avx512_sort_f32);
    test_sort_e2e!(f64, avx512_sort_f64);

    #[test]
    fn test_dual_pivot_partition_f64() {
        let input = random_values::<f64>(5_000, 11);
        let mut data = input.clone();
        let (p1, p2) = if data[10] <= data[20] { (10, 20) } else { (20, 10) };
        let (low, high) = (data[p1], data[p2]);
        let [lower, upper] = avx512_partition_f64(&mut data, p1, p2);
        assert_eq!(sorted_copy(&data), sorted_copy(&input));
        assert_eq!(data[lower], low);
        assert_eq!(data[upper], high);
        assert!(data[..lower].iter().all(|v| *v < low));
        assert!(data[lower..=upper].iter().all(|v| low <= *v && *v <= high));
        assert!(data[upper + 1..].iter().all(|v| *v > high));
    }
}
