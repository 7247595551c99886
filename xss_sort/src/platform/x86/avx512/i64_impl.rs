use std::arch::x86_64::{
    __m512i, __mmask8, _mm512_cmpeq_epi64_mask, _mm512_cmpge_epi64_mask, _mm512_cmpgt_epi64_mask,
    _mm512_loadu_si512, _mm512_mask_compressstoreu_epi64, _mm512_mask_loadu_epi64,
    _mm512_mask_mov_epi64, _mm512_mask_storeu_epi64, _mm512_max_epi64, _mm512_min_epi64,
    _mm512_permutexvar_epi64, _mm512_reduce_max_epi64, _mm512_reduce_min_epi64,
    _mm512_set1_epi64, _mm512_storeu_si512,
};

use crate::SimdCompare;

use super::common::{check_mask_in_bounds, partial_mask_8, xor_index_64};

#[derive(Debug, Copy, Clone)]
pub struct Avx512I64x8(__m512i);

impl SimdCompare<i64, 8> for Avx512I64x8 {
    type OPMask = __mmask8;

    const NETWORK_SORT_THRESHOLD: usize = 256;
    const PARTITION_UNROLL_FACTOR: usize = 8;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_min_epi64(a.0, b.0)) }
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_max_epi64(a.0, b.0)) }
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __mmask8) -> Self {
        unsafe { Self(_mm512_mask_mov_epi64(a.0, mask, b.0)) }
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        unsafe { Self(_mm512_permutexvar_epi64(xor_index_64(distance), a.0)) }
    }

    #[inline]
    fn loadu(data: &[i64]) -> Self {
        let data = &data[..8];
        unsafe { Self(_mm512_loadu_si512(data.as_ptr().cast())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [i64]) {
        let data = &mut data[..8];
        unsafe { _mm512_storeu_si512(data.as_mut_ptr().cast(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __mmask8, data: &[i64]) -> Self {
        check_mask_in_bounds(mask as u64, data.len(), 8);
        unsafe { Self(_mm512_mask_loadu_epi64(fill.0, mask, data.as_ptr())) }
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __mmask8, data: &mut [i64]) {
        check_mask_in_bounds(mask as u64, data.len(), 8);
        unsafe { _mm512_mask_storeu_epi64(data.as_mut_ptr(), mask, input.0) }
    }

    #[inline]
    fn partial_mask(count: usize) -> __mmask8 {
        partial_mask_8(count)
    }

    #[inline]
    fn lane_mask(bits: u64) -> __mmask8 {
        bits as __mmask8
    }

    #[inline]
    fn get_value_at_idx(input: Self, idx: usize) -> i64 {
        let mut lanes = [0i64; 8];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: i64) -> Self {
        unsafe { Self(_mm512_set1_epi64(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmpge_epi64_mask(a.0, b.0) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmpgt_epi64_mask(a.0, b.0) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmpeq_epi64_mask(a.0, b.0) }
    }

    #[inline]
    fn ones_count(mask: __mmask8) -> usize {
        mask.count_ones() as usize
    }

    #[inline]
    fn not_mask(mask: __mmask8) -> __mmask8 {
        !mask
    }

    #[inline]
    fn reducemin(x: Self) -> i64 {
        unsafe { _mm512_reduce_min_epi64(x.0) }
    }

    #[inline]
    fn reducemax(x: Self) -> i64 {
        unsafe { _mm512_reduce_max_epi64(x.0) }
    }

    #[inline]
    fn mask_compressstoreu(array: &mut [i64], mask: __mmask8, data: Self) {
        let array = &mut array[..mask.count_ones() as usize];
        unsafe { _mm512_mask_compressstoreu_epi64(array.as_mut_ptr().cast(), mask, data.0) }
    }
}
