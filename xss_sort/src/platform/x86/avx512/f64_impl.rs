use std::arch::x86_64::{
    __m512d, __mmask8, _mm512_cmp_pd_mask, _mm512_loadu_pd, _mm512_mask_compressstoreu_pd,
    _mm512_mask_loadu_pd, _mm512_mask_mov_pd, _mm512_mask_storeu_pd, _mm512_max_pd,
    _mm512_min_pd, _mm512_permutexvar_pd, _mm512_reduce_max_pd, _mm512_reduce_min_pd,
    _mm512_set1_pd, _mm512_storeu_pd, _CMP_EQ_OQ, _CMP_GE_OQ, _CMP_GT_OQ,
};

use crate::SimdCompare;

use super::common::{check_mask_in_bounds, partial_mask_8, xor_index_64};

#[derive(Debug, Copy, Clone)]
pub struct Avx512F64x8(__m512d);

impl SimdCompare<f64, 8> for Avx512F64x8 {
    type OPMask = __mmask8;

    const NETWORK_SORT_THRESHOLD: usize = 256;
    const PARTITION_UNROLL_FACTOR: usize = 8;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_min_pd(a.0, b.0)) }
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_max_pd(a.0, b.0)) }
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __mmask8) -> Self {
        unsafe { Self(_mm512_mask_mov_pd(a.0, mask, b.0)) }
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        unsafe { Self(_mm512_permutexvar_pd(xor_index_64(distance), a.0)) }
    }

    #[inline]
    fn loadu(data: &[f64]) -> Self {
        let data = &data[..8];
        unsafe { Self(_mm512_loadu_pd(data.as_ptr())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [f64]) {
        let data = &mut data[..8];
        unsafe { _mm512_storeu_pd(data.as_mut_ptr(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __mmask8, data: &[f64]) -> Self {
        check_mask_in_bounds(mask as u64, data.len(), 8);
        unsafe { Self(_mm512_mask_loadu_pd(fill.0, mask, data.as_ptr())) }
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __mmask8, data: &mut [f64]) {
        check_mask_in_bounds(mask as u64, data.len(), 8);
        unsafe { _mm512_mask_storeu_pd(data.as_mut_ptr(), mask, input.0) }
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
    fn get_value_at_idx(input: Self, idx: usize) -> f64 {
        let mut lanes = [0f64; 8];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: f64) -> Self {
        unsafe { Self(_mm512_set1_pd(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmp_pd_mask::<_CMP_GE_OQ>(a.0, b.0) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmp_pd_mask::<_CMP_GT_OQ>(a.0, b.0) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __mmask8 {
        unsafe { _mm512_cmp_pd_mask::<_CMP_EQ_OQ>(a.0, b.0) }
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
    fn reducemin(x: Self) -> f64 {
        unsafe { _mm512_reduce_min_pd(x.0) }
    }

    #[inline]
    fn reducemax(x: Self) -> f64 {
        unsafe { _mm512_reduce_max_pd(x.0) }
    }

    #[inline]
    fn mask_compressstoreu(array: &mut [f64], mask: __mmask8, data: Self) {
        let array = &mut array[..mask.count_ones() as usize];
        unsafe { _mm512_mask_compressstoreu_pd(array.as_mut_ptr().cast(), mask, data.0) }
    }
}
