use std::arch::x86_64::{
    __m512, __mmask16, _mm512_cmp_ps_mask, _mm512_loadu_ps, _mm512_mask_compressstoreu_ps,
    _mm512_mask_loadu_ps, _mm512_mask_mov_ps, _mm512_mask_storeu_ps, _mm512_max_ps,
    _mm512_min_ps, _mm512_permutexvar_ps, _mm512_reduce_max_ps, _mm512_reduce_min_ps,
    _mm512_set1_ps, _mm512_storeu_ps, _CMP_EQ_OQ, _CMP_GE_OQ, _CMP_GT_OQ,
};

use crate::SimdCompare;

use super::common::{check_mask_in_bounds, partial_mask_16, xor_index_32};

#[derive(Debug, Copy, Clone)]
pub struct Avx512F32x16(__m512);

impl SimdCompare<f32, 16> for Avx512F32x16 {
    type OPMask = __mmask16;

    const NETWORK_SORT_THRESHOLD: usize = 512;
    const PARTITION_UNROLL_FACTOR: usize = 8;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_min_ps(a.0, b.0)) }
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_max_ps(a.0, b.0)) }
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __mmask16) -> Self {
        unsafe { Self(_mm512_mask_mov_ps(a.0, mask, b.0)) }
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        unsafe { Self(_mm512_permutexvar_ps(xor_index_32(distance), a.0)) }
    }

    #[inline]
    fn loadu(data: &[f32]) -> Self {
        let data = &data[..16];
        unsafe { Self(_mm512_loadu_ps(data.as_ptr())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [f32]) {
        let data = &mut data[..16];
        unsafe { _mm512_storeu_ps(data.as_mut_ptr(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __mmask16, data: &[f32]) -> Self {
        check_mask_in_bounds(mask as u64, data.len(), 16);
        unsafe { Self(_mm512_mask_loadu_ps(fill.0, mask, data.as_ptr())) }
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __mmask16, data: &mut [f32]) {
        check_mask_in_bounds(mask as u64, data.len(), 16);
        unsafe { _mm512_mask_storeu_ps(data.as_mut_ptr(), mask, input.0) }
    }

    #[inline]
    fn partial_mask(count: usize) -> __mmask16 {
        partial_mask_16(count)
    }

    #[inline]
    fn lane_mask(bits: u64) -> __mmask16 {
        bits as __mmask16
    }

    #[inline]
    fn get_value_at_idx(input: Self, idx: usize) -> f32 {
        let mut lanes = [0f32; 16];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: f32) -> Self {
        unsafe { Self(_mm512_set1_ps(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __mmask16 {
        unsafe { _mm512_cmp_ps_mask::<_CMP_GE_OQ>(a.0, b.0) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __mmask16 {
        unsafe { _mm512_cmp_ps_mask::<_CMP_GT_OQ>(a.0, b.0) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __mmask16 {
        unsafe { _mm512_cmp_ps_mask::<_CMP_EQ_OQ>(a.0, b.0) }
    }

    #[inline]
    fn ones_count(mask: __mmask16) -> usize {
        mask.count_ones() as usize
    }

    #[inline]
    fn not_mask(mask: __mmask16) -> __mmask16 {
        !mask
    }

    #[inline]
    fn reducemin(x: Self) -> f32 {
        unsafe { _mm512_reduce_min_ps(x.0) }
    }

    #[inline]
    fn reducemax(x: Self) -> f32 {
        unsafe { _mm512_reduce_max_ps(x.0) }
    }

    #[inline]
    fn mask_compressstoreu(array: &mut [f32], mask: __mmask16, data: Self) {
        let array = &mut array[..mask.count_ones() as usize];
        unsafe { _mm512_mask_compressstoreu_ps(array.as_mut_ptr().cast(), mask, data.0) }
    }
}
