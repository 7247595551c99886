use std::arch::x86_64::{
    __m256, __m256i, _mm256_blendv_ps, _mm256_castps_si256, _mm256_castsi256_ps, _mm256_cmp_ps,
    _mm256_loadu_ps, _mm256_maskload_ps, _mm256_maskstore_ps, _mm256_max_ps, _mm256_min_ps,
    _mm256_permutevar8x32_ps, _mm256_set1_ps, _mm256_storeu_ps, _CMP_EQ_OQ, _CMP_GE_OQ,
    _CMP_GT_OQ,
};

use crate::SimdCompare;

use super::common::{
    check_mask_in_bounds, lane_mask_32, movemask_32, not_mask, partial_mask_32, permutation_32,
    xor_index_32,
};

#[derive(Debug, Copy, Clone)]
pub struct Avx2F32x8(__m256);

#[inline]
fn blend_256(a: __m256, b: __m256, mask: __m256i) -> __m256 {
    unsafe { _mm256_blendv_ps(a, b, _mm256_castsi256_ps(mask)) }
}

impl SimdCompare<f32, 8> for Avx2F32x8 {
    type OPMask = __m256i;

    const NETWORK_SORT_THRESHOLD: usize = 256;
    const PARTITION_UNROLL_FACTOR: usize = 4;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm256_min_ps(a.0, b.0)) }
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm256_max_ps(a.0, b.0)) }
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __m256i) -> Self {
        Self(blend_256(a.0, b.0, mask))
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        unsafe { Self(_mm256_permutevar8x32_ps(a.0, xor_index_32(distance))) }
    }

    #[inline]
    fn loadu(data: &[f32]) -> Self {
        let data = &data[..8];
        unsafe { Self(_mm256_loadu_ps(data.as_ptr())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [f32]) {
        let data = &mut data[..8];
        unsafe { _mm256_storeu_ps(data.as_mut_ptr(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __m256i, data: &[f32]) -> Self {
        check_mask_in_bounds(movemask_32(mask), data.len(), 8);
        let loaded = unsafe { _mm256_maskload_ps(data.as_ptr(), mask) };
        Self(blend_256(fill.0, loaded, mask))
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __m256i, data: &mut [f32]) {
        check_mask_in_bounds(movemask_32(mask), data.len(), 8);
        unsafe { _mm256_maskstore_ps(data.as_mut_ptr(), mask, input.0) }
    }

    #[inline]
    fn partial_mask(count: usize) -> __m256i {
        partial_mask_32(count)
    }

    #[inline]
    fn lane_mask(bits: u64) -> __m256i {
        lane_mask_32(bits)
    }

    #[inline]
    fn get_value_at_idx(input: Self, idx: usize) -> f32 {
        let mut lanes = [0f32; 8];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: f32) -> Self {
        unsafe { Self(_mm256_set1_ps(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps(a.0, b.0, _CMP_GE_OQ)) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps(a.0, b.0, _CMP_GT_OQ)) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_castps_si256(_mm256_cmp_ps(a.0, b.0, _CMP_EQ_OQ)) }
    }

    #[inline]
    fn ones_count(mask: __m256i) -> usize {
        movemask_32(mask).count_ones() as usize
    }

    #[inline]
    fn not_mask(mask: __m256i) -> __m256i {
        not_mask(mask)
    }

    #[inline]
    fn mask_compressstoreu(array: &mut [f32], mask: __m256i, data: Self) {
        let bits = movemask_32(mask);
        let count = bits.count_ones() as usize;
        let array = &mut array[..count];
        unsafe {
            let packed = _mm256_permutevar8x32_ps(data.0, permutation_32(!bits));
            _mm256_maskstore_ps(array.as_mut_ptr(), partial_mask_32(count), packed);
        }
    }

    #[inline]
    fn double_compressstore(
        array: &mut [f32],
        l_store: usize,
        r_store: usize,
        mask: __m256i,
        data: Self,
    ) -> usize {
        let bits = movemask_32(mask);
        let packed = unsafe { Self(_mm256_permutevar8x32_ps(data.0, permutation_32(bits))) };
        Self::storeu(packed, &mut array[l_store..]);
        Self::storeu(packed, &mut array[r_store..]);
        bits.count_ones() as usize
    }
}
