use std::arch::x86_64::{
    __m256d, __m256i, _mm256_blendv_pd, _mm256_castpd_si256, _mm256_castsi256_pd, _mm256_cmp_pd,
    _mm256_loadu_pd, _mm256_maskload_pd, _mm256_maskstore_pd, _mm256_max_pd, _mm256_min_pd,
    _mm256_permutevar8x32_epi32, _mm256_set1_pd, _mm256_storeu_pd, _CMP_EQ_OQ, _CMP_GE_OQ,
    _CMP_GT_OQ,
};

use crate::SimdCompare;

use super::common::{
    check_mask_in_bounds, lane_mask_64, movemask_64, not_mask, partial_mask_64, permutation_64,
    xor_index_64,
};

#[derive(Debug, Copy, Clone)]
pub struct Avx2F64x4(__m256d);

#[inline]
fn blend_256d(a: __m256d, b: __m256d, mask: __m256i) -> __m256d {
    unsafe { _mm256_blendv_pd(a, b, _mm256_castsi256_pd(mask)) }
}

#[inline]
fn permute_256d(a: __m256d, idx: __m256i) -> __m256d {
    unsafe { _mm256_castsi256_pd(_mm256_permutevar8x32_epi32(_mm256_castpd_si256(a), idx)) }
}

impl SimdCompare<f64, 4> for Avx2F64x4 {
    type OPMask = __m256i;

    const NETWORK_SORT_THRESHOLD: usize = 64;
    const PARTITION_UNROLL_FACTOR: usize = 8;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm256_min_pd(a.0, b.0)) }
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm256_max_pd(a.0, b.0)) }
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __m256i) -> Self {
        Self(blend_256d(a.0, b.0, mask))
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        Self(permute_256d(a.0, xor_index_64(distance)))
    }

    #[inline]
    fn loadu(data: &[f64]) -> Self {
        let data = &data[..4];
        unsafe { Self(_mm256_loadu_pd(data.as_ptr())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [f64]) {
        let data = &mut data[..4];
        unsafe { _mm256_storeu_pd(data.as_mut_ptr(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __m256i, data: &[f64]) -> Self {
        check_mask_in_bounds(movemask_64(mask), data.len(), 4);
        let loaded = unsafe { _mm256_maskload_pd(data.as_ptr(), mask) };
        Self(blend_256d(fill.0, loaded, mask))
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __m256i, data: &mut [f64]) {
        check_mask_in_bounds(movemask_64(mask), data.len(), 4);
        unsafe { _mm256_maskstore_pd(data.as_mut_ptr(), mask, input.0) }
    }

    #[inline]
    fn partial_mask(count: usize) -> __m256i {
        partial_mask_64(count)
    }

    #[inline]
    fn lane_mask(bits: u64) -> __m256i {
        lane_mask_64(bits)
    }

    #[inline]
    fn get_value_at_idx(input: Self, idx: usize) -> f64 {
        let mut lanes = [0f64; 4];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: f64) -> Self {
        unsafe { Self(_mm256_set1_pd(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_castpd_si256(_mm256_cmp_pd(a.0, b.0, _CMP_GE_OQ)) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_castpd_si256(_mm256_cmp_pd(a.0, b.0, _CMP_GT_OQ)) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_castpd_si256(_mm256_cmp_pd(a.0, b.0, _CMP_EQ_OQ)) }
    }

    #[inline]
    fn ones_count(mask: __m256i) -> usize {
        movemask_64(mask).count_ones() as usize
    }

    #[inline]
    fn not_mask(mask: __m256i) -> __m256i {
        not_mask(mask)
    }

    #[inline]
    fn mask_compressstoreu(array: &mut [f64], mask: __m256i, data: Self) {
        let bits = movemask_64(mask);
        let count = bits.count_ones() as usize;
        let array = &mut array[..count];
        let packed = permute_256d(data.0, permutation_64(!bits));
        unsafe { _mm256_maskstore_pd(array.as_mut_ptr(), partial_mask_64(count), packed) }
    }

    #[inline]
    fn double_compressstore(
        array: &mut [f64],
        l_store: usize,
        r_store: usize,
        mask: __m256i,
        data: Self,
    ) -> usize {
        let bits = movemask_64(mask);
        let packed = Self(permute_256d(data.0, permutation_64(bits)));
        Self::storeu(packed, &mut array[l_store..]);
        Self::storeu(packed, &mut array[r_store..]);
        bits.count_ones() as usize
    }
}
