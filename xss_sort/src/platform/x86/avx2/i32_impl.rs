use std::arch::x86_64::{
    __m256i, _mm256_blendv_epi8, _mm256_cmpeq_epi32, _mm256_cmpgt_epi32, _mm256_loadu_si256,
    _mm256_maskload_epi32, _mm256_maskstore_epi32, _mm256_max_epi32, _mm256_min_epi32,
    _mm256_permutevar8x32_epi32, _mm256_set1_epi32, _mm256_storeu_si256,
};

use crate::SimdCompare;

use super::common::{
    check_mask_in_bounds, lane_mask_32, movemask_32, not_mask, partial_mask_32, permutation_32,
    xor_index_32,
};

#[derive(Debug, Copy, Clone)]
pub struct Avx2I32x8(__m256i);

impl SimdCompare<i32, 8> for Avx2I32x8 {
    type OPMask = __m256i;

    const NETWORK_SORT_THRESHOLD: usize = 256;
    const PARTITION_UNROLL_FACTOR: usize = 4;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        unsafe { Self(_mm256_min_epi32(a.0, b.0)) }
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        unsafe { Self(_mm256_max_epi32(a.0, b.0)) }
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __m256i) -> Self {
        unsafe { Self(_mm256_blendv_epi8(a.0, b.0, mask)) }
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        unsafe { Self(_mm256_permutevar8x32_epi32(a.0, xor_index_32(distance))) }
    }

    #[inline]
    fn loadu(data: &[i32]) -> Self {
        let data = &data[..8];
        unsafe { Self(_mm256_loadu_si256(data.as_ptr().cast())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [i32]) {
        let data = &mut data[..8];
        unsafe { _mm256_storeu_si256(data.as_mut_ptr().cast(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __m256i, data: &[i32]) -> Self {
        check_mask_in_bounds(movemask_32(mask), data.len(), 8);
        unsafe {
            let loaded = _mm256_maskload_epi32(data.as_ptr(), mask);
            Self(_mm256_blendv_epi8(fill.0, loaded, mask))
        }
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __m256i, data: &mut [i32]) {
        check_mask_in_bounds(movemask_32(mask), data.len(), 8);
        unsafe { _mm256_maskstore_epi32(data.as_mut_ptr(), mask, input.0) }
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
    fn get_value_at_idx(input: Self, idx: usize) -> i32 {
        let mut lanes = [0i32; 8];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: i32) -> Self {
        unsafe { Self(_mm256_set1_epi32(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __m256i {
        unsafe { not_mask(_mm256_cmpgt_epi32(b.0, a.0)) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_cmpgt_epi32(a.0, b.0) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_cmpeq_epi32(a.0, b.0) }
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
    fn mask_compressstoreu(array: &mut [i32], mask: __m256i, data: Self) {
        let bits = movemask_32(mask);
        let count = bits.count_ones() as usize;
        let array = &mut array[..count];
        unsafe {
            // selected lanes are the clear lanes of the inverted mask
            let packed = _mm256_permutevar8x32_epi32(data.0, permutation_32(!bits));
            _mm256_maskstore_epi32(array.as_mut_ptr(), partial_mask_32(count), packed);
        }
    }

    #[inline]
    fn double_compressstore(
        array: &mut [i32],
        l_store: usize,
        r_store: usize,
        mask: __m256i,
        data: Self,
    ) -> usize {
        let bits = movemask_32(mask);
        let packed = unsafe { Self(_mm256_permutevar8x32_epi32(data.0, permutation_32(bits))) };
        Self::storeu(packed, &mut array[l_store..]);
        Self::storeu(packed, &mut array[r_store..]);
        bits.count_ones() as usize
    }
}
