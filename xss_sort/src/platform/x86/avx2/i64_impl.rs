use std::arch::x86_64::{
    __m256i, _mm256_blendv_epi8, _mm256_cmpeq_epi64, _mm256_cmpgt_epi64, _mm256_loadu_si256,
    _mm256_maskload_epi64, _mm256_maskstore_epi64, _mm256_permutevar8x32_epi32,
    _mm256_set1_epi64x, _mm256_storeu_si256,
};

use crate::SimdCompare;

use super::common::{
    check_mask_in_bounds, lane_mask_64, movemask_64, not_mask, partial_mask_64, permutation_64,
    xor_index_64,
};

/// Four `i64` lanes. AVX2 has no 64-bit min/max, so both go through a
/// compare and blend.
#[derive(Debug, Copy, Clone)]
pub struct Avx2I64x4(__m256i);

#[inline]
fn blend_256i(a: __m256i, b: __m256i, mask: __m256i) -> __m256i {
    unsafe { _mm256_blendv_epi8(a, b, mask) }
}

impl SimdCompare<i64, 4> for Avx2I64x4 {
    type OPMask = __m256i;

    const NETWORK_SORT_THRESHOLD: usize = 64;
    const PARTITION_UNROLL_FACTOR: usize = 8;

    #[inline]
    fn min(a: Self, b: Self) -> Self {
        let a_greater = unsafe { _mm256_cmpgt_epi64(a.0, b.0) };
        Self(blend_256i(a.0, b.0, a_greater))
    }

    #[inline]
    fn max(a: Self, b: Self) -> Self {
        let a_greater = unsafe { _mm256_cmpgt_epi64(a.0, b.0) };
        Self(blend_256i(b.0, a.0, a_greater))
    }

    #[inline]
    fn mask_mov(a: Self, b: Self, mask: __m256i) -> Self {
        Self(blend_256i(a.0, b.0, mask))
    }

    #[inline]
    fn shuffle_xor(a: Self, distance: usize) -> Self {
        unsafe { Self(_mm256_permutevar8x32_epi32(a.0, xor_index_64(distance))) }
    }

    #[inline]
    fn loadu(data: &[i64]) -> Self {
        let data = &data[..4];
        unsafe { Self(_mm256_loadu_si256(data.as_ptr().cast())) }
    }

    #[inline]
    fn storeu(input: Self, data: &mut [i64]) {
        let data = &mut data[..4];
        unsafe { _mm256_storeu_si256(data.as_mut_ptr().cast(), input.0) }
    }

    #[inline]
    fn mask_loadu(fill: Self, mask: __m256i, data: &[i64]) -> Self {
        check_mask_in_bounds(movemask_64(mask), data.len(), 4);
        let loaded = unsafe { _mm256_maskload_epi64(data.as_ptr(), mask) };
        Self(blend_256i(fill.0, loaded, mask))
    }

    #[inline]
    fn mask_storeu(input: Self, mask: __m256i, data: &mut [i64]) {
        check_mask_in_bounds(movemask_64(mask), data.len(), 4);
        unsafe { _mm256_maskstore_epi64(data.as_mut_ptr(), mask, input.0) }
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
    fn get_value_at_idx(input: Self, idx: usize) -> i64 {
        let mut lanes = [0i64; 4];
        Self::storeu(input, &mut lanes);
        lanes[idx]
    }

    #[inline]
    fn set(value: i64) -> Self {
        unsafe { Self(_mm256_set1_epi64x(value)) }
    }

    #[inline]
    fn ge(a: Self, b: Self) -> __m256i {
        unsafe { not_mask(_mm256_cmpgt_epi64(b.0, a.0)) }
    }

    #[inline]
    fn gt(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_cmpgt_epi64(a.0, b.0) }
    }

    #[inline]
    fn eq(a: Self, b: Self) -> __m256i {
        unsafe { _mm256_cmpeq_epi64(a.0, b.0) }
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
    fn mask_compressstoreu(array: &mut [i64], mask: __m256i, data: Self) {
        let bits = movemask_64(mask);
        let count = bits.count_ones() as usize;
        let array = &mut array[..count];
        unsafe {
            let packed = _mm256_permutevar8x32_epi32(data.0, permutation_64(!bits));
            _mm256_maskstore_epi64(array.as_mut_ptr(), partial_mask_64(count), packed);
        }
    }

    #[inline]
    fn double_compressstore(
        array: &mut [i64],
        l_store: usize,
        r_store: usize,
        mask: __m256i,
        data: Self,
    ) -> usize {
        let bits = movemask_64(mask);
        let packed = unsafe { Self(_mm256_permutevar8x32_epi32(data.0, permutation_64(bits))) };
        Self::storeu(packed, &mut array[l_store..]);
        Self::storeu(packed, &mut array[r_store..]);
        bits.count_ones() as usize
    }
}
