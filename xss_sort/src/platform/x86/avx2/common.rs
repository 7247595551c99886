use std::arch::x86_64::{
    __m256i, _mm256_and_si256, _mm256_castsi256_pd, _mm256_castsi256_ps,
    _mm256_cmpeq_epi32, _mm256_cmpeq_epi64, _mm256_cmpgt_epi32, _mm256_cmpgt_epi64,
    _mm256_loadu_si256, _mm256_movemask_pd, _mm256_movemask_ps, _mm256_set1_epi32,
    _mm256_set1_epi64x, _mm256_setr_epi32, _mm256_setr_epi64x, _mm256_xor_si256,
};

/*
 * For every lane mask: the 32-bit source slots of the lanes whose bit is clear,
 * in order, followed by those whose bit is set. Feeding the row to
 * _mm256_permutevar8x32 packs the "left" lanes at the bottom and the "right"
 * lanes at the top of the register.
 */
const fn partition_permutations<const ENTRIES: usize>(lanes: usize) -> [[i32; 8]; ENTRIES] {
    let slots = 8 / lanes;
    let mut table = [[0i32; 8]; ENTRIES];
    let mut mask = 0;
    while mask < ENTRIES {
        let mut out = 0;
        let mut pass = 0;
        while pass < 2 {
            let mut lane = 0;
            while lane < lanes {
                if (mask >> lane) & 1 == pass {
                    let mut k = 0;
                    while k < slots {
                        table[mask][out] = (lane * slots + k) as i32;
                        out += 1;
                        k += 1;
                    }
                }
                lane += 1;
            }
            pass += 1;
        }
        mask += 1;
    }
    table
}

static PARTITION_PERMUTATIONS_32: [[i32; 8]; 256] = partition_permutations::<256>(8);
static PARTITION_PERMUTATIONS_64: [[i32; 8]; 16] = partition_permutations::<16>(4);

#[inline]
pub(super) fn permutation_32(bits: u64) -> __m256i {
    let row = &PARTITION_PERMUTATIONS_32[(bits & 0xff) as usize];
    unsafe { _mm256_loadu_si256(row.as_ptr().cast()) }
}

#[inline]
pub(super) fn permutation_64(bits: u64) -> __m256i {
    let row = &PARTITION_PERMUTATIONS_64[(bits & 0xf) as usize];
    unsafe { _mm256_loadu_si256(row.as_ptr().cast()) }
}

#[inline]
pub(super) fn movemask_32(mask: __m256i) -> u64 {
    unsafe { _mm256_movemask_ps(_mm256_castsi256_ps(mask)) as u32 as u64 }
}

#[inline]
pub(super) fn movemask_64(mask: __m256i) -> u64 {
    unsafe { _mm256_movemask_pd(_mm256_castsi256_pd(mask)) as u32 as u64 }
}

#[inline]
pub(super) fn lane_mask_32(bits: u64) -> __m256i {
    unsafe {
        let selectors = _mm256_setr_epi32(1, 2, 4, 8, 16, 32, 64, 128);
        let v = _mm256_and_si256(_mm256_set1_epi32(bits as i32), selectors);
        _mm256_cmpeq_epi32(v, selectors)
    }
}

#[inline]
pub(super) fn lane_mask_64(bits: u64) -> __m256i {
    unsafe {
        let selectors = _mm256_setr_epi64x(1, 2, 4, 8);
        let v = _mm256_and_si256(_mm256_set1_epi64x(bits as i64), selectors);
        _mm256_cmpeq_epi64(v, selectors)
    }
}

#[inline]
pub(super) fn partial_mask_32(count: usize) -> __m256i {
    unsafe {
        _mm256_cmpgt_epi32(
            _mm256_set1_epi32(count as i32),
            _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7),
        )
    }
}

#[inline]
pub(super) fn partial_mask_64(count: usize) -> __m256i {
    unsafe { _mm256_cmpgt_epi64(_mm256_set1_epi64x(count as i64), _mm256_setr_epi64x(0, 1, 2, 3)) }
}

#[inline]
pub(super) fn not_mask(mask: __m256i) -> __m256i {
    unsafe { _mm256_xor_si256(mask, _mm256_set1_epi32(-1)) }
}

/// `_mm256_permutevar8x32` index sending lane `i` to lane `i ^ distance`.
#[inline]
pub(super) fn xor_index_32(distance: usize) -> __m256i {
    unsafe {
        _mm256_xor_si256(
            _mm256_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7),
            _mm256_set1_epi32(distance as i32),
        )
    }
}

/// Same as [`xor_index_32`] for 64-bit lanes, moving slot pairs.
#[inline]
pub(super) fn xor_index_64(distance: usize) -> __m256i {
    xor_index_32(2 * distance)
}

/// Masked loads and stores must not reach past the slice.
#[inline]
pub(super) fn check_mask_in_bounds(bits: u64, len: usize, lanes: usize) {
    assert!(
        len >= lanes || bits >> len == 0,
        "mask {:#b} selects lanes past a slice of {} elements",
        bits,
        len
    );
}
