use std::arch::x86_64::{
    __m512i, _mm512_set1_epi32, _mm512_set1_epi64, _mm512_setr_epi32, _mm512_setr_epi64,
    _mm512_xor_si512,
};

#[inline]
pub(super) fn xor_index_32(distance: usize) -> __m512i {
    unsafe {
        _mm512_xor_si512(
            _mm512_setr_epi32(0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15),
            _mm512_set1_epi32(distance as i32),
        )
    }
}

#[inline]
pub(super) fn xor_index_64(distance: usize) -> __m512i {
    unsafe {
        _mm512_xor_si512(
            _mm512_setr_epi64(0, 1, 2, 3, 4, 5, 6, 7),
            _mm512_set1_epi64(distance as i64),
        )
    }
}

#[inline]
pub(super) const fn partial_mask_16(count: usize) -> u16 {
    ((1u32 << count) - 1) as u16
}

#[inline]
pub(super) const fn partial_mask_8(count: usize) -> u8 {
    ((1u16 << count) - 1) as u8
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
