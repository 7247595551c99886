use crate::{cmp_merge, coex, SimdCompare, SimdSortable};

/// Registers merged by the largest network; `sort_n` handles up to
/// `MAX_NETWORK_VECS * N` elements.
pub(crate) const MAX_NETWORK_VECS: usize = 32;

/// Bitmap of the lanes whose index has `bit` set. In a compare-exchange
/// against partner `i ^ bit` those lanes keep the maximum.
#[inline]
pub(crate) const fn upper_lanes(bit: usize, num_lanes: usize) -> u64 {
    let mut bits = 0u64;
    let mut i = 0;
    while i < num_lanes {
        if i & bit != 0 {
            bits |= 1 << i;
        }
        i += 1;
    }
    bits
}

#[inline]
pub(crate) fn reverse_vec<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(v: U) -> U {
    U::shuffle_xor(v, N - 1)
}

/// Sorts the lanes of one register ascending.
///
/// Bitonic sort in its "flip" form: each block of `block` lanes is merged by
/// comparing lane `i` with its mirror `i ^ (block - 1)`, then cleaned by
/// half-cleaners of decreasing distance.
#[inline]
pub(crate) fn sort_vec<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(vec: U) -> U {
    let mut v = vec;
    let mut block = 2;
    while block <= N {
        let flip = U::lane_mask(upper_lanes(block / 2, N));
        v = cmp_merge(v, U::shuffle_xor(v, block - 1), flip);
        let mut distance = block / 4;
        while distance > 0 {
            let mask = U::lane_mask(upper_lanes(distance, N));
            v = cmp_merge(v, U::shuffle_xor(v, distance), mask);
            distance /= 2;
        }
        block *= 2;
    }
    v
}

/// Sorts a register holding a bitonic sequence.
#[inline]
pub(crate) fn bitonic_merge_vec<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(
    vec: U,
) -> U {
    let mut v = vec;
    let mut distance = N / 2;
    while distance > 0 {
        let mask = U::lane_mask(upper_lanes(distance, N));
        v = cmp_merge(v, U::shuffle_xor(v, distance), mask);
        distance /= 2;
    }
    v
}

/*
 * Merges the two sorted halves of `group` into one sorted run spread over
 * all of its registers.
 */
#[inline]
fn bitonic_merge_group<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(group: &mut [U]) {
    let width = group.len();
    let (lo, hi) = group.split_at_mut(width / 2);

    // mirror stage: register i against the reverse of register width-1-i
    for (i, a) in lo.iter_mut().enumerate() {
        let b = &mut hi[width / 2 - 1 - i];
        let b_rev = reverse_vec(*b);
        let min_values = U::min(*a, b_rev);
        let max_values = U::max(*a, b_rev);
        *a = min_values;
        *b = reverse_vec(max_values);
    }

    // half-cleaners across registers
    let mut distance = width / 4;
    while distance > 0 {
        for block in group.chunks_exact_mut(2 * distance) {
            let (lo, hi) = block.split_at_mut(distance);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                coex(a, b);
            }
        }
        distance /= 2;
    }

    for v in group.iter_mut() {
        *v = bitonic_merge_vec(*v);
    }
}

/// Sorts the lanes across a power-of-two number of registers.
pub(crate) fn sort_vecs<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(vecs: &mut [U]) {
    debug_assert!(vecs.len().is_power_of_two());
    for v in vecs.iter_mut() {
        *v = sort_vec(*v);
    }
    let mut width = 2;
    while width <= vecs.len() {
        for group in vecs.chunks_exact_mut(width) {
            bitonic_merge_group(group);
        }
        width *= 2;
    }
}

/// Sorts up to `NUM_VECS * N` elements through registers. The tail register
/// is filled with `MAX_VALUE` so padding lanes sort past the real data.
pub(crate) fn sort_n_vec<T, const N: usize, U, const NUM_VECS: usize>(data: &mut [T])
where
    T: SimdSortable,
    U: SimdCompare<T, N>,
{
    let len = data.len();
    debug_assert!(len <= NUM_VECS * N);

    let fill = U::set(T::MAX_VALUE);
    let mut vecs = [fill; NUM_VECS];
    for (i, vec) in vecs.iter_mut().enumerate() {
        let start = i * N;
        if start + N <= len {
            *vec = U::loadu(&data[start..]);
        } else if start < len {
            *vec = U::mask_loadu(fill, U::partial_mask(len - start), &data[start..]);
        } else {
            break;
        }
    }

    sort_vecs(&mut vecs);

    for (i, vec) in vecs.iter().enumerate() {
        let start = i * N;
        if start + N <= len {
            U::storeu(*vec, &mut data[start..]);
        } else if start < len {
            U::mask_storeu(*vec, U::partial_mask(len - start), &mut data[start..]);
        } else {
            break;
        }
    }
}

/// Network sort for `data.len() <= MAX_NETWORK_VECS * N`, using the smallest
/// power-of-two number of registers that holds the range.
pub(crate) fn sort_n<T: SimdSortable, const N: usize, U: SimdCompare<T, N>>(data: &mut [T]) {
    debug_assert!(data.len() <= MAX_NETWORK_VECS * N);
    if data.len() <= 1 {
        return;
    }
    match data.len().div_ceil(N) {
        1 => sort_n_vec::<T, N, U, 1>(data),
        2 => sort_n_vec::<T, N, U, 2>(data),
        3..=4 => sort_n_vec::<T, N, U, 4>(data),
        5..=8 => sort_n_vec::<T, N, U, 8>(data),
        9..=16 => sort_n_vec::<T, N, U, 16>(data),
        _ => sort_n_vec::<T, N, U, 32>(data),
    }
}

#[cfg(test)]
pub(crate) mod test {
    use rand::{distributions::Standard, prelude::Distribution, rngs::StdRng, Rng, SeedableRng};

    use crate::{SimdCompare, SimdSortable};

    pub(crate) fn random_values<T>(len: usize, seed: u64) -> Vec<T>
    where
        Standard: Distribution<T>,
    {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen::<T>()).collect()
    }

    /// Values drawn from a handful of distinct keys.
    pub(crate) fn few_unique_values<T: From<u16>>(len: usize, seed: u64) -> Vec<T> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| T::from(rng.gen_range(0..5u16))).collect()
    }

    pub(crate) fn descending_values<T: From<u16>>(len: usize) -> Vec<T> {
        (0..len).rev().map(|x| T::from((x % 60_000) as u16)).collect()
    }

    pub(crate) fn sorted_copy<T: SimdSortable>(data: &[T]) -> Vec<T> {
        let mut expected = data.to_vec();
        expected.sort_unstable_by(T::total_cmp);
        expected
    }

    pub(crate) fn to_array<T, const N: usize, U>(v: U) -> [T; N]
    where
        T: SimdSortable,
        U: SimdCompare<T, N>,
    {
        let mut out = [T::MIN_VALUE; N];
        U::storeu(v, &mut out);
        out
    }

    pub(crate) fn mask_to_bits<T, const N: usize, U>(mask: U::OPMask) -> u64
    where
        T: SimdSortable,
        U: SimdCompare<T, N>,
    {
        let lanes = to_array::<T, N, U>(U::mask_mov(
            U::set(T::MIN_VALUE),
            U::set(T::MAX_VALUE),
            mask,
        ));
        lanes
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == T::MAX_VALUE)
            .fold(0, |bits, (i, _)| bits | (1 << i))
    }

    /// Masks worth checking for an `n`-lane register.
    pub(crate) fn sample_masks(n: usize) -> Vec<u64> {
        if n <= 8 {
            (0..1u64 << n).collect()
        } else {
            let mut rng = StdRng::seed_from_u64(7);
            let full = if n == 64 { u64::MAX } else { (1 << n) - 1 };
            let mut masks = vec![0, full, 1, 1 << (n - 1), 0x5555_5555_5555_5555 & full];
            masks.extend((0..64).map(|_| rng.gen::<u64>() & full));
            masks
        }
    }

    macro_rules! test_min_max {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_min_max_ $ty>]() {
                    let a = random_values::<$ty>($lanes, 1);
                    let b = random_values::<$ty>($lanes, 2);
                    let va = <$vec as SimdCompare<$ty, $lanes>>::loadu(&a);
                    let vb = <$vec as SimdCompare<$ty, $lanes>>::loadu(&b);
                    let mins = to_array::<$ty, $lanes, $vec>(<$vec as SimdCompare<$ty, $lanes>>::min(va, vb));
                    let maxs = to_array::<$ty, $lanes, $vec>(<$vec as SimdCompare<$ty, $lanes>>::max(va, vb));
                    for i in 0..$lanes {
                        let (lo, hi) = if a[i] < b[i] { (a[i], b[i]) } else { (b[i], a[i]) };
                        assert_eq!(mins[i], lo);
                        assert_eq!(maxs[i], hi);
                    }
                }
            }
        };
    }
    pub(crate) use test_min_max;

    macro_rules! test_loadu_storeu {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_loadu_storeu_ $ty>]() {
                    let data = random_values::<$ty>($lanes + 3, 3);
                    let v = <$vec as SimdCompare<$ty, $lanes>>::loadu(&data[3..]);
                    let mut out = vec![<$ty as SimdSortable>::MIN_VALUE; $lanes + 2];
                    <$vec as SimdCompare<$ty, $lanes>>::storeu(v, &mut out[1..]);
                    assert_eq!(out[0], <$ty as SimdSortable>::MIN_VALUE);
                    assert_eq!(&out[1..=$lanes], &data[3..]);
                    assert_eq!(out[$lanes + 1], <$ty as SimdSortable>::MIN_VALUE);
                    for i in 0..$lanes {
                        assert_eq!(<$vec as SimdCompare<$ty, $lanes>>::get_value_at_idx(v, i), data[3 + i]);
                    }
                }
            }
        };
    }
    pub(crate) use test_loadu_storeu;

    macro_rules! test_mask_loadu_storeu {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_mask_loadu_storeu_ $ty>]() {
                    type V = $vec;
                    let data = random_values::<$ty>($lanes, 4);
                    let fill = <V as SimdCompare<$ty, $lanes>>::set(<$ty as SimdSortable>::MAX_VALUE);
                    for count in 0..=$lanes {
                        let mask = <V as SimdCompare<$ty, $lanes>>::partial_mask(count);
                        let v = <V as SimdCompare<$ty, $lanes>>::mask_loadu(fill, mask, &data[..count]);
                        let lanes = to_array::<$ty, $lanes, V>(v);
                        assert_eq!(&lanes[..count], &data[..count]);
                        assert!(lanes[count..].iter().all(|x| *x == <$ty as SimdSortable>::MAX_VALUE));

                        let mut out = vec![<$ty as SimdSortable>::MIN_VALUE; $lanes];
                        <V as SimdCompare<$ty, $lanes>>::mask_storeu(v, mask, &mut out[..count]);
                        assert_eq!(&out[..count], &data[..count]);
                        assert!(out[count..].iter().all(|x| *x == <$ty as SimdSortable>::MIN_VALUE));
                        assert_eq!(<V as SimdCompare<$ty, $lanes>>::ones_count(mask), count);
                    }
                }
            }
        };
    }
    pub(crate) use test_mask_loadu_storeu;

    macro_rules! test_compare {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_compare_ $ty>]() {
                    type V = $vec;
                    let a = few_unique_values::<$ty>($lanes, 5);
                    let b = few_unique_values::<$ty>($lanes, 6);
                    let va = <V as SimdCompare<$ty, $lanes>>::loadu(&a);
                    let vb = <V as SimdCompare<$ty, $lanes>>::loadu(&b);
                    let expected = |f: fn(&$ty, &$ty) -> bool| {
                        (0..$lanes).filter(|i| f(&a[*i], &b[*i])).fold(0u64, |bits, i| bits | (1 << i))
                    };
                    let ge = <V as SimdCompare<$ty, $lanes>>::ge(va, vb);
                    let gt = <V as SimdCompare<$ty, $lanes>>::gt(va, vb);
                    let eq = <V as SimdCompare<$ty, $lanes>>::eq(va, vb);
                    assert_eq!(mask_to_bits::<$ty, $lanes, V>(ge), expected(|x, y| x >= y));
                    assert_eq!(mask_to_bits::<$ty, $lanes, V>(gt), expected(|x, y| x > y));
                    assert_eq!(mask_to_bits::<$ty, $lanes, V>(eq), expected(|x, y| x == y));
                    let not_ge = <V as SimdCompare<$ty, $lanes>>::not_mask(ge);
                    assert_eq!(mask_to_bits::<$ty, $lanes, V>(not_ge), expected(|x, y| x < y));
                    assert_eq!(
                        <V as SimdCompare<$ty, $lanes>>::ones_count(ge) + <V as SimdCompare<$ty, $lanes>>::ones_count(not_ge),
                        $lanes
                    );
                    for bits in sample_masks($lanes) {
                        let mask = <V as SimdCompare<$ty, $lanes>>::lane_mask(bits);
                        assert_eq!(mask_to_bits::<$ty, $lanes, V>(mask), bits);
                    }
                }
            }
        };
    }
    pub(crate) use test_compare;

    macro_rules! test_reduce_min_max {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_reduce_min_max_ $ty>]() {
                    for seed in 0..16 {
                        let data = random_values::<$ty>($lanes, seed);
                        let v = <$vec as SimdCompare<$ty, $lanes>>::loadu(&data);
                        let sorted = sorted_copy(&data);
                        assert_eq!(<$vec as SimdCompare<$ty, $lanes>>::reducemin(v), sorted[0]);
                        assert_eq!(<$vec as SimdCompare<$ty, $lanes>>::reducemax(v), sorted[$lanes - 1]);
                    }
                }
            }
        };
    }
    pub(crate) use test_reduce_min_max;

    macro_rules! test_shuffle_xor {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_shuffle_xor_ $ty>]() {
                    let data = random_values::<$ty>($lanes, 8);
                    let v = <$vec as SimdCompare<$ty, $lanes>>::loadu(&data);
                    for distance in 0..$lanes {
                        let shuffled = to_array::<$ty, $lanes, $vec>(
                            <$vec as SimdCompare<$ty, $lanes>>::shuffle_xor(v, distance),
                        );
                        for i in 0..$lanes {
                            assert_eq!(shuffled[i], data[i ^ distance]);
                        }
                    }
                }
            }
        };
    }
    pub(crate) use test_shuffle_xor;

    macro_rules! test_compress_store {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_compress_store_ $ty>]() {
                    type V = $vec;
                    let data = random_values::<$ty>($lanes, 9);
                    let v = <V as SimdCompare<$ty, $lanes>>::loadu(&data);
                    for bits in sample_masks($lanes) {
                        let mask = <V as SimdCompare<$ty, $lanes>>::lane_mask(bits);
                        let selected: Vec<$ty> = (0..$lanes).filter(|i| bits >> i & 1 == 1).map(|i| data[i]).collect();
                        let mut out = vec![<$ty as SimdSortable>::MIN_VALUE; $lanes + 1];
                        <V as SimdCompare<$ty, $lanes>>::mask_compressstoreu(&mut out, mask, v);
                        assert_eq!(&out[..selected.len()], &selected[..]);
                        assert!(out[selected.len()..].iter().all(|x| *x == <$ty as SimdSortable>::MIN_VALUE));
                    }
                }
            }
        };
    }
    pub(crate) use test_compress_store;

    macro_rules! test_double_compress_store {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_double_compress_store_ $ty>]() {
                    type V = $vec;
                    let data = random_values::<$ty>($lanes, 10);
                    let v = <V as SimdCompare<$ty, $lanes>>::loadu(&data);
                    for bits in sample_masks($lanes) {
                        let mask = <V as SimdCompare<$ty, $lanes>>::lane_mask(bits);
                        let left: Vec<$ty> = (0..$lanes).filter(|i| bits >> i & 1 == 0).map(|i| data[i]).collect();
                        let right: Vec<$ty> = (0..$lanes).filter(|i| bits >> i & 1 == 1).map(|i| data[i]).collect();

                        // disjoint store points
                        let mut out = vec![<$ty as SimdSortable>::MIN_VALUE; 3 * $lanes];
                        let amount = <V as SimdCompare<$ty, $lanes>>::double_compressstore(&mut out, 0, 2 * $lanes, mask, v);
                        assert_eq!(amount, right.len());
                        assert_eq!(&out[..left.len()], &left[..]);
                        assert_eq!(sorted_copy(&out[3 * $lanes - amount..]), sorted_copy(&right));

                        // shared store point
                        let mut out = vec![<$ty as SimdSortable>::MIN_VALUE; $lanes];
                        let amount = <V as SimdCompare<$ty, $lanes>>::double_compressstore(&mut out, 0, 0, mask, v);
                        assert_eq!(amount, right.len());
                        assert_eq!(&out[..left.len()], &left[..]);
                        assert_eq!(sorted_copy(&out[left.len()..]), sorted_copy(&right));
                    }
                }
            }
        };
    }
    pub(crate) use test_double_compress_store;

    macro_rules! test_sort_vec {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_sort_vec_ $ty>]() {
                    type V = $vec;
                    for seed in 0..32 {
                        let data = random_values::<$ty>($lanes, seed);
                        let v = crate::network::sort_vec::<$ty, $lanes, V>(<V as SimdCompare<$ty, $lanes>>::loadu(&data));
                        assert_eq!(to_array::<$ty, $lanes, V>(v).to_vec(), sorted_copy(&data));

                        // ascending half followed by a descending half
                        let mut bitonic = sorted_copy(&data);
                        bitonic[$lanes / 2..].reverse();
                        let v = crate::network::bitonic_merge_vec::<$ty, $lanes, V>(<V as SimdCompare<$ty, $lanes>>::loadu(&bitonic));
                        assert_eq!(to_array::<$ty, $lanes, V>(v).to_vec(), sorted_copy(&data));
                    }
                }
            }
        };
    }
    pub(crate) use test_sort_vec;

    macro_rules! test_sort_n {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_sort_n_ $ty>]() {
                    for len in 0..=(crate::network::MAX_NETWORK_VECS * $lanes) {
                        let mut data = random_values::<$ty>(len, len as u64);
                        let expected = sorted_copy(&data);
                        crate::network::sort_n::<$ty, $lanes, $vec>(&mut data);
                        assert_eq!(data, expected, "len {}", len);
                    }
                    let mut data = few_unique_values::<$ty>(crate::network::MAX_NETWORK_VECS * $lanes - 3, 11);
                    let expected = sorted_copy(&data);
                    crate::network::sort_n::<$ty, $lanes, $vec>(&mut data);
                    assert_eq!(data, expected);
                }
            }
        };
    }
    pub(crate) use test_sort_n;

    macro_rules! test_partition {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            paste::paste! {
                #[test]
                fn [<test_partition_ $ty>]() {
                    let sizes = [0, 1, $lanes - 1, $lanes, $lanes + 1, 3 * $lanes + 5, 257, 1000, 4099];
                    for (seed, len) in sizes.iter().copied().enumerate() {
                        for data in [random_values::<$ty>(len, seed as u64), few_unique_values::<$ty>(len, seed as u64)] {
                            if data.is_empty() {
                                continue;
                            }
                            let pivot = data[len / 2];
                            for use_gt in [false, true] {
                                let mut plain = data.clone();
                                let (mut smallest, mut biggest) = (<$ty as SimdSortable>::MAX_VALUE, <$ty as SimdSortable>::MIN_VALUE);
                                let index = crate::partition::partition_simd::<$ty, $lanes, $vec>(&mut plain, pivot, &mut smallest, &mut biggest, use_gt);
                                crate::partition::test::check_partition(&data, &plain, index, pivot, use_gt);
                                assert_eq!(smallest, sorted_copy(&data)[0]);
                                assert_eq!(biggest, sorted_copy(&data)[len - 1]);

                                let mut unrolled = data.clone();
                                let (mut smallest, mut biggest) = (<$ty as SimdSortable>::MAX_VALUE, <$ty as SimdSortable>::MIN_VALUE);
                                let unrolled_index = crate::partition::partition_unrolled::<$ty, $lanes, $vec>(&mut unrolled, pivot, &mut smallest, &mut biggest, use_gt);
                                assert_eq!(unrolled_index, index);
                                assert_eq!(sorted_copy(&unrolled[..index]), sorted_copy(&plain[..index]));
                                assert_eq!(smallest, sorted_copy(&data)[0]);
                                assert_eq!(biggest, sorted_copy(&data)[len - 1]);
                            }
                        }
                    }
                }
            }
        };
    }
    pub(crate) use test_partition;

    macro_rules! test_sort_e2e {
        ($ty: ident, $sort_fn: path) => {
            paste::paste! {
                #[test]
                fn [<test_sort_e2e_ $ty>]() {
                    for (seed, len) in [0usize, 1, 2, 15, 16, 17, 21, 100, 255, 513, 1025, 4096, 20_000, 100_000].iter().copied().enumerate() {
                        let inputs = [
                            random_values::<$ty>(len, seed as u64),
                            few_unique_values::<$ty>(len, seed as u64),
                            descending_values::<$ty>(len),
                            sorted_copy(&random_values::<$ty>(len, seed as u64 + 100)),
                        ];
                        for input in inputs {
                            let mut data = input.clone();
                            $sort_fn(&mut data);
                            assert_eq!(data, sorted_copy(&input), "len {}", len);
                        }
                    }
                }
            }
        };
    }
    pub(crate) use test_sort_e2e;

    /// All element-type instantiations of one register family.
    macro_rules! test_vector_ops {
        ($ty: ident, $lanes: expr, $vec: ty) => {
            test_min_max!($ty, $lanes, $vec);
            test_loadu_storeu!($ty, $lanes, $vec);
            test_mask_loadu_storeu!($ty, $lanes, $vec);
            test_compare!($ty, $lanes, $vec);
            test_reduce_min_max!($ty, $lanes, $vec);
            test_shuffle_xor!($ty, $lanes, $vec);
            test_compress_store!($ty, $lanes, $vec);
            test_double_compress_store!($ty, $lanes, $vec);
            test_sort_vec!($ty, $lanes, $vec);
            test_sort_n!($ty, $lanes, $vec);
            test_partition!($ty, $lanes, $vec);
        };
    }
    pub(crate) use test_vector_ops;

    #[test]
    fn test_upper_lanes() {
        assert_eq!(super::upper_lanes(1, 8), 0b1010_1010);
        assert_eq!(super::upper_lanes(2, 8), 0b1100_1100);
        assert_eq!(super::upper_lanes(4, 8), 0b1111_0000);
        assert_eq!(super::upper_lanes(8, 16), 0xff00);
        assert_eq!(super::upper_lanes(2, 4), 0b1100);
    }
}
