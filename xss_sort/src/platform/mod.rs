pub mod portable;

#[cfg(target_arch = "x86_64")]
pub mod x86;

use crate::api::ElementType;
use crate::SimdSortable;

/// Register family the sort entry points are bound to in this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SimdLevel {
    /// Array emulation, no vector extension assumed.
    Portable,
    Avx2,
    Avx512,
}

/// Backend selected at compile time from the enabled target features.
pub const fn simd_level() -> SimdLevel {
    if cfg!(all(
        target_arch = "x86_64",
        feature = "avx512",
        target_feature = "avx512f"
    )) {
        SimdLevel::Avx512
    } else if cfg!(all(target_arch = "x86_64", target_feature = "avx2")) {
        SimdLevel::Avx2
    } else {
        SimdLevel::Portable
    }
}

/// Element types with a vectorized sort and partition.
pub trait SimdSort: SimdSortable {
    const ELEMENT_TYPE: ElementType;

    /// Sorts the whole slice ascending; NaNs go last.
    fn simd_sort(data: &mut [Self]);

    /// One partition pass over the whole slice; see [`crate::partition()`].
    fn simd_partition(data: &mut [Self], pivot_index1: usize, pivot_index2: usize) -> [usize; 2];
}

macro_rules! impl_simd_sort {
    ($ty: ident, $element: expr) => {
        paste::paste! {
            impl SimdSort for $ty {
                const ELEMENT_TYPE: ElementType = $element;

                fn simd_sort(data: &mut [$ty]) {
                    #[cfg(all(target_arch = "x86_64", feature = "avx512", target_feature = "avx512f"))]
                    {
                        x86::avx512::[<avx512_sort_ $ty>](data)
                    }

                    #[cfg(all(
                        target_arch = "x86_64",
                        target_feature = "avx2",
                        not(all(feature = "avx512", target_feature = "avx512f"))
                    ))]
                    {
                        x86::avx2::[<avx2_sort_ $ty>](data)
                    }

                    #[cfg(not(all(
                        target_arch = "x86_64",
                        any(target_feature = "avx2", all(feature = "avx512", target_feature = "avx512f"))
                    )))]
                    {
                        portable::[<portable_sort_ $ty>](data)
                    }
                }

                fn simd_partition(data: &mut [$ty], pivot_index1: usize, pivot_index2: usize) -> [usize; 2] {
                    #[cfg(all(target_arch = "x86_64", feature = "avx512", target_feature = "avx512f"))]
                    {
                        x86::avx512::[<avx512_partition_ $ty>](data, pivot_index1, pivot_index2)
                    }

                    #[cfg(all(
                        target_arch = "x86_64",
                        target_feature = "avx2",
                        not(all(feature = "avx512", target_feature = "avx512f"))
                    ))]
                    {
                        x86::avx2::[<avx2_partition_ $ty>](data, pivot_index1, pivot_index2)
                    }

                    #[cfg(not(all(
                        target_arch = "x86_64",
                        any(target_feature = "avx2", all(feature = "avx512", target_feature = "avx512f"))
                    )))]
                    {
                        portable::[<portable_partition_ $ty>](data, pivot_index1, pivot_index2)
                    }
                }
            }
        }
    };
}

impl_simd_sort!(i32, ElementType::Int);
impl_simd_sort!(i64, ElementType::Long);
impl_simd_sort!(f32, ElementType::Float);
impl_simd_sort!(f64, ElementType::Double);
