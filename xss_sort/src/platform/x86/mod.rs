#[cfg(target_feature = "avx2")]
pub mod avx2;

#[cfg(all(feature = "avx512", target_feature = "avx512f"))]
pub mod avx512;
