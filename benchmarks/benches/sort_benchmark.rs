use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use paste::paste;
use rand::{distributions::Standard, prelude::Distribution, rngs::StdRng, Rng, SeedableRng};

const BENCH_LEN: usize = 1024 * 1024;

pub fn create_uniform_data<T>(size: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    let mut rng = StdRng::seed_from_u64(42);
    (0..size).map(|_| rng.gen::<T>()).collect()
}

fn slice_sort_unstable<T: Ord>(data: &mut [T]) {
    data.sort_unstable();
}

fn slice_sort_unstable_by<T: PartialOrd>(data: &mut [T]) {
    data.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap());
}

/// Times `$sort_fn` on fresh copies of the same uniform input.
macro_rules! bench_sort {
    ($c: ident, $ty: ident, $name: expr, $sort_fn: path) => {{
        let data_t = create_uniform_data::<$ty>(BENCH_LEN);
        $c.bench_function($name, move |b| {
            // keep the clone out of the timing
            b.iter_batched(
                || data_t.clone(),
                |mut data| {
                    $sort_fn(data.as_mut_slice());
                    black_box(data);
                },
                BatchSize::LargeInput,
            )
        });
    }};
}

macro_rules! rust_std_unstable {
    ($c: ident, $ty: ident, $sort_fn: ident) => {
        #[cfg(feature = "rust_std_unstable")]
        bench_sort!($c, $ty, concat!("rust_std_unstable_", stringify!($ty)), $sort_fn);
    };
}

macro_rules! xss_sort {
    ($c: ident, $ty: ident) => {
        paste! {
            bench_sort!($c, $ty, concat!("xss_sort_", stringify!($ty)), xss_sort::sort);
            bench_sort!(
                $c,
                $ty,
                concat!("portable_", stringify!($ty)),
                xss_sort::platform::portable::[<portable_sort_ $ty>]
            );

            #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
            bench_sort!(
                $c,
                $ty,
                concat!("avx2_", stringify!($ty)),
                xss_sort::platform::x86::avx2::[<avx2_sort_ $ty>]
            );

            #[cfg(all(target_arch = "x86_64", feature = "avx512", target_feature = "avx512f"))]
            bench_sort!(
                $c,
                $ty,
                concat!("avx512_", stringify!($ty)),
                xss_sort::platform::x86::avx512::[<avx512_sort_ $ty>]
            );
        }
    };
}

pub fn sort_benchmark(c: &mut Criterion) {
    rust_std_unstable!(c, i32, slice_sort_unstable);
    rust_std_unstable!(c, i64, slice_sort_unstable);
    rust_std_unstable!(c, f32, slice_sort_unstable_by);
    rust_std_unstable!(c, f64, slice_sort_unstable_by);

    xss_sort!(c, i32);
    xss_sort!(c, i64);
    xss_sort!(c, f32);
    xss_sort!(c, f64);
}

pub fn partition_benchmark(c: &mut Criterion) {
    let data = create_uniform_data::<i64>(BENCH_LEN);
    let pivot = data[BENCH_LEN / 2];

    {
        use xss_sort::platform::portable::portable_partition_around_i64;
        let data_t = data.clone();
        c.bench_function("portable_partition_i64", move |b| {
            b.iter_batched(
                || data_t.clone(),
                |mut data| black_box(portable_partition_around_i64(&mut data, pivot)),
                BatchSize::LargeInput,
            )
        });
    }

    #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))]
    {
        use xss_sort::platform::x86::avx2::avx2_partition_around_i64;
        let data_t = data.clone();
        c.bench_function("avx2_partition_i64", move |b| {
            b.iter_batched(
                || data_t.clone(),
                |mut data| black_box(avx2_partition_around_i64(&mut data, pivot)),
                BatchSize::LargeInput,
            )
        });
    }

    #[cfg(all(target_arch = "x86_64", feature = "avx512", target_feature = "avx512f"))]
    {
        use xss_sort::platform::x86::avx512::avx512_partition_around_i64;
        let data_t = data.clone();
        c.bench_function("avx512_partition_i64", move |b| {
            b.iter_batched(
                || data_t.clone(),
                |mut data| black_box(avx512_partition_around_i64(&mut data, pivot)),
                BatchSize::LargeInput,
            )
        });
    }

    {
        let data_t = data;
        c.bench_function("dual_pivot_partition_i64", move |b| {
            b.iter_batched(
                || data_t.clone(),
                |mut data| {
                    let (low, high) = if data[100] <= data[200] { (100, 200) } else { (200, 100) };
                    let len = data.len();
                    black_box(xss_sort::partition(&mut data, 0, len, low, high))
                },
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, sort_benchmark, partition_benchmark);
criterion_main!(benches);
