use criterion::{criterion_group, criterion_main, Criterion};
use prony::{Complex, DynMatrix, Polynomial, PronySettings};

type C = Complex<f64>;

// ---------------------------------------------------------------------------
// Helpers: synthetic ringdown signals
// ---------------------------------------------------------------------------

fn ringdown(n: usize, modes: usize) -> (Vec<C>, Vec<C>) {
    let dt = 10.0 / (n - 1) as f64;
    let t: Vec<C> = (0..n).map(|k| C::new(dt * k as f64, 0.0)).collect();
    let f = t
        .iter()
        .map(|&t| {
            (0..modes).fold(C::new(0.0, 0.0), |acc, i| {
                let b = C::new(-0.5 - 0.7 * i as f64, 1.0 + 1.3 * i as f64);
                acc + (b * t).exp() / (1.0 + i as f64)
            })
        })
        .collect();
    (t, f)
}

fn dense(n: usize) -> DynMatrix<C> {
    DynMatrix::from_fn(n, n, |i, j| {
        let x = (i * n + j) as f64;
        C::new((0.37 * x).sin(), (0.91 * x + 0.3).cos())
    })
}

// ---------------------------------------------------------------------------
// Full fit
// ---------------------------------------------------------------------------

fn fit_reference(c: &mut Criterion) {
    let (t, f) = ringdown(50, 2);
    let settings = PronySettings::default();
    c.bench_function("prony_n50_m2", |b| {
        b.iter(|| {
            prony::prony(std::hint::black_box(&t), std::hint::black_box(&f), 2, &settings)
        })
    });
}

fn fit_orders(c: &mut Criterion) {
    let mut g = c.benchmark_group("prony_n400");
    let (t, f) = ringdown(400, 4);
    let settings = PronySettings::default();
    for m in [4usize, 10, 30] {
        g.bench_function(format!("m{}", m), |b| {
            b.iter(|| prony::prony(std::hint::black_box(&t), std::hint::black_box(&f), m, &settings))
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// Kernels
// ---------------------------------------------------------------------------

fn svd_tall(c: &mut Criterion) {
    let a = DynMatrix::from_fn(200, 20, |i, j| {
        C::new(((i + 1) as f64 * 0.1).sin() * (j + 1) as f64, (i * j) as f64 * 0.01)
    });
    c.bench_function("svd_complex_200x20", |b| {
        b.iter(|| std::hint::black_box(&a).svd())
    });
}

fn schur_eigenvalues(c: &mut Criterion) {
    let mut g = c.benchmark_group("schur_complex");
    for n in [10usize, 40] {
        let a = dense(n);
        g.bench_function(format!("{}x{}", n, n), |b| {
            b.iter(|| std::hint::black_box(&a).eigenvalues())
        });
    }
    g.finish();
}

fn polynomial_roots(c: &mut Criterion) {
    let roots: Vec<C> = (0..20)
        .map(|k| C::from_polar(0.9, k as f64 * 0.31))
        .collect();
    let p = Polynomial::from_roots(&roots);
    c.bench_function("roots_deg20_polished", |b| {
        b.iter(|| std::hint::black_box(&p).roots(true, 8))
    });
}

criterion_group!(
    benches,
    fit_reference,
    fit_orders,
    svd_tall,
    schur_eigenvalues,
    polynomial_roots,
);
criterion_main!(benches);
