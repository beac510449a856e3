//! Criterion microbenches for dynamic geometry reads.
//!
//! - Cached read: probe passes, no regeneration.
//! - Invalidated read: anchor moves every iteration, probe fails, redraw.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use symgeo::prelude::*;

fn bench_dynamic(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_point");
    let f = DblField::seeded(9);
    let a = Anchor::new("A", 0.0, 0.0);
    let b = Anchor::new("B", 3.0, 1.0);
    let line = Line::through(a.point(), b.point());
    let d = DynamicPoint::in_line("P", line);

    group.bench_function("cached_read", |bch| {
        bch.iter(|| d.position(&f).unwrap())
    });

    let mut k = 0u64;
    group.bench_function("regenerating_read", |bch| {
        bch.iter_batched(
            || {
                k = k.wrapping_add(1);
                b.set(3.0, 1.0 + (k % 7) as f64);
            },
            |_| d.position(&f).unwrap(),
            BatchSize::SmallInput,
        )
    });

    let circle = Circle::new(a.point(), Scalar::leaf(2.0));
    let on = DynamicPoint::in_circle("Q", circle);
    group.bench_function("circle_resample", |bch| {
        bch.iter(|| on.resample(&f).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_dynamic);
criterion_main!(benches);
