use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uibox_eval::matching::{match_annotations, MatchingStrategy};
use uibox_eval::metrics::{calculate_iou, derive_rates};
use uibox_eval::types::{Annotation, BoundingBox, Label};

fn screen(count: usize, offset: f64) -> Vec<Annotation> {
    (0..count)
        .map(|i| {
            let x = (i % 20) as f64 * 40.0 + offset;
            let y = (i / 20) as f64 * 30.0 + offset;
            Annotation::new(x, y, 36.0, 24.0, Label::ALL[i % Label::COUNT])
        })
        .collect()
}

fn bench_iou_calculation(c: &mut Criterion) {
    let bbox1 = BoundingBox::new(10.0, 10.0, 50.0, 50.0);
    let bbox2 = BoundingBox::new(30.0, 30.0, 50.0, 50.0);

    c.bench_function("iou_single", |b| {
        b.iter(|| calculate_iou(black_box(&bbox1), black_box(&bbox2)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");

    for size in [10, 50, 100, 500].iter() {
        let ground_truth = screen(*size, 0.0);
        let predictions = screen(*size, 3.0);

        for strategy in [MatchingStrategy::Greedy, MatchingStrategy::OptimalBipartite] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), size),
                size,
                |b, _| {
                    b.iter(|| {
                        match_annotations(
                            black_box(&ground_truth),
                            black_box(&predictions),
                            black_box(0.5),
                            strategy,
                        )
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_derive_rates(c: &mut Criterion) {
    c.bench_function("derive_rates", |b| {
        b.iter(|| derive_rates(black_box(80), black_box(20), black_box(15)));
    });
}

criterion_group!(benches, bench_iou_calculation, bench_matching, bench_derive_rates);
criterion_main!(benches);
