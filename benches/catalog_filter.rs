use college_forms::catalog::{COLLEGES, COURSES};
use college_forms::flows::{predict, PredictorQuery};
use college_forms::wizard::filter_options;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn build_options(count: usize) -> Vec<String> {
    (0..count)
        .map(|idx| {
            let base = COLLEGES[idx % COLLEGES.len()];
            let course = COURSES[idx % COURSES.len()];
            format!("{} {} #{}", base, course, idx)
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    c.bench_function("filter_catalog_colleges", |b| {
        b.iter(|| black_box(filter_options(COLLEGES, black_box("iit"))))
    });

    let owned = build_options(10_000);
    let options: Vec<&str> = owned.iter().map(String::as_str).collect();
    c.bench_function("filter_10k_options", |b| {
        b.iter(|| black_box(filter_options(&options, black_box("tech comp"))))
    });
}

fn bench_predict(c: &mut Criterion) {
    let query = PredictorQuery::new("JEE Main", "4000", "OBC");
    c.bench_function("predict_jee_main", |b| {
        b.iter(|| black_box(predict(black_box(&query))))
    });
}

criterion_group!(benches, bench_filter, bench_predict);
criterion_main!(benches);
