use criterion::{Criterion, criterion_group, criterion_main};
use query_viz::api::{project_chart_series, project_y_data};
use query_viz::core::TabularResponse;
use serde_json::json;
use std::hint::black_box;

fn wide_response(rows: usize) -> TabularResponse {
    let results = (0..rows)
        .map(|i| {
            vec![
                json!(format!(
                    "2024-01-01 {:02}:{:02}:{:02}",
                    (i / 3600) % 24,
                    (i / 60) % 60,
                    i % 60
                )),
                json!(i),
                json!(format!("{}.25", i * 3)),
                json!(if i % 7 == 0 {
                    "n/a".to_owned()
                } else {
                    i.to_string()
                }),
            ]
        })
        .collect();
    TabularResponse::new(
        vec![
            "ts".to_owned(),
            "count".to_owned(),
            "amount".to_owned(),
            "mixed".to_owned(),
        ],
        vec![
            ("ts".to_owned(), "DateTime".to_owned()),
            ("count".to_owned(), "Int64".to_owned()),
            ("amount".to_owned(), "Float64".to_owned()),
            ("mixed".to_owned(), "String".to_owned()),
        ],
        results,
    )
}

fn bench_y_projection_10k(c: &mut Criterion) {
    let response = wide_response(10_000);
    let slots: [Option<usize>; 3] = [Some(1), Some(2), Some(3)];

    c.bench_function("y_projection_10k", |b| {
        b.iter(|| {
            let _ = project_y_data(black_box(Some(&response)), black_box(Some(&slots[..])));
        })
    });
}

fn bench_chart_series_10k(c: &mut Criterion) {
    let response = wide_response(10_000);
    let columns = response.column_set();
    let slots: [Option<usize>; 2] = [Some(1), Some(2)];

    c.bench_function("chart_series_10k", |b| {
        b.iter(|| {
            let _ = project_chart_series(
                black_box(&response),
                black_box(&columns),
                Some(0),
                black_box(&slots[..]),
            );
        })
    });
}

criterion_group!(benches, bench_y_projection_10k, bench_chart_series_10k);
criterion_main!(benches);
