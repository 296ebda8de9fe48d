use campusrun_admin::{Column, Row, TableView};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn sample_rows(size: usize) -> Vec<Row> {
    (0..size)
        .map(|i| {
            Row::new()
                .with("id", i as i64)
                .with("name", format!("user-{}", i % 97))
                .with("email", format!("user{}@campus.example", i))
                .with("balance", ((i * 37) % 100_000) as f64)
        })
        .collect()
}

fn sample_columns() -> Vec<Column> {
    vec![
        Column::sortable("id", "ID"),
        Column::sortable("name", "Nama"),
        Column::sortable("email", "Email"),
        Column::sortable("balance", "Saldo"),
    ]
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_filter");

    for size in [100, 1000, 10000].iter() {
        let mut view = TableView::new(sample_rows(*size), sample_columns());
        view.set_search_query("user-42");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(view.compute_view()).total_filtered);
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_sort");

    for size in [100, 1000, 10000].iter() {
        let mut view = TableView::new(sample_rows(*size), sample_columns());
        view.set_sort("balance");

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(view.compute_view()).rows.len());
        });
    }
    group.finish();
}

fn bench_filter_sort_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_filter_sort_page");

    for size in [100, 1000, 10000].iter() {
        let mut view = TableView::new(sample_rows(*size), sample_columns());
        view.set_search_query("user");
        view.set_sort("name");
        view.set_page(3);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(view.compute_view()).current_page);
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort, bench_filter_sort_page);
criterion_main!(benches);
