use chart_stage::api::{Chart, ChartConfig};
use chart_stage::core::{BBox, Padding, PaddingEdge, Scale, Size};
use chart_stage::plot::AutoPaddingResolver;
use chart_stage::render::NullHost;
use chart_stage::view::{PointGeometry, ViewConfig};
use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

fn records(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "genre": format!("genre-{}", i % 12),
                "region": if i % 3 == 0 { "EU" } else { "US" },
                "sold": (i * 37 % 1_000) as f64 / 10.0,
            })
        })
        .collect()
}

fn geometry(count: usize) -> PointGeometry {
    PointGeometry::new(
        Scale::category("genre", Vec::<&str>::new()),
        Scale::linear("sold", 0.0, 100.0),
    )
    .color(Scale::category("region", Vec::<&str>::new()))
    .with_json_records(records(count))
    .expect("generated records are objects")
}

fn bench_auto_padding_resolve(c: &mut Criterion) {
    let resolver = AutoPaddingResolver::new(5.0);
    let padding = Padding::new([
        PaddingEdge::Fixed(20.0),
        PaddingEdge::AUTO,
        PaddingEdge::AUTO,
        PaddingEdge::AUTO,
    ]);
    let front = BBox::new(-12.0, 4.0, 530.0, 470.0);
    let back = BBox::new(-30.0, -2.0, 505.0, 440.0);
    let size = Size::new(500.0, 400.0);

    c.bench_function("auto_padding_resolve", |b| {
        b.iter(|| {
            let _ = resolver.resolve(
                black_box(&padding),
                black_box(front),
                black_box(back),
                black_box(size),
            );
        })
    });
}

fn bench_render_two_views_2k(c: &mut Criterion) {
    let host = NullHost::with_container("root", 1_280.0);
    let config = ChartConfig::new("root")
        .with_size(1_200.0, 700.0)
        .with_padding(Padding::auto());
    let mut chart = Chart::new(host, config).expect("chart init");
    chart
        .view(ViewConfig::default().region((0.0, 0.0), (0.5, 1.0)))
        .attach_geometry(geometry(1_000));
    chart
        .view(ViewConfig::default().region((0.5, 0.0), (1.0, 1.0)))
        .attach_geometry(geometry(1_000));

    c.bench_function("render_two_views_2k", |b| {
        b.iter(|| {
            chart.render().expect("render should succeed");
            black_box(chart.content_rect());
        })
    });
}

fn bench_tooltip_lookup(c: &mut Criterion) {
    let host = NullHost::with_container("root", 800.0);
    let config = ChartConfig::new("root")
        .with_size(800.0, 600.0)
        .with_padding(Padding::auto());
    let mut chart = Chart::new(host, config).expect("chart init");
    chart.root_view_mut().attach_geometry(geometry(2_000));
    chart.render().expect("render should succeed");
    let rect = chart.content_rect();
    let center = chart_stage::core::Point::new(rect.center_x(), rect.min_y() + rect.height() / 2.0);

    c.bench_function("tooltip_lookup_2k", |b| {
        b.iter(|| {
            let _ = chart.get_tooltip_items(black_box(center));
        })
    });
}

criterion_group!(
    benches,
    bench_auto_padding_resolve,
    bench_render_two_views_2k,
    bench_tooltip_lookup
);
criterion_main!(benches);
