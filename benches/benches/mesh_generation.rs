// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_mesh::{
    Color, EllipseMesh, FillMesh, FillMethod, MeshFactory, PolygonMesh, RectMesh,
    RegularPolygonMesh, RoundedRectMesh, VertexHelper, triangulate,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

fn populate(factory: &dyn MeshFactory, rect: Rect, vh: &mut VertexHelper) -> usize {
    vh.reset(rect, Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
    factory.populate_mesh(vh);
    vh.buffer().triangle_count()
}

/// A star-ish polygon with `n` points, concave every other vertex.
fn star(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 / n as f64 * std::f64::consts::TAU;
            let r = if i % 2 == 0 { 100.0 } else { 45.0 };
            Point::new(100.0 + r * a.cos(), 100.0 + r * a.sin())
        })
        .collect()
}

fn bench_shapes(c: &mut Criterion) {
    let rect = Rect::new(0.0, 0.0, 200.0, 120.0);
    let mut vh = VertexHelper::new(rect);
    let mut group = c.benchmark_group("shapes");

    let stroked = RectMesh {
        line_width: 2.0,
        fill_color: Some(Color::WHITE),
        ..RectMesh::default()
    };
    group.bench_function("rect_stroked", |b| {
        b.iter(|| populate(black_box(&stroked), rect, &mut vh));
    });

    let rounded = RoundedRectMesh {
        line_width: 2.0,
        fill_color: Some(Color::WHITE),
        top_left_radius: 16.0,
        top_right_radius: 16.0,
        bottom_left_radius: 8.0,
        bottom_right_radius: 8.0,
        ..RoundedRectMesh::default()
    };
    group.bench_function("rounded_rect", |b| {
        b.iter(|| populate(black_box(&rounded), rect, &mut vh));
    });

    let ellipse = EllipseMesh {
        line_width: 1.0,
        fill_color: Some(Color::WHITE),
        ..EllipseMesh::default()
    };
    group.bench_function("ellipse", |b| {
        b.iter(|| populate(black_box(&ellipse), rect, &mut vh));
    });

    let hexagon = RegularPolygonMesh {
        sides: 6,
        fill_color: Some(Color::WHITE),
        ..RegularPolygonMesh::default()
    };
    group.bench_function("regular_polygon", |b| {
        b.iter(|| populate(black_box(&hexagon), rect, &mut vh));
    });

    for method in [FillMethod::Horizontal, FillMethod::Radial360] {
        let fill = FillMesh {
            method,
            amount: 0.63,
            ..FillMesh::default()
        };
        group.bench_with_input(BenchmarkId::new("fill", format!("{method:?}")), &fill, |b, f| {
            b.iter(|| populate(black_box(f), rect, &mut vh));
        });
    }
    group.finish();
}

fn bench_triangulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulate");
    for n in [16_usize, 64, 256] {
        let points = star(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, pts| {
            b.iter(|| triangulate(black_box(pts)).len());
        });
        let polygon = PolygonMesh {
            fill_color: Some(Color::BLACK),
            line_width: 1.0,
            ..PolygonMesh::new(points.clone())
        };
        let rect = Rect::new(0.0, 0.0, 200.0, 200.0);
        let mut vh = VertexHelper::new(rect);
        group.bench_with_input(BenchmarkId::new("polygon_mesh", n), &polygon, |b, p| {
            b.iter(|| populate(black_box(p), rect, &mut vh));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shapes, bench_triangulate);
criterion_main!(benches);
