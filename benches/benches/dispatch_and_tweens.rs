// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy::{EventType, InputSnapshot, NodeId, Stage, TouchId};
use canopy_mesh::Color;
use canopy_tween::{EaseType, NoTargets, TweenManager};
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};

/// A stage with a chain of `depth` nested nodes, each listening for clicks.
fn deep_stage(depth: usize) -> (Stage, NodeId) {
    let mut stage = Stage::new(Size::new(800.0, 600.0));
    let mut parent = stage.root();
    for _ in 0..depth {
        let id = stage.create_child(parent, Size::new(100.0, 100.0));
        if let Some(n) = stage.scene_mut().node_mut(id) {
            n.ensure_graphics().draw_rect(0.0, Color::BLACK, Color::WHITE);
        }
        stage.on(id, EventType::Click, |_, ctx| {
            black_box(ctx.sender());
        });
        parent = id;
    }
    (stage, parent)
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    for depth in [4_usize, 16, 64] {
        let (mut stage, leaf) = deep_stage(depth);
        group.bench_function(BenchmarkId::new("bubble", depth), |b| {
            b.iter(|| stage.bubble(black_box(leaf), EventType::Click, None));
        });
        let root = stage.root();
        group.bench_function(BenchmarkId::new("broadcast", depth), |b| {
            b.iter(|| stage.broadcast(black_box(root), EventType::Click, None));
        });
        let at = InputSnapshot::at(TouchId::PRIMARY, Point::new(50.0, 50.0));
        group.bench_function(BenchmarkId::new("press_release", depth), |b| {
            b.iter(|| {
                stage.pointer_down(at);
                stage.pointer_up(at);
            });
        });
    }
    group.finish();
}

fn bench_tweens(c: &mut Criterion) {
    let mut group = c.benchmark_group("tweens");
    for count in [100_usize, 1_000, 10_000] {
        group.bench_function(BenchmarkId::new("tick", count), |b| {
            b.iter_batched(
                || {
                    let mut manager = TweenManager::<u32>::new();
                    for i in 0..count {
                        manager
                            .to(0.0, 1.0, 1.0 + i as f64 * 0.001)
                            .set_ease(EaseType::CubicInOut);
                    }
                    manager
                },
                |mut manager| {
                    for _ in 0..10 {
                        manager.tick(1.0 / 60.0, &mut NoTargets);
                    }
                    manager
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.bench_function("create_and_recycle", |b| {
        let mut manager = TweenManager::<u32>::new();
        b.iter(|| {
            for _ in 0..64 {
                manager.to(0.0, 1.0, 0.0);
            }
            manager.tick(1.0, &mut NoTargets);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_dispatch, bench_tweens);
criterion_main!(benches);
