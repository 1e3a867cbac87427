// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A radial progress fill and a fade, driven by tweens and painted into a counting painter.
//!
//! Run:
//! - `cargo run -p canopy_demos --example tween_fill`

use canopy::Stage;
use canopy_mesh::{FillMethod, PaintVertex, Painter, TextureHandle};
use canopy_tween::{EaseType, TweenProp};
use kurbo::{Point, Size};

#[derive(Default)]
struct CountingPainter {
    draws: usize,
    triangles: usize,
}

impl Painter for CountingPainter {
    fn paint_vertex_buffer(
        &mut self,
        _vertices: &[PaintVertex],
        indices: &[u32],
        _texture: Option<&TextureHandle>,
        _alpha: f32,
    ) {
        self.draws += 1;
        self.triangles += indices.len() / 3;
    }
}

fn main() {
    env_logger::init();

    let mut stage = Stage::new(Size::new(200.0, 200.0));
    let root = stage.root();
    let gauge = stage.create_child(root, Size::new(64.0, 64.0));
    if let Some(n) = stage.scene_mut().node_mut(gauge) {
        n.set_position(Point::new(68.0, 68.0));
        n.ensure_graphics().set_fill_method(FillMethod::Radial360);
    }

    stage
        .tween(gauge, TweenProp::Progress, 0.0, 1.0, 1.0)
        .set_ease(EaseType::Linear);
    stage
        .tween(gauge, TweenProp::Alpha, 0.2, 1.0, 0.5)
        .set_ease(EaseType::SineOut);

    for frame in 0..=8 {
        let mut painter = CountingPainter::default();
        stage.paint(&mut painter);
        let node = stage.scene().node(gauge);
        let amount = node
            .and_then(|n| n.graphics())
            .and_then(|g| g.fill())
            .map_or(0.0, |f| f.amount);
        let alpha = node.map_or(0.0, |n| n.alpha());
        println!(
            "frame {frame}: fill {amount:.2}, alpha {alpha:.2}, {} draws / {} triangles",
            painter.draws, painter.triangles
        );
        stage.tick(0.125);
    }
}
