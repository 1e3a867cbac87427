// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clicks, bubbling and touch capture on a small stage.
//!
//! A toolbar holds two buttons and a slider knob. Pressing the knob captures the touch, so the
//! release still reaches it after the pointer wanders off.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p canopy_demos --example stage_basics`

use canopy::{EventType, InputSnapshot, NodeId, Stage, TouchId};
use canopy_mesh::Color;
use kurbo::{Point, Size};

fn rect(stage: &mut Stage, parent: NodeId, name: &str, at: Point, size: Size) -> NodeId {
    let id = stage.create_child(parent, size);
    if let Some(n) = stage.scene_mut().node_mut(id) {
        n.set_name(name);
        n.set_position(at);
        n.ensure_graphics().draw_rect(1.0, Color::BLACK, Color::rgb(230, 230, 230));
    }
    id
}

fn name_of(stage: &Stage, node: Option<NodeId>) -> String {
    node.and_then(|n| stage.scene().node(n))
        .map_or_else(|| "?".into(), |n| n.name().to_owned())
}

fn main() {
    env_logger::init();

    let mut stage = Stage::new(Size::new(640.0, 480.0));
    let root = stage.root();
    let toolbar = rect(&mut stage, root, "toolbar", Point::ORIGIN, Size::new(640.0, 40.0));
    let open = rect(&mut stage, toolbar, "open", Point::new(5.0, 5.0), Size::new(60.0, 30.0));
    let save = rect(&mut stage, toolbar, "save", Point::new(70.0, 5.0), Size::new(60.0, 30.0));
    let knob = rect(&mut stage, toolbar, "knob", Point::new(300.0, 5.0), Size::new(20.0, 30.0));

    stage.on(toolbar, EventType::Click, |stage, ctx| {
        println!(
            "toolbar saw a click initiated by {}",
            name_of(stage, ctx.initiator())
        );
    });
    stage.on(open, EventType::Click, |_, _| println!("open clicked"));
    stage.on(save, EventType::Click, |_, ctx| {
        println!("save clicked; keeping it from the toolbar");
        ctx.stop_propagation();
    });
    stage.on(knob, EventType::TouchBegin, |_, ctx| ctx.capture_touch());
    stage.on(knob, EventType::TouchMove, |_, ctx| {
        println!("knob dragged to x = {}", ctx.input().position.x);
    });
    stage.on(knob, EventType::TouchEnd, |_, _| println!("knob released"));

    let at = |x: f64, y: f64| InputSnapshot::at(TouchId::PRIMARY, Point::new(x, y));
    for (x, y) in [(20.0, 20.0), (90.0, 20.0)] {
        stage.pointer_down(at(x, y));
        stage.pointer_up(at(x, y));
        stage.tick(1.0 / 60.0);
    }

    stage.pointer_down(at(310.0, 20.0));
    stage.pointer_move(at(360.0, 200.0));
    stage.pointer_up(at(400.0, 300.0));
    stage.tick(1.0 / 60.0);

    assert!(stage.captors(TouchId::PRIMARY).is_empty());
}
