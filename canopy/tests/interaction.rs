// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end pointer scenarios against a whole stage.

use std::cell::RefCell;
use std::rc::Rc;

use canopy::{EventType, InputSnapshot, NodeId, Stage, TouchId, UiConfig};
use canopy_mesh::Color;
use canopy_tween::{EaseType, TweenProp};
use kurbo::{Point, Size};

type Log = Rc<RefCell<Vec<String>>>;

fn panel(stage: &mut Stage, parent: NodeId, at: (f64, f64), size: (f64, f64)) -> NodeId {
    let id = stage.create_child(parent, Size::new(size.0, size.1));
    let node = stage.scene_mut().node_mut(id).unwrap();
    node.set_position(Point::new(at.0, at.1));
    node.ensure_graphics().draw_rect(1.0, Color::BLACK, Color::WHITE);
    id
}

fn listen(stage: &mut Stage, node: NodeId, tag: &'static str, types: &[EventType], log: &Log) {
    for ty in types {
        let log = Rc::clone(log);
        stage.on(node, ty.clone(), move |_, ctx| {
            log.borrow_mut().push(format!("{tag}:{}", ctx.event_type()));
        });
    }
}

fn touch(pointer: u32, x: f64, y: f64) -> InputSnapshot {
    InputSnapshot::at(TouchId::new(0, pointer), Point::new(x, y))
}

fn taken(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.borrow_mut())
}

#[test]
fn captured_touch_ends_only_at_its_captors() {
    let mut stage = Stage::new(Size::new(300.0, 300.0));
    let root = stage.root();
    let slider = panel(&mut stage, root, (0.0, 0.0), (100.0, 20.0));
    let other = panel(&mut stage, root, (0.0, 200.0), (100.0, 50.0));
    stage.on(slider, EventType::TouchBegin, |_, ctx| ctx.capture_touch());
    let log = Log::default();
    let types = [EventType::TouchMove, EventType::TouchEnd];
    listen(&mut stage, slider, "slider", &types, &log);
    listen(&mut stage, other, "other", &types, &log);
    listen(&mut stage, root, "root", &types, &log);

    stage.pointer_down(touch(1, 10.0, 10.0));
    stage.pointer_move(touch(1, 10.0, 220.0));
    stage.pointer_up(touch(1, 10.0, 220.0));
    assert_eq!(
        taken(&log),
        vec!["slider:onTouchMove", "slider:onTouchEnd"],
        "moves and release go to the captor alone"
    );
    assert!(stage.captors(TouchId::new(0, 1)).is_empty(), "capture ends with the touch");

    stage.pointer_down(touch(1, 10.0, 220.0));
    stage.pointer_up(touch(1, 10.0, 220.0));
    assert_eq!(
        taken(&log),
        vec!["other:onTouchEnd", "root:onTouchEnd"],
        "without a captor the release bubbles"
    );
}

#[test]
fn captures_are_per_touch() {
    let mut stage = Stage::new(Size::new(300.0, 300.0));
    let root = stage.root();
    let left = panel(&mut stage, root, (0.0, 0.0), (100.0, 100.0));
    let right = panel(&mut stage, root, (150.0, 0.0), (100.0, 100.0));
    for n in [left, right] {
        stage.on(n, EventType::TouchBegin, |_, ctx| ctx.capture_touch());
    }
    let log = Log::default();
    listen(&mut stage, left, "left", &[EventType::TouchEnd], &log);
    listen(&mut stage, right, "right", &[EventType::TouchEnd], &log);

    stage.pointer_down(touch(1, 10.0, 10.0));
    stage.pointer_down(touch(2, 160.0, 10.0));
    stage.pointer_up(touch(2, 10.0, 10.0));
    stage.pointer_up(touch(1, 160.0, 10.0));
    assert_eq!(
        taken(&log),
        vec!["right:onTouchEnd", "left:onTouchEnd"],
        "each finger ends where it began"
    );
}

#[test]
fn click_needs_a_shared_node_and_a_short_travel() {
    let mut stage = Stage::new(Size::new(300.0, 300.0));
    let root = stage.root();
    let list = panel(&mut stage, root, (0.0, 0.0), (200.0, 200.0));
    let row_a = panel(&mut stage, list, (0.0, 0.0), (200.0, 40.0));
    let row_b = panel(&mut stage, list, (0.0, 40.0), (200.0, 40.0));
    let log = Log::default();
    for (n, tag) in [(root, "root"), (list, "list"), (row_a, "a"), (row_b, "b")] {
        listen(&mut stage, n, tag, &[EventType::Click], &log);
    }

    stage.pointer_down(touch(0, 10.0, 10.0));
    stage.pointer_up(touch(0, 10.0, 50.0));
    assert_eq!(
        taken(&log),
        vec!["list:onClick", "root:onClick"],
        "press on one row, release on its sibling: the list is clicked"
    );

    stage.pointer_down(touch(0, 10.0, 10.0));
    stage.pointer_move(touch(0, 70.0, 10.0));
    stage.pointer_move(touch(0, 10.0, 10.0));
    stage.pointer_up(touch(0, 10.0, 10.0));
    assert!(taken(&log).is_empty(), "travelling past the cancel distance cancels");

    stage.pointer_down(touch(0, 10.0, 10.0));
    stage.pointer_move(touch(0, 60.0, 10.0));
    stage.pointer_up(touch(0, 60.0, 10.0));
    assert_eq!(
        taken(&log),
        vec!["a:onClick", "list:onClick", "root:onClick"],
        "exactly the cancel distance still clicks"
    );
}

#[test]
fn cancel_distance_comes_from_the_config() {
    let config = UiConfig::from_toml_str("click_cancel_distance = 5.0").unwrap();
    let mut stage = Stage::with_config(Size::new(100.0, 100.0), config);
    let root = stage.root();
    let b = panel(&mut stage, root, (0.0, 0.0), (100.0, 100.0));
    let log = Log::default();
    listen(&mut stage, b, "b", &[EventType::Click], &log);
    stage.pointer_down(touch(0, 10.0, 10.0));
    stage.pointer_move(touch(0, 20.0, 10.0));
    stage.pointer_up(touch(0, 20.0, 10.0));
    assert!(taken(&log).is_empty(), "tighter threshold cancels");
}

#[test]
fn nested_popups_close_from_the_press_upward() {
    let mut stage = Stage::new(Size::new(400.0, 400.0));
    let root = stage.root();
    let menu_button = panel(&mut stage, root, (0.0, 0.0), (60.0, 20.0));
    let menu = stage.create_node(Size::new(100.0, 100.0));
    stage
        .scene_mut()
        .node_mut(menu)
        .unwrap()
        .ensure_graphics()
        .draw_rect(0.0, Color::BLACK, Color::WHITE);
    let item = panel(&mut stage, menu, (0.0, 0.0), (100.0, 20.0));
    let submenu = stage.create_node(Size::new(80.0, 80.0));
    stage
        .scene_mut()
        .node_mut(submenu)
        .unwrap()
        .ensure_graphics()
        .draw_rect(0.0, Color::BLACK, Color::WHITE);

    stage.on(menu_button, EventType::Click, move |stage, _| {
        stage.toggle_popup(menu, Some(menu_button), None);
    });
    stage.on(item, EventType::Click, move |stage, _| {
        stage.show_popup(submenu, Some(item), None);
    });
    let log = Log::default();
    listen(&mut stage, menu, "menu", &[EventType::PopupClosed], &log);
    listen(&mut stage, submenu, "submenu", &[EventType::PopupClosed], &log);

    let click = |stage: &mut Stage, x: f64, y: f64| {
        stage.pointer_down(touch(0, x, y));
        stage.pointer_up(touch(0, x, y));
        stage.tick(1.0 / 60.0);
    };

    // Menu opens under its button at y = 20; the item spans y 20..40.
    click(&mut stage, 5.0, 5.0);
    click(&mut stage, 5.0, 25.0);
    assert!(stage.is_popup_open(menu) && stage.is_popup_open(submenu), "both open");

    click(&mut stage, 90.0, 100.0);
    assert!(stage.is_popup_open(menu), "press inside the menu keeps it");
    assert!(!stage.is_popup_open(submenu), "but closes what was opened above it");
    assert_eq!(taken(&log), vec!["submenu:onPopupClosed"], "one closure");

    click(&mut stage, 5.0, 25.0);
    click(&mut stage, 350.0, 350.0);
    assert!(!stage.has_any_popup(), "press outside everything closes all");
    assert_eq!(
        taken(&log),
        vec!["submenu:onPopupClosed", "menu:onPopupClosed"],
        "topmost closes first"
    );
}

#[test]
fn modal_window_owns_input_until_hidden() {
    let mut stage = Stage::new(Size::new(300.0, 300.0));
    let root = stage.root();
    let toolbar = panel(&mut stage, root, (0.0, 0.0), (300.0, 30.0));
    let dialog = stage.create_node(Size::new(100.0, 100.0));
    stage
        .scene_mut()
        .node_mut(dialog)
        .unwrap()
        .set_position(Point::new(100.0, 100.0));
    let ok = panel(&mut stage, dialog, (10.0, 60.0), (80.0, 30.0));
    let log = Log::default();
    listen(&mut stage, toolbar, "toolbar", &[EventType::Click], &log);
    listen(&mut stage, ok, "ok", &[EventType::Click], &log);
    stage.on(ok, EventType::Click, move |stage, _| stage.hide_window(dialog));

    stage.show_window(dialog, true);
    assert!(stage.modal_layer().is_some(), "layer up");
    for (x, y) in [(10.0, 10.0), (120.0, 170.0), (10.0, 10.0)] {
        stage.pointer_down(touch(0, x, y));
        stage.pointer_up(touch(0, x, y));
    }
    assert_eq!(
        taken(&log),
        vec!["ok:onClick", "toolbar:onClick"],
        "the toolbar answers only once the dialog is gone"
    );
    assert!(stage.modal_layer().is_none(), "layer down");
}

#[test]
fn listeners_run_in_registration_order_and_removal_applies_next_dispatch() {
    let mut stage = Stage::new(Size::new(100.0, 100.0));
    let root = stage.root();
    let node = panel(&mut stage, root, (0.0, 0.0), (50.0, 50.0));
    let log = Log::default();
    listen(&mut stage, node, "first", &[EventType::Changed], &log);
    let l = Rc::clone(&log);
    let second = stage.on(node, EventType::Changed, move |_, _| {
        l.borrow_mut().push("second".into());
    });
    let l = Rc::clone(&log);
    stage.on(node, EventType::Changed, move |stage, ctx| {
        l.borrow_mut().push("third".into());
        if let Some(sender) = ctx.sender() {
            stage.off(sender, &EventType::Changed, second);
        }
    });

    stage.dispatch(node, EventType::Changed, None);
    assert_eq!(
        taken(&log),
        vec!["first:onChanged", "second", "third"],
        "registration order"
    );
    stage.dispatch(node, EventType::Changed, None);
    assert_eq!(taken(&log), vec!["first:onChanged", "third"], "removed for later dispatches");
}

#[test]
fn tweened_fade_runs_through_the_stage() {
    let mut stage = Stage::new(Size::new(100.0, 100.0));
    let root = stage.root();
    let node = panel(&mut stage, root, (0.0, 0.0), (50.0, 50.0));
    let done = Rc::new(RefCell::new(false));
    let d = Rc::clone(&done);
    stage
        .tween(node, TweenProp::Alpha, 0.0, 1.0, 0.5)
        .set_ease(EaseType::Linear)
        .on_complete(move |_, _, _| *d.borrow_mut() = true);
    stage.tick(0.25);
    let alpha = stage.scene().node(node).map(|n| n.alpha());
    assert_eq!(alpha, Some(0.5), "halfway");
    stage.tick(0.5);
    let alpha = stage.scene().node(node).map(|n| n.alpha());
    assert_eq!(alpha, Some(1.0), "finished at the end value");
    assert!(*done.borrow(), "completion callback ran");
}

#[test]
fn moving_and_resizing_nodes_report_changes() {
    let mut stage = Stage::new(Size::new(300.0, 300.0));
    let root = stage.root();
    let card = panel(&mut stage, root, (10.0, 10.0), (40.0, 40.0));
    stage.scene_mut().node_mut(card).unwrap().set_draggable(true);
    let log = Log::default();
    let types = [EventType::PositionChanged, EventType::SizeChanged, EventType::DragMove];
    listen(&mut stage, card, "card", &types, &log);
    listen(&mut stage, root, "root", &types, &log);

    stage.pointer_down(touch(0, 20.0, 20.0));
    stage.pointer_move(touch(0, 40.0, 20.0));
    stage.pointer_up(touch(0, 40.0, 20.0));
    assert_eq!(
        taken(&log),
        vec!["card:onPositionChanged", "card:onDragMove"],
        "dragging moves the card and says so"
    );

    stage.set_node_size(card, Size::new(60.0, 40.0));
    stage.set_node_size(card, Size::new(60.0, 40.0));
    stage.set_node_position(card, Point::new(0.0, 0.0));
    stage.set_viewport(Size::new(400.0, 300.0));
    stage.set_viewport(Size::new(400.0, 300.0));
    assert_eq!(
        taken(&log),
        vec!["card:onSizeChanged", "card:onPositionChanged", "root:onSizeChanged"],
        "only real changes fire, directly on the node"
    );
}
