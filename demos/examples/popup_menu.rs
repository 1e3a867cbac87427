// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A menu button with a nested submenu and a modal confirmation window.
//!
//! Run:
//! - `RUST_LOG=canopy=debug cargo run -p canopy_demos --example popup_menu`

use canopy::{EventType, InputSnapshot, NodeId, Stage, TouchId};
use canopy_mesh::Color;
use kurbo::{Point, Size};

fn boxed(stage: &mut Stage, name: &str, size: Size) -> NodeId {
    let id = stage.create_node(size);
    if let Some(n) = stage.scene_mut().node_mut(id) {
        n.set_name(name);
        n.ensure_graphics()
            .draw_round_rect(1.0, Color::BLACK, Color::WHITE, [4.0; 4]);
    }
    id
}

fn click(stage: &mut Stage, x: f64, y: f64) {
    let at = InputSnapshot::at(TouchId::PRIMARY, Point::new(x, y));
    stage.pointer_down(at);
    stage.pointer_up(at);
    stage.tick(1.0 / 60.0);
}

fn main() {
    env_logger::init();

    let mut stage = Stage::new(Size::new(400.0, 300.0));
    let root = stage.root();
    let button = boxed(&mut stage, "menu_button", Size::new(80.0, 24.0));
    stage.add_child(root, button);

    let menu = boxed(&mut stage, "menu", Size::new(120.0, 72.0));
    let item = boxed(&mut stage, "more", Size::new(120.0, 24.0));
    stage.add_child(menu, item);
    let quit = boxed(&mut stage, "quit", Size::new(120.0, 24.0));
    if let Some(n) = stage.scene_mut().node_mut(quit) {
        n.set_position(Point::new(0.0, 48.0));
    }
    stage.add_child(menu, quit);
    let submenu = boxed(&mut stage, "submenu", Size::new(100.0, 48.0));
    let dialog = boxed(&mut stage, "confirm", Size::new(200.0, 100.0));
    if let Some(n) = stage.scene_mut().node_mut(dialog) {
        n.set_position(Point::new(100.0, 100.0));
    }

    stage.on(button, EventType::Click, move |stage, _| {
        let open = stage.toggle_popup(menu, Some(button), None);
        println!("menu {}", if open { "opened" } else { "closed" });
    });
    stage.on(item, EventType::Click, move |stage, _| {
        stage.show_popup(submenu, Some(item), None);
        println!("submenu opened");
    });
    stage.on(quit, EventType::Click, move |stage, _| {
        stage.hide_popup(None);
        stage.show_window(dialog, true);
        println!("confirmation shown");
    });
    for popup in [menu, submenu] {
        stage.on(popup, EventType::PopupClosed, |stage, ctx| {
            let name = ctx
                .sender()
                .and_then(|n| stage.scene().node(n))
                .map(|n| n.name().to_owned());
            println!("{} closed", name.unwrap_or_default());
        });
    }

    click(&mut stage, 10.0, 10.0); // open the menu
    click(&mut stage, 10.0, 30.0); // open the submenu
    click(&mut stage, 300.0, 250.0); // press outside: both close
    click(&mut stage, 10.0, 10.0); // reopen
    click(&mut stage, 10.0, 80.0); // quit: modal confirmation
    click(&mut stage, 10.0, 10.0); // blocked by the modal layer

    assert!(stage.has_modal_window());
    assert!(!stage.has_any_popup());
}
