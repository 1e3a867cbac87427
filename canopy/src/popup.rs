// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popups: nodes shown on top of everything and closed by pressing outside them.

use canopy_responder::EventType;
use canopy_scene::NodeId;
use kurbo::{Point, Rect};

use crate::config::PopupDirection;
use crate::stage::Stage;

impl Stage {
    /// Show `popup` on top of the stage.
    ///
    /// With a `target`, the popup is placed below it (or above, per `direction`, defaulting to
    /// the configured direction); without one it opens at the last pointer position. The
    /// popup is kept inside the viewport. Popups already open stay open beneath it, so a popup
    /// opened from inside another nests.
    pub fn show_popup(
        &mut self,
        popup: NodeId,
        target: Option<NodeId>,
        direction: Option<PopupDirection>,
    ) {
        if !self.scene.is_alive(popup) || popup == self.scene.root() {
            log::warn!("cannot show {popup:?} as a popup");
            return;
        }
        let closed = self.popups.push(popup, target);
        self.close_popups(closed);
        let pos = self.popup_position(popup, target, direction);
        if let Some(n) = self.scene.node_mut(popup) {
            n.set_position(pos);
        }
        let root = self.scene.root();
        self.add_child(root, popup);
        log::debug!("popup {popup:?} shown for {target:?} at {pos:?}");
    }

    /// Show `popup` unless it is open, in which case hide it. Returns whether it is open
    /// afterwards.
    ///
    /// A popup that the same press already closed (by landing outside it, typically on the
    /// button that toggles it) stays closed.
    pub fn toggle_popup(
        &mut self,
        popup: NodeId,
        target: Option<NodeId>,
        direction: Option<PopupDirection>,
    ) -> bool {
        if self.popups.is_just_closed(popup) {
            return false;
        }
        if self.popups.contains(popup) {
            self.hide_popup(Some(popup));
            return false;
        }
        self.show_popup(popup, target, direction);
        self.popups.contains(popup)
    }

    /// Hide `popup` and every popup opened after it, or all popups.
    pub fn hide_popup(&mut self, popup: Option<NodeId>) {
        let closed = match popup {
            Some(p) => self.popups.remove(p),
            None => self.popups.clear(),
        };
        self.close_popups(closed);
    }

    /// Whether any popup is open.
    pub fn has_any_popup(&self) -> bool {
        !self.popups.is_empty()
    }

    /// Whether `popup` is open.
    pub fn is_popup_open(&self, popup: NodeId) -> bool {
        self.popups.contains(popup)
    }

    /// Detach closed popups, topmost first, and tell each with `PopupClosed`.
    pub(crate) fn close_popups(&mut self, closed: Vec<NodeId>) {
        for popup in closed {
            if !self.scene.is_alive(popup) {
                continue;
            }
            log::debug!("popup {popup:?} closed");
            self.remove_from_parent(popup);
            self.dispatch(popup, EventType::PopupClosed, None);
        }
    }

    fn popup_position(
        &self,
        popup: NodeId,
        target: Option<NodeId>,
        direction: Option<PopupDirection>,
    ) -> Point {
        let viewport = self.scene.node(self.scene.root()).map(|n| n.size()).unwrap_or_default();
        let size = self.scene.node(popup).map(|n| n.size()).unwrap_or_default();
        let target_rect = target.and_then(|t| {
            if !self.scene.is_on_stage(t) {
                log::warn!("popup target {t:?} is not on stage");
                return None;
            }
            let tf = self.scene.world_transform(t)?;
            let bounds = self.scene.node(t)?.bounds();
            Some(tf.transform_rect_bbox(bounds))
        });
        let mut pos = match target_rect {
            Some(r) => {
                let below = Point::new(r.x0, r.y1);
                let above = Point::new(r.x0, r.y0 - size.height);
                match direction.unwrap_or(self.config.popup_direction) {
                    PopupDirection::Down => below,
                    PopupDirection::Up => above,
                    PopupDirection::Auto => {
                        if below.y + size.height > viewport.height && above.y >= 0.0 {
                            above
                        } else {
                            below
                        }
                    }
                }
            }
            None => self.touches.last_input().position,
        };
        let area = Rect::from_origin_size(Point::ORIGIN, viewport);
        pos.x = pos.x.min(area.x1 - size.width).max(0.0);
        pos.y = pos.y.min(area.y1 - size.height).max(0.0);
        pos
    }
}
