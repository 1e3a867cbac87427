// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windows: stage children ordered by modality and sorting order, with a modal layer.

use canopy_scene::NodeId;

use crate::stage::Stage;

/// A window registered with [`Stage::show_window`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WindowEntry {
    pub(crate) node: NodeId,
    modal: bool,
}

impl Stage {
    /// Show `window` on the stage and bring it to the front.
    ///
    /// Modal windows sit above all non-modal ones, with the modal layer right beneath the
    /// topmost modal window so nothing under it receives input.
    pub fn show_window(&mut self, window: NodeId, modal: bool) {
        if !self.scene.is_alive(window) || window == self.scene.root() {
            log::warn!("cannot show {window:?} as a window");
            return;
        }
        match self.windows.iter_mut().find(|w| w.node == window) {
            Some(w) => w.modal = modal,
            None => self.windows.push(WindowEntry {
                node: window,
                modal,
            }),
        }
        let root = self.scene.root();
        if self.scene.parent(window) != Some(root) {
            self.add_child(root, window);
        }
        self.bring_to_front(window);
    }

    /// Take `window` off the stage.
    pub fn hide_window(&mut self, window: NodeId) {
        let before = self.windows.len();
        self.windows.retain(|w| w.node != window);
        if self.windows.len() == before {
            return;
        }
        self.remove_from_parent(window);
        self.adjust_modal_layer();
    }

    /// Raise `window` as far as its rank allows.
    ///
    /// It ends up above every other window of equal or lower rank, where rank orders modal
    /// above non-modal and then by [`sorting_order`](canopy_scene::DisplayNode::sorting_order).
    /// Open popups stay above windows.
    pub fn bring_to_front(&mut self, window: NodeId) {
        let Some(rank) = self.window_rank(window) else {
            return;
        };
        let root = self.scene.root();
        if self.scene.parent(window) != Some(root) {
            return;
        }
        let others: Vec<NodeId> = self
            .scene
            .children(root)
            .iter()
            .copied()
            .filter(|&c| c != window)
            .collect();
        let mut index = others.len();
        while index > 0 {
            let c = others[index - 1];
            let above = self.popups.contains(c) || self.window_rank(c).is_some_and(|r| r > rank);
            if !above {
                break;
            }
            index -= 1;
        }
        self.scene.set_child_index(root, window, index);
        log::trace!("window {window:?} raised to {index}");
        self.adjust_modal_layer();
    }

    /// Topmost window on the stage.
    pub fn top_window(&self) -> Option<NodeId> {
        let root = self.scene.root();
        self.scene
            .children(root)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.window_rank(c).is_some())
    }

    /// Hide every window.
    pub fn close_all_windows(&mut self) {
        let windows: Vec<NodeId> = self.windows.iter().map(|w| w.node).collect();
        for w in windows {
            self.hide_window(w);
        }
    }

    /// Whether `window` is shown.
    pub fn is_window_shown(&self, window: NodeId) -> bool {
        self.windows.iter().any(|w| w.node == window)
    }

    /// Whether a modal window is shown.
    pub fn has_modal_window(&self) -> bool {
        self.windows.iter().any(|w| w.modal)
    }

    /// The modal layer node, while it is on stage.
    pub fn modal_layer(&self) -> Option<NodeId> {
        self.modal_layer.filter(|&m| self.scene.is_on_stage(m))
    }

    fn window_rank(&self, node: NodeId) -> Option<(bool, i32)> {
        let entry = self.windows.iter().find(|w| w.node == node)?;
        let order = self.scene.node(node).map_or(0, |n| n.sorting_order());
        Some((entry.modal, order))
    }

    fn adjust_modal_layer(&mut self) {
        let root = self.scene.root();
        let top_modal = self
            .scene
            .children(root)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.window_rank(c).is_some_and(|(modal, _)| modal));
        let Some(top_modal) = top_modal else {
            if let Some(layer) = self.modal_layer {
                self.scene.remove_from_parent(layer);
            }
            return;
        };
        let layer = self.ensure_modal_layer();
        self.scene.remove_from_parent(layer);
        let index = self.scene.child_index(root, top_modal).unwrap_or_default();
        self.scene.add_child_at(root, layer, index);
        log::trace!("modal layer placed under {top_modal:?}");
    }

    fn ensure_modal_layer(&mut self) -> NodeId {
        if let Some(layer) = self.modal_layer.filter(|&m| self.scene.is_alive(m)) {
            return layer;
        }
        let viewport = self.scene.node(self.scene.root()).map(|n| n.size()).unwrap_or_default();
        let color = self.config.modal_color();
        let layer = self.scene.create();
        if let Some(n) = self.scene.node_mut(layer) {
            n.set_name("modal_layer");
            n.set_size(viewport);
            n.set_opaque(true);
            n.ensure_graphics().draw_rect(0.0, color, color);
        }
        self.modal_layer = Some(layer);
        layer
    }
}
