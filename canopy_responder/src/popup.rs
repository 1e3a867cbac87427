// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The popup stack.
//!
//! Popups open on top of each other. A pointer press anywhere probes the stack with the chain
//! of nodes under the pointer: pressing inside an open popup closes only the popups opened
//! after it, pressing outside every popup closes them all. Popups closed by a probe are
//! remembered until [`PopupStack::end_frame`], so the press that closed a popup through its
//! own toggle button does not immediately reopen it.

/// One open popup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PopupEntry<K> {
    /// The popup node.
    pub popup: K,
    /// Node the popup was opened for, if any.
    pub target: Option<K>,
}

/// LIFO stack of open popups.
#[derive(Clone, Debug, Default)]
pub struct PopupStack<K> {
    entries: Vec<PopupEntry<K>>,
    just_closed: Vec<K>,
}

impl<K: Copy + Eq + std::fmt::Debug> PopupStack<K> {
    /// No popups open.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            just_closed: Vec::new(),
        }
    }

    /// Open popups, bottom first.
    pub fn entries(&self) -> &[PopupEntry<K>] {
        &self.entries
    }

    /// Number of open popups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no popup is open.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topmost popup.
    pub fn top(&self) -> Option<K> {
        self.entries.last().map(|e| e.popup)
    }

    /// Stack depth of `popup`, 0 at the bottom.
    pub fn depth_of(&self, popup: K) -> Option<usize> {
        self.entries.iter().position(|e| e.popup == popup)
    }

    /// Whether `popup` is open.
    pub fn contains(&self, popup: K) -> bool {
        self.depth_of(popup).is_some()
    }

    /// Target `popup` was opened for.
    pub fn target_of(&self, popup: K) -> Option<K> {
        self.entries
            .iter()
            .find(|e| e.popup == popup)
            .and_then(|e| e.target)
    }

    /// Open `popup` on top. If it was already open, it and everything above it closes first;
    /// those closed nodes (other than `popup`) are returned, topmost first.
    pub fn push(&mut self, popup: K, target: Option<K>) -> Vec<K> {
        let mut closed = match self.depth_of(popup) {
            Some(depth) => self.close_from(depth),
            None => Vec::new(),
        };
        closed.retain(|&k| k != popup);
        self.entries.push(PopupEntry { popup, target });
        closed
    }

    /// Close every popup at `depth` and above, topmost first.
    pub fn close_from(&mut self, depth: usize) -> Vec<K> {
        if depth >= self.entries.len() {
            return Vec::new();
        }
        self.entries
            .drain(depth..)
            .rev()
            .map(|e| e.popup)
            .collect()
    }

    /// Close `popup` and every popup opened after it, topmost first.
    pub fn remove(&mut self, popup: K) -> Vec<K> {
        match self.depth_of(popup) {
            Some(depth) => self.close_from(depth),
            None => Vec::new(),
        }
    }

    /// Close everything, topmost first.
    pub fn clear(&mut self) -> Vec<K> {
        self.close_from(0)
    }

    /// Handle a pointer press whose target chain is `chain`, innermost node first.
    ///
    /// Closes the popups above the innermost open popup found in the chain, or all popups when
    /// none is found. Returns the closed popups, topmost first; they stay "just closed" until
    /// [`PopupStack::end_frame`].
    pub fn probe(&mut self, chain: impl IntoIterator<Item = K>) -> Vec<K> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        let keep = chain
            .into_iter()
            .find_map(|k| self.depth_of(k))
            .map_or(0, |depth| depth + 1);
        let closed = self.close_from(keep);
        if !closed.is_empty() {
            log::debug!("pointer press closed popups {closed:?}");
        }
        self.just_closed.extend_from_slice(&closed);
        closed
    }

    /// Whether `popup` was closed by a probe during this frame.
    pub fn is_just_closed(&self, popup: K) -> bool {
        self.just_closed.contains(&popup)
    }

    /// Forget this frame's probe closures.
    pub fn end_frame(&mut self) {
        self.just_closed.clear();
    }

    /// Forget popups for which `keep` fails (destroyed nodes), without reporting them.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.entries.retain(|e| keep(&e.popup));
        self.just_closed.retain(|k| keep(k));
    }
}
