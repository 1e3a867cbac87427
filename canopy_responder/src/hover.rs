// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roll-over tracking: which nodes a pointer is over, and what changed.
//!
//! Feed [`RollOverState::update_path`] the root-to-target path under the pointer after every
//! move; it returns the nodes to send `RollOut` to (innermost first) and the nodes to send
//! `RollOver` to (outermost first). Only nodes below the lowest common ancestor of the old and
//! new paths change.
//!
//! ```
//! use canopy_responder::RollOverState;
//! let mut h: RollOverState<u32> = RollOverState::new();
//! let c = h.update_path(&[1, 2]);
//! assert_eq!((c.out, c.over), (vec![], vec![1, 2]));
//! let c = h.update_path(&[1, 3]);
//! assert_eq!((c.out, c.over), (vec![2], vec![3]));
//! ```

/// Transitions produced by one path update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollChange<K> {
    /// Nodes the pointer left, innermost first.
    pub out: Vec<K>,
    /// Nodes the pointer entered, outermost first.
    pub over: Vec<K>,
}

impl<K> RollChange<K> {
    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.out.is_empty() && self.over.is_empty()
    }
}

/// The current roll-over path of one pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollOverState<K> {
    current: Vec<K>,
}

impl<K: Copy + Eq> RollOverState<K> {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// Root-to-target path currently hovered.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// Innermost hovered node.
    pub fn target(&self) -> Option<K> {
        self.current.last().copied()
    }

    /// Move to `new_path`, returning the minimal out/over transition.
    pub fn update_path(&mut self, new_path: &[K]) -> RollChange<K> {
        let lca = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();
        let change = RollChange {
            out: self.current[lca..].iter().rev().copied().collect(),
            over: new_path[lca..].to_vec(),
        };
        self.current.clear();
        self.current.extend_from_slice(new_path);
        change
    }

    /// Leave everything, innermost first.
    pub fn clear(&mut self) -> Vec<K> {
        let out = self.current.iter().rev().copied().collect();
        self.current.clear();
        out
    }

    /// Drop nodes that no longer qualify (destroyed or detached) without emitting anything.
    ///
    /// The path is cut at the first node that fails, since its descendants went with it.
    pub fn retain_prefix(&mut self, mut keep: impl FnMut(&K) -> bool) {
        let n = self.current.iter().take_while(|k| keep(k)).count();
        self.current.truncate(n);
    }
}
