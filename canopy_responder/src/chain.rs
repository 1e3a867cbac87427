// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delivery order for bubbling and broadcast dispatch.
//!
//! These functions only compute the order; executing listeners, honoring stop-propagation and
//! handling capture requests is up to the dispatcher.

use crate::types::{ChildLookup, ParentLookup};

/// Nodes a bubbling event visits: `start` first, then each ancestor up to the root.
///
/// Walking stops before `boundary` when it is met, so the boundary node is excluded.
pub fn bubble_chain<K, P>(parents: &P, start: K, boundary: Option<K>) -> Vec<K>
where
    K: Copy + Eq,
    P: ParentLookup<K> + ?Sized,
{
    let mut out = Vec::new();
    let mut cur = Some(start);
    while let Some(k) = cur {
        if boundary == Some(k) {
            break;
        }
        out.push(k);
        cur = parents.parent_of(&k);
    }
    out
}

/// Nodes a broadcast visits: `root` and all its descendants in pre-order.
pub fn broadcast_chain<K, C>(children: &C, root: K) -> Vec<K>
where
    K: Copy,
    C: ChildLookup<K> + ?Sized,
{
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(k) = stack.pop() {
        out.push(k);
        let mut kids = children.children_of(&k);
        kids.reverse();
        stack.extend(kids);
    }
    out
}

/// First node of `release_path` (walked from its innermost end) that also appears in
/// `down_path`.
///
/// Both paths are root-to-target. This is the node a click is attributed to: the innermost
/// common ancestor of where the press started and where it ended.
pub fn common_target<K: Copy + Eq>(down_path: &[K], release_path: &[K]) -> Option<K> {
    release_path
        .iter()
        .rev()
        .find(|k| down_path.contains(k))
        .copied()
}
