// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene structure: node slots, parenting and child ordering.

use kurbo::Size;

use crate::node::DisplayNode;
use crate::types::{NodeFlags, NodeId};

/// A retained scene graph rooted at the stage node.
///
/// Nodes live in generational slots. Every node has at most one parent; children are kept in an
/// index-addressable order that is also the paint order. Nodes created with [`Scene::create`] start
/// detached; attaching them under the stage (directly or through ancestors) puts them "on stage".
pub struct Scene {
    nodes: Vec<Option<DisplayNode>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    root: NodeId,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Scene")
            .field("root", &self.root)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Scene {
    /// Create a scene whose stage root covers `viewport`.
    pub fn new(viewport: Size) -> Self {
        let mut stage = DisplayNode::new(1);
        stage.set_size(viewport);
        stage.set_name("stage");
        stage.set_flags(NodeFlags::default());
        Self {
            nodes: vec![Some(stage)],
            generations: vec![1],
            free_list: Vec::new(),
            root: NodeId::new(0, 1),
        }
    }

    /// The stage root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Resize the stage root.
    pub fn set_viewport(&mut self, size: Size) {
        let root = self.root;
        if let Some(n) = self.node_mut(root) {
            n.set_size(size);
        }
    }

    /// Create a detached node.
    pub fn create(&mut self) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(DisplayNode::new(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(DisplayNode::new(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Create a node with `size` and attach it as the last child of `parent`.
    pub fn create_child(&mut self, parent: NodeId, size: Size) -> NodeId {
        let id = self.create();
        if let Some(n) = self.node_mut(id) {
            n.set_size(size);
        }
        self.add_child(parent, id);
        id
    }

    /// Whether `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The node for `id`, unless stale.
    pub fn node(&self, id: NodeId) -> Option<&DisplayNode> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.1)
    }

    /// Mutable node for `id`, unless stale.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut DisplayNode> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.1)
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    /// Children of `id` in order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(DisplayNode::children).unwrap_or_default()
    }

    /// Number of children.
    pub fn num_children(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Child at `index`.
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.children(parent).get(index).copied()
    }

    /// Position of `child` among its siblings.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// First direct child named `name`.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).is_some_and(|n| n.name() == name))
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if id == ancestor {
                return true;
            }
            cur = self.parent(id);
        }
        false
    }

    /// Whether `id` is attached (through its ancestors) to the stage root.
    pub fn is_on_stage(&self, id: NodeId) -> bool {
        self.is_alive(id) && self.is_ancestor_of(self.root, id)
    }

    /// Append `child` to `parent`, detaching it from any previous parent.
    ///
    /// Ignored when either id is stale, when `child` is the stage, or when it would create a
    /// cycle.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) {
        let end = self.num_children(parent);
        self.add_child_at(parent, child, end);
    }

    /// Insert `child` into `parent` at `index` (clamped), detaching it first.
    pub fn add_child_at(&mut self, parent: NodeId, child: NodeId, index: usize) {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.root {
            return;
        }
        if self.is_ancestor_of(child, parent) {
            log::warn!("refusing to add {child:?} under its own descendant {parent:?}");
            return;
        }
        if self.parent(child) == Some(parent) {
            self.set_child_index(parent, child, index);
            return;
        }
        self.remove_from_parent(child);
        let Some(p) = self.node_mut(parent) else {
            return;
        };
        let index = index.min(p.children.len());
        p.children.insert(index, child);
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    /// Detach `child` from `parent`. Returns whether it was a child.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.child_index(parent, child) {
            Some(i) => self.remove_child_at(parent, i).is_some(),
            None => false,
        }
    }

    /// Detach the child at `index` and return it.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let p = self.node_mut(parent)?;
        if index >= p.children.len() {
            return None;
        }
        let child = p.children.remove(index);
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
        Some(child)
    }

    /// Detach every child of `parent`, returning them in their former order.
    pub fn remove_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let Some(p) = self.node_mut(parent) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut p.children);
        for &c in &children {
            if let Some(n) = self.node_mut(c) {
                n.parent = None;
            }
        }
        children
    }

    /// Detach `id` from its parent, if any.
    pub fn remove_from_parent(&mut self, id: NodeId) {
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
    }

    /// Move `child` to `index` (clamped) among its siblings. Returns the index it landed at.
    pub fn set_child_index(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Option<usize> {
        let old = self.child_index(parent, child)?;
        let p = self.node_mut(parent)?;
        p.children.remove(old);
        let index = index.min(p.children.len());
        p.children.insert(index, child);
        Some(index)
    }

    /// Destroy `id` and its whole subtree, returning the destroyed ids (pre-order).
    ///
    /// The stage root cannot be destroyed.
    pub fn destroy(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) || id == self.root {
            return Vec::new();
        }
        self.remove_from_parent(id);
        let doomed = self.descendants(id);
        for &d in &doomed {
            self.nodes[d.idx()] = None;
            self.free_list.push(d.idx());
        }
        doomed
    }

    /// `id` and all its descendants, pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.children(n).iter().rev().copied());
        }
        out
    }

    /// `id` and its ancestors, innermost first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = self.is_alive(id).then_some(id);
        while let Some(n) = cur {
            out.push(n);
            cur = self.parent(n);
        }
        out
    }

    /// Path from the outermost ancestor down to `id` (inclusive).
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = self.ancestors(id);
        path.reverse();
        path
    }
}
