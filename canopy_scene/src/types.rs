// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the scene: node identifiers and capability flags.

/// Identifier for a display node.
///
/// A slot index plus a generation counter. The generation of a slot increments whenever the slot
/// is reused after [`Scene::destroy`](crate::Scene::destroy), so an identifier kept past the
/// destruction of its node never refers to a different node.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check whether an identifier still refers to
/// a live node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Slot generation.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Capability flags of a display node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Painted, and considered by hit testing.
        const VISIBLE      = 0b0000_0001;
        /// Receives pointer input. Clearing it also hides the subtree from hit testing.
        const TOUCHABLE    = 0b0000_0010;
        /// Hit over its whole bounds even without graphics.
        const OPAQUE       = 0b0000_0100;
        /// Enabled. Disabled nodes are skipped by hit testing and painted grayed.
        const INTERACTABLE = 0b0000_1000;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::TOUCHABLE | Self::INTERACTABLE
    }
}
