// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener registry.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use canopy_responder::{EventContext, EventType};
use canopy_scene::NodeId;

use crate::stage::Stage;

/// A listener callback. Listeners get the whole stage, so they can dispatch further events,
/// edit the scene or start tweens.
pub type Listener = Rc<dyn Fn(&mut Stage, &mut EventContext<NodeId>)>;

/// Identifies one registration made with [`Stage::on`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Entry {
    event_type: EventType,
    id: ListenerId,
    listener: Listener,
}

#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    by_node: HashMap<NodeId, Vec<Entry>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("nodes", &self.by_node.len())
            .field("next", &self.next)
            .finish()
    }
}

impl Listeners {
    pub(crate) fn add(
        &mut self,
        node: NodeId,
        event_type: EventType,
        listener: Listener,
    ) -> ListenerId {
        self.next += 1;
        let id = ListenerId(self.next);
        self.by_node.entry(node).or_default().push(Entry {
            event_type,
            id,
            listener,
        });
        id
    }

    pub(crate) fn remove(&mut self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        let Some(entries) = self.by_node.get_mut(&node) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|e| !(e.id == id && &e.event_type == event_type));
        let removed = entries.len() != before;
        if entries.is_empty() {
            self.by_node.remove(&node);
        }
        removed
    }

    pub(crate) fn remove_all(&mut self, node: NodeId, event_type: Option<&EventType>) {
        match event_type {
            None => {
                self.by_node.remove(&node);
            }
            Some(ty) => {
                if let Some(entries) = self.by_node.get_mut(&node) {
                    entries.retain(|e| &e.event_type != ty);
                    if entries.is_empty() {
                        self.by_node.remove(&node);
                    }
                }
            }
        }
    }

    pub(crate) fn has(&self, node: NodeId, event_type: &EventType) -> bool {
        self.by_node
            .get(&node)
            .is_some_and(|es| es.iter().any(|e| &e.event_type == event_type))
    }

    /// Listeners of `node` for `event_type`, in registration order. Cloned so callers can run
    /// them while the registry changes.
    pub(crate) fn snapshot(&self, node: NodeId, event_type: &EventType) -> Vec<Listener> {
        self.by_node
            .get(&node)
            .map(|es| {
                es.iter()
                    .filter(|e| &e.event_type == event_type)
                    .map(|e| Rc::clone(&e.listener))
                    .collect()
            })
            .unwrap_or_default()
    }
}
