// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, ancestor walks.

use alloc::vec::Vec;

use crate::types::NodeId;

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Slot-backed tree owning one payload `T` per node.
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
}

impl<T> core::fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: T,
}

impl<T> Node<T> {
    fn new(generation: u32, data: T) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl<T> Tree<T> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns true if the tree holds no live nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(Option::is_none)
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` is treated as `None`: the node becomes a root.
    pub fn insert(&mut self, parent: Option<NodeId>, data: T) -> NodeId {
        self.insert_with(parent, |_| data)
    }

    /// Like [`Tree::insert`], but builds the payload from the id it will live under.
    ///
    /// Useful for payloads that need to know their own node, such as event targets.
    pub fn insert_with(&mut self, parent: Option<NodeId>, make: impl FnOnce(NodeId) -> T) -> NodeId {
        let (idx, generation) = match self.free_list.pop() {
            Some(idx) => (idx, self.generations[idx].saturating_add(1)),
            None => (self.nodes.len(), 1_u32),
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        let node = Node::new(generation, make(id));
        if idx == self.nodes.len() {
            self.nodes.push(Some(node));
            self.generations.push(generation);
        } else {
            self.nodes[idx] = Some(node);
            self.generations[idx] = generation;
        }
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a node (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent` (appended as its last child).
    ///
    /// Returns `false` and leaves the tree untouched when `id` is stale, when
    /// `new_parent` is stale, or when the move would create a cycle.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || p == id || self.ancestors(p).any(|a| a == id))
        {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        true
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Borrow the payload of a live node.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|n| &n.data)
    }

    /// Mutably borrow the payload of a live node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_opt_mut(id).map(|n| &mut n.data)
    }

    /// Parent of a live node, or `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a live node in insertion order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate the ancestors of `id`, nearest first (the node itself is excluded).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Depth-first, pre-order walk of the subtree rooted at `id` (inclusive).
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = Vec::new();
        stack.push(id);
        while let Some(n) = stack.pop() {
            out.push(n);
            for &c in self.children(n).iter().rev() {
                stack.push(c);
            }
        }
        out
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        let Some(parent_node) = self.node_opt_mut(parent) else {
            return;
        };
        parent_node.children.push(id);
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}

/// Iterator over the ancestors of a node, nearest first.
///
/// Returned by [`Tree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.tree.parent(cur);
        Some(cur)
    }
}
