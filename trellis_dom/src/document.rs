// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document: a node tree, its stylesheets, and the entry points that tie
//! event dispatch and style resolution to it.

use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;
use trellis_events::event::{DomEvent, Event};
use trellis_events::listener::EventListener;
use trellis_events::target::EventTarget;
use trellis_style::computed::ComputedStyle;
use trellis_style::declaration::StyleDeclaration;
use trellis_style::resolver::StyleResolver;
use trellis_style::sheet::{StyleDocument, StyleSheet, StyleSheetList};
use trellis_tree::{NodeId, Tree};

use crate::error::DomError;
use crate::node::{ElementData, Node, NodeKind};
use crate::selector::SimpleSelector;

/// A document tree rooted at a document node.
///
/// Every node owns an [`EventTarget`]; the document node's target sits at the
/// top of every propagation path.
#[derive(Debug)]
pub struct Document {
    tree: Tree<Node>,
    root: NodeId,
    sheets: StyleSheetList<Self>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        let mut tree = Tree::new();
        let root = tree.insert_with(None, |id| Node::new(id, NodeKind::Document));
        Self {
            tree,
            root,
            sheets: StyleSheetList::new(),
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append a new element named `local_name` under `parent`.
    pub fn create_element(&mut self, parent: NodeId, local_name: &str) -> Result<NodeId, DomError> {
        self.append(parent, NodeKind::Element(ElementData::new(local_name)))
    }

    /// Append a text node under `parent`.
    pub fn create_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        self.append(parent, NodeKind::Text(String::from(text)))
    }

    fn append(&mut self, parent: NodeId, kind: NodeKind) -> Result<NodeId, DomError> {
        match self.tree.get(parent).map(Node::kind) {
            None => return Err(DomError::UnknownNode(parent)),
            Some(NodeKind::Text(_)) => return Err(DomError::HierarchyRequest(parent)),
            Some(_) => {}
        }
        let id = self
            .tree
            .insert_with(Some(parent), |id| Node::new(id, kind));
        trace!(node = ?id, parent = ?parent, "node appended");
        Ok(id)
    }

    /// Remove a node and its subtree. The document node cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::HierarchyRequest(id));
        }
        if !self.tree.is_alive(id) {
            return Err(DomError::UnknownNode(id));
        }
        self.tree.remove(id);
        Ok(())
    }

    /// Move `child` (with its subtree) to the end of `parent`'s children.
    ///
    /// Fails with `HierarchyRequest` when `child` is the document node, when
    /// `parent` is a text node, or when `parent` lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        match self.tree.get(parent).map(Node::kind) {
            None => return Err(DomError::UnknownNode(parent)),
            Some(NodeKind::Text(_)) => return Err(DomError::HierarchyRequest(parent)),
            Some(_) => {}
        }
        if !self.tree.is_alive(child) {
            return Err(DomError::UnknownNode(child));
        }
        if child == self.root || !self.tree.reparent(child, Some(parent)) {
            return Err(DomError::HierarchyRequest(child));
        }
        trace!(node = ?child, parent = ?parent, "node moved");
        Ok(())
    }

    /// The node, if it is alive.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// The element data, if `id` is a live element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id)?.as_element()
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        let node = self.tree.get_mut(id).ok_or(DomError::UnknownNode(id))?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    /// Set an attribute on an element. Setting `style` replaces its inline declarations.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    /// Remove an attribute from an element, returning its old value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.remove_attribute(name))
    }

    /// Parent node, including the document node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// Element ancestors of `id`, nearest first.
    pub fn ancestor_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .ancestors(id)
            .filter(move |&a| self.element(a).is_some())
    }

    /// Elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tree
            .descendants(self.root)
            .into_iter()
            .filter(move |&n| self.element(n).is_some())
    }

    /// First element in document order whose `id` attribute is `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements()
            .find(|&n| self.element(n).and_then(ElementData::id) == Some(id))
    }

    /// Elements matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        use trellis_style::sheet::Selector;

        let selector = SimpleSelector::parse(selector)?;
        Ok(self
            .elements()
            .filter(|n| selector.matches(self, n))
            .collect())
    }

    /// The document's stylesheets.
    pub fn sheets(&self) -> &StyleSheetList<Self> {
        &self.sheets
    }

    /// Mutable access to the stylesheets, e.g. to disable one.
    pub fn sheets_mut(&mut self) -> &mut StyleSheetList<Self> {
        &mut self.sheets
    }

    /// Append a stylesheet; returns its index.
    pub fn add_style_sheet(&mut self, sheet: impl Into<StyleSheet<Self>>) -> usize {
        self.sheets.push(sheet)
    }

    /// The event target of a live node.
    pub fn target(&self, id: NodeId) -> Option<&EventTarget<NodeId>> {
        self.tree.get(id).map(Node::target)
    }

    fn live_target(&self, id: NodeId) -> Result<&EventTarget<NodeId>, DomError> {
        self.target(id).ok_or(DomError::UnknownNode(id))
    }

    /// Register a listener on node `id`. `None` is ignored.
    pub fn add_event_listener(
        &self,
        id: NodeId,
        type_: &str,
        callback: Option<EventListener<NodeId>>,
        capture: bool,
    ) -> Result<(), DomError> {
        self.live_target(id)?
            .add_event_listener(type_, callback, capture);
        Ok(())
    }

    /// Unregister the first matching listener on node `id`. `None` is ignored.
    pub fn remove_event_listener(
        &self,
        id: NodeId,
        type_: &str,
        callback: Option<EventListener<NodeId>>,
        capture: bool,
    ) -> Result<(), DomError> {
        self.live_target(id)?
            .remove_event_listener(type_, callback, capture);
        Ok(())
    }

    /// Dispatch a script-style (untrusted) event at node `id`.
    ///
    /// Returns `true` when no listener prevented the default action.
    pub fn dispatch_event(
        &self,
        id: NodeId,
        event: &mut dyn DomEvent<NodeId>,
    ) -> Result<bool, DomError> {
        Ok(self.live_target(id)?.dispatch_event(event, &self.tree)?)
    }

    /// Dispatch an engine-originated event at node `id`, keeping its trusted flag.
    pub fn fire_event(&self, id: NodeId, event: &mut Event<NodeId>) -> Result<bool, DomError> {
        Ok(self.live_target(id)?.fire_event(event, &self.tree)?)
    }

    /// Computed style of element `id`.
    pub fn computed_style(
        &self,
        resolver: &StyleResolver,
        id: NodeId,
        pseudo: Option<&str>,
    ) -> Result<ComputedStyle, DomError> {
        match self.tree.get(id) {
            None => return Err(DomError::UnknownNode(id)),
            Some(node) if node.as_element().is_none() => return Err(DomError::NotAnElement(id)),
            Some(_) => {}
        }
        Ok(resolver.get_computed_style(self, &id, pseudo)?)
    }
}

impl StyleDocument for Document {
    type Element = NodeId;

    fn style_sheets(&self) -> Option<&StyleSheetList<Self>> {
        Some(&self.sheets)
    }

    fn parent_element(&self, element: &NodeId) -> Option<NodeId> {
        self.tree
            .parent(*element)
            .filter(|&p| self.element(p).is_some())
    }

    fn inline_style(&self, element: &NodeId) -> Option<&StyleDeclaration> {
        self.element(*element).map(ElementData::inline_style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_events::types::EventInit;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let html = doc.create_element(doc.root(), "html").unwrap();
        let body = doc.create_element(html, "body").unwrap();
        let p = doc.create_element(body, "p").unwrap();
        (doc, html, body, p)
    }

    #[test]
    fn text_nodes_cannot_have_children() {
        let (mut doc, _, body, _) = sample();
        let text = doc.create_text(body, "hello").unwrap();
        assert!(matches!(
            doc.create_element(text, "b"),
            Err(DomError::HierarchyRequest(_))
        ));
        assert!(matches!(
            doc.set_attribute(text, "id", "x"),
            Err(DomError::NotAnElement(_))
        ));
    }

    #[test]
    fn removal_invalidates_subtree() {
        let (mut doc, _, body, p) = sample();
        doc.remove(body).unwrap();
        assert!(doc.node(p).is_none());
        assert!(matches!(doc.remove(p), Err(DomError::UnknownNode(_))));
        assert!(matches!(
            doc.remove(doc.root()),
            Err(DomError::HierarchyRequest(_))
        ));
        let mut ev: Event<NodeId> = Event::new("click", EventInit::default());
        assert!(matches!(
            doc.dispatch_event(p, &mut ev),
            Err(DomError::UnknownNode(_))
        ));
    }

    #[test]
    fn append_child_moves_subtrees_and_rejects_cycles() {
        let (mut doc, html, body, p) = sample();
        let aside = doc.create_element(html, "aside").unwrap();
        doc.append_child(aside, p).unwrap();
        assert_eq!(doc.parent(p), Some(aside));
        assert!(doc.children(body).is_empty());
        assert_eq!(doc.ancestor_elements(p).collect::<Vec<_>>(), [aside, html]);

        assert!(matches!(
            doc.append_child(p, html),
            Err(DomError::HierarchyRequest(_))
        ));
        assert!(matches!(
            doc.append_child(body, doc.root()),
            Err(DomError::HierarchyRequest(_))
        ));
        let text = doc.create_text(body, "t").unwrap();
        assert!(matches!(
            doc.append_child(text, p),
            Err(DomError::HierarchyRequest(_))
        ));
        assert_eq!(doc.parent(html), Some(doc.root()), "failed moves leave the tree alone");
    }

    #[test]
    fn parent_element_stops_below_the_document_node() {
        let (doc, html, body, p) = sample();
        assert_eq!(doc.parent_element(&p), Some(body));
        assert_eq!(doc.parent_element(&html), None);
        assert_eq!(doc.parent(html), Some(doc.root()));
        assert_eq!(doc.ancestor_elements(p).collect::<Vec<_>>(), [body, html]);
    }

    #[test]
    fn lookup_by_id_and_selector() {
        let (mut doc, _, body, p) = sample();
        let q = doc.create_element(body, "p").unwrap();
        doc.set_attribute(q, "id", "second").unwrap();
        doc.set_attribute(q, "class", "note").unwrap();
        assert_eq!(doc.get_element_by_id("second"), Some(q));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.query_selector_all("body p").unwrap(), [p, q]);
        assert_eq!(doc.query_selector_all("p.note").unwrap(), [q]);
        assert_eq!(doc.query_selector_all("html #second").unwrap(), [q]);
        assert!(doc.query_selector_all("p > q").is_err());
    }

    #[test]
    fn computed_style_requires_an_element() {
        let (mut doc, _, body, _) = sample();
        let text = doc.create_text(body, "x").unwrap();
        let resolver = StyleResolver::default();
        assert!(matches!(
            doc.computed_style(&resolver, text, None),
            Err(DomError::NotAnElement(_))
        ));
        assert!(matches!(
            doc.computed_style(&resolver, doc.root(), None),
            Err(DomError::NotAnElement(_))
        ));
        assert!(doc.computed_style(&resolver, body, None).is_ok());
    }
}
