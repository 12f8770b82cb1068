// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document nodes.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_events::target::EventTarget;
use trellis_style::declaration::StyleDeclaration;
use trellis_tree::NodeId;

/// What a node is.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// The document node at the root of the tree.
    Document,
    /// An element.
    Element(ElementData),
    /// A text run.
    Text(String),
}

/// A node: its kind and its event target.
#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    target: EventTarget<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            kind,
            target: EventTarget::new(id),
        }
    }

    /// The node's kind.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The element data, if this is an element.
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub(crate) fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    /// The node's event target.
    pub fn target(&self) -> &EventTarget<NodeId> {
        &self.target
    }
}

impl AsRef<EventTarget<NodeId>> for Node {
    fn as_ref(&self) -> &EventTarget<NodeId> {
        &self.target
    }
}

/// Element state: name, attributes, and the parsed `style` attribute.
#[derive(Clone, Debug, Default)]
pub struct ElementData {
    local_name: String,
    attributes: Vec<(String, String)>,
    inline_style: StyleDeclaration,
}

impl ElementData {
    /// Create an element; the name is ASCII-lowercased.
    pub fn new(local_name: &str) -> Self {
        Self {
            local_name: local_name.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Lowercase local name, e.g. `div`.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Attribute value by (lowercase) name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Set an attribute. Setting `style` reparses the inline declarations.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "style" {
            self.inline_style = crate::css::parse_declarations(value);
        }
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = String::from(value),
            None => self.attributes.push((name, String::from(value))),
        }
    }

    /// Remove an attribute, returning its value. Removing `style` clears the inline declarations.
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let i = self
            .attributes
            .iter()
            .position(|(n, _)| n.eq_ignore_ascii_case(name))?;
        let (name, value) = self.attributes.remove(i);
        if name == "style" {
            self.inline_style = StyleDeclaration::new();
        }
        Some(value)
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> + '_ {
        self.attribute("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }

    /// Returns true if the `class` attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Declarations parsed from the `style` attribute.
    pub fn inline_style(&self) -> &StyleDeclaration {
        &self.inline_style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_attribute_drives_inline_declarations() {
        let mut e = ElementData::new("DIV");
        assert_eq!(e.local_name(), "div");
        e.set_attribute("Style", "color: red");
        assert_eq!(e.inline_style().get_property_value("color"), Some("red"));
        assert_eq!(e.attribute("style"), Some("color: red"));

        e.set_attribute("style", "width: 2px");
        assert_eq!(e.inline_style().get_property_value("color"), None, "reparsed, not merged");
        assert_eq!(e.attributes().count(), 1);

        assert_eq!(e.remove_attribute("STYLE").as_deref(), Some("width: 2px"));
        assert!(e.inline_style().is_empty());
    }

    #[test]
    fn class_tokens() {
        let mut e = ElementData::new("p");
        e.set_attribute("class", "  note\twarn  note ");
        assert!(e.has_class("note"));
        assert!(e.has_class("warn"));
        assert!(!e.has_class("Note"), "class names are case-sensitive");
        assert_eq!(e.id(), None);
    }
}
