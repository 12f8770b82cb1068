// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple selectors: compounds of `*`, type, `#id` and `.class`, joined by
//! descendant combinators.
//!
//! `div.note #main span` parses into three compounds. An element matches when
//! it matches the last compound and each earlier compound matches some
//! ancestor, in order. Type names compare ASCII case-insensitively; ids and
//! classes are case-sensitive.

use alloc::string::String;
use alloc::vec::Vec;

use trellis_style::priority::Specificity;
use trellis_style::sheet::Selector;
use trellis_tree::NodeId;

use crate::document::Document;
use crate::error::DomError;
use crate::node::ElementData;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Compound {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
}

impl Compound {
    fn parse(text: &str) -> Option<Self> {
        let mut out = Self::default();
        let mut rest = text;
        if let Some(r) = rest.strip_prefix('*') {
            rest = r;
        } else {
            let (name, r) = split_ident(rest);
            if !name.is_empty() {
                out.tag = Some(name.to_ascii_lowercase());
            }
            rest = r;
        }
        while let Some(marker) = rest.chars().next() {
            let (name, r) = split_ident(&rest[marker.len_utf8()..]);
            if name.is_empty() {
                return None;
            }
            match marker {
                '#' => out.ids.push(String::from(name)),
                '.' => out.classes.push(String::from(name)),
                _ => return None,
            }
            rest = r;
        }
        Some(out)
    }

    fn matches(&self, element: &ElementData) -> bool {
        self.tag.as_deref().is_none_or(|t| t == element.local_name())
            && self.ids.iter().all(|id| element.id() == Some(id.as_str()))
            && self.classes.iter().all(|c| element.has_class(c))
    }

    fn specificity(&self) -> Specificity {
        let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        Specificity::new(
            count(self.ids.len()),
            count(self.classes.len()),
            u32::from(self.tag.is_some()),
        )
    }
}

/// Split a leading CSS identifier off `text`.
fn split_ident(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(text.len());
    text.split_at(end)
}

/// A parsed simple selector.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimpleSelector {
    // Leftmost first; the last compound is the subject.
    compounds: Vec<Compound>,
    text: String,
}

impl SimpleSelector {
    /// Parse selector text.
    ///
    /// Anything beyond compounds and descendant combinators (other combinators,
    /// attribute selectors, pseudo-classes, selector lists) is rejected.
    pub fn parse(text: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(String::from(text));
        let compounds = text
            .split_whitespace()
            .map(Compound::parse)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(invalid)?;
        if compounds.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            compounds,
            text: String::from(text.trim()),
        })
    }

    /// The selector as written.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Selector<Document> for SimpleSelector {
    fn matches(&self, document: &Document, element: &NodeId) -> bool {
        let Some((subject, ancestors)) = self.compounds.split_last() else {
            return false;
        };
        let Some(data) = document.element(*element) else {
            return false;
        };
        if !subject.matches(data) {
            return false;
        }
        // Greedy nearest-ancestor matching is exact when every combinator is a descendant one.
        let mut up = document.ancestor_elements(*element);
        ancestors.iter().rev().all(|compound| {
            up.by_ref()
                .any(|a| document.element(a).is_some_and(|d| compound.matches(d)))
        })
    }

    fn specificity(&self) -> Specificity {
        self.compounds
            .iter()
            .map(Compound::specificity)
            .fold(Specificity::default(), |acc, s| acc + s)
    }
}
