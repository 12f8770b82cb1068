// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cascade bag: one winning value per property.
//!
//! ## Contention
//!
//! [`CascadeBag::record`] keeps a value unless a new one arrives with an equal
//! or higher [`Priority`]. Since rules are applied in document order, the later
//! of two equally specific declarations wins. Inherited values carry no
//! priority and are only ever written into empty slots.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::String;

use crate::declaration::StyleDeclaration;
use crate::priority::Priority;
use crate::properties::{self, CssWideKeyword};

/// A property's current winner.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CascadeEntry {
    /// Winning value.
    pub value: String,
    /// Priority it was recorded at; `None` for inherited or initial values.
    pub priority: Option<Priority>,
}

/// Per-request accumulator of winning declarations, keyed by property name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CascadeBag {
    entries: BTreeMap<String, CascadeEntry>,
}

impl CascadeBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `property` if `priority` is at least the current one.
    pub fn record(&mut self, property: &str, value: &str, priority: Priority) {
        let incoming = CascadeEntry {
            value: String::from(value),
            priority: Some(priority),
        };
        match self.entries.entry(String::from(property)) {
            Entry::Vacant(slot) => {
                slot.insert(incoming);
            }
            Entry::Occupied(mut slot) => {
                if incoming.priority >= slot.get().priority {
                    slot.insert(incoming);
                }
            }
        }
    }

    /// Record every declaration of `declaration` at `priority`.
    ///
    /// Inline style uses [`Priority::INLINE`].
    pub fn extend_with(&mut self, declaration: &StyleDeclaration, priority: Priority) {
        for (property, value) in declaration.iter() {
            self.record(property, value, priority);
        }
    }

    /// Fill absent inheriting properties from the ancestors' cascades.
    ///
    /// `ancestors` holds the cascaded (rules and inline, not yet inherited) bags
    /// of the element's ancestors, nearest first. Only properties that inherit
    /// and are still absent here are filled, and nothing is overwritten.
    pub fn inherit_from(&mut self, ancestors: &[Self]) {
        for ancestor in ancestors {
            for property in ancestor.entries.keys() {
                if self.entries.contains_key(property) || !properties::is_inherited(property) {
                    continue;
                }
                if let Some(value) = inherited_value(property, ancestors) {
                    self.fill(property, value);
                }
            }
        }
    }

    /// Write `value` into an empty slot without priority.
    pub(crate) fn fill(&mut self, property: &str, value: String) {
        self.entries
            .entry(String::from(property))
            .or_insert(CascadeEntry {
                value,
                priority: None,
            });
    }

    /// Replace the value of an existing entry, keeping its priority.
    pub(crate) fn replace_value(&mut self, property: &str, value: String) {
        if let Some(entry) = self.entries.get_mut(property) {
            entry.value = value;
        }
    }

    /// Remove `property`, returning its entry.
    pub fn remove(&mut self, property: &str) -> Option<CascadeEntry> {
        self.entries.remove(property)
    }

    /// Current winning value of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(|e| e.value.as_str())
    }

    /// Priority of the current winner; `Some(None)` for an inherited value.
    pub fn priority_of(&self, property: &str) -> Option<Option<Priority>> {
        self.entries.get(property).map(|e| e.priority)
    }

    /// Returns true if `property` has a value.
    pub fn contains(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    /// Number of properties with a value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no property has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries sorted by property name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CascadeEntry)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_values(self) -> impl Iterator<Item = (String, String)> {
        self.entries.into_iter().map(|(k, v)| (k, v.value))
    }
}

/// The value `property` inherits from the nearest ancestor that decides it.
///
/// Ancestors are searched nearest first. An ancestor declaring `inherit` (or
/// `unset` on an inheriting property) defers to its own parent. An ancestor
/// that lacks a non-inheriting property has that property's initial value.
pub(crate) fn inherited_value(property: &str, ancestors: &[CascadeBag]) -> Option<String> {
    let inherits = properties::is_inherited(property);
    let initial = || properties::initial_value(property).map(String::from);
    for ancestor in ancestors {
        match ancestor.get(property) {
            Some(value) => match CssWideKeyword::parse(value) {
                None => return Some(String::from(value)),
                Some(CssWideKeyword::Initial) => return initial(),
                Some(CssWideKeyword::Inherit) => {}
                Some(CssWideKeyword::Unset) if inherits => {}
                Some(CssWideKeyword::Unset) => return initial(),
            },
            None if !inherits => return initial(),
            None => {}
        }
    }
    initial()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::priority::Specificity;
    use alloc::vec;
    use alloc::vec::Vec;

    fn at(ids: u32, classes: u32, types: u32) -> Priority {
        Priority::from(Specificity::new(ids, classes, types))
    }

    fn bag(pairs: &[(&str, &str)]) -> CascadeBag {
        let mut b = CascadeBag::new();
        for (p, v) in pairs {
            b.record(p, v, at(0, 0, 1));
        }
        b
    }

    #[test]
    fn later_equal_priority_wins() {
        let mut b = CascadeBag::new();
        b.record("color", "red", at(0, 1, 0));
        b.record("color", "blue", at(0, 1, 0));
        assert_eq!(b.get("color"), Some("blue"));
    }

    #[test]
    fn lower_priority_never_overwrites() {
        let mut b = CascadeBag::new();
        b.record("color", "red", at(1, 0, 0));
        b.record("color", "blue", at(0, 9, 9));
        assert_eq!(b.get("color"), Some("red"));
        assert_eq!(b.priority_of("color"), Some(Some(at(1, 0, 0))));
    }

    #[test]
    fn inline_beats_any_selector() {
        let mut b = CascadeBag::new();
        b.record("color", "red", at(200, 200, 200));
        b.extend_with(&[("color", "green")].into_iter().collect(), Priority::INLINE);
        assert_eq!(b.get("color"), Some("green"));
    }

    #[test]
    fn inheritance_fills_only_absent_inheriting_properties() {
        let mut child = bag(&[("color", "red")]);
        let parent = bag(&[("color", "blue"), ("font-size", "20px"), ("width", "5px")]);
        child.inherit_from(&[parent]);
        assert_eq!(child.get("color"), Some("red"), "own value is never overwritten");
        assert_eq!(child.get("font-size"), Some("20px"));
        assert_eq!(child.priority_of("font-size"), Some(None));
        assert!(!child.contains("width"), "width does not inherit");
    }

    #[test]
    fn nearest_ancestor_wins() {
        let mut child = CascadeBag::new();
        let parent = bag(&[("--accent", "teal")]);
        let grandparent = bag(&[("--accent", "navy"), ("cursor", "pointer")]);
        child.inherit_from(&[parent, grandparent]);
        assert_eq!(child.get("--accent"), Some("teal"));
        assert_eq!(child.get("cursor"), Some("pointer"), "values skip over silent ancestors");
    }

    #[test]
    fn inherit_keyword_on_ancestor_defers_upward() {
        let parent = bag(&[("color", "inherit")]);
        let grandparent = bag(&[("color", "olive")]);
        assert_eq!(
            inherited_value("color", &[parent.clone(), grandparent]),
            Some(String::from("olive"))
        );
        assert_eq!(
            inherited_value("color", &[parent]),
            Some(String::from("canvastext")),
            "falls back to the initial value at the root"
        );
    }

    #[test]
    fn non_inheriting_properties_stop_at_the_parent() {
        let parent = CascadeBag::new();
        let grandparent = bag(&[("width", "10px")]);
        assert_eq!(
            inherited_value("width", &[parent, grandparent]),
            Some(String::from("auto"))
        );
    }

    #[test]
    fn iteration_is_sorted() {
        let b = bag(&[("width", "1px"), ("color", "red"), ("--x", "1")]);
        let keys: Vec<&str> = b.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["--x", "color", "width"]);
        assert_eq!(b.len(), 3);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn winner_is_last_of_highest_priority(
                records in proptest::collection::vec((0_u32..4, 0_u32..100), 1..32),
            ) {
                let mut b = CascadeBag::new();
                for &(classes, tag) in &records {
                    b.record("color", &alloc::format!("v{tag}"), at(0, classes, 0));
                }
                let top = records.iter().map(|&(c, _)| c).max().unwrap();
                let (_, tag) = records.iter().rev().find(|&&(c, _)| c == top).unwrap();
                let want = alloc::format!("v{tag}");
                prop_assert_eq!(b.get("color"), Some(want.as_str()));
            }
        }
    }
}
