// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Immutable computed-style snapshots.

use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;

use crate::bag::CascadeBag;

/// The resolved value of every property that has one, sorted by property name.
///
/// Snapshots do not track later changes to the document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComputedStyle {
    values: BTreeMap<String, String>,
}

impl ComputedStyle {
    /// Value of `property`, or the empty string when it has none.
    pub fn get_property_value(&self, property: &str) -> &str {
        self.get(property).unwrap_or("")
    }

    /// Value of `property`, if it has one.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.values.get(property).map(String::as_str)
    }

    /// Name of the property at `index` in sorted order.
    pub fn item(&self, index: usize) -> Option<&str> {
        self.values.keys().nth(index).map(String::as_str)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no property has a value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(property, value)` pairs sorted by property.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as `name: value;` pairs separated by spaces.
    pub fn css_text(&self) -> String {
        alloc::format!("{self}")
    }
}

impl From<CascadeBag> for ComputedStyle {
    fn from(bag: CascadeBag) -> Self {
        Self {
            values: bag.into_values().collect(),
        }
    }
}

impl fmt::Display for ComputedStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}
