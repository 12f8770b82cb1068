// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declaration blocks: ordered `(property, value)` pairs.
//!
//! Names are ASCII-lowercased except custom properties (`--*`), which keep
//! their case. Setting a name that is already declared replaces its value in
//! place. Reading CSS text into a block is left to the document layer.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// An ordered declaration block, as found in a style rule or an inline `style` attribute.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StyleDeclaration {
    entries: Vec<(String, String)>,
}

impl StyleDeclaration {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, replacing an existing entry in place.
    pub fn set_property(&mut self, name: &str, value: &str) {
        let name = normalize_name(name);
        let value = String::from(value.trim());
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of `name`, if declared.
    pub fn get_property_value(&self, name: &str) -> Option<&str> {
        let name = normalize_name(name);
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove `name` and return its previous value.
    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        let name = normalize_name(name);
        let i = self.entries.iter().position(|(n, _)| *n == name)?;
        Some(self.entries.remove(i).1)
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the block declares nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(property, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize as `name: value;` pairs separated by spaces.
    pub fn css_text(&self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}: {value};")?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for StyleDeclaration {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (name, value) in iter {
            out.set_property(name, value);
        }
        out
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if crate::properties::is_custom(name) {
        String::from(name)
    } else {
        name.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pairs(decl: &StyleDeclaration) -> Vec<(&str, &str)> {
        decl.iter().collect()
    }

    #[test]
    fn displays_in_declaration_order() {
        let d: StyleDeclaration = [("color", "red"), ("margin-top", "0")].into_iter().collect();
        assert_eq!(pairs(&d), vec![("color", "red"), ("margin-top", "0")]);
        assert_eq!(d.css_text(), "color: red; margin-top: 0;");
    }

    #[test]
    fn names_lowercase_except_custom_properties() {
        let mut d = StyleDeclaration::new();
        d.set_property("COLOR", "Blue");
        d.set_property("--Brand-Hue", "210");
        assert_eq!(d.get_property_value("color"), Some("Blue"), "values keep their case");
        assert_eq!(d.get_property_value("--Brand-Hue"), Some("210"));
        assert_eq!(d.get_property_value("--brand-hue"), None);
    }

    #[test]
    fn later_duplicate_replaces_in_place() {
        let mut d = StyleDeclaration::new();
        d.set_property("color", "red");
        d.set_property("width", "1px");
        d.set_property("color", "blue");
        assert_eq!(pairs(&d), vec![("color", "blue"), ("width", "1px")]);
    }

    #[test]
    fn set_and_remove() {
        let mut d = StyleDeclaration::new();
        d.set_property("Width", " 10px ");
        assert_eq!(d.get_property_value("width"), Some("10px"));
        assert_eq!(d.remove_property("WIDTH"), Some(String::from("10px")));
        assert!(d.is_empty());
        assert_eq!(d.remove_property("width"), None);
    }

    #[test]
    fn collects_from_pairs() {
        let d: StyleDeclaration = [("color", "red"), ("Color", "green")].into_iter().collect();
        assert_eq!(d.len(), 1);
        assert_eq!(d.get_property_value("color"), Some("green"));
    }
}
