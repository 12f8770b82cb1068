// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property table: which properties inherit, and their initial values.
//!
//! The table covers the longhand properties the resolver knows about. Unknown
//! properties still cascade normally; they just never inherit and have no
//! initial value. Custom properties (`--*`) always inherit and have no
//! initial value.

/// Static description of a CSS property.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PropertyInfo {
    /// Property name, lowercase.
    pub name: &'static str,
    /// Whether the property inherits by default.
    pub inherited: bool,
    /// Initial value as it appears in a computed style.
    pub initial: &'static str,
}

const fn prop(name: &'static str, inherited: bool, initial: &'static str) -> PropertyInfo {
    PropertyInfo {
        name,
        inherited,
        initial,
    }
}

// Sorted by name for binary search.
static PROPERTIES: &[PropertyInfo] = &[
    prop("align-content", false, "normal"),
    prop("align-items", false, "normal"),
    prop("background-color", false, "transparent"),
    prop("background-image", false, "none"),
    prop("border-collapse", true, "separate"),
    prop("border-spacing", true, "0"),
    prop("bottom", false, "auto"),
    prop("caption-side", true, "top"),
    prop("clear", false, "none"),
    prop("color", true, "canvastext"),
    prop("cursor", true, "auto"),
    prop("direction", true, "ltr"),
    prop("display", false, "inline"),
    prop("empty-cells", true, "show"),
    prop("flex-direction", false, "row"),
    prop("float", false, "none"),
    prop("font-family", true, "serif"),
    prop("font-size", true, "medium"),
    prop("font-style", true, "normal"),
    prop("font-variant", true, "normal"),
    prop("font-weight", true, "normal"),
    prop("height", false, "auto"),
    prop("left", false, "auto"),
    prop("letter-spacing", true, "normal"),
    prop("line-height", true, "normal"),
    prop("list-style-position", true, "outside"),
    prop("list-style-type", true, "disc"),
    prop("margin-bottom", false, "0"),
    prop("margin-left", false, "0"),
    prop("margin-right", false, "0"),
    prop("margin-top", false, "0"),
    prop("max-height", false, "none"),
    prop("max-width", false, "none"),
    prop("min-height", false, "auto"),
    prop("min-width", false, "auto"),
    prop("opacity", false, "1"),
    prop("overflow", false, "visible"),
    prop("padding-bottom", false, "0"),
    prop("padding-left", false, "0"),
    prop("padding-right", false, "0"),
    prop("padding-top", false, "0"),
    prop("position", false, "static"),
    prop("quotes", true, "auto"),
    prop("right", false, "auto"),
    prop("tab-size", true, "8"),
    prop("text-align", true, "start"),
    prop("text-decoration-line", false, "none"),
    prop("text-indent", true, "0"),
    prop("text-transform", true, "none"),
    prop("top", false, "auto"),
    prop("visibility", true, "visible"),
    prop("white-space", true, "normal"),
    prop("width", false, "auto"),
    prop("word-spacing", true, "normal"),
    prop("z-index", false, "auto"),
];

/// Every property in the table, sorted by name.
pub fn all() -> &'static [PropertyInfo] {
    PROPERTIES
}

/// Look up a property by (lowercase) name.
pub fn lookup(name: &str) -> Option<&'static PropertyInfo> {
    PROPERTIES
        .binary_search_by(|p| p.name.cmp(name))
        .ok()
        .map(|i| &PROPERTIES[i])
}

/// Returns true for custom properties (`--*`).
pub fn is_custom(name: &str) -> bool {
    name.starts_with("--")
}

/// Whether `name` inherits by default.
pub fn is_inherited(name: &str) -> bool {
    is_custom(name) || lookup(name).is_some_and(|p| p.inherited)
}

/// Initial value of `name`, if the table knows one.
pub fn initial_value(name: &str) -> Option<&'static str> {
    lookup(name).map(|p| p.initial)
}

/// The CSS-wide keywords every property accepts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CssWideKeyword {
    /// Use the property's initial value.
    Initial,
    /// Use the parent's computed value.
    Inherit,
    /// `inherit` for inheriting properties, `initial` for the rest.
    Unset,
}

impl CssWideKeyword {
    /// Recognize a keyword value, ignoring ASCII case and surrounding whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("initial") {
            Some(Self::Initial)
        } else if value.eq_ignore_ascii_case("inherit") {
            Some(Self::Inherit)
        } else if value.eq_ignore_ascii_case("unset") {
            Some(Self::Unset)
        } else {
            None
        }
    }
}
