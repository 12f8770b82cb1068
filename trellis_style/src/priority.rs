// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cascade priorities.
//!
//! A [`Priority`] is a totally ordered ordinal. Matched style rules record at
//! their selector's packed [`Specificity`]; inline declarations record at
//! [`Priority::INLINE`], which every specificity ranks below.

/// Selector specificity as an `(ids, classes, types)` triple.
///
/// Pseudo-classes and attribute selectors count as classes; pseudo-elements
/// count as types.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Specificity {
    /// Number of id selectors.
    pub ids: u32,
    /// Number of class, attribute, and pseudo-class selectors.
    pub classes: u32,
    /// Number of type and pseudo-element selectors.
    pub types: u32,
}

impl Specificity {
    /// Create a specificity triple.
    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self {
            ids,
            classes,
            types,
        }
    }
}

impl core::ops::Add for Specificity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            ids: self.ids.saturating_add(rhs.ids),
            classes: self.classes.saturating_add(rhs.classes),
            types: self.types.saturating_add(rhs.types),
        }
    }
}

/// Ordinal used to decide which declaration of a property wins.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Priority(u32);

impl Priority {
    /// Priority of declarations from an element's inline `style` attribute.
    pub const INLINE: Self = Self(1 << 24);

    /// Packed value, for diagnostics.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<Specificity> for Priority {
    /// Pack `(ids, classes, types)` into one byte each, saturating at 255, so
    /// any specificity stays strictly below [`Priority::INLINE`].
    fn from(s: Specificity) -> Self {
        let byte = |n: u32| n.min(0xFF);
        Self((byte(s.ids) << 16) | (byte(s.classes) << 8) | byte(s.types))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_orders_lexicographically() {
        let id = Priority::from(Specificity::new(1, 0, 0));
        let many_classes = Priority::from(Specificity::new(0, 40, 7));
        let ty = Priority::from(Specificity::new(0, 0, 1));
        assert!(id > many_classes, "one id beats any number of classes");
        assert!(many_classes > ty);
        assert!(ty > Priority::default());
    }

    #[test]
    fn components_saturate_below_inline() {
        let huge = Priority::from(Specificity::new(u32::MAX, u32::MAX, u32::MAX));
        assert_eq!(huge.get(), 0x00FF_FFFF);
        assert!(huge < Priority::INLINE, "no selector outranks inline style");

        let a = Priority::from(Specificity::new(0, 300, 0));
        let b = Priority::from(Specificity::new(0, 255, 9));
        assert!(a < b, "a saturated class count does not carry into ids");
    }

    #[test]
    fn specificity_adds_componentwise() {
        let sum = Specificity::new(1, 2, 3) + Specificity::new(0, 1, 1);
        assert_eq!(sum, Specificity::new(1, 3, 4));
    }
}
