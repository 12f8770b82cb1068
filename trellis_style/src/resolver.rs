// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Computed-style resolution.
//!
//! ## Order
//!
//! For the element being resolved:
//!
//! 1) every applicable stylesheet, in document order, runs its rules in source
//!    order (foreign, disabled, and media-mismatched sheets are skipped);
//! 2) inline declarations are merged at [`Priority::INLINE`];
//! 3) absent inheriting properties are filled from the ancestors;
//! 4) the CSS-wide keywords `initial`, `inherit` and `unset` are resolved;
//! 5) optionally, every remaining table property gets its initial value.

use alloc::string::String;
use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::bag::{CascadeBag, inherited_value};
use crate::computed::ComputedStyle;
use crate::error::StyleError;
use crate::media::ViewingContext;
use crate::priority::Priority;
use crate::properties::{self, CssWideKeyword};
use crate::sheet::{StyleContext, StyleDocument, StyleSheet, StyleSheetList};

/// Resolves computed styles for one viewing context.
#[derive(Clone, Debug, Default)]
pub struct StyleResolver {
    window: ViewingContext,
    include_initial_values: bool,
}

impl StyleResolver {
    /// Create a resolver for `window`.
    pub fn new(window: ViewingContext) -> Self {
        Self {
            window,
            include_initial_values: false,
        }
    }

    /// When set, properties of the property table that end up without a value
    /// are reported with their initial value.
    pub fn set_include_initial_values(&mut self, include: bool) {
        self.include_initial_values = include;
    }

    /// Replace the viewing context, e.g. after a resize.
    pub fn set_viewing_context(&mut self, window: ViewingContext) {
        self.window = window;
    }

    /// The viewing context media queries are evaluated against.
    pub fn viewing_context(&self) -> &ViewingContext {
        &self.window
    }

    /// Compute the style of `element`.
    ///
    /// `pseudo` is accepted for API compatibility; pseudo-element styles are not
    /// resolved, so it has no effect. Fails with
    /// [`StyleError::InvalidArgument`] when the document has no CSS stylesheet list.
    pub fn get_computed_style<D: StyleDocument>(
        &self,
        document: &D,
        element: &D::Element,
        pseudo: Option<&str>,
    ) -> Result<ComputedStyle, StyleError> {
        let sheets = Self::sheets_of(document)?;
        if let Some(pseudo) = pseudo {
            trace!(pseudo, "pseudo-element argument ignored");
        }
        debug!(element = ?element, "computed style");

        let context = StyleContext {
            window: &self.window,
            document,
        };
        let mut bag = self.cascade_in(sheets, &context, element);
        let ancestors: Vec<CascadeBag> = Ancestors::new(document, *element)
            .map(|a| self.cascade_in(sheets, &context, &a))
            .collect();

        bag.inherit_from(&ancestors);
        resolve_keywords(&mut bag, &ancestors);
        if self.include_initial_values {
            for p in properties::all() {
                bag.fill(p.name, String::from(p.initial));
            }
        }
        Ok(ComputedStyle::from(bag))
    }

    /// Cascade `element` without inheritance: stylesheet rules and inline style only.
    pub fn cascade<D: StyleDocument>(
        &self,
        document: &D,
        element: &D::Element,
    ) -> Result<CascadeBag, StyleError> {
        let sheets = Self::sheets_of(document)?;
        let context = StyleContext {
            window: &self.window,
            document,
        };
        Ok(self.cascade_in(sheets, &context, element))
    }

    fn sheets_of<D: StyleDocument>(document: &D) -> Result<&StyleSheetList<D>, StyleError> {
        document
            .style_sheets()
            .ok_or(StyleError::InvalidArgument("document has no CSS stylesheet list"))
    }

    fn cascade_in<D: StyleDocument>(
        &self,
        sheets: &StyleSheetList<D>,
        context: &StyleContext<'_, D>,
        element: &D::Element,
    ) -> CascadeBag {
        let mut bag = CascadeBag::new();
        for (index, sheet) in sheets.iter().enumerate() {
            let StyleSheet::Css(sheet) = sheet else {
                trace!(index, "skipping foreign stylesheet");
                continue;
            };
            if sheet.is_disabled() {
                trace!(index, "skipping disabled stylesheet");
                continue;
            }
            if !sheet.media().matches(context.window) {
                trace!(index, media = sheet.media().media_text(), "skipping stylesheet");
                continue;
            }
            for rule in sheet.rules() {
                rule.compute_style(&mut bag, context, element);
            }
        }
        if let Some(inline) = context.document.inline_style(element) {
            bag.extend_with(inline, Priority::INLINE);
        }
        bag
    }
}

/// Replace the element's own CSS-wide keywords with concrete values.
///
/// Properties that resolve to nothing (custom properties without an ancestor
/// value, say) are dropped.
fn resolve_keywords(bag: &mut CascadeBag, ancestors: &[CascadeBag]) {
    let keyed: Vec<_> = bag
        .iter()
        .filter_map(|(p, e)| Some((String::from(p), CssWideKeyword::parse(&e.value)?)))
        .collect();
    for (property, keyword) in keyed {
        let inherit = match keyword {
            CssWideKeyword::Inherit => true,
            CssWideKeyword::Initial => false,
            CssWideKeyword::Unset => properties::is_inherited(&property),
        };
        let value = if inherit {
            inherited_value(&property, ancestors)
        } else {
            properties::initial_value(&property).map(String::from)
        };
        match value {
            Some(value) => bag.replace_value(&property, value),
            None => {
                bag.remove(&property);
            }
        }
    }
}

/// Parent chain of an element, nearest first.
struct Ancestors<'a, D: StyleDocument> {
    document: &'a D,
    next: Option<D::Element>,
}

impl<'a, D: StyleDocument> Ancestors<'a, D> {
    fn new(document: &'a D, element: D::Element) -> Self {
        Self {
            document,
            next: document.parent_element(&element),
        }
    }
}

impl<D: StyleDocument> Iterator for Ancestors<'_, D> {
    type Item = D::Element;

    fn next(&mut self) -> Option<D::Element> {
        let cur = self.next?;
        self.next = self.document.parent_element(&cur);
        Some(cur)
    }
}
