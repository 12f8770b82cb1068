// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stylesheets, rules, and the document contract they are evaluated against.
//!
//! ## Overview
//!
//! A document exposes its sheets as a [`StyleSheetList`]. Each entry is a
//! [`StyleSheet`]: either a [`CssStyleSheet`] the resolver applies, or a
//! [`ForeignStyleSheet`] (XSLT and the like) the resolver skips.
//!
//! Rules implement [`CssRule`]: given the element being resolved they record
//! their contribution into a [`CascadeBag`]. Selector matching is delegated to
//! [`Selector`] so documents can bring their own selector engine.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::bag::CascadeBag;
use crate::declaration::StyleDeclaration;
use crate::media::{MediaList, ViewingContext};
use crate::priority::{Priority, Specificity};

/// What the resolver needs from a document.
pub trait StyleDocument: Sized {
    /// Handle of an element node.
    type Element: Copy + Eq + fmt::Debug;

    /// The document's stylesheets in document order.
    ///
    /// Documents that cannot provide a CSS stylesheet list return `None`, which
    /// the resolver rejects as an invalid argument.
    fn style_sheets(&self) -> Option<&StyleSheetList<Self>>;

    /// Parent element of `element`, or `None` at the root.
    fn parent_element(&self, element: &Self::Element) -> Option<Self::Element>;

    /// Declarations from the element's `style` attribute.
    fn inline_style(&self, element: &Self::Element) -> Option<&StyleDeclaration>;
}

/// Inputs shared by every rule during one cascade.
pub struct StyleContext<'a, D> {
    /// The window being resolved for.
    pub window: &'a ViewingContext,
    /// The document the element belongs to.
    pub document: &'a D,
}

impl<D> Clone for StyleContext<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for StyleContext<'_, D> {}

impl<D> fmt::Debug for StyleContext<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleContext")
            .field("window", self.window)
            .finish_non_exhaustive()
    }
}

/// A rule that can contribute declarations to an element's cascade.
pub trait CssRule<D: StyleDocument> {
    /// Record this rule's declarations for `element` into `bag`, if it applies.
    fn compute_style(
        &self,
        bag: &mut CascadeBag,
        context: &StyleContext<'_, D>,
        element: &D::Element,
    );
}

/// Selector matching, supplied by the document's selector engine.
pub trait Selector<D: StyleDocument> {
    /// Whether `element` matches.
    fn matches(&self, document: &D, element: &D::Element) -> bool;

    /// Specificity the selector's declarations are recorded at.
    fn specificity(&self) -> Specificity;
}

/// A selector and its declaration block.
#[derive(Clone, Debug)]
pub struct StyleRule<S> {
    selector: S,
    declarations: StyleDeclaration,
}

impl<S> StyleRule<S> {
    /// Create a rule.
    pub fn new(selector: S, declarations: StyleDeclaration) -> Self {
        Self {
            selector,
            declarations,
        }
    }

    /// The rule's selector.
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// The rule's declarations.
    pub fn style(&self) -> &StyleDeclaration {
        &self.declarations
    }

    /// Mutable access to the declarations.
    pub fn style_mut(&mut self) -> &mut StyleDeclaration {
        &mut self.declarations
    }
}

impl<D: StyleDocument, S: Selector<D>> CssRule<D> for StyleRule<S> {
    fn compute_style(
        &self,
        bag: &mut CascadeBag,
        context: &StyleContext<'_, D>,
        element: &D::Element,
    ) {
        if self.selector.matches(context.document, element) {
            bag.extend_with(
                &self.declarations,
                Priority::from(self.selector.specificity()),
            );
        }
    }
}

/// Rules gated by a media list (`@media`).
pub struct MediaRule<D: StyleDocument> {
    media: MediaList,
    rules: Vec<Box<dyn CssRule<D>>>,
}

impl<D: StyleDocument> MediaRule<D> {
    /// Create an empty `@media` block.
    pub fn new(media: MediaList) -> Self {
        Self {
            media,
            rules: Vec::new(),
        }
    }

    /// Append a nested rule.
    pub fn push_rule(&mut self, rule: impl CssRule<D> + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// The gating media list.
    pub fn media(&self) -> &MediaList {
        &self.media
    }

    /// Number of nested rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the block has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<D: StyleDocument> CssRule<D> for MediaRule<D> {
    fn compute_style(
        &self,
        bag: &mut CascadeBag,
        context: &StyleContext<'_, D>,
        element: &D::Element,
    ) {
        if !self.media.matches(context.window) {
            return;
        }
        for rule in &self.rules {
            rule.compute_style(bag, context, element);
        }
    }
}

impl<D: StyleDocument> fmt::Debug for MediaRule<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaRule")
            .field("media", &self.media.media_text())
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// A CSS stylesheet: ordered rules plus the switches that gate them.
pub struct CssStyleSheet<D: StyleDocument> {
    disabled: bool,
    media: MediaList,
    title: Option<String>,
    rules: Vec<Box<dyn CssRule<D>>>,
}

impl<D: StyleDocument> Default for CssStyleSheet<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: StyleDocument> CssStyleSheet<D> {
    /// An enabled sheet with no media restriction and no rules.
    pub fn new() -> Self {
        Self {
            disabled: false,
            media: MediaList::new(),
            title: None,
            rules: Vec::new(),
        }
    }

    /// Append a rule; rules apply in insertion order.
    pub fn push_rule(&mut self, rule: impl CssRule<D> + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Rules in source order.
    pub fn rules(&self) -> impl Iterator<Item = &dyn CssRule<D>> + '_ {
        self.rules.iter().map(|r| &**r)
    }

    /// Number of top-level rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the sheet has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the sheet is switched off.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Switch the sheet off or on.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// The media list the sheet applies to.
    pub fn media(&self) -> &MediaList {
        &self.media
    }

    /// Restrict the sheet to `media`.
    pub fn set_media(&mut self, media: MediaList) {
        self.media = media;
    }

    /// Advisory title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the advisory title.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }
}

impl<D: StyleDocument> fmt::Debug for CssStyleSheet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssStyleSheet")
            .field("disabled", &self.disabled)
            .field("media", &self.media.media_text())
            .field("title", &self.title)
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// A sheet in a language other than CSS, kept so the list mirrors the document.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ForeignStyleSheet {
    /// MIME type, e.g. `text/xsl`.
    pub type_: String,
    /// Where the sheet was loaded from, if anywhere.
    pub href: Option<String>,
}

/// One entry of a [`StyleSheetList`].
pub enum StyleSheet<D: StyleDocument> {
    /// A CSS stylesheet.
    Css(CssStyleSheet<D>),
    /// A non-CSS stylesheet; never applied.
    Foreign(ForeignStyleSheet),
}

impl<D: StyleDocument> fmt::Debug for StyleSheet<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(sheet) => f.debug_tuple("Css").field(sheet).finish(),
            Self::Foreign(sheet) => f.debug_tuple("Foreign").field(sheet).finish(),
        }
    }
}

impl<D: StyleDocument> StyleSheet<D> {
    /// The CSS sheet, if this is one.
    pub fn as_css(&self) -> Option<&CssStyleSheet<D>> {
        match self {
            Self::Css(sheet) => Some(sheet),
            Self::Foreign(_) => None,
        }
    }

    /// Mutable access to the CSS sheet, if this is one.
    pub fn as_css_mut(&mut self) -> Option<&mut CssStyleSheet<D>> {
        match self {
            Self::Css(sheet) => Some(sheet),
            Self::Foreign(_) => None,
        }
    }
}

impl<D: StyleDocument> From<CssStyleSheet<D>> for StyleSheet<D> {
    fn from(sheet: CssStyleSheet<D>) -> Self {
        Self::Css(sheet)
    }
}

impl<D: StyleDocument> From<ForeignStyleSheet> for StyleSheet<D> {
    fn from(sheet: ForeignStyleSheet) -> Self {
        Self::Foreign(sheet)
    }
}

/// A document's stylesheets in document order.
pub struct StyleSheetList<D: StyleDocument> {
    sheets: Vec<StyleSheet<D>>,
}

impl<D: StyleDocument> fmt::Debug for StyleSheetList<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.sheets).finish()
    }
}

impl<D: StyleDocument> Default for StyleSheetList<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: StyleDocument> StyleSheetList<D> {
    /// An empty list.
    pub fn new() -> Self {
        Self { sheets: Vec::new() }
    }

    /// Append a sheet; returns its index.
    pub fn push(&mut self, sheet: impl Into<StyleSheet<D>>) -> usize {
        self.sheets.push(sheet.into());
        self.sheets.len() - 1
    }

    /// Sheet at `index`.
    pub fn get(&self, index: usize) -> Option<&StyleSheet<D>> {
        self.sheets.get(index)
    }

    /// Mutable sheet at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut StyleSheet<D>> {
        self.sheets.get_mut(index)
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Returns true if there are no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Iterate sheets in document order.
    pub fn iter(&self) -> core::slice::Iter<'_, StyleSheet<D>> {
        self.sheets.iter()
    }
}

impl<'a, D: StyleDocument> IntoIterator for &'a StyleSheetList<D> {
    type Item = &'a StyleSheet<D>;
    type IntoIter = core::slice::Iter<'a, StyleSheet<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
