// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Media query lists and the viewing context they are evaluated against.
//!
//! ## Supported syntax
//!
//! A [`MediaList`] is a comma-separated list of queries. Each query is either
//! `[not | only] <type> [and <feature>]*` or `<feature> [and <feature>]*`, where
//!
//! - `<type>` is `all`, `screen` or `print`; other identifiers are valid media
//!   types that never match;
//! - `<feature>` is `(width: …)`, `(min-width: …)`, `(max-width: …)`, the same
//!   three for `height`, or `(orientation: portrait | landscape)`; lengths are
//!   in `px` or `em` (16px), and `0` may omit its unit. A bare `(width)` or
//!   `(height)` tests for a non-zero size.
//!
//! A query that does not parse evaluates to `not all`. An empty list matches
//! every context.

use alloc::string::String;
use alloc::vec::Vec;

/// Media types a viewing context can present as.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MediaType {
    /// Interactive screens.
    #[default]
    Screen,
    /// Paged and print preview output.
    Print,
}

/// Viewport orientation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Height is at least the width.
    Portrait,
    /// Width exceeds the height.
    Landscape,
}

/// The window a style is resolved for: media type and inner viewport size in CSS pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewingContext {
    /// Media type presented to media queries.
    pub media_type: MediaType,
    /// Inner width in CSS pixels.
    pub inner_width: f32,
    /// Inner height in CSS pixels.
    pub inner_height: f32,
}

impl Default for ViewingContext {
    fn default() -> Self {
        Self::screen(1024.0, 768.0)
    }
}

impl ViewingContext {
    /// A screen of the given inner size.
    pub const fn screen(inner_width: f32, inner_height: f32) -> Self {
        Self {
            media_type: MediaType::Screen,
            inner_width,
            inner_height,
        }
    }

    /// A print medium of the given page size.
    pub const fn print(inner_width: f32, inner_height: f32) -> Self {
        Self {
            media_type: MediaType::Print,
            inner_width,
            inner_height,
        }
    }

    /// Orientation derived from the inner size.
    pub fn orientation(&self) -> Orientation {
        if self.inner_height >= self.inner_width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

/// Pixels per `em` when evaluating media queries.
const EM_PX: f32 = 16.0;

#[derive(Copy, Clone, Debug, PartialEq)]
enum TypeTest {
    All,
    Is(MediaType),
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Axis {
    Width,
    Height,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Feature {
    Exact(Axis, f32),
    Min(Axis, f32),
    Max(Axis, f32),
    NonZero(Axis),
    Orientation(Orientation),
}

impl Feature {
    fn matches(self, ctx: &ViewingContext) -> bool {
        let size = |axis: Axis| match axis {
            Axis::Width => ctx.inner_width,
            Axis::Height => ctx.inner_height,
        };
        match self {
            Self::Exact(axis, px) => size(axis) == px,
            Self::Min(axis, px) => size(axis) >= px,
            Self::Max(axis, px) => size(axis) <= px,
            Self::NonZero(axis) => size(axis) > 0.0,
            Self::Orientation(o) => ctx.orientation() == o,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum MediaQuery {
    Valid {
        negated: bool,
        media_type: TypeTest,
        features: Vec<Feature>,
    },
    /// Unparseable; behaves as `not all`.
    Invalid,
}

impl MediaQuery {
    fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or(Self::Invalid)
    }

    fn try_parse(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();
        let mut words = Words::new(&text);
        let mut negated = false;
        let mut media_type = TypeTest::All;
        let mut features = Vec::new();

        if words.peek_is_feature() {
            features.push(words.feature()?);
        } else {
            let mut word = words.ident()?;
            if word == "not" || word == "only" {
                negated = word == "not";
                word = words.ident()?;
            }
            media_type = match word {
                "all" => TypeTest::All,
                "screen" => TypeTest::Is(MediaType::Screen),
                "print" => TypeTest::Is(MediaType::Print),
                "not" | "only" | "and" => return None,
                _ => TypeTest::Unknown,
            };
        }
        while !words.is_done() {
            if words.ident()? != "and" {
                return None;
            }
            features.push(words.feature()?);
        }
        Some(Self::Valid {
            negated,
            media_type,
            features,
        })
    }

    fn matches(&self, ctx: &ViewingContext) -> bool {
        match self {
            Self::Invalid => false,
            Self::Valid {
                negated,
                media_type,
                features,
            } => {
                let type_ok = match media_type {
                    TypeTest::All => true,
                    TypeTest::Is(t) => *t == ctx.media_type,
                    TypeTest::Unknown => false,
                };
                let ok = type_ok && features.iter().all(|f| f.matches(ctx));
                ok != *negated
            }
        }
    }
}

/// Cursor over a lowercased query.
struct Words<'a> {
    rest: &'a str,
}

impl<'a> Words<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn is_done(&mut self) -> bool {
        self.rest = self.rest.trim_start();
        self.rest.is_empty()
    }

    fn peek_is_feature(&mut self) -> bool {
        self.rest = self.rest.trim_start();
        self.rest.starts_with('(')
    }

    fn ident(&mut self) -> Option<&'a str> {
        self.rest = self.rest.trim_start();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (word, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(word)
    }

    fn feature(&mut self) -> Option<Feature> {
        self.rest = self.rest.trim_start().strip_prefix('(')?;
        let close = self.rest.find(')')?;
        let (inner, rest) = self.rest.split_at(close);
        self.rest = &rest[1..];
        parse_feature(inner)
    }
}

fn parse_feature(inner: &str) -> Option<Feature> {
    let Some((name, value)) = inner.split_once(':') else {
        return match inner.trim() {
            "width" => Some(Feature::NonZero(Axis::Width)),
            "height" => Some(Feature::NonZero(Axis::Height)),
            _ => None,
        };
    };
    let value = value.trim();
    let feature = match name.trim() {
        "orientation" => Feature::Orientation(match value {
            "portrait" => Orientation::Portrait,
            "landscape" => Orientation::Landscape,
            _ => return None,
        }),
        "width" => Feature::Exact(Axis::Width, parse_length(value)?),
        "min-width" => Feature::Min(Axis::Width, parse_length(value)?),
        "max-width" => Feature::Max(Axis::Width, parse_length(value)?),
        "height" => Feature::Exact(Axis::Height, parse_length(value)?),
        "min-height" => Feature::Min(Axis::Height, parse_length(value)?),
        "max-height" => Feature::Max(Axis::Height, parse_length(value)?),
        _ => return None,
    };
    Some(feature)
}

/// Parse a media-query length into CSS pixels.
fn parse_length(value: &str) -> Option<f32> {
    let split = value
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f32 = number.trim().parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    match unit {
        "px" => Some(number),
        "em" => Some(number * EM_PX),
        "" if number == 0.0 => Some(0.0),
        _ => None,
    }
}

/// A parsed media query list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaList {
    text: String,
    queries: Vec<MediaQuery>,
}

impl MediaList {
    /// An empty list, which matches every context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated media query list.
    ///
    /// Whitespace-only input yields an empty list. Each query that does not
    /// parse, including an empty item between commas, is kept as `not all`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::new();
        }
        Self {
            text: String::from(text),
            queries: text.split(',').map(MediaQuery::parse).collect(),
        }
    }

    /// Whether any query matches `ctx`; an empty list always matches.
    pub fn matches(&self, ctx: &ViewingContext) -> bool {
        self.queries.is_empty() || self.queries.iter().any(|q| q.matches(ctx))
    }

    /// The list as written.
    pub fn media_text(&self) -> &str {
        &self.text
    }

    /// Number of queries.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    /// Returns true if the list has no queries.
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP: ViewingContext = ViewingContext::screen(1280.0, 800.0);
    const PHONE: ViewingContext = ViewingContext::screen(390.0, 844.0);
    const PAGE: ViewingContext = ViewingContext::print(794.0, 1123.0);

    fn m(text: &str, ctx: &ViewingContext) -> bool {
        MediaList::parse(text).matches(ctx)
    }

    #[test]
    fn empty_list_matches_everything() {
        assert!(m("", &DESKTOP));
        assert!(m("   ", &PAGE));
        assert!(MediaList::new().is_empty());
    }

    #[test]
    fn media_types() {
        assert!(m("all", &PAGE));
        assert!(m("screen", &DESKTOP));
        assert!(!m("screen", &PAGE));
        assert!(m("print", &PAGE));
        assert!(m("SCREEN", &DESKTOP), "matching ignores case");
        assert!(!m("tv", &DESKTOP), "unknown types never match");
        assert!(m("not tv", &DESKTOP));
    }

    #[test]
    fn not_and_only_prefixes() {
        assert!(!m("not screen", &DESKTOP));
        assert!(m("not screen", &PAGE));
        assert!(m("only screen", &DESKTOP));
        assert!(!m("not all and (min-width: 100px)", &DESKTOP));
        assert!(m("not screen and (max-width: 500px)", &DESKTOP));
    }

    #[test]
    fn width_and_height_features() {
        assert!(m("(min-width: 1024px)", &DESKTOP));
        assert!(!m("(min-width: 1024px)", &PHONE));
        assert!(m("screen and (max-width: 400px)", &PHONE));
        assert!(m("(width: 1280px)", &DESKTOP));
        assert!(m("(min-height: 50em)", &DESKTOP), "50em is 800px");
        assert!(!m("(max-height: 40em)", &DESKTOP));
        assert!(m("(min-width: 0)", &PHONE));
        assert!(m("(width)", &PHONE));
    }

    #[test]
    fn orientation_feature() {
        assert!(m("(orientation: landscape)", &DESKTOP));
        assert!(m("(orientation: portrait)", &PHONE));
        assert!(!m("(orientation: sideways)", &PHONE));
    }

    #[test]
    fn any_query_in_the_list_may_match() {
        assert!(m("print, (max-width: 500px)", &PHONE));
        assert!(!m("print, (max-width: 500px)", &DESKTOP));
        assert_eq!(MediaList::parse("print, screen").len(), 2);
    }

    #[test]
    fn unparseable_queries_are_not_all() {
        assert!(!m("screen and", &DESKTOP));
        assert!(!m("(min-width: 10)", &DESKTOP), "non-zero lengths need a unit");
        assert!(!m("(min-resolution: 2dppx)", &DESKTOP));
        assert!(!m("not", &DESKTOP));
        assert!(!m("screen (min-width: 1px)", &DESKTOP));
        assert!(m("garbage((, screen", &DESKTOP), "one bad query does not spoil the list");
        assert!(!m("screen,", &PAGE));
    }

    #[test]
    fn media_text_is_kept() {
        assert_eq!(
            MediaList::parse("  screen and (min-width: 1px) ").media_text(),
            "screen and (min-width: 1px)"
        );
    }
}
