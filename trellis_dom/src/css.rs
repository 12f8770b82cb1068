// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! CSS text: stylesheets and declaration blocks, tokenized by `cssparser`.
//!
//! ## Stylesheets
//!
//! [`parse_stylesheet`] keeps style rules and `@media` blocks, nested at any
//! depth. A rule whose selector list contains an unsupported selector is
//! dropped as a whole, as are at-rules other than `@media`. A selector list
//! yields one [`StyleRule`] per selector.
//!
//! ## Declarations
//!
//! [`parse_declarations`] reads a declaration block such as a `style`
//! attribute. Invalid declarations are skipped up to the next `;`, a trailing
//! `!important` is dropped, and names are normalized by
//! [`StyleDeclaration::set_property`].
//!
//! Comments are ignored everywhere and unclosed blocks end at the end of the
//! input.

use alloc::string::String;
use alloc::vec::Vec;

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, DeclarationParser, ParseError, Parser,
    ParserInput, ParserState, QualifiedRuleParser, RuleBodyItemParser, RuleBodyParser,
    StyleSheetParser, Token,
};
use tracing::trace;
use trellis_style::declaration::StyleDeclaration;
use trellis_style::media::MediaList;
use trellis_style::sheet::{CssStyleSheet, MediaRule, StyleRule};

use crate::document::Document;
use crate::selector::SimpleSelector;

/// Parse stylesheet text into a sheet for a [`Document`].
pub fn parse_stylesheet(text: &str) -> CssStyleSheet<Document> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let mut rules = RuleParser;
    let mut sheet = CssStyleSheet::new();
    for item in StyleSheetParser::new(&mut parser, &mut rules) {
        match item {
            Ok(Parsed::Style(style_rules)) => {
                for rule in style_rules {
                    sheet.push_rule(rule);
                }
            }
            Ok(Parsed::Media(rule)) => sheet.push_rule(rule),
            Err((_, source)) => trace!(rule = source, "skipping rule"),
        }
    }
    sheet
}

/// Parse a declaration block, e.g. the value of a `style` attribute.
pub fn parse_declarations(text: &str) -> StyleDeclaration {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    declaration_block(&mut parser)
}

fn declaration_block(input: &mut Parser<'_, '_>) -> StyleDeclaration {
    let mut declarations = DeclarationsParser;
    let mut out = StyleDeclaration::new();
    for item in RuleBodyParser::new(input, &mut declarations) {
        match item {
            Ok((name, value)) => out.set_property(&name, &value),
            Err((_, source)) => trace!(declaration = source, "skipping declaration"),
        }
    }
    out
}

enum Parsed {
    Style(Vec<StyleRule<SimpleSelector>>),
    Media(MediaRule<Document>),
}

/// Rules at the top level and inside `@media`.
struct RuleParser;

impl<'i> QualifiedRuleParser<'i> for RuleParser {
    type Prelude = Vec<SimpleSelector>;
    type QualifiedRule = Parsed;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        let prelude = source_text(input);
        match prelude
            .split(',')
            .map(SimpleSelector::parse)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(selectors) => Ok(selectors),
            Err(_) => {
                trace!(selector = %prelude, "dropping rule with unsupported selector");
                Err(input.new_custom_error(()))
            }
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, Self::Error>> {
        let declarations = declaration_block(input);
        Ok(Parsed::Style(
            prelude
                .into_iter()
                .map(|selector| StyleRule::new(selector, declarations.clone()))
                .collect(),
        ))
    }
}

impl<'i> AtRuleParser<'i> for RuleParser {
    type Prelude = MediaList;
    type AtRule = Parsed;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, Self::Error>> {
        if name.eq_ignore_ascii_case("media") {
            Ok(MediaList::parse(&source_text(input)))
        } else {
            trace!(at_rule = &*name, "ignoring unsupported at-rule");
            Err(input.new_error(BasicParseErrorKind::AtRuleInvalid(name)))
        }
    }

    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, Self::Error>> {
        let mut media = MediaRule::new(prelude);
        for item in RuleBodyParser::new(input, self) {
            match item {
                Ok(Parsed::Style(style_rules)) => {
                    for rule in style_rules {
                        media.push_rule(rule);
                    }
                }
                Ok(Parsed::Media(nested)) => media.push_rule(nested),
                Err((_, source)) => trace!(rule = source, "skipping nested rule"),
            }
        }
        Ok(Parsed::Media(media))
    }
}

// Inside `@media` only rules are accepted.
impl<'i> DeclarationParser<'i> for RuleParser {
    type Declaration = Parsed;
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, Parsed, ()> for RuleParser {
    fn parse_declarations(&self) -> bool {
        false
    }

    fn parse_qualified(&self) -> bool {
        true
    }
}

/// `name: value` pairs of a declaration block.
struct DeclarationsParser;

impl<'i> DeclarationParser<'i> for DeclarationsParser {
    type Declaration = (String, String);
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
        _start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'i, Self::Error>> {
        let text = source_text(input);
        let value = strip_important(&text);
        if value.is_empty() {
            return Err(input.new_custom_error(()));
        }
        Ok((String::from(&*name), String::from(value)))
    }
}

impl<'i> AtRuleParser<'i> for DeclarationsParser {
    type Prelude = ();
    type AtRule = (String, String);
    type Error = ();
}

impl<'i> QualifiedRuleParser<'i> for DeclarationsParser {
    type Prelude = ();
    type QualifiedRule = (String, String);
    type Error = ();
}

impl<'i> RuleBodyItemParser<'i, (String, String), ()> for DeclarationsParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Source text of the remaining tokens, without comments and with whitespace
/// runs collapsed to one space.
fn source_text(input: &mut Parser<'_, '_>) -> String {
    let mut out = String::new();
    push_tokens(input, &mut out);
    String::from(out.trim())
}

fn push_tokens<'i>(input: &mut Parser<'i, '_>, out: &mut String) {
    loop {
        let start = input.position();
        let close = match input.next_including_whitespace_and_comments() {
            Err(_) => return,
            Ok(Token::Comment(_)) => continue,
            Ok(Token::WhiteSpace(_)) => {
                if !out.ends_with(' ') {
                    out.push(' ');
                }
                continue;
            }
            Ok(Token::Function(_) | Token::ParenthesisBlock) => Some(')'),
            Ok(Token::SquareBracketBlock) => Some(']'),
            Ok(Token::CurlyBracketBlock) => Some('}'),
            Ok(_) => None,
        };
        out.push_str(input.slice_from(start));
        if let Some(close) = close {
            let nested: Result<(), ParseError<'i, ()>> = input.parse_nested_block(|block| {
                push_tokens(block, out);
                Ok(())
            });
            if nested.is_ok() {
                out.push(close);
            }
        }
    }
}

fn strip_important(value: &str) -> &str {
    match value.rfind('!') {
        Some(bang) if value[bang + 1..].trim().eq_ignore_ascii_case("important") => {
            value[..bang].trim_end()
        }
        _ => value,
    }
}
