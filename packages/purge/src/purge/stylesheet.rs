//! Rule-level stylesheet parsing on `cssparser`.
//!
//! Splits a stylesheet into style rules and at-rules without interpreting
//! declarations. Invalid rules are skipped one at a time, the way browsers
//! recover, so one bad rule does not cost the rest of the sheet.

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, ParseError, Parser, ParserInput, ParserState,
    QualifiedRuleParser, StyleSheetParser, Token,
};
use tracing::debug;

use crate::error::{ReduceError, ReduceResult};

/// One top-level item of a stylesheet (or of an at-rule block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CssItem<'i> {
    /// `selectors { declarations }`
    Style { selectors: Vec<&'i str>, body: &'i str },

    /// `@name prelude { body }`
    AtBlock {
        name: String,
        prelude: &'i str,
        body: &'i str,
    },

    /// `@name prelude;`
    AtStatement { name: String, prelude: &'i str },
}

/// Parse a stylesheet (or an at-rule body) into items.
///
/// Invalid rules are dropped. Only a non-empty input that yields no valid
/// rule at all is `ReduceError::Malformed`.
pub fn parse_items(css: &str) -> ReduceResult<Vec<CssItem<'_>>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut items = Vec::new();
    let mut first_error = None;

    for result in StyleSheetParser::new(&mut parser, &mut ItemParser) {
        match result {
            Ok(item) => items.push(item),
            Err((error, rule)) => {
                debug!(
                    line = error.location.line + 1,
                    column = error.location.column,
                    rule = %rule.trim(),
                    "Skipping invalid CSS rule"
                );
                first_error.get_or_insert_with(|| malformed(&error));
            }
        }
    }

    match first_error {
        Some(error) if items.is_empty() => Err(error),
        _ => Ok(items),
    }
}

fn malformed(error: &ParseError<'_, ()>) -> ReduceError {
    ReduceError::Malformed {
        line: error.location.line + 1,
        column: error.location.column,
        reason: format!("{:?}", error.kind),
    }
}

/// Builds `CssItem`s from the rules `StyleSheetParser` finds.
struct ItemParser;

impl<'i> QualifiedRuleParser<'i> for ItemParser {
    type Prelude = Vec<&'i str>;
    type QualifiedRule = CssItem<'i>;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, ()>> {
        input.parse_comma_separated(selector_text)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'i, ()>> {
        Ok(CssItem::Style {
            selectors,
            body: rest_of_input(input),
        })
    }
}

impl<'i> AtRuleParser<'i> for ItemParser {
    type Prelude = (String, &'i str);
    type AtRule = CssItem<'i>;
    type Error = ();

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::Prelude, ParseError<'i, ()>> {
        Ok((name.to_string(), checked_rest_of_input(input)?.trim()))
    }

    fn rule_without_block(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        Ok(CssItem::AtStatement { name, prelude })
    }

    fn parse_block<'t>(
        &mut self,
        (name, prelude): Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Self::AtRule, ParseError<'i, ()>> {
        Ok(CssItem::AtBlock {
            name,
            prelude,
            body: rest_of_input(input),
        })
    }
}

/// One member of a selector list, as written.
fn selector_text<'i>(input: &mut Parser<'i, '_>) -> Result<&'i str, ParseError<'i, ()>> {
    let text = checked_rest_of_input(input)?.trim();
    if text.is_empty() {
        return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
    }
    Ok(text)
}

/// Source text of everything left in `input`, blocks included.
pub(crate) fn rest_of_input<'i>(input: &mut Parser<'i, '_>) -> &'i str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start)
}

/// Like `rest_of_input`, but rejects stray closing brackets, bad strings
/// and bad URLs, which are never valid in a prelude.
fn checked_rest_of_input<'i>(input: &mut Parser<'i, '_>) -> Result<&'i str, ParseError<'i, ()>> {
    let start = input.position();
    loop {
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::CloseCurlyBracket
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::BadString(_)
            | Token::BadUrl(_)
            | Token::Semicolon => return Err(input.new_unexpected_token_error(token)),
            _ => {}
        }
    }
    Ok(input.slice_from(start))
}
