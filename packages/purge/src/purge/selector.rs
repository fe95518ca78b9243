//! Selector normalization before matching against static markup.
//!
//! Static markup has no hover, focus or generated content, so pseudo-elements
//! and state pseudo-classes are removed and the remaining structure is
//! matched. A compound left empty by the removal becomes `*`.

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

use super::stylesheet::rest_of_input;

/// Pseudo-classes that depend only on document structure.
const STRUCTURAL_PSEUDO_CLASSES: &[&str] = &[
    "first-child",
    "last-child",
    "only-child",
    "nth-child",
    "nth-last-child",
    "first-of-type",
    "last-of-type",
    "only-of-type",
    "nth-of-type",
    "nth-last-of-type",
    "root",
    "empty",
    "not",
    "is",
    "where",
    "has",
];

/// Pseudo-classes whose argument is itself a selector list.
const SELECTOR_ARGUMENT_PSEUDO_CLASSES: &[&str] = &["not", "is", "where", "has"];

/// Normalize a single complex selector for matching.
///
/// A selector `cssparser` cannot tokenize is returned trimmed but otherwise
/// unchanged.
pub fn normalize_selector(selector: &str) -> String {
    let selector = selector.trim();
    let mut input = ParserInput::new(selector);
    let mut parser = Parser::new(&mut input);
    match normalize(&mut parser) {
        Ok((text, _)) => text,
        Err(_) => selector.to_string(),
    }
}

/// Normalize the selector in `input`; the flag reports whether anything was
/// stripped.
fn normalize<'i>(input: &mut Parser<'i, '_>) -> Result<(String, bool), ParseError<'i, ()>> {
    let mut out = Normalizer::default();

    loop {
        let start = input.position();
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) => {
                if out.compound_open {
                    out.pending_descendant = true;
                }
            }
            Token::Delim(c @ ('>' | '+' | '~')) => out.combinator(c),
            Token::Colon => out.pseudo(input, start)?,
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                input.parse_nested_block(|block| Ok::<_, ParseError<'i, ()>>(rest_of_input(block)))?;
                out.push_simple(input.slice_from(start));
            }
            _ => out.push_simple(input.slice_from(start)),
        }
    }

    out.close_compound();
    Ok((out.text.trim().to_string(), out.changed))
}

/// Normalize every selector in a list, joined with `,`.
fn normalize_list(list: &str) -> Result<(String, bool), ParseError<'_, ()>> {
    let mut input = ParserInput::new(list);
    let mut parser = Parser::new(&mut input);
    let selectors = parser.parse_comma_separated(normalize)?;

    let changed = selectors.iter().any(|(_, changed)| *changed);
    let text = selectors
        .into_iter()
        .map(|(text, _)| text)
        .collect::<Vec<_>>()
        .join(",");
    Ok((text, changed))
}

#[derive(Default)]
struct Normalizer {
    text: String,
    compound_open: bool,
    compound_has_simple: bool,
    compound_stripped: bool,
    pending_descendant: bool,
    changed: bool,
}

impl Normalizer {
    /// Start a compound if whitespace separated it from the previous one.
    fn begin_part(&mut self) {
        if self.pending_descendant {
            self.close_compound();
            self.text.push(' ');
        }
        self.compound_open = true;
    }

    fn push_simple(&mut self, s: &str) {
        self.begin_part();
        self.text.push_str(s);
        self.compound_has_simple = true;
    }

    fn strip(&mut self) {
        self.begin_part();
        self.compound_stripped = true;
        self.changed = true;
    }

    fn combinator(&mut self, c: char) {
        self.close_compound();
        self.text.push(' ');
        self.text.push(c);
        self.text.push(' ');
    }

    fn close_compound(&mut self) {
        if self.compound_stripped && !self.compound_has_simple {
            self.text.push('*');
        }
        self.compound_open = false;
        self.compound_has_simple = false;
        self.compound_stripped = false;
        self.pending_descendant = false;
    }

    /// Handle the pseudo-class or pseudo-element whose `:` started at
    /// `start`.
    fn pseudo<'i>(
        &mut self,
        input: &mut Parser<'i, '_>,
        start: SourcePosition,
    ) -> Result<(), ParseError<'i, ()>> {
        let token = input.next_including_whitespace()?.clone();
        let (name, argument) = match token {
            Token::Colon => {
                // Pseudo-element: skip its name and any arguments.
                if let Token::Function(_) = input.next_including_whitespace()?.clone() {
                    input.parse_nested_block(|block| Ok::<_, ParseError<'i, ()>>(rest_of_input(block)))?;
                }
                self.strip();
                return Ok(());
            }
            Token::Ident(name) => (name.to_ascii_lowercase(), None),
            Token::Function(name) => {
                let argument = input.parse_nested_block(|block| Ok::<_, ParseError<'i, ()>>(rest_of_input(block)))?;
                (name.to_ascii_lowercase(), Some(argument))
            }
            other => return Err(input.new_unexpected_token_error(other)),
        };

        if !STRUCTURAL_PSEUDO_CLASSES.contains(&name.as_str()) {
            self.strip();
            return Ok(());
        }

        match argument {
            Some(argument) if SELECTOR_ARGUMENT_PSEUDO_CLASSES.contains(&name.as_str()) => {
                let (normalized, changed) = normalize_list(argument)?;
                // Dropping part of a negation would exclude more than the
                // original did; drop the whole negation instead.
                if name == "not" && changed {
                    self.strip();
                    return Ok(());
                }
                self.changed |= changed;
                self.push_simple(&format!(":{name}({normalized})"));
            }
            _ => self.push_simple(input.slice_from(start)),
        }
        Ok(())
    }
}
