// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! LEF Structural Parser
//!
//! Recursive descent over the [`Scanner`] token stream with one token of
//! lookahead. Accepted grammar:
//!
//! ```text
//! document  := macro*
//! macro     := 'MACRO' ident 'SIZE' number 'BY' number ';' pin* 'END' ('MACRO' | ident)
//! pin       := 'PIN' ident 'DIRECTION' value ';' 'USE' value ';' port 'END' ident
//! value     := ident | keyword | number
//! port      := 'PORT' 'LAYER' ident ';' 'RECT' number number number number ';' 'END' 'PORT'
//! ```
//!
//! The parser only checks structure. Direction and use values, duplicate
//! names and rectangle orientation are left to the builder.

use log::debug;

use super::error::{LefError, LexError, LexErrorKind, StructureError};
use super::lexer::{Keyword, Scanner, Token, TokenKind};

/// A parse-tree value and the byte offset of the token it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub offset: usize,
}

impl<T> Spanned<T> {
    pub fn new(value: T, offset: usize) -> Self {
        Self { value, offset }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MacroNode {
    pub name: Spanned<String>,
    /// `(width, height)`, located at the `SIZE` keyword
    pub size: Spanned<(f64, f64)>,
    pub pins: Vec<PinNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinNode {
    pub name: Spanned<String>,
    pub direction: Spanned<String>,
    pub use_type: Spanned<String>,
    pub port: PortNode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortNode {
    pub layer: Spanned<String>,
    /// `[x1, y1, x2, y2]`, located at the `RECT` keyword
    pub rect: Spanned<[f64; 4]>,
}

/// First failure hit while parsing, before macro context is attached
#[derive(Debug)]
enum Failure {
    Lex(LexError),
    Structure(StructureError),
}

impl From<LexError> for Failure {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<StructureError> for Failure {
    fn from(e: StructureError) -> Self {
        Self::Structure(e)
    }
}

type ParseResult<T> = Result<T, Failure>;

/// LEF Parser
/// Transforms source text into a list of [`MacroNode`]s
pub struct LefParser<'src> {
    lex: Scanner<'src>,
    /// Peeked next token
    next_tok: Option<Token<'src>>,
    /// Macros completed so far
    macros: Vec<MacroNode>,
}

impl<'src> LefParser<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            lex: Scanner::new(src),
            next_tok: None,
            macros: Vec::new(),
        }
    }

    /// Parse every MACRO in the source.
    /// On failure, the returned error carries the macros completed before it.
    pub fn parse_document(mut self) -> Result<Vec<MacroNode>, LefError> {
        match self.parse_macros() {
            Ok(()) => Ok(self.macros),
            Err(Failure::Lex(source)) => Err(LefError::Lex {
                source,
                parsed: self.macros,
            }),
            Err(Failure::Structure(source)) => Err(LefError::Structure {
                source,
                parsed: self.macros,
            }),
        }
    }

    fn parse_macros(&mut self) -> ParseResult<()> {
        loop {
            let tok = self.peek()?;
            match tok.kind {
                TokenKind::EndOfInput => return Ok(()),
                TokenKind::Keyword(Keyword::Macro) => {
                    let node = self.parse_macro()?;
                    self.macros.push(node);
                }
                _ => return Err(self.unexpected(tok, "`MACRO` or end of input")),
            }
        }
    }

    fn parse_macro(&mut self) -> ParseResult<MacroNode> {
        self.expect_keyword(Keyword::Macro)?;
        let name = self.expect_ident("macro name")?;

        let size_tok = self.expect_keyword(Keyword::Size)?;
        let width = self.expect_number("macro width")?;
        self.expect_keyword(Keyword::By)?;
        let height = self.expect_number("macro height")?;
        self.expect_semicolon()?;
        let size = Spanned::new((width.value, height.value), size_tok.offset);

        let mut pins = Vec::new();
        loop {
            let tok = self.peek()?;
            match tok.kind {
                TokenKind::Keyword(Keyword::Pin) => pins.push(self.parse_pin()?),
                TokenKind::Keyword(Keyword::End) => break,
                _ => return Err(self.unexpected(tok, "`PIN` or `END`")),
            }
        }

        self.expect_keyword(Keyword::End)?;
        // Close with `END MACRO`, or `END <name>` as full LEF writes it
        let close = self.next()?;
        match close.kind {
            TokenKind::Keyword(Keyword::Macro) => {}
            TokenKind::Identifier if close.text == name.value => {}
            TokenKind::Identifier => {
                return Err(StructureError::MismatchedEnd {
                    construct: "MACRO",
                    opened: name.value,
                    opened_at: name.offset,
                    closed: close.text.to_string(),
                    closed_at: close.offset,
                }
                .into())
            }
            _ => return Err(self.unexpected(close, "`MACRO` after `END`")),
        }

        debug!("parsed MACRO {} with {} pins", name.value, pins.len());
        Ok(MacroNode { name, size, pins })
    }

    fn parse_pin(&mut self) -> ParseResult<PinNode> {
        self.expect_keyword(Keyword::Pin)?;
        let name = self.expect_ident("pin name")?;

        self.expect_keyword(Keyword::Direction)?;
        let direction = self.expect_value("pin direction")?;
        self.expect_semicolon()?;

        self.expect_keyword(Keyword::Use)?;
        let use_type = self.expect_value("pin use")?;
        self.expect_semicolon()?;

        let port = self.parse_port()?;

        self.expect_keyword(Keyword::End)?;
        let closed = self.expect_ident("pin name after `END`")?;
        if closed.value != name.value {
            return Err(StructureError::MismatchedEnd {
                construct: "PIN",
                opened: name.value,
                opened_at: name.offset,
                closed: closed.value,
                closed_at: closed.offset,
            }
            .into());
        }

        debug!("  parsed PIN {} on {}", name.value, port.layer.value);
        Ok(PinNode {
            name,
            direction,
            use_type,
            port,
        })
    }

    fn parse_port(&mut self) -> ParseResult<PortNode> {
        self.expect_keyword(Keyword::Port)?;

        self.expect_keyword(Keyword::Layer)?;
        let layer = self.expect_ident("layer name")?;
        self.expect_semicolon()?;

        let rect_tok = self.expect_keyword(Keyword::Rect)?;
        let mut coords = [0.0; 4];
        for c in coords.iter_mut() {
            *c = self.expect_number("RECT coordinate")?.value;
        }
        self.expect_semicolon()?;

        self.expect_keyword(Keyword::End)?;
        self.expect_keyword(Keyword::Port)?;

        Ok(PortNode {
            layer,
            rect: Spanned::new(coords, rect_tok.offset),
        })
    }

    /// Look at the next [Token] without consuming it
    fn peek(&mut self) -> ParseResult<Token<'src>> {
        if let Some(tok) = self.next_tok {
            return Ok(tok);
        }
        let tok = self.lex.next_token()?;
        self.next_tok = Some(tok);
        Ok(tok)
    }

    /// Consume and return the next [Token]
    fn next(&mut self) -> ParseResult<Token<'src>> {
        match self.next_tok.take() {
            Some(tok) => Ok(tok),
            None => Ok(self.lex.next_token()?),
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> ParseResult<Token<'src>> {
        let tok = self.next()?;
        if tok.is_keyword(keyword) {
            Ok(tok)
        } else {
            Err(self.unexpected(tok, &format!("`{keyword}`")))
        }
    }

    fn expect_semicolon(&mut self) -> ParseResult<Token<'src>> {
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Semicolon => Ok(tok),
            _ => Err(self.unexpected(tok, "`;`")),
        }
    }

    fn expect_ident(&mut self, what: &str) -> ParseResult<Spanned<String>> {
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Identifier => Ok(Spanned::new(tok.text.to_string(), tok.offset)),
            _ => Err(self.unexpected(tok, what)),
        }
    }

    /// Any word or number in a value slot. The builder decides whether it is valid.
    fn expect_value(&mut self, what: &str) -> ParseResult<Spanned<String>> {
        let tok = self.next()?;
        match tok.kind {
            TokenKind::Identifier | TokenKind::Keyword(_) | TokenKind::Number => {
                Ok(Spanned::new(tok.text.to_string(), tok.offset))
            }
            _ => Err(self.unexpected(tok, what)),
        }
    }

    fn expect_number(&mut self, what: &str) -> ParseResult<Spanned<f64>> {
        let tok = self.next()?;
        if tok.kind != TokenKind::Number {
            return Err(self.unexpected(tok, what));
        }
        match tok.text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Spanned::new(v, tok.offset)),
            _ => Err(LexError {
                kind: LexErrorKind::MalformedNumber(tok.text.to_string()),
                offset: tok.offset,
            }
            .into()),
        }
    }

    /// Error-Generation Helper
    fn unexpected(&self, tok: Token<'_>, expected: &str) -> Failure {
        let expected = expected.to_string();
        let err = match tok.kind {
            TokenKind::EndOfInput => StructureError::UnexpectedEof {
                expected,
                offset: tok.offset,
            },
            _ => StructureError::Expected {
                expected,
                found: tok.text.to_string(),
                offset: tok.offset,
            },
        };
        Failure::Structure(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_macro_tree() {
        let src = "MACRO a SIZE 2 BY 3 ; PIN p DIRECTION INOUT ; USE POWER ; \
                   PORT LAYER M2 ; RECT 0 0 1 1 ; END PORT END p END MACRO";
        let macros = LefParser::new(src).parse_document().unwrap();
        assert_eq!(macros.len(), 1);
        let m = &macros[0];
        assert_eq!(m.name, Spanned::new("a".to_string(), 6));
        assert_eq!(m.size.value, (2.0, 3.0));
        assert_eq!(m.size.offset, 8);
        assert_eq!(m.pins[0].direction.value, "INOUT");
        assert_eq!(m.pins[0].use_type.value, "POWER");
        assert_eq!(m.pins[0].port.layer.value, "M2");
        assert_eq!(m.pins[0].port.rect.value, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_unknown_enum_values_pass_structure() {
        let src = "MACRO a SIZE 2 BY 3 ; PIN p DIRECTION SIDEWAYS ; USE MAGIC ; \
                   PORT LAYER M2 ; RECT 0 0 1 1 ; END PORT END p END MACRO";
        let macros = LefParser::new(src).parse_document().unwrap();
        assert_eq!(macros[0].pins[0].direction.value, "SIDEWAYS");
    }

    #[test]
    fn test_keyword_and_number_values_reach_builder() {
        let src = "MACRO a SIZE 2 BY 3 ; PIN p DIRECTION PORT ; USE 5 ; \
                   PORT LAYER M2 ; RECT 0 0 1 1 ; END PORT END p END MACRO";
        let macros = LefParser::new(src).parse_document().unwrap();
        assert_eq!(macros[0].pins[0].direction.value, "PORT");
        assert_eq!(macros[0].pins[0].use_type.value, "5");
    }

    #[test]
    fn test_overflowing_number_is_malformed() {
        let huge = "9".repeat(400);
        let src = format!("MACRO a SIZE {huge} BY 1 ; END MACRO");
        match LefParser::new(&src).parse_document() {
            Err(LefError::Lex { source, .. }) => {
                assert_eq!(source.kind, LexErrorKind::MalformedNumber(huge));
                assert_eq!(source.offset, 13);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_missing_semicolon() {
        let src = "MACRO a SIZE 2 BY 3 PIN";
        match LefParser::new(src).parse_document() {
            Err(LefError::Structure {
                source: StructureError::Expected { expected, found, offset },
                parsed,
            }) => {
                assert_eq!(expected, "`;`");
                assert_eq!(found, "PIN");
                assert_eq!(offset, 20);
                assert!(parsed.is_empty());
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_end_of_input_mid_macro() {
        let src = "MACRO a SIZE 2 BY 3 ;";
        match LefParser::new(src).parse_document() {
            Err(LefError::Structure {
                source: StructureError::UnexpectedEof { offset, .. },
                ..
            }) => assert_eq!(offset, src.len()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_document() {
        assert!(LefParser::new("").parse_document().unwrap().is_empty());
        assert!(LefParser::new("  # nothing\n").parse_document().unwrap().is_empty());
    }
}
