// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! LEF Scanner
//!
//! Breaks source text into [`Token`]s. Whitespace and `#` comments are
//! skipped between tokens; every token records the byte offset it starts at.

use std::fmt;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{alpha1, alphanumeric1, char, digit0, digit1, multispace1, one_of},
    combinator::{opt, recognize},
    multi::{many0, many0_count},
    sequence::pair,
    IResult, Parser,
};

use super::error::{LexError, LexErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Macro,
    End,
    Size,
    By,
    Pin,
    Direction,
    Use,
    Layer,
    Port,
    Rect,
}

impl Keyword {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "MACRO" => Some(Self::Macro),
            "END" => Some(Self::End),
            "SIZE" => Some(Self::Size),
            "BY" => Some(Self::By),
            "PIN" => Some(Self::Pin),
            "DIRECTION" => Some(Self::Direction),
            "USE" => Some(Self::Use),
            "LAYER" => Some(Self::Layer),
            "PORT" => Some(Self::Port),
            "RECT" => Some(Self::Rect),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Macro => "MACRO",
            Self::End => "END",
            Self::Size => "SIZE",
            Self::By => "BY",
            Self::Pin => "PIN",
            Self::Direction => "DIRECTION",
            Self::Use => "USE",
            Self::Layer => "LAYER",
            Self::Port => "PORT",
            Self::Rect => "RECT",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    Number,
    Semicolon,
    EndOfInput,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(k) => write!(f, "`{k}`"),
            Self::Identifier => f.write_str("identifier"),
            Self::Number => f.write_str("number"),
            Self::Semicolon => f.write_str("`;`"),
            Self::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// A classified lexeme borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub offset: usize,
}

impl<'src> Token<'src> {
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }
}

/// Skip any run of whitespace and comments
fn trivia(input: &str) -> IResult<&str, usize> {
    many0_count(alt((
        multispace1,
        recognize(pair(char('#'), take_while(|c: char| c != '\n'))),
    )))
    .parse(input)
}

/// Integer or decimal literal with an optional sign: `12`, `-0.5`, `+3.`, `.25`
fn number(input: &str) -> IResult<&str, &str> {
    recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
    ))
    .parse(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

/// Lazy token stream over a source string.
///
/// Yields `Ok` tokens up to and including a single [`TokenKind::EndOfInput`],
/// or stops after the first `Err`. [`Scanner::reset`] rewinds to the start.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    src: &'src str,
    pos: usize,
    done: bool,
}

impl<'src> Scanner<'src> {
    pub fn new(src: &'src str) -> Self {
        Self {
            src,
            pos: 0,
            done: false,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.done = false;
    }

    /// Byte offset of the next unread character
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Produce the next [`Token`]. Returns `EndOfInput` repeatedly once exhausted.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        let rest = &self.src[self.pos..];
        let (rest, _) = trivia(rest).unwrap_or((rest, 0));
        self.pos = self.src.len() - rest.len();
        let offset = self.pos;

        let Some(c) = rest.chars().next() else {
            return Ok(Token {
                kind: TokenKind::EndOfInput,
                text: "",
                offset,
            });
        };

        let (kind, text) = if c == ';' {
            (TokenKind::Semicolon, &rest[..1])
        } else if let Ok((after, text)) = number(rest) {
            if after.starts_with(is_word_char) {
                let end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
                let bad = &rest[..text.len() + end];
                return Err(LexError {
                    kind: LexErrorKind::MalformedNumber(bad.to_string()),
                    offset,
                });
            }
            (TokenKind::Number, text)
        } else if let Ok((_, text)) = word(rest) {
            let kind = match Keyword::parse(text) {
                Some(k) => TokenKind::Keyword(k),
                None => TokenKind::Identifier,
            };
            (kind, text)
        } else {
            return Err(LexError {
                kind: LexErrorKind::UnexpectedChar(c),
                offset,
            });
        };

        self.pos += text.len();
        Ok(Token { kind, text, offset })
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        match &item {
            Ok(tok) if tok.kind == TokenKind::EndOfInput => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(item)
    }
}

/// Scan all of `src`, ending with an `EndOfInput` token
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    Scanner::new(src).collect()
}
