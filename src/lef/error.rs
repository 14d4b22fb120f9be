// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! LEF error taxonomy
//!
//! Lexical and structural failures stop the parse at the first problem.
//! Semantic failures are collected for the whole document and reported together.

use std::fmt;

use thiserror::Error;

use super::parser::MacroNode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnexpectedChar(char),
    MalformedNumber(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset of the offending lexeme
    pub offset: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnexpectedChar(c) => {
                write!(f, "unexpected character {c:?} at byte {}", self.offset)
            }
            LexErrorKind::MalformedNumber(text) => {
                write!(f, "malformed number literal `{text}` at byte {}", self.offset)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("expected {expected}, found `{found}` at byte {offset}")]
    Expected {
        expected: String,
        found: String,
        offset: usize,
    },
    #[error("unexpected end of input at byte {offset}, expected {expected}")]
    UnexpectedEof { expected: String, offset: usize },
    #[error(
        "{construct} `{opened}` opened at byte {opened_at} is closed by `END {closed}` at byte {closed_at}"
    )]
    MismatchedEnd {
        construct: &'static str,
        opened: String,
        opened_at: usize,
        closed: String,
        closed_at: usize,
    },
}

impl StructureError {
    /// Byte offset where parsing diverged
    pub fn offset(&self) -> usize {
        match self {
            Self::Expected { offset, .. } | Self::UnexpectedEof { offset, .. } => *offset,
            Self::MismatchedEnd { closed_at, .. } => *closed_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("unknown pin direction `{value}` at byte {offset}")]
    UnknownDirection { value: String, offset: usize },
    #[error("unknown pin use `{value}` at byte {offset}")]
    UnknownUse { value: String, offset: usize },
    #[error("duplicate macro `{name}` at byte {offset}, first defined at byte {first_offset}")]
    DuplicateCell {
        name: String,
        offset: usize,
        first_offset: usize,
    },
    #[error(
        "duplicate pin `{name}` in macro `{cell}` at byte {offset}, first defined at byte {first_offset}"
    )]
    DuplicatePin {
        cell: String,
        name: String,
        offset: usize,
        first_offset: usize,
    },
    #[error("inverted RECT ({x1}, {y1}) ({x2}, {y2}) at byte {offset}")]
    InvertedRect {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        offset: usize,
    },
    #[error("negative SIZE {width} BY {height} at byte {offset}")]
    NegativeSize {
        width: f64,
        height: f64,
        offset: usize,
    },
}

impl SemanticError {
    pub fn offset(&self) -> usize {
        match self {
            Self::UnknownDirection { offset, .. }
            | Self::UnknownUse { offset, .. }
            | Self::DuplicateCell { offset, .. }
            | Self::DuplicatePin { offset, .. }
            | Self::InvertedRect { offset, .. }
            | Self::NegativeSize { offset, .. } => *offset,
        }
    }
}

/// Taxonomy kind of a [`LefError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Structure,
    Semantic,
    Io,
}

#[derive(Debug, Error)]
pub enum LefError {
    /// Scanner failure. `parsed` holds the macros completed before it.
    #[error("lex error: {source}")]
    Lex {
        source: LexError,
        parsed: Vec<MacroNode>,
    },
    /// Grammar failure. `parsed` holds the macros completed before it.
    #[error("structure error: {source}")]
    Structure {
        source: StructureError,
        parsed: Vec<MacroNode>,
    },
    #[error("{} semantic error(s), first: {}", .0.len(), first_semantic(.0))]
    Semantic(Vec<SemanticError>),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

fn first_semantic(errors: &[SemanticError]) -> String {
    errors
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

impl LefError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex { .. } => ErrorKind::Lex,
            Self::Structure { .. } => ErrorKind::Structure,
            Self::Semantic(_) => ErrorKind::Semantic,
            Self::Io(_) => ErrorKind::Io,
        }
    }

    /// Well-formed macros parsed before a lex or structure failure
    pub fn parsed_macros(&self) -> &[MacroNode] {
        match self {
            Self::Lex { parsed, .. } | Self::Structure { parsed, .. } => parsed,
            Self::Semantic(_) | Self::Io(_) => &[],
        }
    }

    pub fn semantic_errors(&self) -> &[SemanticError] {
        match self {
            Self::Semantic(errors) => errors,
            _ => &[],
        }
    }

    /// Human-readable diagnostics, one per line, with line/column positions in `src`
    pub fn diagnostics(&self, src: &str) -> Vec<String> {
        let at = |offset: usize| {
            let (line, col) = line_col(src, offset);
            format!("{line}:{col}")
        };
        match self {
            Self::Lex { source, .. } => vec![format!("{}: {}", at(source.offset), source)],
            Self::Structure { source, .. } => {
                vec![format!("{}: {}", at(source.offset()), source)]
            }
            Self::Semantic(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", at(e.offset()), e))
                .collect(),
            Self::Io(e) => vec![e.to_string()],
        }
    }
}

/// Convert byte `offset` in `src` to a 1-based `(line, column)` pair.
/// Offsets past the end clamp to the end of input.
pub fn line_col(src: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(src.len());
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    let before = &src[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
