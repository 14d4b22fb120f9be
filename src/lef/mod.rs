// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! LEF cell model
//!
//! The immutable value tree produced by [`parse`]: a [`ParsedDocument`] owns
//! its [`Cell`]s, each [`Cell`] owns its [`Port`]s, and every shape is a
//! four-corner [`Polygon`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod builder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod reader;

pub use error::{ErrorKind, LefError, LexError, LexErrorKind, SemanticError, StructureError};

/// Parse LEF source text into a [`ParsedDocument`].
///
/// Each call is independent: the scanner, parse tree and output document
/// are all allocated per call. Either every macro in `src` becomes a
/// [`Cell`] or the whole parse fails.
pub fn parse(src: &str) -> Result<ParsedDocument, LefError> {
    let macros = parser::LefParser::new(src).parse_document()?;
    builder::build(macros).map_err(LefError::Semantic)
}

/// A coordinate in LEF units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle stored as its four corners.
///
/// Corner order is fixed, clockwise from the lower-left:
/// `(x1,y1), (x1,y2), (x2,y2), (x2,y1)`, with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: [Point; 4],
}

impl Polygon {
    /// Expand two opposite corners into a [`Polygon`].
    /// Returns `None` when `upper_right` lies left of or below `lower_left`.
    pub fn from_corners(lower_left: Point, upper_right: Point) -> Option<Self> {
        if lower_left.x > upper_right.x || lower_left.y > upper_right.y {
            return None;
        }
        let (x1, y1) = (lower_left.x, lower_left.y);
        let (x2, y2) = (upper_right.x, upper_right.y);
        Some(Self {
            points: [
                Point::new(x1, y1),
                Point::new(x1, y2),
                Point::new(x2, y2),
                Point::new(x2, y1),
            ],
        })
    }

    /// Bounding box of a `width` by `height` cell anchored at the origin
    pub fn from_size(width: f64, height: f64) -> Option<Self> {
        Self::from_corners(Point::new(0.0, 0.0), Point::new(width, height))
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    pub fn lower_left(&self) -> Point {
        self.points[0]
    }

    pub fn upper_right(&self) -> Point {
        self.points[2]
    }

    pub fn width(&self) -> f64 {
        self.upper_right().x - self.lower_left().x
    }

    pub fn height(&self) -> f64 {
        self.upper_right().y - self.lower_left().y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn centroid(&self) -> Point {
        let ll = self.lower_left();
        let ur = self.upper_right();
        Point::new((ll.x + ur.x) / 2.0, (ll.y + ur.y) / 2.0)
    }

    /// Corners as plain `(x, y)` tuples, in polygon order
    pub fn to_tuples(&self) -> [(f64, f64); 4] {
        self.points.map(|p| (p.x, p.y))
    }
}

/// Signal direction of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Input,
    Output,
    Inout,
}

impl Direction {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "INPUT" => Some(Self::Input),
            "OUTPUT" => Some(Self::Output),
            "INOUT" => Some(Self::Inout),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::Inout => "INOUT",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Electrical use class of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PinUse {
    Signal,
    Power,
    Ground,
}

impl PinUse {
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "SIGNAL" => Some(Self::Signal),
            "POWER" => Some(Self::Power),
            "GROUND" => Some(Self::Ground),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signal => "SIGNAL",
            Self::Power => "POWER",
            Self::Ground => "GROUND",
        }
    }
}

impl fmt::Display for PinUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pin of a [`Cell`] together with its single port shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    name: String,
    direction: Direction,
    use_type: PinUse,
    layer: String,
    polygon: Polygon,
}

impl Port {
    pub fn new(
        name: impl Into<String>,
        direction: Direction,
        use_type: PinUse,
        layer: impl Into<String>,
        polygon: Polygon,
    ) -> Self {
        Self {
            name: name.into(),
            direction,
            use_type,
            layer: layer.into(),
            polygon,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn use_type(&self) -> PinUse {
        self.use_type
    }

    pub fn layer(&self) -> &str {
        &self.layer
    }

    pub fn polygon(&self) -> &Polygon {
        &self.polygon
    }

    /// Representative coordinate of the port, its polygon centroid
    pub fn location(&self) -> Point {
        self.polygon.centroid()
    }
}

/// A parsed MACRO
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    name: String,
    bounding_box: Polygon,
    ports: Vec<Port>,
}

impl Cell {
    pub fn new(name: impl Into<String>, bounding_box: Polygon, ports: Vec<Port>) -> Self {
        Self {
            name: name.into(),
            bounding_box,
            ports,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounding_box(&self) -> &Polygon {
        &self.bounding_box
    }

    /// Ports in declaration order
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    pub fn width(&self) -> f64 {
        self.bounding_box.width()
    }

    pub fn height(&self) -> f64 {
        self.bounding_box.height()
    }
}

/// One router input row: a port's representative point and its identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortLocation {
    #[serde(rename = "macro")]
    pub macro_name: String,
    #[serde(rename = "pin")]
    pub pin_name: String,
    pub x: f64,
    pub y: f64,
}

/// The result of one successful [`parse`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    cells: Vec<Cell>,
}

impl ParsedDocument {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Cells in declaration order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, name: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// Every port's centroid, tagged with its macro and pin names.
    /// Ordered by cell, then by pin declaration.
    pub fn port_locations(&self) -> Vec<PortLocation> {
        self.cells
            .iter()
            .flat_map(|cell| {
                cell.ports.iter().map(move |port| {
                    let p = port.location();
                    PortLocation {
                        macro_name: cell.name.clone(),
                        pin_name: port.name.clone(),
                        x: p.x,
                        y: p.y,
                    }
                })
            })
            .collect()
    }
}

impl IntoIterator for ParsedDocument {
    type Item = Cell;
    type IntoIter = std::vec::IntoIter<Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParsedDocument {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
