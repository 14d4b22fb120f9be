//! LEF Cell Library
//!
//! This library parses the MACRO/PIN/PORT/RECT subset of LEF (Library Exchange
//! Format) into an immutable cell model, and exports port coordinates for
//! downstream pin-ordering tools.

pub mod export;
pub mod lef;

// Re-export commonly used types
pub use lef::{
    parse, Cell, Direction, ErrorKind, LefError, ParsedDocument, PinUse, Point, Polygon, Port,
    PortLocation,
};
