// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Conversion from parse tree to the cell model.
//!
//! Every violation in the document is collected before failing.

use std::collections::HashMap;

use log::{info, warn};

use super::error::SemanticError;
use super::parser::{MacroNode, PinNode};
use super::{Cell, Direction, ParsedDocument, PinUse, Point, Polygon, Port};

/// Build a [`ParsedDocument`] from parsed macros, or return every semantic violation found
pub fn build(macros: Vec<MacroNode>) -> Result<ParsedDocument, Vec<SemanticError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut cells = Vec::with_capacity(macros.len());

    for node in macros {
        if let Some(&first_offset) = seen.get(&node.name.value) {
            errors.push(SemanticError::DuplicateCell {
                name: node.name.value.clone(),
                offset: node.name.offset,
                first_offset,
            });
        } else {
            seen.insert(node.name.value.clone(), node.name.offset);
        }
        if let Some(cell) = build_cell(node, &mut errors) {
            cells.push(cell);
        }
    }

    if !errors.is_empty() {
        for e in &errors {
            warn!("{e}");
        }
        return Err(errors);
    }

    let ports: usize = cells.iter().map(|c| c.ports().len()).sum();
    info!("built {} cells with {ports} ports", cells.len());
    Ok(ParsedDocument::new(cells))
}

fn build_cell(node: MacroNode, errors: &mut Vec<SemanticError>) -> Option<Cell> {
    let (width, height) = node.size.value;
    let bounding_box = Polygon::from_size(width, height);
    if bounding_box.is_none() {
        errors.push(SemanticError::NegativeSize {
            width,
            height,
            offset: node.size.offset,
        });
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for pin in &node.pins {
        match seen.get(pin.name.value.as_str()) {
            Some(&first_offset) => errors.push(SemanticError::DuplicatePin {
                cell: node.name.value.clone(),
                name: pin.name.value.clone(),
                offset: pin.name.offset,
                first_offset,
            }),
            None => {
                seen.insert(&pin.name.value, pin.name.offset);
            }
        }
    }

    // Keep validating every pin even after a failure, but only assemble
    // the cell when all of its parts are valid.
    let ports: Vec<Option<Port>> = node
        .pins
        .iter()
        .map(|pin| build_port(pin, errors))
        .collect();
    let ports: Option<Vec<Port>> = ports.into_iter().collect();

    Some(Cell::new(node.name.value, bounding_box?, ports?))
}

fn build_port(pin: &PinNode, errors: &mut Vec<SemanticError>) -> Option<Port> {
    let direction = Direction::from_keyword(&pin.direction.value);
    if direction.is_none() {
        errors.push(SemanticError::UnknownDirection {
            value: pin.direction.value.clone(),
            offset: pin.direction.offset,
        });
    }

    let use_type = PinUse::from_keyword(&pin.use_type.value);
    if use_type.is_none() {
        errors.push(SemanticError::UnknownUse {
            value: pin.use_type.value.clone(),
            offset: pin.use_type.offset,
        });
    }

    let [x1, y1, x2, y2] = pin.port.rect.value;
    let polygon = Polygon::from_corners(Point::new(x1, y1), Point::new(x2, y2));
    if polygon.is_none() {
        errors.push(SemanticError::InvertedRect {
            x1,
            y1,
            x2,
            y2,
            offset: pin.port.rect.offset,
        });
    }

    Some(Port::new(
        pin.name.value.clone(),
        direction?,
        use_type?,
        pin.port.layer.value.clone(),
        polygon?,
    ))
}
