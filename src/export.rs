// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

use crate::lef::{Cell, ParsedDocument, Port};

#[derive(Debug, Serialize)]
pub struct CellCsvRecord {
    #[serde(rename = "Macro")]
    pub macro_name: String,
    #[serde(rename = "Size")]
    pub size: String,
    #[serde(rename = "Pins")]
    pub pins: usize,
    #[serde(rename = "Area")]
    pub area: f64,
    #[serde(rename = "Pinlist")]
    pub pinlist: String,
}

/// Format ports into a comma-separated string of "DIRECTION:NAME" format
fn format_pinlist(ports: &[Port]) -> String {
    ports
        .iter()
        .map(|port| format!("{}:{}", port.direction(), port.name()))
        .collect::<Vec<String>>()
        .join(",")
}

fn cell_to_csv_record(cell: &Cell) -> CellCsvRecord {
    CellCsvRecord {
        macro_name: cell.name().to_string(),
        size: format!("{:.3} x {:.3}", cell.width(), cell.height()),
        pins: cell.ports().len(),
        area: cell.bounding_box().area(),
        pinlist: format_pinlist(cell.ports()),
    }
}

/// Write one `macro,pin,x,y` row per port, in document order.
/// This is the coordinate table the pin-ordering router consumes.
pub fn write_port_locations<W: Write>(
    doc: &ParsedDocument,
    writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = Writer::from_writer(writer);
    for location in doc.port_locations() {
        writer.serialize(location)?;
    }
    writer.flush()?;
    Ok(())
}

/// Export port locations to CSV file
pub fn export_ports_to_csv(
    doc: &ParsedDocument,
    file_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(file_path)?;
    write_port_locations(doc, file)
}

/// Export a per-cell summary to CSV file
pub fn export_cells_to_csv(
    doc: &ParsedDocument,
    file_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    for cell in doc {
        writer.serialize(cell_to_csv_record(cell))?;
    }

    writer.flush()?;
    Ok(())
}
