// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::fs;
use std::path::Path;

use log::{debug, error, info};

use super::{LefError, ParsedDocument};

pub struct LefReader;

impl LefReader {
    pub fn new() -> Self {
        Self
    }

    /// Read a LEF file and parse it with [`super::parse`]
    pub fn read<P: AsRef<Path>>(&self, path: P) -> Result<ParsedDocument, LefError> {
        let path_str = path.as_ref().display().to_string();
        info!("Loading LEF file: {path_str}");

        let content = fs::read_to_string(path)?;
        debug!("LEF file size: {} bytes", content.len());

        match super::parse(&content) {
            Ok(doc) => {
                let total_ports: usize = doc.iter().map(|c| c.ports().len()).sum();
                info!(
                    "Parsed {path_str}: {} cells, {total_ports} ports",
                    doc.len()
                );
                Ok(doc)
            }
            Err(e) => {
                for line in e.diagnostics(&content) {
                    error!("{path_str}:{line}");
                }
                Err(e)
            }
        }
    }
}

impl Default for LefReader {
    fn default() -> Self {
        Self::new()
    }
}
