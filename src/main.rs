// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use lef_cells::export::{export_cells_to_csv, export_ports_to_csv};
use lef_cells::lef::reader::LefReader;

/// Parse a LEF file and report its cells and ports
#[derive(Debug, Parser)]
#[command(name = "lef-cells", version, about)]
struct Cli {
    /// Input LEF file
    lef: PathBuf,
    /// Write `macro,pin,x,y` port coordinates to this CSV file
    #[arg(long, value_name = "FILE")]
    ports_csv: Option<String>,
    /// Write a per-cell summary to this CSV file
    #[arg(long, value_name = "FILE")]
    cells_csv: Option<String>,
    /// Do not print the cell summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    // Diagnostics with line/column positions are logged by the reader
    let doc = match LefReader::new().read(&cli.lef) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("{}: {e}", cli.lef.display());
            return ExitCode::FAILURE;
        }
    };

    if !cli.quiet {
        for cell in &doc {
            println!(
                "{} ({} x {}): {} ports",
                cell.name(),
                cell.width(),
                cell.height(),
                cell.ports().len()
            );
            for port in cell.ports() {
                println!(
                    "  {} {} {} {} @ {}",
                    port.name(),
                    port.direction(),
                    port.use_type(),
                    port.layer(),
                    port.location()
                );
            }
        }
    }

    if let Some(path) = &cli.ports_csv {
        if let Err(e) = export_ports_to_csv(&doc, path) {
            error!("failed to write {path}: {e}");
            return ExitCode::FAILURE;
        }
    }
    if let Some(path) = &cli.cells_csv {
        if let Err(e) = export_cells_to_csv(&doc, path) {
            error!("failed to write {path}: {e}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
