// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Synthetic LEF fixtures
//!
//! `generate_lef(n, p)` writes `n` macros `cell_0..cell_{n-1}`, each 100 by 100
//! with `p` pins `pin_0..pin_{p-1}` spread around the four edges on layer M1.

#![allow(dead_code)]

const DIRECTIONS: [&str; 3] = ["INPUT", "OUTPUT", "INOUT"];
const USES: [&str; 3] = ["SIGNAL", "POWER", "GROUND"];

/// Pin rectangle `[x1, y1, x2, y2]` for pin `index` of `count`
pub fn pin_rect(index: usize, count: usize) -> [f64; 4] {
    let per_side = count.div_ceil(4).max(1);
    let pitch = 80.0 / (per_side as f64 + 1.0);
    let len = (pitch / 2.0).min(1.0);
    let pos = 10.0 + pitch * ((index / 4) as f64 + 1.0);
    match index % 4 {
        0 => [0.0, pos, len, pos + len],
        1 => [100.0 - len, pos, 100.0, pos + len],
        2 => [pos, 100.0 - len, pos + len, 100.0],
        _ => [pos, 0.0, pos + len, len],
    }
}

pub fn direction_of(index: usize) -> &'static str {
    DIRECTIONS[index % 3]
}

pub fn use_of(index: usize) -> &'static str {
    USES[(index / 3) % 3]
}

pub fn generate_lef(cells: usize, pins: usize) -> String {
    let mut lines = Vec::new();
    for c in 0..cells {
        lines.push(format!("MACRO cell_{c}"));
        lines.push("\tSIZE 100 BY 100 ;".to_string());
        for p in 0..pins {
            let [x1, y1, x2, y2] = pin_rect(p, pins);
            lines.push(format!("\tPIN pin_{p}"));
            lines.push(format!("\t\tDIRECTION {} ;", direction_of(p)));
            lines.push(format!("\t\tUSE {} ;", use_of(p)));
            lines.push("\t\tPORT".to_string());
            lines.push("\t\t\tLAYER M1 ;".to_string());
            lines.push(format!("\t\t\tRECT {x1} {y1} {x2} {y2} ;"));
            lines.push("\t\tEND PORT".to_string());
            lines.push(format!("\tEND pin_{p}"));
        }
        lines.push("END MACRO".to_string());
    }
    lines.join("\n")
}

/// The single-cell, single-pin example document
pub const SCENARIO: &str = "MACRO cell_0\n SIZE 100 BY 100 ;\n PIN pin_0\n DIRECTION INPUT ;\n USE SIGNAL ;\n PORT\n LAYER M1 ;\n RECT 0 49.5 1 50.5 ;\n END PORT\n END pin_0\nEND MACRO";
