//! Helpers shared by the integration tests.
#![allow(dead_code)]

use std::fmt::Write;

use gbtables::TableKind;

/// Opcodes from the real tables, with the page's spelling.
const BASE: &[(u8, &str)] = &[
    (0x00, "NOP"),
    (0x01, "LD BC, n16"),
    (0x08, "LD [a16], SP"),
    (0x18, "JR e8"),
    (0x3e, "LD A, n8"),
    (0xcb, "PREFIX"),
    (0xe0, "LDH [a8], A"),
    (0xe8, "ADD SP, e8"),
];

const PREFIXED: &[(u8, &str)] = &[(0x00, "RLC B"), (0x0b, "RRC E"), (0xff, "SET 7, A")];

/// Opcodes the page shows without a mnemonic.
pub const UNDOCUMENTED: &[u8] = &[0xd3, 0xdb, 0xdd, 0xe3, 0xe4, 0xeb, 0xec, 0xed, 0xf4, 0xfc, 0xfd];

/// Builds a page shaped like the published optables page: two tables, one cell per opcode.
pub fn page() -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html><head><title>optables</title></head><body>\n");
    for (kind, known) in [(TableKind::Base, BASE), (TableKind::Prefixed, PREFIXED)] {
        html.push_str("<table>\n");
        for high in 0u8..0x10 {
            html.push_str("<tr>");
            for low in 0u8..0x10 {
                let op = high << 4 | low;
                let id = kind.cell_id(op);
                let is_undocumented = kind == TableKind::Base && UNDOCUMENTED.contains(&op);
                if is_undocumented {
                    write!(html, "<td id=\"{}\" class=\"illegal\"></td>", id).unwrap();
                    continue;
                }
                let mnemonic = known
                    .iter()
                    .find(|(code, _)| *code == op)
                    .map(|(_, m)| *m)
                    .unwrap_or("LD B, C");
                write!(
                    html,
                    "<td id=\"{}\" class=\"op\">\n  <span class=\"mnemonic\">\n    {}\n  </span><br>\
                     <span class=\"bytes\">1</span> <span class=\"cycles\">4</span></td>",
                    id, mnemonic
                )
                .unwrap();
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</table>\n");
    }
    html.push_str("</body></html>\n");
    html
}
