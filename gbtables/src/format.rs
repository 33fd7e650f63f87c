//! Formatting of opcode tables as source code for the emulator.

use std::borrow::Cow;
use std::fmt;

use crate::opcode::OpcodeRecord;

/// Number of entries per row in grid-shaped output.
const ROW_LEN: usize = 0x10;

/// Shape of the emitted table.
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub enum TableStyle {
    /// `const AbstractInstruction Name[]`, one `{"mnemonic", ImmediateType}` entry per line.
    #[default]
    Instruction,
    /// `const std::string Name[]` of bare mnemonics, sixteen per line.
    MnemonicGrid,
    /// Comma separated grid with the high nibble down the side and the low nibble across the
    /// top. Doesn't carry a name.
    Csv,
}

impl TableStyle {
    /// Formats `records` (in opcode order) as a declaration called `name`.
    pub fn format(self, name: &str, records: &[OpcodeRecord]) -> String {
        match self {
            Self::Instruction => format_instruction_table(name, records),
            Self::MnemonicGrid => format_mnemonic_grid(name, records),
            Self::Csv => format_csv(records),
        }
    }
}

/// Formats `records` with the given style. Shorthand for [`TableStyle::format`].
pub fn format_table(style: TableStyle, name: &str, records: &[OpcodeRecord]) -> String {
    style.format(name, records)
}

pub fn format_instruction_table(name: &str, records: &[OpcodeRecord]) -> String {
    InstructionDecl { name, records }.to_string()
}

pub fn format_mnemonic_grid(name: &str, records: &[OpcodeRecord]) -> String {
    MnemonicGrid { name, records }.to_string()
}

pub fn format_csv(records: &[OpcodeRecord]) -> String {
    CsvGrid(records).to_string()
}

/// `AbstractInstruction` array declaration.
struct InstructionDecl<'a> {
    name: &'a str,
    records: &'a [OpcodeRecord],
}

impl fmt::Display for InstructionDecl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "const AbstractInstruction {}[] = {{", self.name)?;
        for record in self.records {
            writeln!(
                f,
                "\t{{\"{}\", {}}},",
                escape(&record.mnemonic),
                record.immediate
            )?;
        }
        f.write_str("};")
    }
}

/// `std::string` array declaration, one row per high nibble.
struct MnemonicGrid<'a> {
    name: &'a str,
    records: &'a [OpcodeRecord],
}

impl fmt::Display for MnemonicGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "const std::string {}[] = {{", self.name)?;
        for row in self.records.chunks(ROW_LEN) {
            f.write_str("\t")?;
            for record in row {
                write!(f, "\"{}\", ", escape(&record.mnemonic))?;
            }
            f.write_str("\n")?;
        }
        f.write_str("};")
    }
}

struct CsvGrid<'a>(&'a [OpcodeRecord]);

impl fmt::Display for CsvGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for low in 0..ROW_LEN {
            write!(f, ",{:#04X}", low)?;
        }
        for (row, chunk) in self.0.chunks(ROW_LEN).enumerate() {
            write!(f, "\n{:#04X}", row * ROW_LEN)?;
            for record in chunk {
                write!(f, ",\"{}\"", record.mnemonic.replace('"', "\"\""))?;
            }
        }
        Ok(())
    }
}

/// Joins formatted tables into the final program output: one blank line between tables and a
/// trailing newline.
pub fn join_tables<S: AsRef<str>>(tables: &[S]) -> String {
    let mut out = String::new();
    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(table.as_ref());
        out.push('\n');
    }
    out
}

/// Escapes a mnemonic for use inside a double quoted string literal.
fn escape(text: &str) -> Cow<'_, str> {
    if text.contains(['\\', '"']) {
        Cow::Owned(text.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        Cow::Borrowed(text)
    }
}
