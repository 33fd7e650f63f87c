//! Clap arg enums for choosing what gets printed.
use clap::ValueEnum;
use gbtables::{TableKind, TableStyle};

/// Clap arg enum for selecting the output style.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum StyleSelector {
    /// `AbstractInstruction` entries pairing each mnemonic with its immediate type.
    #[default]
    Instruction,
    /// Flat `std::string` array of mnemonics, sixteen per row.
    MnemonicGrid,
    /// CSV grid for comparing against published opcode tables.
    Csv,
}

impl From<StyleSelector> for TableStyle {
    fn from(selector: StyleSelector) -> Self {
        match selector {
            StyleSelector::Instruction => TableStyle::Instruction,
            StyleSelector::MnemonicGrid => TableStyle::MnemonicGrid,
            StyleSelector::Csv => TableStyle::Csv,
        }
    }
}

/// Clap arg enum for selecting which tables to print.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
pub enum TableSelector {
    /// Base table followed by the CB-prefixed table.
    #[default]
    Both,
    /// Only single byte opcodes.
    Base,
    /// Only `0xCB`-prefixed opcodes.
    Cb,
}

impl TableSelector {
    /// Tables to print, in output order.
    pub fn kinds(self) -> &'static [TableKind] {
        match self {
            TableSelector::Both => &TableKind::ALL,
            TableSelector::Base => &[TableKind::Base],
            TableSelector::Cb => &[TableKind::Prefixed],
        }
    }
}
