//! Records describing a single opcode as scraped from the published tables, and the rules used to
//! turn the page's operand placeholders into printf-style format placeholders.

use std::fmt;
use std::ops::Index;
use std::slice;

use thiserror::Error;

/// Number of opcodes in each table.
pub const TABLE_SIZE: usize = 0x100;

/// Mnemonic used for any opcode whose cell has no mnemonic.
pub const ILLEGAL_MNEMONIC: &str = "ILLEGAL";

/// Kind of immediate operand that follows the opcode byte when decoding.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ImmediateType {
    /// The opcode is not followed by any operand bytes.
    NoImmediate,
    /// The opcode is followed by a single operand byte.
    Immediate8,
    /// The opcode is followed by a little-endian 16 bit operand.
    Immediate16,
}

impl ImmediateType {
    /// Number of operand bytes following the opcode.
    pub fn operand_len(self) -> usize {
        match self {
            Self::NoImmediate => 0,
            Self::Immediate8 => 1,
            Self::Immediate16 => 2,
        }
    }

    /// Identifier used for this type in generated tables.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoImmediate => "NoImmediate",
            Self::Immediate8 => "Immediate8",
            Self::Immediate16 => "Immediate16",
        }
    }
}

impl fmt::Display for ImmediateType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which of the two opcode tables is being processed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TableKind {
    /// Single byte opcodes.
    Base,
    /// Opcodes following the `0xCB` prefix byte.
    Prefixed,
}

impl TableKind {
    /// Both tables, in the order they are emitted.
    pub const ALL: [TableKind; 2] = [TableKind::Base, TableKind::Prefixed];

    /// Element id of the table cell describing the given opcode, e.g. `op-0b` or `op-cb0b`.
    pub fn cell_id(self, opcode: u8) -> String {
        match self {
            Self::Base => format!("op-{:02x}", opcode),
            Self::Prefixed => format!("op-cb{:02x}", opcode),
        }
    }

    /// Name of the declaration this table is emitted as unless overridden.
    pub fn default_name(self) -> &'static str {
        match self {
            Self::Base => "InstructionTable",
            Self::Prefixed => "InstructionTableCB",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Base => f.write_str("base"),
            Self::Prefixed => f.write_str("CB-prefixed"),
        }
    }
}

/// Rewrites one operand placeholder used by the page into a format placeholder.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlaceholderRule {
    /// Placeholder as written on the page, e.g. `n8`.
    pub token: &'static str,
    /// Format placeholder substituted for every occurrence of `token`.
    pub replacement: &'static str,
    /// Immediate type of any opcode whose mnemonic contains `token`.
    pub immediate: ImmediateType,
}

/// Placeholder rules in priority order. Only the first rule whose token appears in a mnemonic is
/// applied.
pub const PLACEHOLDER_RULES: [PlaceholderRule; 5] = [
    PlaceholderRule {
        token: "n8",
        replacement: "0x%02X",
        immediate: ImmediateType::Immediate8,
    },
    PlaceholderRule {
        token: "n16",
        replacement: "0x%04X",
        immediate: ImmediateType::Immediate16,
    },
    PlaceholderRule {
        token: "a8",
        replacement: "%02X",
        immediate: ImmediateType::Immediate8,
    },
    PlaceholderRule {
        token: "a16",
        replacement: "%04X",
        immediate: ImmediateType::Immediate16,
    },
    PlaceholderRule {
        token: "e8",
        replacement: "%02X",
        immediate: ImmediateType::Immediate8,
    },
];

/// A single entry of an opcode table: the mnemonic (possibly containing a format placeholder for
/// the operand) and the kind of operand it takes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct OpcodeRecord {
    pub mnemonic: String,
    pub immediate: ImmediateType,
}

impl OpcodeRecord {
    pub fn new(mnemonic: impl Into<String>, immediate: ImmediateType) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            immediate,
        }
    }

    /// Record for an opcode the page doesn't document.
    pub fn illegal() -> Self {
        Self::new(ILLEGAL_MNEMONIC, ImmediateType::NoImmediate)
    }

    /// Builds a record from mnemonic text as it appears on the page, applying the first matching
    /// rule from `rules`.
    pub fn classify(mnemonic: &str, rules: &[PlaceholderRule]) -> Self {
        match rules.iter().find(|rule| mnemonic.contains(rule.token)) {
            Some(rule) => Self::new(
                mnemonic.replace(rule.token, rule.replacement),
                rule.immediate,
            ),
            None => Self::new(mnemonic, ImmediateType::NoImmediate),
        }
    }

    /// Expands the operand placeholder in the mnemonic with the given operand value. 8 bit
    /// operands use only the low byte of `operand`. Records without an immediate, or whose
    /// mnemonic has no `%0NX` placeholder, are returned unchanged.
    pub fn render(&self, operand: u16) -> String {
        let value = match self.immediate {
            ImmediateType::NoImmediate => return self.mnemonic.clone(),
            ImmediateType::Immediate8 => operand & 0xff,
            ImmediateType::Immediate16 => operand,
        };
        match find_placeholder(&self.mnemonic) {
            Some((start, end, width)) => format!(
                "{}{:0width$X}{}",
                &self.mnemonic[..start],
                value,
                &self.mnemonic[end..],
                width = width,
            ),
            None => self.mnemonic.clone(),
        }
    }
}

impl fmt::Display for OpcodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.mnemonic)
    }
}

/// Finds the first `%0<width>X` in `template`, returning its byte range and width. A `%0` not
/// followed by a width and `X` is skipped.
fn find_placeholder(template: &str) -> Option<(usize, usize, usize)> {
    for (start, _) in template.match_indices("%0") {
        let rest = &template[start + 2..];
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 || rest.as_bytes().get(digits) != Some(&b'X') {
            continue;
        }
        if let Ok(width) = rest[..digits].parse() {
            return Some((start, start + 2 + digits + 1, width));
        }
    }
    None
}

/// Error when building an [`OpcodeTable`] from the wrong number of records. Contains the number
/// of records given.
#[derive(Copy, Clone, Debug, Error)]
#[error("Expected exactly 256 opcode records, got {0}")]
pub struct TableSizeError(pub usize);

/// A complete opcode table, indexed by opcode value. Always holds exactly 256 records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpcodeTable(Box<[OpcodeRecord]>);

impl OpcodeTable {
    /// Constructs a table from a vec of records, which must have exactly 256 entries.
    pub fn try_from_vec(records: Vec<OpcodeRecord>) -> Result<Self, TableSizeError> {
        Self::try_from(records)
    }

    /// Record for the given opcode.
    pub fn get(&self, opcode: u8) -> &OpcodeRecord {
        &self.0[opcode as usize]
    }

    /// All records, in opcode order.
    pub fn records(&self) -> &[OpcodeRecord] {
        &self.0
    }

    pub fn iter(&self) -> slice::Iter<'_, OpcodeRecord> {
        self.0.iter()
    }
}

impl TryFrom<Vec<OpcodeRecord>> for OpcodeTable {
    type Error = TableSizeError;

    fn try_from(records: Vec<OpcodeRecord>) -> Result<Self, TableSizeError> {
        if records.len() != TABLE_SIZE {
            Err(TableSizeError(records.len()))
        } else {
            Ok(Self(records.into_boxed_slice()))
        }
    }
}

impl Index<u8> for OpcodeTable {
    type Output = OpcodeRecord;

    fn index(&self, opcode: u8) -> &OpcodeRecord {
        self.get(opcode)
    }
}
