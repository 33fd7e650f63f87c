//! Scrapes the Game Boy opcode tables published at [gbdev.io](https://gbdev.io/gb-opcodes/optables/)
//! and formats them as source tables for the emulator's instruction decoder.

pub mod fetch;
pub mod format;
pub mod opcode;
pub mod query;

pub use fetch::{extract_table, fetch_table, FetchConfig, FetchError};
pub use format::{format_table, TableStyle};
pub use opcode::{ImmediateType, OpcodeRecord, OpcodeTable, TableKind};
