use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use gbtables::fetch::{self, FetchConfig, FetchError, DEFAULT_URL};
use gbtables::format::join_tables;
use gbtables::{TableKind, TableStyle};

use crate::selector::{StyleSelector, TableSelector};

mod selector;

/// Scrapes the Game Boy opcode tables and prints them as source tables for the emulator.
#[derive(Parser, Debug)]
struct Args {
    /// Page to fetch the opcode tables from.
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,
    /// Read a saved copy of the page instead of fetching it.
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// Shape of the printed tables.
    #[arg(long, value_enum, default_value_t)]
    style: StyleSelector,
    /// Which tables to print.
    #[arg(long, value_enum, default_value_t)]
    table: TableSelector,
    /// Declaration name for the base table (defaults to `InstructionTable`).
    #[arg(long)]
    base_name: Option<String>,
    /// Declaration name for the CB-prefixed table (defaults to `InstructionTableCB`).
    #[arg(long)]
    cb_name: Option<String>,
}

impl Args {
    fn name_for(&self, kind: TableKind) -> &str {
        let name = match kind {
            TableKind::Base => &self.base_name,
            TableKind::Prefixed => &self.cb_name,
        };
        name.as_deref().unwrap_or(kind.default_name())
    }
}

/// Builds the complete output. Nothing is printed until every requested table has been
/// extracted.
fn run(args: &Args) -> Result<String, FetchError> {
    let config = FetchConfig {
        url: args.url.clone(),
        ..FetchConfig::default()
    };
    let saved_page = args.input.as_deref().map(fetch::load_document).transpose()?;
    let style = TableStyle::from(args.style);

    let mut tables = Vec::new();
    for &kind in args.table.kinds() {
        let table = match saved_page {
            Some(ref doc) => fetch::extract_table(doc, kind, &config)?,
            None => fetch::fetch_table(&config, kind)?,
        };
        info!("Formatting {} table as {}", kind, args.name_for(kind));
        tables.push(style.format(args.name_for(kind), table.records()));
    }
    Ok(join_tables(&tables))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(output) => print!("{}", output),
        Err(err) => {
            error!("{}", err);
            let mut source = err.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_fetches_both_tables_from_gbdev() {
        let args = Args::try_parse_from(["gbtables-fetch"]).unwrap();
        assert_eq!(args.url, "https://gbdev.io/gb-opcodes/optables/");
        assert_eq!(args.input, None);
        assert_eq!(args.style, StyleSelector::Instruction);
        assert_eq!(args.table, TableSelector::Both);
        assert_eq!(args.name_for(TableKind::Base), "InstructionTable");
        assert_eq!(args.name_for(TableKind::Prefixed), "InstructionTableCB");
    }

    #[test]
    fn options() {
        let args = Args::try_parse_from([
            "gbtables-fetch",
            "--input",
            "optables.html",
            "--style",
            "mnemonic-grid",
            "--table",
            "cb",
            "--cb-name",
            "MnemonicsCB",
        ])
        .unwrap();
        assert_eq!(args.input, Some(PathBuf::from("optables.html")));
        assert_eq!(args.style, StyleSelector::MnemonicGrid);
        assert_eq!(args.table, TableSelector::Cb);
        assert_eq!(args.name_for(TableKind::Prefixed), "MnemonicsCB");
        assert_eq!(args.name_for(TableKind::Base), "InstructionTable");
    }

    #[test]
    fn unreadable_input_fails_before_output() {
        let args = Args::try_parse_from(["gbtables-fetch", "-i", "/nonexistent/optables.html"])
            .unwrap();
        assert!(matches!(run(&args), Err(FetchError::Io { .. })));
    }
}
