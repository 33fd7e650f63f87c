//! Retrieval of the opcode page and extraction of the opcode tables from it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use scraper::Html;
use thiserror::Error;

use crate::opcode::{
    OpcodeRecord, OpcodeTable, PlaceholderRule, TableKind, TableSizeError, PLACEHOLDER_RULES,
    TABLE_SIZE,
};
use crate::query::DocumentQuery;

/// Page the opcode tables are scraped from.
pub const DEFAULT_URL: &str = "https://gbdev.io/gb-opcodes/optables/";

/// Where in the page the opcode information lives.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PageLayout {
    /// Tag of the element carrying the `op-XX` / `op-cbXX` id.
    pub cell_tag: &'static str,
    /// Tag of the mnemonic element inside a cell.
    pub mnemonic_tag: &'static str,
    /// Class marking the mnemonic element.
    pub mnemonic_class: &'static str,
}

/// Layout of the gbdev.io optables page.
pub const GBDEV_LAYOUT: PageLayout = PageLayout {
    cell_tag: "td",
    mnemonic_tag: "span",
    mnemonic_class: "mnemonic",
};

/// Settings for fetching and extracting the tables. Fixed for the whole run.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub url: String,
    pub layout: PageLayout,
    /// Placeholder rules, in priority order.
    pub rules: &'static [PlaceholderRule],
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            layout: GBDEV_LAYOUT,
            rules: &PLACEHOLDER_RULES,
        }
    }
}

/// Errors that stop the opcode tables from being produced.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request failed or the server answered with an error status.
    #[error("Error while fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// A saved copy of the page couldn't be read.
    #[error("Error while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The page has no cell for one of the opcodes.
    #[error("No table cell with id {0:?} in the page")]
    MissingCell(String),
    #[error(transparent)]
    TableSize(#[from] TableSizeError),
}

/// Downloads and parses the opcode page.
pub fn fetch_document(url: &str) -> Result<Html, FetchError> {
    debug!("Fetching {}", url);
    let http_err = |source| FetchError::Http {
        url: url.to_owned(),
        source,
    };
    let body = reqwest::blocking::get(url)
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(http_err)?;
    debug!("Received {} bytes from {}", body.len(), url);
    Ok(Html::parse_document(&body))
}

/// Reads and parses a saved copy of the opcode page.
pub fn load_document(path: &Path) -> Result<Html, FetchError> {
    debug!("Loading {}", path.display());
    let body = fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(Html::parse_document(&body))
}

/// Extracts one complete opcode table from an already parsed page.
pub fn extract_table<Q: DocumentQuery>(
    doc: &Q,
    kind: TableKind,
    config: &FetchConfig,
) -> Result<OpcodeTable, FetchError> {
    let layout = &config.layout;
    let mut records = Vec::with_capacity(TABLE_SIZE);
    for opcode in 0u8..=0xff {
        let id = kind.cell_id(opcode);
        let cell = doc
            .find_by_id(layout.cell_tag, &id)
            .ok_or_else(|| FetchError::MissingCell(id.clone()))?;
        let record = match doc.find_marked(&cell, layout.mnemonic_tag, layout.mnemonic_class) {
            Some(mnemonic) => OpcodeRecord::classify(doc.text(&mnemonic).trim(), config.rules),
            None => {
                warn!("No mnemonic in cell {}, marking as illegal", id);
                OpcodeRecord::illegal()
            }
        };
        trace!("{}: {:?}", id, record);
        records.push(record);
    }
    debug!("Extracted {} table", kind);
    Ok(OpcodeTable::try_from_vec(records)?)
}

/// Fetches the page from the configured URL and extracts one opcode table from it.
pub fn fetch_table(config: &FetchConfig, kind: TableKind) -> Result<OpcodeTable, FetchError> {
    let doc = fetch_document(&config.url)?;
    extract_table(&doc, kind, config)
}
