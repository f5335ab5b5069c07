// src/extract/mod.rs

use scraper::Html;
use tracing::debug;

pub mod anchor;
pub mod dom;

use crate::table::{content_hash, normalize_identity, ContentHash, RawTable, Table};
use anchor::locate_anchor;
use dom::{DocumentOrder, DomNode};

pub use crate::error::ExtractError;

pub const DEFAULT_PRIMARY_HEADING: &str = " Call of Duty: Black Ops 6";
pub const DEFAULT_SECONDARY_HEADING: &str = "Multiplayer Match Data (reverse chronological)";
pub const DEFAULT_IDENTITY_COLUMN: &str = "Match ID";

/// Which headings to anchor on and which column identifies a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    pub primary_heading: Option<String>,
    pub secondary_heading: Option<String>,
    pub identity_column: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            primary_heading: Some(DEFAULT_PRIMARY_HEADING.to_string()),
            secondary_heading: Some(DEFAULT_SECONDARY_HEADING.to_string()),
            identity_column: DEFAULT_IDENTITY_COLUMN.to_string(),
        }
    }
}

/// A table ready to be written: identity column normalized, plus the hash of
/// its raw identity values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub table: Table,
    pub hash: ContentHash,
}

impl Extracted {
    pub fn file_name(&self) -> String {
        self.hash.file_name()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TableExtractor {
    config: ExtractorConfig,
}

impl TableExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Full pipeline for one HTML document.
    pub fn extract(&self, html: &str) -> Result<Extracted, ExtractError> {
        let document = Html::parse_document(html);
        let raw = self.extract_raw(&document)?;
        let mut table = Table::from_raw(raw);
        debug!(
            columns = table.width(),
            rows = table.len(),
            "parsed table"
        );

        let column = self.config.identity_column.as_str();
        let hash = content_hash(&table, column)?;
        normalize_identity(&mut table, column)?;

        Ok(Extracted { table, hash })
    }

    /// Cell text of the first `<table>` after the configured heading.
    pub fn extract_raw(&self, document: &Html) -> Result<RawTable, ExtractError> {
        let doc = DocumentOrder::of_document(document);
        let anchor = locate_anchor(
            &doc,
            self.config.primary_heading.as_deref(),
            self.config.secondary_heading.as_deref(),
        )?;
        let (_, table) = doc
            .find_after(anchor, |n| n.is("table"))
            .ok_or(ExtractError::NoTableFound)?;
        Ok(read_cells(table))
    }
}

/// Every `<tr>` under `table`, each as its `<th>`/`<td>` texts in order.
fn read_cells<N: DomNode>(table: N) -> RawTable {
    let rows = table
        .inner_elements()
        .into_iter()
        .filter(|n| n.is("tr"))
        .map(|tr| {
            tr.inner_elements()
                .into_iter()
                .filter(|n| n.is("th") || n.is("td"))
                .map(|cell| cell.trimmed_text())
                .collect()
        })
        .collect();
    RawTable::new(rows)
}
