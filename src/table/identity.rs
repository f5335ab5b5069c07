// src/table/identity.rs

use sha2::{Digest, Sha256};
use std::fmt;

use super::Table;
use crate::error::ExtractError;

/// Only this many leading identity values feed the hash.
pub const HASH_SAMPLE_ROWS: usize = 100;

const HASH_HEX_LEN: usize = 8;

/// Short content identifier for a table: the first 8 hex chars of a SHA-256
/// over its leading identity values. Stable across runs; not collision-free.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `bo6_data_<hash>.csv`
    pub fn file_name(&self) -> String {
        format!("bo6_data_{}.csv", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash the first [`HASH_SAMPLE_ROWS`] values of `column`, concatenated with
/// no separator. Expects raw values, i.e. before [`normalize_identity`].
pub fn content_hash(table: &Table, column: &str) -> Result<ContentHash, ExtractError> {
    let values = table
        .column_values(column)
        .ok_or_else(|| missing(column))?;

    let mut hasher = Sha256::new();
    for value in values.take(HASH_SAMPLE_ROWS) {
        hasher.update(value.as_bytes());
    }
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(HASH_HEX_LEN);
    Ok(ContentHash(hex))
}

/// Prefix every value of `column` with a single `'` so spreadsheet tools keep
/// long IDs as text instead of rounding them.
pub fn normalize_identity(table: &mut Table, column: &str) -> Result<(), ExtractError> {
    let idx = table.column_index(column).ok_or_else(|| missing(column))?;
    table.map_column(idx, |v| format!("'{v}"));
    Ok(())
}

fn missing(column: &str) -> ExtractError {
    ExtractError::MissingIdentityColumn {
        column: column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RawTable;

    const ID: &str = "Match ID";

    fn table_with_ids<I: IntoIterator<Item = String>>(ids: I) -> Table {
        let mut rows = vec![vec![ID.to_string(), "Map".to_string()]];
        rows.extend(ids.into_iter().map(|id| vec![id, "Hardpoint".to_string()]));
        Table::from_raw(RawTable::new(rows))
    }

    fn sha_prefix(input: &str) -> String {
        hex::encode(Sha256::digest(input.as_bytes()))[..8].to_string()
    }

    #[test]
    fn hash_is_prefix_of_sha256_over_concatenated_ids() -> Result<(), ExtractError> {
        let table = table_with_ids(["101".to_string(), "102".to_string()]);
        let hash = content_hash(&table, ID)?;
        assert_eq!(hash.as_str(), sha_prefix("101102"));
        assert_eq!(hash.as_str().len(), 8);
        assert!(hash.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash.file_name(), format!("bo6_data_{}.csv", sha_prefix("101102")));
        Ok(())
    }

    #[test]
    fn hash_is_deterministic() -> Result<(), ExtractError> {
        let a = table_with_ids((0..50).map(|i| format!("9{i:018}")));
        let b = table_with_ids((0..50).map(|i| format!("9{i:018}")));
        assert_eq!(content_hash(&a, ID)?, content_hash(&b, ID)?);
        Ok(())
    }

    #[test]
    fn hash_only_looks_at_first_hundred_values() -> Result<(), ExtractError> {
        let base = table_with_ids((0..150).map(|i| i.to_string()));
        let mut tail_changed: Vec<String> = (0..150).map(|i| i.to_string()).collect();
        tail_changed[120] = "changed".to_string();
        let mut head_changed: Vec<String> = (0..150).map(|i| i.to_string()).collect();
        head_changed[99] = "changed".to_string();

        let h = content_hash(&base, ID)?;
        assert_eq!(h, content_hash(&table_with_ids(tail_changed), ID)?);
        assert_ne!(h, content_hash(&table_with_ids(head_changed), ID)?);

        let sample: String = (0..100).map(|i| i.to_string()).collect();
        assert_eq!(h.as_str(), sha_prefix(&sample));
        Ok(())
    }

    #[test]
    fn empty_identity_column_hashes_empty_input() -> Result<(), ExtractError> {
        let table = table_with_ids(Vec::new());
        assert_eq!(content_hash(&table, ID)?.as_str(), "e3b0c442");
        Ok(())
    }

    #[test]
    fn normalize_prefixes_exactly_one_apostrophe() -> Result<(), ExtractError> {
        let mut table = table_with_ids(["101".to_string(), "'quoted".to_string(), String::new()]);
        normalize_identity(&mut table, ID)?;
        let ids: Vec<&str> = table.column_values(ID).unwrap().collect();
        assert_eq!(ids, ["'101", "''quoted", "'"]);
        assert_eq!(table.column_values("Map").unwrap().next(), Some("Hardpoint"));
        Ok(())
    }

    #[test]
    fn missing_column_is_reported() {
        let mut table = Table::from_raw(RawTable::new(vec![vec!["Map".to_string()]]));
        let expected = ExtractError::MissingIdentityColumn {
            column: ID.to_string(),
        };
        assert_eq!(content_hash(&table, ID).unwrap_err(), expected);
        assert_eq!(normalize_identity(&mut table, ID).unwrap_err(), expected);
    }
}
