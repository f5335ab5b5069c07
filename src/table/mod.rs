// src/table/mod.rs

use std::collections::HashSet;

pub mod identity;
pub mod serialize;

pub use identity::{content_hash, normalize_identity, ContentHash, HASH_SAMPLE_ROWS};
pub use serialize::{read_csv, write_csv};

/// Cell text straight out of a `<table>`, one `Vec` per `<tr>`.
/// Row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }
}

/// Named columns over row-major data.
///
/// Every row holds exactly `columns.len()` cells and column names are unique:
/// a repeated name `X` is stored as `X.1`, `X.2`, ... in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Promote the first raw row to column names. The rest become data rows,
    /// numbered from 0 by position. Ragged rows are padded with empty cells up
    /// to the widest row.
    pub fn from_raw(raw: RawTable) -> Self {
        let width = raw.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = raw.rows.into_iter().map(|mut row| {
            row.resize(width, String::new());
            row
        });

        let Some(header) = rows.next() else {
            return Self::default();
        };

        Self {
            columns: dedupe_columns(header),
            rows: rows.collect(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a str> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// Rewrite every cell of column `idx` in place.
    pub(crate) fn map_column<F>(&mut self, idx: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
    }
}

fn dedupe_columns(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
