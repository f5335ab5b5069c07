// src/extract/anchor.rs

use super::dom::{DocumentOrder, DomNode};
use crate::error::ExtractError;

pub const PRIMARY_LEVEL: &str = "h1";
pub const SECONDARY_LEVEL: &str = "h2";

/// Locate the heading the table hangs off and return its document-order index.
///
/// The secondary heading is searched after the primary one when that was found,
/// otherwise from the top. A found secondary heading wins over the primary.
/// Text must match exactly, whitespace included.
pub fn locate_anchor<N: DomNode>(
    doc: &DocumentOrder<N>,
    primary: Option<&str>,
    secondary: Option<&str>,
) -> Result<usize, ExtractError> {
    let primary_at = primary.and_then(|text| find_heading(doc, PRIMARY_LEVEL, text, 0));

    let secondary_at = secondary.and_then(|text| {
        let start = primary_at.map_or(0, |i| i + 1);
        find_heading(doc, SECONDARY_LEVEL, text, start)
    });

    secondary_at
        .or(primary_at)
        .ok_or(ExtractError::NoAnchorFound)
}

fn find_heading<N: DomNode>(
    doc: &DocumentOrder<N>,
    level: &str,
    text: &str,
    start: usize,
) -> Option<usize> {
    doc.find_from(start, |n| n.is(level) && n.raw_text() == text)
        .map(|(i, _)| i)
}
