//! Flat suggestion list assembly and display-safe text helpers.
//!
//! The two tiers merge into one row list: a section header per non-empty
//! tier, a separator when both tiers have rows, then the items. Items carry
//! a flat index spanning both tiers so the cursor addresses them uniformly.
//! Displayed names are HTML-escaped no matter what they contain, and every
//! case-insensitive occurrence of the query is wrapped in `<mark>`.

use crate::core::species::{SpeciesHit, TieredHits};

pub const PREFIX_HEADER: &str = "Best matches";
pub const CONTAINS_HEADER: &str = "Other results";

/// One row of the rendered dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    /// Non-selectable section heading.
    Header(&'static str),
    /// Non-selectable divider between the two tiers.
    Separator,
    /// A selectable suggestion.
    Item {
        /// Flat index across both tiers; what the cursor addresses.
        index: usize,
        id: u64,
        /// Escaped display name with `<mark>` highlight spans.
        html: String,
        detail_href: String,
    },
}

/// The merged, cursor-addressable suggestion list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedList {
    pub rows: Vec<Row>,
    item_count: usize,
}

impl RenderedList {
    /// Number of selectable items (headers and separators excluded).
    pub fn len(&self) -> usize {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    /// The item row at a flat index.
    pub fn item(&self, index: usize) -> Option<&Row> {
        self.rows.iter().find(|row| matches!(row, Row::Item { index: i, .. } if *i == index))
    }
}

/// Build the flat row list for one response.
pub fn build_list(hits: &TieredHits, query: &str) -> RenderedList {
    let mut rows = Vec::new();
    let mut index = 0;

    if !hits.prefix.is_empty() {
        rows.push(Row::Header(PREFIX_HEADER));
        for hit in &hits.prefix {
            rows.push(item_row(hit, query, index));
            index += 1;
        }
    }

    if !hits.prefix.is_empty() && !hits.contains.is_empty() {
        rows.push(Row::Separator);
    }

    if !hits.contains.is_empty() {
        rows.push(Row::Header(CONTAINS_HEADER));
        for hit in &hits.contains {
            rows.push(item_row(hit, query, index));
            index += 1;
        }
    }

    RenderedList {
        rows,
        item_count: index,
    }
}

fn item_row(hit: &SpeciesHit, query: &str, index: usize) -> Row {
    Row::Item {
        index,
        id: hit.id,
        html: highlight(&hit.name, query),
        detail_href: detail_href(hit.id),
    }
}

pub fn detail_href(id: u64) -> String {
    format!("/api/species/{id}")
}

/// Href for submitting the literal typed text as a full search.
pub fn submit_href(query: &str) -> String {
    format!("/api/search?search={}&page=1", urlencoding::encode(query))
}

/// Escape text for an HTML context.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape `text` and wrap every case-insensitive occurrence of `query` in
/// `<mark>`.
///
/// Matching runs over the raw text before escaping, so a query of `<` finds
/// a literal `<` in the name rather than fragments of entities.
pub fn highlight(text: &str, query: &str) -> String {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return escape_html(text);
    }

    // Lowercased copy of `text` plus, per lowered char, the byte offset of
    // the original char it came from. Lowercasing can expand one char into
    // several; every expansion byte maps back to the same original offset.
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len() + 1);
    for (offset, ch) in text.char_indices() {
        for lc in ch.to_lowercase() {
            let mut buf = [0u8; 4];
            let encoded = lc.encode_utf8(&mut buf);
            for _ in 0..encoded.len() {
                origin.push(offset);
            }
            lowered.push_str(encoded);
        }
    }
    origin.push(text.len());

    let mut html = String::with_capacity(text.len());
    let mut cursor = 0; // byte offset into `text`
    let mut search_from = 0; // byte offset into `lowered`
    while let Some(found) = lowered[search_from..].find(&needle) {
        let lo = search_from + found;
        let hi = lo + needle.len();
        let (start, end) = (origin[lo], origin[hi]);
        if start >= cursor && end > start {
            html.push_str(&escape_html(&text[cursor..start]));
            html.push_str("<mark>");
            html.push_str(&escape_html(&text[start..end]));
            html.push_str("</mark>");
            cursor = end;
        }
        search_from = hi;
    }
    html.push_str(&escape_html(&text[cursor..]));
    html
}
