//! # Metadata Parser
//!
//! Every exported document is a Markdown body followed by a metadata block:
//!
//! ```text
//! My note title
//!
//! Body text...
//!
//! id: 0b7f6c2a9e4d4f1f8a3b5c6d7e8f9a0b
//! parent_id: 5c1d...
//! type_: 1
//! user_created_time: 2021-03-04T10:11:12.000Z
//! ```
//!
//! The metadata block starts at the **last** blank line of the trimmed
//! document. Documents without a blank line (tag associations have no body)
//! are read as metadata from the first byte.
//!
//! Keys are matched at the start of a line, case sensitive, and the first
//! occurrence of a key wins. A document needs both `id` and a supported
//! `type_` to become a [`RawRecord`]; anything else in the export is skipped.

use crate::model::{RawRecord, RecordKind};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Parses one exported document. Returns `None` when the document is not a
/// record this converter knows about.
pub fn parse_document(text: &str) -> Option<RawRecord> {
    let data = text.trim();
    let offset = metadata_offset(data);
    let fields = scan_fields(&data[offset..]);

    let id = fields.get("id").filter(|v| !v.is_empty())?.to_string();
    let kind = fields
        .get("type_")
        .and_then(|v| v.parse::<u32>().ok())
        .and_then(RecordKind::from_code)?;

    let name = data.lines().next().unwrap_or_default().trim().to_string();
    let body = if kind == RecordKind::Note {
        extract_body(&data[..offset])
    } else {
        String::new()
    };

    let field = |key: &str| fields.get(key).map(|v| v.to_string()).unwrap_or_default();

    Some(RawRecord {
        id,
        kind,
        parent_id: field("parent_id"),
        name,
        body,
        created_at: parse_timestamp(fields.get("user_created_time").copied()),
        updated_at: parse_timestamp(fields.get("user_updated_time").copied()),
        source_url: field("source_url"),
        file_extension: field("file_extension"),
        tag_id: field("tag_id"),
        tag_note_id: field("note_id"),
    })
}

/// Byte offset where the metadata block starts in trimmed document text.
fn metadata_offset(data: &str) -> usize {
    match data.rfind("\n\n") {
        Some(index) if index > 0 => index,
        _ => 0,
    }
}

fn scan_fields(block: &str) -> HashMap<&str, &str> {
    let mut fields = HashMap::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            if key.is_empty() || key.contains(char::is_whitespace) {
                continue;
            }
            let value = value.trim_start_matches(' ').trim_end();
            fields.entry(key).or_insert(value);
        }
    }
    fields
}

/// Drops the title line and trims the rest.
fn extract_body(content: &str) -> String {
    match content.split_once('\n') {
        Some((_, rest)) => rest.trim().to_string(),
        None => String::new(),
    }
}

/// Missing or malformed timestamps fall back to the Unix epoch.
fn parse_timestamp(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
