use crate::error::Result;
use crate::model::RecordKind;
use crate::parser::parse_document;
use crate::store::{Document, ExportSource};
use log::debug;
use std::collections::HashMap;

/// Tag id to display name.
pub type TagIndex = HashMap<String, String>;

/// Reads every tag definition of the export. Must run before classification
/// so tag names are known when associations are read.
pub fn build_index<S: ExportSource>(source: &S) -> Result<TagIndex> {
    let documents = source.documents()?;
    let index = index_documents(&documents);
    debug!("indexed {} tags", index.len());
    Ok(index)
}

pub fn index_documents(documents: &[Document]) -> TagIndex {
    documents
        .iter()
        .filter_map(|doc| parse_document(&doc.text))
        .filter(|record| record.kind == RecordKind::TagDefinition)
        .filter_map(|record| {
            let name = display_name(&record.name);
            if name.is_empty() {
                None
            } else {
                Some((record.id, name.to_string()))
            }
        })
        .collect()
}

/// Tag names are exported with their `#` prefix.
pub fn display_name(name: &str) -> &str {
    name.strip_prefix('#').unwrap_or(name)
}
