use super::tags::TagIndex;
use super::{ConvertStats, Phase, Progress};
use crate::error::Result;
use crate::model::{RawRecord, RecordKind, Stores};
use crate::parser::parse_document;
use crate::store::{Document, ExportSource};
use log::{debug, trace};

/// Second pass over the export: routes every record into its store.
pub fn run<S: ExportSource>(
    source: &S,
    tags: &TagIndex,
    progress: &Progress,
    stats: &mut ConvertStats,
) -> Result<Stores> {
    let documents = source.documents()?;
    Ok(classify_documents(&documents, tags, progress, stats))
}

pub fn classify_documents(
    documents: &[Document],
    tags: &TagIndex,
    progress: &Progress,
    stats: &mut ConvertStats,
) -> Stores {
    let mut stores = Stores::new();

    for doc in documents {
        stats.documents += 1;
        match parse_document(&doc.text) {
            Some(record) => route(&mut stores, record, tags, stats),
            None => {
                trace!("{} is not a vault record", doc.name);
                stats.skipped += 1;
            }
        }
        progress.tick(Phase::Scanning);
    }

    stats.folders = stores.folders.len();
    stats.notes = stores.notes.len();
    stats.attachments = stores.attachments.len();
    stores
}

fn route(stores: &mut Stores, record: RawRecord, tags: &TagIndex, stats: &mut ConvertStats) {
    match record.kind {
        RecordKind::Note => {
            stores.notes.insert(record.id.clone(), record.into());
        }
        RecordKind::Folder => {
            stores.folders.insert(record.id.clone(), record.into());
        }
        RecordKind::Attachment => {
            stores.attachments.insert(record.id.clone(), record.into());
        }
        RecordKind::TagAssociation => match tags.get(&record.tag_id) {
            Some(name) => {
                stores
                    .note_tags
                    .entry(record.tag_note_id)
                    .or_default()
                    .push(name.clone());
                stats.tag_links += 1;
            }
            None => debug!(
                "tag {} of note {} has no definition",
                record.tag_id, record.tag_note_id
            ),
        },
        RecordKind::TagDefinition => {}
    }
}
