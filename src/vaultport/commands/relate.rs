//! Rebuilds the folder tree and the note to folder assignment from parent ids.
//!
//! Parent ids are foreign keys into the folder store. A parent that is not in
//! the export leaves the folder (or note) at the vault root. The input is
//! assumed to be acyclic; a cycle in folder parents makes path computation in
//! [`Stores::folder_relative_path`] recurse without end.

use super::{Phase, Progress};
use crate::model::Stores;
use log::debug;
use std::collections::HashSet;

pub fn run(stores: &mut Stores, progress: &Progress) {
    link_folders(stores, progress);
    link_notes(stores, progress);
    attach_tags(stores, progress);
}

pub fn link_folders(stores: &mut Stores, progress: &Progress) {
    let known: HashSet<String> = stores.folders.keys().cloned().collect();

    for folder in stores.folders.values_mut() {
        if folder.parent_id.is_empty() {
            continue;
        }
        if known.contains(&folder.parent_id) {
            folder.parent = Some(folder.parent_id.clone());
        } else {
            debug!(
                "folder {} has unknown parent {}; treating it as a root",
                folder.id, folder.parent_id
            );
            folder.parent = None;
        }
        progress.tick(Phase::RebuildingFolders);
    }
}

pub fn link_notes(stores: &mut Stores, progress: &Progress) {
    let folders = &stores.folders;

    for note in stores.notes.values_mut() {
        if note.parent_id.is_empty() {
            continue;
        }
        if folders.contains_key(&note.parent_id) {
            note.folder = Some(note.parent_id.clone());
        } else {
            debug!(
                "note {} has unknown folder {}; writing it at the vault root",
                note.id, note.parent_id
            );
            note.folder = None;
        }
        progress.tick(Phase::RebuildingNotes);
    }
}

pub fn attach_tags(stores: &mut Stores, progress: &Progress) {
    for (id, note) in stores.notes.iter_mut() {
        note.tags = stores.note_tags.get(id).cloned().unwrap_or_default();
        progress.tick(Phase::AddingMetadata);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::classify::classify_documents;
    use crate::commands::tags::index_documents;
    use crate::commands::ConvertStats;
    use crate::model::sanitize_name;
    use crate::store::memory::fixtures::*;
    use crate::store::Document;

    fn build(docs: Vec<(&str, String)>) -> Stores {
        let docs: Vec<Document> = docs
            .into_iter()
            .map(|(name, text)| Document::new(name, text))
            .collect();
        let tags = index_documents(&docs);
        let mut stores = classify_documents(
            &docs,
            &tags,
            &Progress::silent(),
            &mut ConvertStats::default(),
        );
        run(&mut stores, &Progress::silent());
        stores
    }

    #[test]
    fn test_folder_tree_is_rebuilt() {
        let stores = build(vec![
            ("a.md", folder_doc("a", "", "Projects")),
            ("b.md", folder_doc("b", "a", "Client: X")),
            ("c.md", folder_doc("c", "b", "2024")),
        ]);

        assert_eq!(stores.folders["a"].parent, None);
        assert_eq!(stores.folders["b"].parent.as_deref(), Some("a"));
        assert_eq!(stores.folder_relative_path("c"), "Projects/Client; X/2024");

        // Every folder path is its parent's path plus its own sanitized name.
        for folder in stores.folders.values() {
            let expected = match &folder.parent {
                Some(parent) => format!(
                    "{}/{}",
                    stores.folder_relative_path(parent),
                    sanitize_name(&folder.name)
                ),
                None => sanitize_name(&folder.name),
            };
            assert_eq!(stores.folder_relative_path(&folder.id), expected);
        }
    }

    #[test]
    fn test_dangling_folder_parent_becomes_root() {
        let stores = build(vec![("b.md", folder_doc("b", "gone", "Orphan"))]);
        assert_eq!(stores.folders["b"].parent, None);
        assert_eq!(stores.folder_relative_path("b"), "Orphan");
    }

    #[test]
    fn test_note_assigned_to_folder() {
        let stores = build(vec![
            ("f1.md", folder_doc("f1", "", "Work")),
            ("n1.md", note_doc("n1", "f1", "Title", "Hello world")),
        ]);
        let note = &stores.notes["n1"];
        assert_eq!(note.folder.as_deref(), Some("f1"));
        assert_eq!(stores.note_relative_path(note), "Work/Title");
    }

    #[test]
    fn test_note_with_unknown_folder_is_root_level() {
        let stores = build(vec![("n1.md", note_doc("n1", "missing", "Loose", "x"))]);
        let note = &stores.notes["n1"];
        assert_eq!(note.folder, None);
        assert_eq!(stores.note_relative_path(note), "Loose");
    }

    #[test]
    fn test_tags_attached_to_notes() {
        let stores = build(vec![
            ("n1.md", note_doc("n1", "", "Tagged", "x")),
            ("n2.md", note_doc("n2", "", "Untagged", "y")),
            ("t1.md", tag_doc("t1", "#project")),
            ("a1.md", tag_link_doc("a1", "t1", "n1")),
        ]);
        assert_eq!(stores.notes["n1"].tags, vec!["project"]);
        assert!(stores.notes["n2"].tags.is_empty());
    }

    #[test]
    fn test_progress_per_resolved_item() {
        let docs = vec![
            Document::new("a.md", folder_doc("a", "", "A")),
            Document::new("b.md", folder_doc("b", "a", "B")),
            Document::new("n.md", note_doc("n", "b", "N", "x")),
        ];
        let mut stores = classify_documents(
            &docs,
            &index_documents(&docs),
            &Progress::silent(),
            &mut ConvertStats::default(),
        );
        let (tx, rx) = std::sync::mpsc::channel();
        let progress = Progress::new(tx);
        run(&mut stores, &progress);
        drop(progress);

        let phases: Vec<Phase> = rx.iter().collect();
        let count = |p: Phase| phases.iter().filter(|x| **x == p).count();
        assert_eq!(count(Phase::RebuildingFolders), 1);
        assert_eq!(count(Phase::RebuildingNotes), 1);
        assert_eq!(count(Phase::AddingMetadata), 1);
    }
}
