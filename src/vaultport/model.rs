use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Kind of entity an exported document describes, as declared by its `type_` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Note,
    Folder,
    Attachment,
    TagDefinition,
    TagAssociation,
}

impl RecordKind {
    /// Maps the numeric `type_` value of the export. Other types (settings,
    /// deletion markers, ...) are not part of a vault.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Note),
            2 => Some(Self::Folder),
            4 => Some(Self::Attachment),
            5 => Some(Self::TagDefinition),
            6 => Some(Self::TagAssociation),
            _ => None,
        }
    }
}

/// One parsed exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub id: String,
    pub kind: RecordKind,
    pub parent_id: String,
    pub name: String,
    /// Note content without the title line; empty for every other kind.
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub source_url: String,
    pub file_extension: String,
    pub tag_id: String,
    pub tag_note_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub parent_id: String,
    /// Resolved parent folder id. Only set when the parent exists.
    pub parent: Option<String>,
}

impl From<RawRecord> for Folder {
    fn from(record: RawRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            parent_id: record.parent_id,
            parent: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub name: String,
    pub parent_id: String,
    /// Resolved folder id. `None` places the note at the vault root.
    pub folder: Option<String>,
    pub content: String,
    pub source_url: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RawRecord> for Note {
    fn from(record: RawRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            parent_id: record.parent_id,
            folder: None,
            content: record.body,
            source_url: record.source_url,
            tags: Vec::new(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: String,
    pub file_extension: String,
}

impl Attachment {
    /// File name to use when the attachments directory has no file for this id.
    pub fn fallback_file_name(&self) -> String {
        if self.file_extension.is_empty() {
            self.id.clone()
        } else {
            format!("{}.{}", self.id, self.file_extension)
        }
    }
}

impl From<RawRecord> for Attachment {
    fn from(record: RawRecord) -> Self {
        Self {
            id: record.id,
            file_extension: record.file_extension,
        }
    }
}

/// Id-keyed tables filled by one conversion run.
#[derive(Debug, Default)]
pub struct Stores {
    pub folders: HashMap<String, Folder>,
    pub notes: HashMap<String, Note>,
    pub attachments: HashMap<String, Attachment>,
    /// Tag display names per note id, in the order associations were read.
    pub note_tags: HashMap<String, Vec<String>>,
}

impl Stores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of a folder relative to the vault root, built from sanitized names.
    ///
    /// Walks the resolved parent chain, so it only terminates for acyclic
    /// folder trees. Unknown ids yield an empty path.
    pub fn folder_relative_path(&self, folder_id: &str) -> String {
        let Some(folder) = self.folders.get(folder_id) else {
            return String::new();
        };
        let name = sanitize_name(&folder.name);
        match &folder.parent {
            Some(parent) => join_path(&self.folder_relative_path(parent), &name),
            None => name,
        }
    }

    /// Path of a note relative to the vault root, without file extension.
    pub fn note_relative_path(&self, note: &Note) -> String {
        let name = sanitize_name(&note.name);
        match &note.folder {
            Some(folder_id) => join_path(&self.folder_relative_path(folder_id), &name),
            None => name,
        }
    }
}

/// Joins two `/`-separated path fragments, skipping empty ones.
pub fn join_path(base: &str, name: &str) -> String {
    match (base.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{}/{}", base, name),
    }
}

/// Replaces characters that are not allowed in file names on common file systems.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '*' => out.push('.'),
            '"' => out.push_str("''"),
            '\\' => out.push('-'),
            '/' => out.push('_'),
            '<' => out.push(','),
            '>' => out.push('.'),
            ':' => out.push(';'),
            '|' => out.push('-'),
            '?' => out.push('!'),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str, parent: Option<&str>) -> Folder {
        Folder {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent.unwrap_or_default().to_string(),
            parent: parent.map(str::to_string),
        }
    }

    fn note(name: &str, folder: Option<&str>) -> Note {
        Note {
            id: "n1".to_string(),
            name: name.to_string(),
            parent_id: folder.unwrap_or_default().to_string(),
            folder: folder.map(str::to_string),
            content: String::new(),
            source_url: String::new(),
            tags: Vec::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_sanitize_table() {
        assert_eq!(sanitize_name(r#"a*b"c\d/e<f>g:h|i?"#), "a.b''c-d_e,f.g;h-i!");
        assert_eq!(sanitize_name("Plain name"), "Plain name");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for input in [r#"What? "Now" / then"#, "a:b|c", "***", "<>", "ok"] {
            let once = sanitize_name(input);
            assert_eq!(sanitize_name(&once), once);
        }
    }

    #[test]
    fn test_root_folder_path_is_its_name() {
        let mut stores = Stores::new();
        stores
            .folders
            .insert("f1".into(), folder("f1", "Work: 2024", None));
        assert_eq!(stores.folder_relative_path("f1"), "Work; 2024");
    }

    #[test]
    fn test_nested_folder_path_joins_parent() {
        let mut stores = Stores::new();
        stores.folders.insert("a".into(), folder("a", "A", None));
        stores.folders.insert("b".into(), folder("b", "B/C", Some("a")));
        stores.folders.insert("c".into(), folder("c", "D", Some("b")));

        assert_eq!(stores.folder_relative_path("c"), "A/B_C/D");
        assert_eq!(
            stores.folder_relative_path("c"),
            join_path(&stores.folder_relative_path("b"), &sanitize_name("D"))
        );
    }

    #[test]
    fn test_note_path_without_folder_is_root_level() {
        let stores = Stores::new();
        assert_eq!(stores.note_relative_path(&note("Why?", None)), "Why!");
    }

    #[test]
    fn test_note_path_with_folder() {
        let mut stores = Stores::new();
        stores.folders.insert("f1".into(), folder("f1", "Work", None));
        assert_eq!(stores.note_relative_path(&note("Title", Some("f1"))), "Work/Title");
    }

    #[test]
    fn test_record_kind_codes() {
        assert_eq!(RecordKind::from_code(1), Some(RecordKind::Note));
        assert_eq!(RecordKind::from_code(6), Some(RecordKind::TagAssociation));
        assert_eq!(RecordKind::from_code(3), None);
        assert_eq!(RecordKind::from_code(13), None);
    }

    #[test]
    fn test_attachment_fallback_file_name() {
        let with_ext = Attachment {
            id: "abc".into(),
            file_extension: "png".into(),
        };
        let without = Attachment {
            id: "abc".into(),
            file_extension: String::new(),
        };
        assert_eq!(with_ext.fallback_file_name(), "abc.png");
        assert_eq!(without.fallback_file_name(), "abc");
    }
}
