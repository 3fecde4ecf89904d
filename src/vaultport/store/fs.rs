use super::{Document, ExportSource};
use crate::error::{Result, VaultError};
use log::trace;
use std::fs;
use std::path::{Path, PathBuf};

const DOCUMENT_EXT: &str = "md";

pub struct DirSource {
    root: PathBuf,
    attachments_dir: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, attachments_dir: &str) -> Self {
        Self {
            root: root.into(),
            attachments_dir: attachments_dir.to_string(),
        }
    }

    pub fn attachments_path(&self) -> PathBuf {
        self.root.join(&self.attachments_dir)
    }

    fn is_document(path: &Path) -> bool {
        path.is_file() && path.extension().is_some_and(|ext| ext == DOCUMENT_EXT)
    }

    fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(dir).map_err(|e| VaultError::read(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| VaultError::read(dir, e))?;
            paths.push(entry.path());
        }
        paths.sort();
        Ok(paths)
    }
}

impl ExportSource for DirSource {
    fn documents(&self) -> Result<Vec<Document>> {
        if !self.root.is_dir() {
            return Err(VaultError::SourceNotFound(self.root.clone()));
        }

        let mut documents = Vec::new();
        for path in Self::sorted_entries(&self.root)? {
            if !Self::is_document(&path) {
                trace!("skipping {}", path.display());
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|e| VaultError::read(&path, e))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            documents.push(Document { name, text });
        }
        Ok(documents)
    }

    fn attachment_names(&self) -> Result<Vec<String>> {
        let dir = self.attachments_path();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        Ok(Self::sorted_entries(&dir)?
            .into_iter()
            .filter(|path| path.is_file())
            .filter_map(|path| path.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::find_attachment;

    #[test]
    fn test_documents_are_top_level_md_files_in_name_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("b.md"), "B\n\nid: b\ntype_: 2").unwrap();
        fs::write(root.join("a.md"), "A\n\nid: a\ntype_: 2").unwrap();
        fs::write(root.join("notes.txt"), "ignored").unwrap();
        fs::create_dir_all(root.join("resources")).unwrap();
        fs::write(root.join("resources").join("c.md"), "nested").unwrap();

        let source = DirSource::new(root, "resources");
        let docs = source.documents().unwrap();

        let names: Vec<_> = docs.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
        assert!(docs[0].text.starts_with("A\n"));
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(temp_dir.path().join("nope"), "resources");
        assert!(matches!(
            source.documents(),
            Err(VaultError::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_attachment_names_and_lookup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let res = temp_dir.path().join("resources");
        fs::create_dir_all(res.join("sub")).unwrap();
        fs::write(res.join("abc123.png"), [0u8; 4]).unwrap();
        fs::write(res.join("def456.pdf"), [0u8; 4]).unwrap();

        let source = DirSource::new(temp_dir.path(), "resources");
        let names = source.attachment_names().unwrap();
        assert_eq!(
            names,
            vec!["abc123.png".to_string(), "def456.pdf".to_string()]
        );
        assert_eq!(find_attachment(&names, "def456"), Some("def456.pdf"));
        assert_eq!(find_attachment(&names, "zzz"), None);
    }

    #[test]
    fn test_missing_attachments_dir_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(temp_dir.path(), "resources");
        assert!(source.attachment_names().unwrap().is_empty());
    }
}
