use super::{Document, ExportSource};
use crate::error::Result;

/// In-memory export for testing.
#[derive(Default)]
pub struct InMemorySource {
    documents: Vec<Document>,
    attachments: Vec<String>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.documents.push(Document::new(name, text));
        self
    }

    pub fn with_attachment(mut self, file_name: impl Into<String>) -> Self {
        self.attachments.push(file_name.into());
        self
    }
}

impl ExportSource for InMemorySource {
    fn documents(&self) -> Result<Vec<Document>> {
        let mut docs = self.documents.clone();
        docs.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(docs)
    }

    fn attachment_names(&self) -> Result<Vec<String>> {
        let mut names = self.attachments.clone();
        names.sort();
        Ok(names)
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    //! Builders for exported document text.

    pub fn note_doc(id: &str, parent_id: &str, title: &str, body: &str) -> String {
        format!(
            "{}\n\n{}\n\nid: {}\nparent_id: {}\ntype_: 1\n",
            title, body, id, parent_id
        )
    }

    pub fn note_doc_with_url(
        id: &str,
        parent_id: &str,
        title: &str,
        body: &str,
        url: &str,
    ) -> String {
        format!(
            "{}\n\n{}\n\nid: {}\nparent_id: {}\nsource_url: {}\ntype_: 1\n",
            title, body, id, parent_id, url
        )
    }

    pub fn folder_doc(id: &str, parent_id: &str, name: &str) -> String {
        format!("{}\n\nid: {}\nparent_id: {}\ntype_: 2\n", name, id, parent_id)
    }

    pub fn attachment_doc(id: &str, file_extension: &str) -> String {
        format!(
            "{}.{}\n\nid: {}\nfile_extension: {}\ntype_: 4\n",
            id, file_extension, id, file_extension
        )
    }

    pub fn tag_doc(id: &str, name: &str) -> String {
        format!("{}\n\nid: {}\ntype_: 5\n", name, id)
    }

    pub fn tag_link_doc(id: &str, tag_id: &str, note_id: &str) -> String {
        format!("id: {}\nnote_id: {}\ntag_id: {}\ntype_: 6\n", id, note_id, tag_id)
    }
}
