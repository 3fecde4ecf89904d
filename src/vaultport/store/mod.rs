//! # Export Sources
//!
//! The converter never reads the file system directly. It works against the
//! [`ExportSource`] trait, which yields the exported documents and the names
//! of the attachment files.
//!
//! ## Implementations
//!
//! - [`fs::DirSource`]: an export directory on disk
//!   - Documents are the top-level `*.md` files, read in file-name order
//!   - Attachments live in a fixed sub-directory (`resources` by default)
//!   - No recursion into other sub-directories
//!
//! - [`memory::InMemorySource`]: documents held in memory, for tests
//!
//! ## Export Layout
//!
//! ```text
//! export/
//! ├── 0b7f...9a0b.md      # one document per note, folder, tag, ...
//! ├── 5c1d...77e2.md
//! └── resources/
//!     └── 9e3a...01cd.png # attachment payloads, named after their id
//! ```

use crate::error::Result;

pub mod fs;
pub mod memory;

/// One exported document: its file name and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// Read-only access to a flat notes export.
pub trait ExportSource {
    /// All exported documents, sorted by name.
    fn documents(&self) -> Result<Vec<Document>>;

    /// File names in the attachments directory, sorted. Empty when the export
    /// has no attachments directory.
    fn attachment_names(&self) -> Result<Vec<String>>;
}

/// First attachment file whose name contains `id`.
pub fn find_attachment<'a>(names: &'a [String], id: &str) -> Option<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .find(|name| name.contains(id))
}
