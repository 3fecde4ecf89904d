//! # Content Rewriting
//!
//! Turns a note's exported content into vault content in two steps:
//!
//! 1. **Front matter**: tags and source URL are prepended as a YAML block.
//! 2. **References**: internal links are rewritten to vault paths.
//!
//! ## Reference Patterns
//!
//! | Pattern                  | Example                     | Rewritten to            |
//! |--------------------------|-----------------------------|-------------------------|
//! | Markdown link / image    | `![pic](:/abc123)`          | `![[abc123.png]]`       |
//! | Markdown link + anchor   | `[see](:/n1#intro)`         | `[[Work/Title#intro]]`  |
//! | Embedded source          | `src=":/<32 hex>"`          | `src="resources/x.png"` |
//!
//! Neither pattern spans a line break. The two patterns are handled by
//! independent passes. Each pass collects all
//! match spans in one forward scan and then substitutes them from the last to
//! the first, so earlier spans keep their offsets.
//!
//! ## Resolution Order
//!
//! 1. Attachment with that id: its file name in the attachments directory.
//! 2. Note with that id: its path relative to the vault root.
//! 3. Note with that id once a `#anchor` suffix is removed (markdown links
//!    only): note path with the anchor appended. Text after a second `#` is
//!    dropped.
//! 4. Anything else: [`FALLBACK_DIR`]`/<id>`, a visible trace of a deleted or
//!    external target.

use crate::config::VaultConfig;
use crate::model::{join_path, Note, Stores};
use crate::store::find_attachment;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Directory used for references that match nothing in the export.
pub const FALLBACK_DIR: &str = "resources";

static MARKDOWN_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(!?)\[([^\]\n]*)\]\(:/([^)\n]*)\)").expect("valid markdown reference regex")
});
static SOURCE_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"src=":/([0-9a-f]{32})""#).expect("valid source reference regex"));

/// What a referenced id points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// File name inside the attachments directory.
    Attachment(String),
    /// Note path relative to the vault root, anchor included.
    Note(String),
    /// Fallback path for an id that matches nothing.
    Unresolved(String),
}

impl Target {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Target::Unresolved(_))
    }
}

/// Resolves referenced ids against the stores of one run.
pub struct LinkResolver<'a> {
    stores: &'a Stores,
    attachment_names: &'a [String],
}

impl<'a> LinkResolver<'a> {
    pub fn new(stores: &'a Stores, attachment_names: &'a [String]) -> Self {
        Self {
            stores,
            attachment_names,
        }
    }

    pub fn resolve(&self, id: &str, allow_anchor: bool) -> Target {
        if let Some(attachment) = self.stores.attachments.get(id) {
            let file_name = match find_attachment(self.attachment_names, id) {
                Some(name) => name.to_string(),
                None => {
                    warn!("no file found for attachment {}", id);
                    attachment.fallback_file_name()
                }
            };
            return Target::Attachment(file_name);
        }

        if let Some(note) = self.stores.notes.get(id) {
            return Target::Note(self.stores.note_relative_path(note));
        }

        if allow_anchor {
            // Only the segment up to a second `#` is kept as the anchor.
            let mut parts = id.split('#');
            if let (Some(base), Some(anchor)) = (parts.next(), parts.next()) {
                if let Some(note) = self.stores.notes.get(base) {
                    return Target::Note(format!(
                        "{}#{}",
                        self.stores.note_relative_path(note),
                        anchor
                    ));
                }
            }
        }

        debug!("unresolved reference {}", id);
        Target::Unresolved(format!("{}/{}", FALLBACK_DIR, id))
    }
}

/// Rewritten note content and the number of references left unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub content: String,
    pub unresolved: usize,
}

/// Applies front matter and reference rewriting to one note.
pub fn render_note(note: &Note, resolver: &LinkResolver, config: &VaultConfig) -> Rewritten {
    let content = with_front_matter(note, config);
    let (content, md_unresolved) = rewrite_markdown_refs(&content, resolver);
    let (content, src_unresolved) =
        rewrite_source_refs(&content, resolver, &config.attachments_dir);
    Rewritten {
        content,
        unresolved: md_unresolved + src_unresolved,
    }
}

/// Front matter block for the note, or `None` when there is nothing to add.
pub fn front_matter(note: &Note, config: &VaultConfig) -> Option<String> {
    let mut lines = String::new();
    if config.add_tags && !note.tags.is_empty() {
        lines.push_str(&format!("tags: {}\n", note.tags.join(", ")));
    }
    if config.add_source_url && !note.source_url.is_empty() {
        lines.push_str(&format!("source_url: {}\n", note.source_url));
    }

    if lines.is_empty() {
        None
    } else {
        Some(format!("---\n{}---", lines))
    }
}

pub fn with_front_matter(note: &Note, config: &VaultConfig) -> String {
    match front_matter(note, config) {
        Some(block) => format!("{}\n\n{}", block, note.content),
        None => note.content.clone(),
    }
}

/// Rewrites `[label](:/id)` and `![label](:/id)` into `[[path]]` / `![[path]]`.
pub fn rewrite_markdown_refs(content: &str, resolver: &LinkResolver) -> (String, usize) {
    let spans: Vec<(Range<usize>, String)> = MARKDOWN_REF_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let marker = caps.get(1)?;
            // A link title may follow the id: `(:/id "title")`.
            let id = caps.get(3)?.as_str().split(' ').next().unwrap_or_default();
            Some((marker.end()..whole.end(), id.to_string()))
        })
        .collect();

    apply_reverse(content, spans, |id| {
        let target = resolver.resolve(id, true);
        let path = match &target {
            Target::Attachment(p) | Target::Note(p) | Target::Unresolved(p) => p.clone(),
        };
        (format!("[[{}]]", path), target.is_unresolved())
    })
}

/// Rewrites HTML `src=":/<id>"` attributes into vault paths.
pub fn rewrite_source_refs(
    content: &str,
    resolver: &LinkResolver,
    attachments_dir: &str,
) -> (String, usize) {
    let spans: Vec<(Range<usize>, String)> = SOURCE_REF_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let id = caps.get(1)?;
            Some((whole.range(), id.as_str().to_string()))
        })
        .collect();

    apply_reverse(content, spans, |id| {
        let target = resolver.resolve(id, false);
        let path = match &target {
            Target::Attachment(file) => join_path(attachments_dir, file),
            Target::Note(p) | Target::Unresolved(p) => p.clone(),
        };
        (format!("src=\"{}\"", path), target.is_unresolved())
    })
}

/// Replaces spans from the last to the first. `spans` must be in ascending,
/// non-overlapping order, as produced by a single forward scan.
fn apply_reverse<F>(
    content: &str,
    spans: Vec<(Range<usize>, String)>,
    mut replace: F,
) -> (String, usize)
where
    F: FnMut(&str) -> (String, bool),
{
    let mut out = content.to_string();
    let mut unresolved = 0;
    for (range, id) in spans.into_iter().rev() {
        let (replacement, is_unresolved) = replace(&id);
        if is_unresolved {
            unresolved += 1;
        }
        out.replace_range(range, &replacement);
    }
    (out, unresolved)
}
