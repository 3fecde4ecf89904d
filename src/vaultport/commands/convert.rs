use super::rewrite::{render_note, LinkResolver};
use super::{attachments, classify, relate, tags, write};
use super::{CmdMessage, CmdResult, ConvertStats, Phase, Progress};
use crate::config::{ConvertPaths, VaultConfig};
use crate::error::Result;
use crate::store::ExportSource;
use log::{info, warn};
use std::collections::HashSet;

/// Runs the whole conversion.
///
/// Phases run strictly in order: tag index, classification, relationship
/// rebuild, attachment copy, then rewrite and write per note. `progress` is
/// dropped when the run ends, which closes the progress channel. With
/// `dry_run` nothing is copied or written; the result still lists every
/// destination path.
pub fn run<S: ExportSource>(
    source: &S,
    paths: &ConvertPaths,
    config: &VaultConfig,
    dry_run: bool,
    progress: Progress,
) -> Result<CmdResult> {
    let mut stats = ConvertStats::default();

    let tag_index = tags::build_index(source)?;
    let mut stores = classify::run(source, &tag_index, &progress, &mut stats)?;
    relate::run(&mut stores, &progress);

    if !dry_run {
        stats.copied_files = attachments::copy_dir(
            &paths.source.join(&config.attachments_dir),
            &paths.destination.join(&config.attachments_dir),
        )?;
    }

    let attachment_names = source.attachment_names()?;
    let resolver = LinkResolver::new(&stores, &attachment_names);

    let mut ids: Vec<&String> = stores.notes.keys().collect();
    ids.sort();

    let mut result = CmdResult::default();
    let mut seen = HashSet::new();
    let mut note_paths = Vec::with_capacity(ids.len());

    for id in ids {
        let note = &stores.notes[id];
        let rendered = render_note(note, &resolver, config);
        stats.unresolved_links += rendered.unresolved;

        let path = write::note_path(&stores, note, &paths.destination, config.get_file_ext());
        if !seen.insert(path.clone()) {
            warn!("note {} overwrites {}", note.id, path.display());
            result.add_message(CmdMessage::warning(format!(
                "Duplicate note path, later note wins: {}",
                path.display()
            )));
        }
        if !dry_run {
            write::write_note(&path, &rendered.content, note)?;
        }
        note_paths.push(path);
        progress.tick(Phase::Saving);
    }
    drop(progress);

    info!(
        "converted {} notes in {} folders ({} unresolved links)",
        stats.notes, stats.folders, stats.unresolved_links
    );

    if stats.unresolved_links > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} references could not be resolved and point to resources/",
            stats.unresolved_links
        )));
    }
    let verb = if dry_run { "Would write" } else { "Wrote" };
    result.add_message(CmdMessage::success(format!(
        "{} {} notes, {} folders, {} attachments to {}",
        verb,
        stats.notes,
        stats.folders,
        stats.attachments,
        paths.destination.display()
    )));

    result.stats = stats;
    Ok(result.with_note_paths(note_paths))
}
