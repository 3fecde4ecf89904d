use crate::error::{Result, VaultError};
use crate::model::{Note, Stores};
use chrono::{DateTime, Utc};
use log::warn;
use std::fs::{self, FileTimes, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Destination file of a note: vault root, folder path, sanitized name and
/// file extension.
///
/// Empty, `.` and `..` segments are dropped so the file stays under
/// `vault_root`.
pub fn note_path(stores: &Stores, note: &Note, vault_root: &Path, file_ext: &str) -> PathBuf {
    let relative = format!("{}{}", stores.note_relative_path(note), file_ext);
    let mut path = vault_root.to_path_buf();
    for segment in relative.split('/') {
        if matches!(segment, "" | "." | "..") {
            warn!("note {}: skipping path segment `{}`", note.id, segment);
            continue;
        }
        path.push(segment);
    }
    path
}

/// Writes note content and stamps the file with the note's own times.
///
/// Missing parent directories are created. The access time is set to the
/// creation time and the modification time to the update time; a note
/// without timestamps gets the Unix epoch.
pub fn write_note(path: &Path, content: &str, note: &Note) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| VaultError::write(dir, e))?;
    }
    fs::write(path, content).map_err(|e| VaultError::write(path, e))?;
    set_file_times(path, note.created_at, note.updated_at)
}

fn set_file_times(path: &Path, accessed: DateTime<Utc>, modified: DateTime<Utc>) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|e| VaultError::write(path, e))?;
    let times = FileTimes::new()
        .set_accessed(SystemTime::from(accessed))
        .set_modified(SystemTime::from(modified));
    file.set_times(times).map_err(|e| VaultError::write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Folder;
    use chrono::TimeZone;

    fn note(name: &str, folder: Option<&str>) -> Note {
        Note {
            id: "n1".into(),
            name: name.into(),
            parent_id: folder.unwrap_or_default().into(),
            folder: folder.map(str::to_string),
            content: "Hello world".into(),
            source_url: String::new(),
            tags: Vec::new(),
            created_at: Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2021, 6, 7, 8, 9, 10).unwrap(),
        }
    }

    fn stores_with_folders() -> Stores {
        let mut stores = Stores::new();
        stores.folders.insert(
            "f1".into(),
            Folder {
                id: "f1".into(),
                name: "Work".into(),
                parent_id: String::new(),
                parent: None,
            },
        );
        stores.folders.insert(
            "f2".into(),
            Folder {
                id: "f2".into(),
                name: "A/B".into(),
                parent_id: "f1".into(),
                parent: Some("f1".into()),
            },
        );
        stores
    }

    #[test]
    fn test_note_path_under_folders() {
        let stores = stores_with_folders();
        let path = note_path(&stores, &note("Q: why?", Some("f2")), Path::new("/vault"), ".md");
        assert_eq!(path, Path::new("/vault/Work/A_B/Q; why!.md"));
    }

    #[test]
    fn test_note_path_at_root() {
        let stores = Stores::new();
        let path = note_path(&stores, &note("Title", None), Path::new("/vault"), ".md");
        assert_eq!(path, Path::new("/vault/Title.md"));
    }

    #[test]
    fn test_dot_folders_stay_inside_vault() {
        let mut stores = Stores::new();
        stores.folders.insert(
            "up".into(),
            Folder {
                id: "up".into(),
                name: "..".into(),
                parent_id: String::new(),
                parent: None,
            },
        );
        stores.folders.insert(
            "here".into(),
            Folder {
                id: "here".into(),
                name: ".".into(),
                parent_id: "up".into(),
                parent: Some("up".into()),
            },
        );
        let path = note_path(&stores, &note("Title", Some("here")), Path::new("/vault"), ".md");
        assert_eq!(path, Path::new("/vault/Title.md"));
    }

    #[test]
    fn test_write_creates_dirs_and_sets_times() {
        let temp_dir = tempfile::tempdir().unwrap();
        let stores = stores_with_folders();
        let n = note("Title", Some("f2"));
        let path = note_path(&stores, &n, temp_dir.path(), ".md");

        write_note(&path, &n.content, &n).unwrap();
        // Existing directories are fine.
        write_note(&path, "again", &n).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "again");
        let modified = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(modified, SystemTime::from(n.updated_at));
    }

    #[test]
    fn test_epoch_timestamps_are_written() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut n = note("Old", None);
        n.created_at = DateTime::<Utc>::UNIX_EPOCH;
        n.updated_at = DateTime::<Utc>::UNIX_EPOCH;
        let path = temp_dir.path().join("Old.md");

        write_note(&path, "x", &n).unwrap();
        let modified = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(modified, SystemTime::UNIX_EPOCH);
    }
}
