use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_EXT: &str = ".md";
const DEFAULT_ATTACHMENTS_DIR: &str = "resources";

/// Conversion options, optionally stored as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultConfig {
    /// Extension of the written note files (e.g. ".md")
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Name of the attachments directory, both in the export and in the vault
    #[serde(default = "default_attachments_dir")]
    pub attachments_dir: String,

    /// Render tags into the note front matter
    #[serde(default = "default_true")]
    pub add_tags: bool,

    /// Render the source URL into the note front matter
    #[serde(default = "default_true")]
    pub add_source_url: bool,
}

fn default_file_ext() -> String {
    DEFAULT_FILE_EXT.to_string()
}

fn default_attachments_dir() -> String {
    DEFAULT_ATTACHMENTS_DIR.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            file_ext: default_file_ext(),
            attachments_dir: default_attachments_dir(),
            add_tags: true,
            add_source_url: true,
        }
    }
}

impl VaultConfig {
    /// Load config from a JSON file, or return defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| VaultError::read(path, e))?;
        let mut config: VaultConfig = serde_json::from_str(&content)?;
        let ext = config.file_ext.clone();
        config.set_file_ext(&ext);
        config.validate()?;
        Ok(config)
    }

    /// Get the file extension (always starts with a dot)
    pub fn get_file_ext(&self) -> &str {
        &self.file_ext
    }

    /// Set the file extension (normalizes to start with a dot)
    pub fn set_file_ext(&mut self, ext: &str) {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
    }

    fn validate(&self) -> Result<()> {
        let dir = self.attachments_dir.trim();
        if dir.is_empty() || dir.contains(['/', '\\']) || dir == "." || dir == ".." {
            return Err(VaultError::Config(format!(
                "attachments_dir must be a plain directory name, got `{}`",
                self.attachments_dir
            )));
        }
        Ok(())
    }
}

/// Source export and destination vault of one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl ConvertPaths {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}
