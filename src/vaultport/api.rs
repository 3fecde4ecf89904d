//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for conversions, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Owns** the export source, the run paths and the config for one run
//! - **Dispatches** to [`commands::convert`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never prints and never exits; that belongs to the binary.
//!
//! ## Generic Over ExportSource
//!
//! `VaultApi<S: ExportSource>` is generic over where documents come from:
//! - Production: `VaultApi<DirSource>`
//! - Testing: `VaultApi<InMemorySource>`

use crate::commands::{self, CmdResult, Progress};
use crate::config::{ConvertPaths, VaultConfig};
use crate::error::Result;
use crate::store::fs::DirSource;
use crate::store::ExportSource;

pub struct VaultApi<S: ExportSource> {
    source: S,
    paths: ConvertPaths,
    config: VaultConfig,
}

impl VaultApi<DirSource> {
    /// API over an export directory on disk.
    pub fn from_dir(paths: ConvertPaths, config: VaultConfig) -> Self {
        let source = DirSource::new(&paths.source, &config.attachments_dir);
        Self::new(source, paths, config)
    }
}

impl<S: ExportSource> VaultApi<S> {
    pub fn new(source: S, paths: ConvertPaths, config: VaultConfig) -> Self {
        Self {
            source,
            paths,
            config,
        }
    }

    pub fn paths(&self) -> &ConvertPaths {
        &self.paths
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Converts the export and writes the vault.
    pub fn convert(&self, progress: Progress) -> Result<CmdResult> {
        commands::convert::run(&self.source, &self.paths, &self.config, false, progress)
    }

    /// Runs every phase without touching the destination.
    pub fn preview(&self, progress: Progress) -> Result<CmdResult> {
        commands::convert::run(&self.source, &self.paths, &self.config, true, progress)
    }
}
