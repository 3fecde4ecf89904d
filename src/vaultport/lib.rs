//! # Vaultport Architecture
//!
//! Vaultport converts a **flat notes export** (one Markdown document per
//! note, folder, attachment, tag and tag link, each ending in a `key: value`
//! metadata block) into a **vault**: a directory tree of Markdown files with
//! front matter, wiki-style links and a copied attachments folder.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, renders progress, prints results       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade owning source, paths and config of one run   │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per conversion phase                          │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source Layer (store/)                                      │
//! │  - ExportSource trait                                       │
//! │  - DirSource (production), InMemorySource (testing)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Conversion Phases
//!
//! 1. [`commands::tags`]: index tag names from tag definitions
//! 2. [`commands::classify`]: parse every document ([`parser`]) and route it
//!    into the folder, note, attachment and tag-link stores
//! 3. [`commands::relate`]: resolve folder parents, note folders and note tags
//! 4. [`commands::attachments`]: copy the attachments directory
//! 5. [`commands::rewrite`]: front matter and link rewriting per note
//! 6. [`commands::write`]: write each note with its original timestamps
//!
//! Phases run one after another on a single thread. Progress is reported on
//! an optional channel ([`commands::Progress`]) that never blocks the run.
//!
//! ## Errors
//!
//! I/O failures on the export or the vault abort the run ([`error::VaultError`]).
//! Documents that are not vault records, bad timestamps and unresolvable links
//! are not errors: they are skipped, zeroed or given a fallback path.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Conversion phases
//! - [`store`]: Export source abstraction and implementations
//! - [`model`]: Records, folders, notes, attachments and path rules
//! - [`parser`]: Metadata block parser
//! - [`config`]: Conversion options and run paths
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod store;
