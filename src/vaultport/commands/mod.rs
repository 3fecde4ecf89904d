use std::path::PathBuf;
use std::sync::mpsc::Sender;

pub mod attachments;
pub mod classify;
pub mod convert;
pub mod relate;
pub mod rewrite;
pub mod tags;
pub mod write;

/// Unit of work reported on the progress channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Scanning,
    AddingMetadata,
    RebuildingFolders,
    RebuildingNotes,
    Saving,
}

impl Phase {
    pub fn description(&self) -> &'static str {
        match self {
            Phase::Scanning => "Extracting metadata",
            Phase::AddingMetadata => "Adding metadata to notes",
            Phase::RebuildingFolders => "Rebuilding folders",
            Phase::RebuildingNotes => "Rebuilding notes",
            Phase::Saving => "Saving notes",
        }
    }
}

/// Write side of the progress channel.
///
/// Sending never blocks and a disconnected receiver is ignored. Dropping the
/// value closes the channel.
#[derive(Debug, Default)]
pub struct Progress {
    sender: Option<Sender<Phase>>,
}

impl Progress {
    pub fn new(sender: Sender<Phase>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn tick(&self, phase: Phase) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(phase);
        }
    }
}

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Counters collected over one conversion run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConvertStats {
    pub documents: usize,
    pub skipped: usize,
    pub folders: usize,
    pub notes: usize,
    pub attachments: usize,
    pub tag_links: usize,
    pub copied_files: usize,
    pub unresolved_links: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub stats: ConvertStats,
    /// Destination of every note, in write order.
    pub note_paths: Vec<PathBuf>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_note_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.note_paths = paths;
        self
    }
}
