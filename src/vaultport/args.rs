use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultport", version)]
#[command(about = "Convert a flat notes export into a folder-based Markdown vault", long_about = None)]
pub struct Cli {
    /// Directory holding the exported documents and the attachments folder
    pub source: PathBuf,

    /// Directory the vault is written to
    pub destination: PathBuf,

    /// Config file (JSON). Defaults to the user config directory
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extension of the written notes (e.g. md, markdown)
    #[arg(long)]
    pub file_ext: Option<String>,

    /// Do not render tags into the front matter
    #[arg(long)]
    pub no_tags: bool,

    /// Do not render the source URL into the front matter
    #[arg(long)]
    pub no_source_url: bool,

    /// Print the paths that would be written without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Hide the progress display
    #[arg(short, long)]
    pub quiet: bool,
}
