use clap::Parser;
use colored::*;
use console::Term;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use vaultport::api::VaultApi;
use vaultport::commands::{CmdMessage, MessageLevel, Phase, Progress};
use vaultport::config::{ConvertPaths, VaultConfig, CONFIG_FILENAME};
use vaultport::error::{Result, VaultError};

mod args;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let paths = ConvertPaths::new(&cli.source, &cli.destination);
    let api = VaultApi::from_dir(paths, config);

    let (tx, rx) = mpsc::channel();
    let progress = if cli.quiet {
        drop(tx);
        Progress::silent()
    } else {
        Progress::new(tx)
    };
    let renderer = thread::spawn(move || render_progress(rx));

    let outcome = if cli.dry_run {
        api.preview(progress)
    } else {
        api.convert(progress)
    };
    // The run dropped its sender, so the renderer has seen the channel close.
    let _ = renderer.join();
    let result = outcome?;

    if cli.dry_run {
        for path in &result.note_paths {
            println!("{}", path.display());
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn load_config(cli: &Cli) -> Result<VaultConfig> {
    let mut config = match &cli.config {
        Some(path) if !path.exists() => {
            return Err(VaultError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Some(path) => VaultConfig::load(path)?,
        None => match ProjectDirs::from("com", "vaultport", "vaultport") {
            Some(dirs) => VaultConfig::load(dirs.config_dir().join(CONFIG_FILENAME))?,
            None => VaultConfig::default(),
        },
    };

    if let Some(ext) = &cli.file_ext {
        config.set_file_ext(ext);
    }
    if cli.no_tags {
        config.add_tags = false;
    }
    if cli.no_source_url {
        config.add_source_url = false;
    }
    Ok(config)
}

fn render_progress(rx: Receiver<Phase>) {
    let term = Term::stderr();
    if !term.is_term() {
        for _ in rx {}
        return;
    }

    let mut counts: HashMap<Phase, usize> = HashMap::new();
    let mut current: Option<Phase> = None;
    for phase in rx {
        let count = counts.entry(phase).or_insert(0);
        *count += 1;
        if current != Some(phase) {
            if current.is_some() {
                let _ = term.write_line("");
            }
            current = Some(phase);
        }
        let _ = term.clear_line();
        let _ = term.write_str(&format!(
            "{} {}",
            phase.description().dimmed(),
            count.to_string().bold()
        ));
    }
    if current.is_some() {
        let _ = term.write_line("");
    }
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}
