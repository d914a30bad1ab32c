use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use shelf_cli::demo::demo_registry;
use shelf_cli::{EditorSource, Shell, ShellConfig};

#[derive(Parser)]
#[command(author, version, about = "Interactive shell for typed, prefix-dispatched commands", long_about = None)]
struct Cli {
    /// Path to a TOML shell configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the prompt
    #[arg(short, long)]
    prompt: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => ShellConfig::default(),
    };
    if let Some(prompt) = cli.prompt {
        config.prompt = prompt;
    }

    let registry = demo_registry(config.matching.into())?;
    let shell = Shell::new(&registry, config);
    let mut source = EditorSource::new()?;
    shell.run(&mut source, &mut std::io::stdout())
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        "shelf=debug,shelf_cli=debug,shelf_core=debug"
    } else {
        "shelf=warn,shelf_cli=warn,shelf_core=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
