//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands;
use safe_area_patch::config::{ClosingStrategy, PatchConfig};
use safe_area_patch::output::OutputMode;

/// safe-area-patch - wrap Flutter page bodies in a safe-area widget
#[derive(Parser, Debug)]
#[command(
    name = "safe-area-patch",
    version,
    about = "Wrap Flutter page bodies in a safe-area widget",
    long_about = "Adds the safe-area import to each configured page and wraps the first\n\
                  `body:` container in the safe-area widget.\n\n\
                  Pages that already mention the widget are left alone, so running\n\
                  it twice is harmless."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of the discovered one
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Project root the page paths are relative to
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Patch the configured pages (default)
    Run {
        /// Show what would change without writing
        #[arg(long)]
        dry_run: bool,

        /// Closing repair strategy: balanced, two-line
        #[arg(long)]
        closing: Option<ClosingStrategy>,
    },

    /// Write the default config to ./safe-area-patch.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    // init may be replacing a broken config
    let mut config = match (&cli.command, PatchConfig::discover(cli.config.as_deref())) {
        (_, Ok(config)) => config,
        (Some(Command::Init { .. }), Err(e)) => {
            log::warn!("{e}; starting from the defaults");
            PatchConfig::default()
        },
        (_, Err(e)) => return Err(e.into()),
    };
    if let Some(root) = cli.root {
        config.root = root;
    }

    match cli.command {
        Some(Command::Init { force }) => commands::init(&config, force, output_mode),
        Some(Command::Run { dry_run, closing }) => {
            if let Some(closing) = closing {
                config.closing = closing;
            }
            commands::run(config, dry_run, output_mode)
        },
        None => commands::run(config, false, output_mode),
    }
}
