//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod context;
mod edit;
mod export;
mod info;
mod session;
mod show;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

pub use context::Editor;
pub use session::{Session, SessionCommand};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// ColorGrid - edit 4x4 color grids and their order codes
#[derive(Parser)]
#[command(name = "cgrid")]
#[command(about = "ColorGrid - edit 4x4 color grids and their order codes")]
#[command(version)]
pub struct Cli {
    /// Path to cgrid.toml (default: discovered from the working directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where a command's grid starts from. Defaults to the first preset.
#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Start from the preset with this name
    #[arg(long, conflicts_with = "code")]
    pub preset: Option<String>,

    /// Start from this order code
    #[arg(long)]
    pub code: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a grid, its label and its order code
    Show {
        #[command(flatten)]
        start: StartArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Apply an order code and show the result
    Apply {
        /// Order code; delimiters are optional
        code: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Set individual cells (INDEX=CODE, index 0-15) and show the result
    Set {
        /// Cell edits, e.g. 3=BL 12=RD
        #[arg(required = true)]
        edits: Vec<String>,

        #[command(flatten)]
        start: StartArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Normalize an order code to canonical form
    Format {
        /// Order code with any delimiter placement
        text: String,
    },

    /// List presets
    Presets {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List palette colors
    Palette {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Copy an order code to the clipboard
    Copy {
        #[command(flatten)]
        start: StartArgs,

        /// Clipboard backend: auto, command, osc52
        #[arg(long)]
        backend: Option<String>,
    },

    /// Export a grid as an image
    Export {
        #[command(flatten)]
        start: StartArgs,

        /// Output file or directory.
        /// If omitted: {export.out}/grid-{label}.{ext}
        /// If directory (ends with /): dir/grid-{label}.{ext}
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-16)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
        scale: Option<u8>,

        /// Image format: png or jpg (default: from output extension, then config)
        #[arg(long)]
        format: Option<String>,
    },

    /// Edit a grid interactively (reads commands from stdin)
    Session,
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Whether stdout should receive ANSI colors.
pub(crate) fn use_color(no_color: bool) -> bool {
    !no_color && atty::is(atty::Stream::Stdout)
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Show {
            start,
            json,
            no_color,
        } => show::run_show(config, &start, json, no_color),
        Commands::Apply {
            code,
            json,
            no_color,
        } => edit::run_apply(config, &code, json, no_color),
        Commands::Set {
            edits,
            start,
            json,
            no_color,
        } => edit::run_set(config, &start, &edits, json, no_color),
        Commands::Format { text } => edit::run_format(&text),
        Commands::Presets { json } => info::run_presets(config, json),
        Commands::Palette { json, no_color } => info::run_palette(config, json, no_color),
        Commands::Copy { start, backend } => export::run_copy(config, &start, backend),
        Commands::Export {
            start,
            output,
            scale,
            format,
        } => export::run_export(config, &start, output.as_deref(), scale, format),
        Commands::Session => session::run_session(config),
    }
}
