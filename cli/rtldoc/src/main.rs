//! rtldoc CLI: interface tables for HDL entities from a parser dump.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser, Subcommand};

use manifest::{RtldocManifest, MANIFEST_NAME};

#[derive(Parser)]
#[command(name = "rtldoc", version, about = "Generate interface documentation for HDL entities")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render generic and port tables from an hdlConvertor JSON dump
    Doc {
        /// Parse result of the HDL front end (JSON)
        input: PathBuf,
        /// The HDL file the dump was produced from (names the document)
        #[arg(long)]
        source: Option<String>,
        /// Output format (markdown, text, json)
        #[arg(long)]
        format: Option<String>,
        /// Output file (default: <name>.<ext> next to the input)
        #[arg(long)]
        output: Option<String>,
        /// Document title (default: the source file stem)
        #[arg(long)]
        title: Option<String>,
        /// Exit with an error if any declaration could not be normalized
        #[arg(long)]
        strict: bool,
        /// Print the document instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Normalize a dump and report problems without rendering
    Check {
        /// Parse result of the HDL front end (JSON)
        input: PathBuf,
        /// The HDL file the dump was produced from
        #[arg(long)]
        source: Option<String>,
    },
    /// Show the type classification tables in effect
    Types,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let manifest = load_manifest_optional(&cwd)?;

    match cli.command {
        Commands::Doc {
            input,
            source,
            format,
            output,
            title,
            strict,
            stdout,
        } => {
            let opts = commands::doc::DocOptions {
                input: &input,
                source: source.as_deref(),
                format: format.as_deref(),
                output: output.as_deref(),
                title: title.as_deref(),
                strict,
                stdout,
            };
            commands::doc::run(&opts, manifest.as_ref()).map(|_| ())
        }

        Commands::Check { input, source } => {
            commands::check::run(&input, source.as_deref(), manifest.as_ref()).map(|_| ())
        }

        Commands::Types => commands::types::run(manifest.as_ref()),
    }
}

/// Try to load a manifest from the current directory upward.
fn load_manifest_optional(cwd: &Path) -> anyhow::Result<Option<RtldocManifest>> {
    match RtldocManifest::find_and_load(cwd)? {
        Some((manifest, dir)) => {
            log::debug!("using {}", dir.join(MANIFEST_NAME).display());
            Ok(Some(manifest))
        }
        None => Ok(None),
    }
}
