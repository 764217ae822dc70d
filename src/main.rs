//! Command line access to the site content: resolve keys, list keys and
//! check translations.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use site_copy::Locale;
use site_copy::cli;
use site_copy::config::ConfigManager;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-copy", version, about = "Locale-aware copy for the marketing site")]
struct Cli {
    /// Command to run.
    #[command(subcommand)]
    command: Commands,

    /// Workspace to load locale files from. Uses the built-in content when omitted.
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Settings file. Defaults to `.site-copy.json` in the workspace root.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a key path.
    Resolve {
        /// Locale code; unsupported codes use the default locale.
        locale: String,
        /// Key path, e.g. `CTA.GET_FREE_DEMO`.
        path: String,
    },
    /// List every leaf key of a locale.
    Keys {
        /// Defaults to the default locale.
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Print values next to keys.
        #[arg(long)]
        values: bool,
    },
    /// Report inconsistent and untranslated content.
    Check,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config_manager = ConfigManager::new();
    config_manager
        .load_settings(args.root.as_deref(), args.config.as_deref())
        .context("failed to load settings")?;
    let settings = config_manager.get_settings();
    let root = args.root.as_deref();
    let mut out = std::io::stdout().lock();

    let status = match args.command {
        Commands::Resolve { locale, path } => {
            let table = cli::load_table(root, settings, true)?;
            cli::resolve(&mut out, &table, settings, &locale, &path)?
        }
        Commands::Keys { locale, values } => {
            let table = cli::load_table(root, settings, true)?;
            cli::keys(&mut out, &table, settings, locale, values)?
        }
        Commands::Check => {
            let table = cli::load_table(root, settings, false)?;
            cli::check(&mut out, &table, settings)?
        }
    };

    Ok(status.into())
}
