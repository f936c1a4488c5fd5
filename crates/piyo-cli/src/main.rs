use std::io::{BufWriter, stdout};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use piyo_core::ParseOptions;

use piyo_cli::commands::{export, read_input, summary};
use piyo_cli::{Cli, Commands, Config};

/// Resolve the parse options from the `--offset` flag or the config.
fn resolve_options(flag: Option<&str>, config: &Config) -> Result<ParseOptions> {
    let offset = match flag {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid UTC offset: {raw}"))?,
        None => config
            .offset()
            .with_context(|| format!("invalid configured UTC offset: {}", config.utc_offset))?,
    };
    Ok(ParseOptions { offset })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let options = resolve_options(cli.offset.as_deref(), &config)?;

    match &cli.command {
        Some(Commands::Summary { file }) => {
            let text = read_input(file.as_deref())?;
            let stdout = stdout();
            summary::run(&mut stdout.lock(), &text, &options)?;
        }
        Some(Commands::Export { file, pretty }) => {
            let text = read_input(file.as_deref())?;
            let stdout = stdout();
            let mut writer = BufWriter::new(stdout.lock());
            export::run(&mut writer, &text, *pretty, &options)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
