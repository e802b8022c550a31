//! CLI entry point for hppgen.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// Regenerate typed C++ wrapper regions from a C API description.
#[derive(Parser, Debug)]
#[command(name = "hppgen", version, about)]
struct Cli {
    /// Path to the hppgen.toml configuration file.
    #[arg(default_value = "hppgen.toml")]
    config: PathBuf,

    /// Output file path (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only verify the output is up to date; write nothing.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hppgen=info")),
        )
        .init();

    let cli = Cli::parse();
    if cli.check {
        let outcome = hppgen::check(&cli.config, cli.output.as_deref())?;
        if outcome.changed {
            anyhow::bail!(
                "{} is out of date; run `hppgen {}` to regenerate",
                outcome.path.display(),
                cli.config.display()
            );
        }
    } else {
        hppgen::run(&cli.config, cli.output.as_deref())?;
    }
    Ok(())
}
