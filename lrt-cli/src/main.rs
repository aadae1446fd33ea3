//! codeml-lrt: likelihood ratio test between two codeml site models.
//!
//! CLI entry point using clap for argument parsing.

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "codeml-lrt",
    version,
    about = "Perform a likelihood ratio test between two nested codeml models",
    long_about = "Reads the codeml.ctl and output file of a null (H0) and an alternate (H1)\n\
                   codeml run, and tests the site models against each other with a\n\
                   chi-squared likelihood ratio test."
)]
struct Cli {
    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    compare: commands::compare::CompareArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging; stdout is reserved for the report
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("codeml-lrt v{}", env!("CARGO_PKG_VERSION"));

    commands::compare::run(cli.compare)
}
