use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitecfg::cli::{self, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "sitecfg=debug"
    } else {
        "sitecfg=info"
    };

    // Initialize tracing; logs go to stderr so `show` output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Init { path, force } => cli::commands::init(&path, force),
        Commands::Check { config } => cli::commands::check(config.as_deref()),
        Commands::Show { config, format } => cli::commands::show(config.as_deref(), format),
        Commands::Export { config, output } => {
            cli::commands::export(config.as_deref(), output.as_deref())
        }
    }
}
