use clap::Parser;
use tracing_subscriber::EnvFilter;

use comp_linker::{cli, web};

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("comp_linker=debug,info")
    } else {
        EnvFilter::new("comp_linker=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::matches::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Segments(args) => {
            cli::segments::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Links(args) => {
            cli::links::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Serve(args) => {
            web::server::run(args)?;
        }
    }

    Ok(())
}
