// src/main.rs — testgen entry point

use clap::Parser;

use testgen::cli::{Cli, Commands};
use testgen::infra::config::Config;
use testgen::infra::logger;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no testgen.toml)
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };

    // Initialize logging (respects RUST_LOG)
    logger::init_logging(&config.logging.level);

    match cli.command {
        Commands::Compare {
            ai,
            reference,
            prd,
            endpoint,
            json,
        } => {
            testgen::cli::compare::run_compare(
                &ai,
                reference.as_deref(),
                prd.as_deref(),
                endpoint.as_deref(),
                json,
                &config,
            )
            .await
        }
        Commands::Score {
            ai,
            reference,
            prd,
            json,
        } => testgen::cli::score::run_score(&ai, reference.as_deref(), prd.as_deref(), json),
        Commands::Coverage { ai, reference } => {
            testgen::cli::coverage::run_coverage(&ai, &reference)
        }
        Commands::Export {
            input,
            format,
            output,
            case_id,
        } => testgen::cli::export::run_export(
            &input,
            &format,
            output.as_deref(),
            case_id.as_deref(),
        ),
    }
}
