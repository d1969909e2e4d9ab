

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shopquery::{QueryConfig, QueryProcessor};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Turn shopping search queries into structured JSON
#[derive(Parser, Debug)]
#[command(name = "shopquery", version)]
#[command(about = "Spell-correct, classify and extract filters from shopping queries", long_about = None)]
struct Args {
    /// Configuration file (TOML, YAML or JSON); SHOPQUERY_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Never consult the augmentation service, whatever the configuration says
    #[arg(long)]
    no_augment: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Queries to process
    #[arg(required = true)]
    queries: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("shopquery=warn".parse()?))
        .init();

    let mut config = QueryConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if args.no_augment {
        config.augmentation_enabled = false;
    }

    let processor = QueryProcessor::from_config(&config).context("failed to build query processor")?;
    info!("Processing {} queries", args.queries.len());

    let output = match args.queries.as_slice() {
        [query] => serde_json::to_value(processor.process(query).await)?,
        queries => serde_json::to_value(processor.process_batch(queries).await)?,
    };

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
