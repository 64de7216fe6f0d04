//! Builds a dossier from the command line.
//!
//! Usage: `generate_dossier <CNPJ> [json|full|minimal]`

use rust_cnpj_dossier::aggregator::DataAggregator;
use rust_cnpj_dossier::config::Config;
use rust_cnpj_dossier::dossier::generate_dossier;
use rust_cnpj_dossier::presentation::{self, Layout};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for the output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_cnpj_dossier=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = env::args().skip(1);
    let cnpj = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: generate_dossier <CNPJ> [json|full|minimal]"))?;
    let output = args.next().unwrap_or_else(|| "json".to_string());

    let config = Config::from_env()?;
    let aggregator = DataAggregator::new(&config)?;
    let dossier = generate_dossier(&aggregator, &cnpj).await?;

    match output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&dossier)?),
        "full" => print!("{}", presentation::render(&dossier, Layout::Full)?),
        "minimal" => print!("{}", presentation::render(&dossier, Layout::Minimal)?),
        other => anyhow::bail!("unknown output '{}', expected json, full or minimal", other),
    }

    Ok(())
}
