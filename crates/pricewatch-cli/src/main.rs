use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pricewatch_aggregate::{Aggregator, DayCache, SystemClock};
use pricewatch_core::AppConfig;
use pricewatch_sources::{
    CandidateSource, Hausdorf, HttpClient, MieleUnique, Mieles, Tehnikapremium,
};

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Compare Miele product prices across four catalogs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a product by name or SKU and print the price comparison.
    Query {
        /// Product name or article, e.g. "WWR880WPS" or "Картридж TwinDos".
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Query { text } => run_query(&text.join(" ")).await,
    }
}

async fn run_query(text: &str) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    tracing::info!(query = text, timeout_secs = config.request_timeout_secs, "starting lookup");
    let http = HttpClient::new(config.request_timeout_secs, &config.user_agent)?;

    let primary: Arc<dyn CandidateSource> = Arc::new(Tehnikapremium::new(
        http.clone(),
        &config.tehnikapremium_base_url,
    ));
    let competitors: Vec<Arc<dyn CandidateSource>> = vec![
        Arc::new(Mieles::new(
            http.clone(),
            &config.mieles_api_base_url,
            &config.mieles_referer,
        )),
        Arc::new(Hausdorf::new(http.clone(), &config.hausdorf_base_url)),
        Arc::new(MieleUnique::new(http, &config.miele_unique_base_url)),
    ];

    let aggregator = Aggregator::new(
        primary,
        competitors,
        DayCache::new(Arc::new(SystemClock)),
        &config.brand_name,
        config.result_limit,
    );

    let report = aggregator.handle_query(text).await?;
    println!("{}", report.render());
    Ok(())
}
