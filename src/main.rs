use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use printdesk::application::reconciler::WebhookReconciler;
use printdesk::domain::ports::OrderStoreBox;
use printdesk::domain::pricing::{PricingConfig, PrintOptions, calculate_price_breakdown};
use printdesk::infrastructure::in_memory::InMemoryOrderStore;
use printdesk::interfaces::http::{AppState, router};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Price a print job file and emit the itemized breakdown as JSON
    Quote {
        /// Job description JSON file: {"options": {...}, "pageCount": N}
        job: PathBuf,

        /// Pricing table JSON file. Defaults to the built-in rate card.
        #[arg(long)]
        pricing: Option<PathBuf>,
    },
    /// Serve the payment webhook endpoint
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobFile {
    options: PrintOptions,
    page_count: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Quote { job, pricing } => quote(&job, pricing.as_deref()),
        Command::Serve { bind } => serve(&bind).await,
    }
}

fn quote(job: &Path, pricing: Option<&Path>) -> Result<()> {
    let job: JobFile = read_json(job)?;
    let config: PricingConfig = match pricing {
        Some(path) => read_json(path)?,
        None => PricingConfig::default(),
    };

    let breakdown = calculate_price_breakdown(&job.options, job.page_count, &config);
    println!(
        "{}",
        serde_json::to_string_pretty(&breakdown).into_diagnostic()?
    );
    Ok(())
}

async fn serve(bind: &str) -> Result<()> {
    // The secret is resolved here, at the composition root; the reconciler
    // itself never reads process state
    let secret = std::env::var("RAZORPAY_WEBHOOK_SECRET").ok();
    if secret.is_none() {
        tracing::warn!(
            "RAZORPAY_WEBHOOK_SECRET is not set; webhook deliveries will be answered with 500"
        );
    }

    let store: OrderStoreBox = Box::new(InMemoryOrderStore::new());
    let reconciler = Arc::new(WebhookReconciler::new(store, secret));
    let app = router(AppState { reconciler });

    let listener = tokio::net::TcpListener::bind(bind).await.into_diagnostic()?;
    tracing::info!(%bind, "webhook endpoint listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).into_diagnostic()?;
    serde_json::from_str(&contents).into_diagnostic()
}
