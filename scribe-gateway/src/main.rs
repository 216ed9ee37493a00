//! scribe-gateway: LLM endpoints for clinical note taking

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scribe_gateway::{build_app, config::Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "scribe_gateway={level},scribe_agent={level},tower_http=info,info",
            level = args.log_level
        )
        .into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    info!("======================================");
    info!("  Scribe Gateway");
    info!("======================================");
    info!("Provider: {}", args.provider);
    info!("Model: {}", args.model);
    info!("Listen: {}", args.listen_addr());
    info!("CORS origins: {}", args.cors_origins);
    info!("======================================");

    let app = build_app(&args)
        .inspect_err(|e| error!("Configuration error: {}", e))
        .context("invalid gateway configuration")?;

    let listener = tokio::net::TcpListener::bind(args.listen_addr()).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
